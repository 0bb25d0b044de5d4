//! TUI rendering and terminal management (impure shell)

mod busy_indicator;
pub mod constants;
mod layout;
mod search_input;
mod styles;

pub use busy_indicator::BusyIndicator;
pub use search_input::SearchInput;
pub use styles::{ColorConfig, ViewStyles};

use crate::bus::{Command, CommandBus, Message};
use crate::config::keybindings::KeyBindings;
use crate::config::ResolvedConfig;
use crate::model::{AppError, KeyAction};
use crate::state::mouse_handler::{self, WheelDirection};
use crate::state::{search_input_handler, AppState, FocusPane};
use crate::store::StoreClient;
use constants::{DETAIL_PAGE_LINES, EVENT_POLL_INTERVAL};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use layout::ScreenAreas;
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::{self, Stdout};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    bus: CommandBus,
    results: Receiver<Message>,
    key_bindings: KeyBindings,
    styles: ViewStyles,
    /// Busy indicator animation frame, advanced once per poll interval
    spinner_frame: usize,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture,
    /// and issues the startup scan, count and clock tick.
    pub fn new(
        store: Arc<dyn StoreClient>,
        limit: usize,
        colors: ColorConfig,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        let (tx, rx) = mpsc::channel();
        let bus = CommandBus::new(store, tx);
        let (app_state, startup) = AppState::startup(limit);
        bus.dispatch_all(startup);

        Ok(Self {
            terminal,
            app_state,
            bus,
            results: rx,
            key_bindings: KeyBindings::default(),
            styles: ViewStyles::with_color_config(colors),
            spinner_frame: 0,
        })
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). Task results are drained between
    /// terminal events, so the UI never waits on the store.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            if event::poll(EVENT_POLL_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Release => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    Event::Resize(width, height) => {
                        debug!(width, height, "Terminal resized");
                    }
                    _ => {}
                }
            } else {
                self.spinner_frame = self.spinner_frame.wrapping_add(1);
            }

            self.drain_results();
            self.draw()?;
        }
    }

    /// Apply every finished task result without blocking.
    fn drain_results(&mut self) {
        loop {
            match self.results.try_recv() {
                Ok(message) => {
                    let follow_up = self.app_state.apply(message);
                    self.dispatch(follow_up);
                }
                Err(TryRecvError::Empty) => break,
                // The bus holds a sender, so this only happens after shutdown.
                Err(TryRecvError::Disconnected) => break,
            }
        }
    }

    fn dispatch(&self, commands: Vec<Command>) {
        self.bus.dispatch_all(commands);
    }

    /// Handle a keyboard event. Returns true if the app should quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Special case: Ctrl+C should always quit, even if not in bindings
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        match self.app_state.focus {
            FocusPane::Search => {
                self.handle_search_key(key);
                false
            }
            FocusPane::List => self.handle_list_key(key),
        }
    }

    /// Keys while the search box has focus. Printable characters always edit.
    fn handle_search_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let commands = match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Tab => {
                self.app_state.focus = FocusPane::List;
                return;
            }
            KeyCode::Char('u') if ctrl => self
                .app_state
                .edit_search(search_input_handler::handle_clear),
            KeyCode::Char(_) if ctrl => return,
            KeyCode::Char(ch) => self
                .app_state
                .edit_search(|s| search_input_handler::handle_char_input(s, ch)),
            KeyCode::Backspace => self
                .app_state
                .edit_search(search_input_handler::handle_backspace),
            KeyCode::Delete => self
                .app_state
                .edit_search(search_input_handler::handle_delete),
            KeyCode::Left => self
                .app_state
                .edit_search(search_input_handler::handle_cursor_left),
            KeyCode::Right => self
                .app_state
                .edit_search(search_input_handler::handle_cursor_right),
            KeyCode::Home => self.app_state.edit_search(search_input_handler::handle_home),
            KeyCode::End => self.app_state.edit_search(search_input_handler::handle_end),
            _ => return,
        };
        self.dispatch(commands);
    }

    /// Keys while the key list has focus, dispatched through the bindings.
    fn handle_list_key(&mut self, key: KeyEvent) -> bool {
        let action = match self.key_bindings.get(key) {
            Some(action) => action,
            None => return false, // Unknown key, ignore
        };

        match action {
            KeyAction::Quit => return true,
            KeyAction::SelectNext => self.app_state.select_next(),
            KeyAction::SelectPrev => self.app_state.select_prev(),
            KeyAction::SelectFirst => self.app_state.select_first(),
            KeyAction::SelectLast => self.app_state.select_last(),
            KeyAction::DetailPageDown => {
                let rows = self.value_rows();
                self.app_state.scroll_detail_down(DETAIL_PAGE_LINES, rows);
            }
            KeyAction::DetailPageUp => self.app_state.scroll_detail_up(DETAIL_PAGE_LINES),
            KeyAction::FocusSearch => self.app_state.focus = FocusPane::Search,
            KeyAction::ToggleFocus => self.app_state.toggle_focus(),
            KeyAction::Refresh => {
                info!(search_text = self.app_state.search_text(), "Manual refresh");
                let commands = self.app_state.refresh();
                self.dispatch(commands);
            }
        }
        false
    }

    /// Mouse wheel over the key list moves the selection, over the value pane
    /// it scrolls. A left click moves focus to the clicked pane.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let Some(areas) = self.screen_areas() else {
            return;
        };
        let target = mouse_handler::detect_target(
            mouse.column,
            mouse.row,
            areas.search,
            areas.key_list,
            areas.value,
        );

        let direction = match mouse.kind {
            MouseEventKind::ScrollDown => WheelDirection::Down,
            MouseEventKind::ScrollUp => WheelDirection::Up,
            MouseEventKind::Down(MouseButton::Left) => {
                mouse_handler::handle_click(&mut self.app_state, target);
                return;
            }
            _ => return,
        };
        let rows = layout::value_rows(&self.app_state, areas.value);
        mouse_handler::handle_wheel(&mut self.app_state, target, direction, rows);
    }

    /// Screen regions for the current terminal size.
    fn screen_areas(&self) -> Option<ScreenAreas> {
        match self.terminal.size() {
            Ok(size) => Some(ScreenAreas::for_frame(Rect::new(0, 0, size.width, size.height))),
            Err(e) => {
                warn!(error = %e, "Terminal size unavailable");
                None
            }
        }
    }

    /// Height of the selected value in the value pane, wrapped rows included.
    fn value_rows(&self) -> usize {
        self.screen_areas()
            .map(|areas| layout::value_rows(&self.app_state, areas.value))
            .unwrap_or(0)
    }

    fn draw(&mut self) -> Result<(), TuiError> {
        let state = &self.app_state;
        let styles = &self.styles;
        let spinner_frame = self.spinner_frame;
        self.terminal.draw(|frame| {
            layout::render_layout(frame, state, styles, spinner_frame);
        })?;
        Ok(())
    }
}

/// Initialize and run the TUI application against a connected store
///
/// This is the main entry point for the TUI. It handles terminal
/// setup, runs the event loop, and ensures cleanup on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run(
    config: &ResolvedConfig,
    store: Arc<dyn StoreClient>,
    colors: ColorConfig,
) -> Result<(), TuiError> {
    let mut app = match TuiApp::new(store, config.count, colors) {
        Ok(app) => app,
        Err(e) => {
            // Raw mode may already be on when the alternate screen fails.
            let _ = restore_terminal();
            return Err(e);
        }
    };

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture and the alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
