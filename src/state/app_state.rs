//! Application state and transitions.
//!
//! AppState is the interaction controller: it owns everything the screen shows
//! and decides which background tasks to issue. It never performs I/O; every
//! transition returns the [`Command`]s the caller must hand to the bus.

use crate::bus::{Command, Message};
use crate::model::{pattern_for, KeyItem, SearchQuery};
use crate::state::search_input_handler::SearchBox;
use tracing::{debug, info};

// ===== FocusPane =====

/// Which pane receives keyboard input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FocusPane {
    /// Typing edits the search pattern.
    #[default]
    Search,
    /// Keys navigate the key list and value pane.
    List,
}

// ===== AppState =====

/// Interaction state. Single owner: the UI thread.
///
/// # State Machine
///
/// Busy flags make the states implicit:
///
/// - **Input changed**: new search text, both busy flags set, scan + count
///   issued for the new text. Visible items and count stay until replaced.
/// - **Scan completed** for text T: applied only if T is the current text.
/// - **Count completed** for text T: applied only if T is the current text.
/// - **Tick**: always applied; schedules the next tick.
///
/// Results tagged with an older search text are dropped unconditionally, so
/// the final state does not depend on the order tasks finish in.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Search box contents; its text is the staleness tag for results.
    search: SearchBox,

    /// Items of the last accepted scan, in store order.
    items: Vec<KeyItem>,

    /// Last accepted count estimate.
    count: usize,

    /// A scan for the current text is in flight.
    scanning: bool,

    /// A count for the current text is in flight.
    counting: bool,

    /// Last clock tick; `None` until the first tick arrives.
    clock: Option<String>,

    /// Error from the last scan task for the current text.
    scan_error: Option<String>,

    /// Error from the last count task for the current text.
    count_error: Option<String>,

    /// Per-scan key limit, captured into every scan command.
    limit: usize,

    /// Index into `items` of the highlighted key.
    selected: usize,

    /// Which pane has keyboard focus.
    pub focus: FocusPane,

    /// Vertical scroll offset of the value pane, in screen rows.
    pub detail_scroll: u16,
}

impl AppState {
    /// Initial state: empty search, no items, zero count, idle.
    pub fn new(limit: usize) -> Self {
        Self {
            search: SearchBox::default(),
            items: Vec::new(),
            count: 0,
            scanning: false,
            counting: false,
            clock: None,
            scan_error: None,
            count_error: None,
            limit: limit.max(1),
            selected: 0,
            focus: FocusPane::default(),
            detail_scroll: 0,
        }
    }

    /// Initial state plus the startup commands: match-all scan and count,
    /// and the first clock tick.
    pub fn startup(limit: usize) -> (Self, Vec<Command>) {
        let mut state = Self::new(limit);
        let mut commands = state.issue_search();
        commands.push(Command::Tick);
        (state, commands)
    }

    // ----- accessors -----

    /// Current search text.
    pub fn search_text(&self) -> &str {
        self.search.text()
    }

    /// Search box including cursor.
    pub fn search_box(&self) -> &SearchBox {
        &self.search
    }

    /// Visible items.
    pub fn items(&self) -> &[KeyItem] {
        &self.items
    }

    /// Last accepted count estimate.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether a scan for the current text is running.
    pub fn is_scanning(&self) -> bool {
        self.scanning
    }

    /// Whether a count for the current text is running.
    pub fn is_counting(&self) -> bool {
        self.counting
    }

    /// Whether any task for the current text is running.
    pub fn is_busy(&self) -> bool {
        self.scanning || self.counting
    }

    /// Last clock string, if a tick has arrived.
    pub fn clock(&self) -> Option<&str> {
        self.clock.as_deref()
    }

    /// Task-level error to show in the status bar, if any.
    pub fn notice(&self) -> Option<String> {
        match (&self.scan_error, &self.count_error) {
            (Some(scan), Some(count)) if scan == count => Some(scan.clone()),
            (Some(scan), Some(count)) => Some(format!("{scan}; {count}")),
            (Some(e), None) | (None, Some(e)) => Some(e.clone()),
            (None, None) => None,
        }
    }

    /// Per-scan key limit.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Index of the highlighted item.
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The highlighted item, if the list is not empty.
    pub fn selected_item(&self) -> Option<&KeyItem> {
        self.items.get(self.selected)
    }

    // ----- search transitions -----

    /// Replace the search text (Input changed).
    ///
    /// Returns no commands if the text is unchanged.
    pub fn set_search_text(&mut self, text: impl Into<String>) -> Vec<Command> {
        self.edit_search(|_| SearchBox::new(text))
    }

    /// Apply an edit to the search box. A change of text is an Input-changed
    /// transition; cursor movement alone issues nothing.
    pub fn edit_search(&mut self, edit: impl FnOnce(SearchBox) -> SearchBox) -> Vec<Command> {
        let edited = edit(self.search.clone());
        let changed = edited.text() != self.search.text();
        self.search = edited;

        if changed {
            info!(search_text = self.search.text(), "Search changed");
            self.issue_search()
        } else {
            Vec::new()
        }
    }

    /// Re-run scan and count for the current text.
    pub fn refresh(&mut self) -> Vec<Command> {
        self.issue_search()
    }

    fn issue_search(&mut self) -> Vec<Command> {
        let search_text = self.search.text().to_string();
        self.scanning = true;
        self.counting = true;
        self.scan_error = None;
        self.count_error = None;

        vec![
            Command::Scan {
                search_text: search_text.clone(),
                query: SearchQuery::new(&search_text, self.limit),
            },
            Command::Count {
                pattern: pattern_for(&search_text),
                search_text,
            },
        ]
    }

    // ----- task results -----

    /// Merge one task result. Returns follow-up commands (the next tick).
    pub fn apply(&mut self, message: Message) -> Vec<Command> {
        match message {
            Message::ScanCompleted {
                search_text,
                result,
            } => {
                if !self.is_current(&search_text, "scan") {
                    return Vec::new();
                }
                self.scanning = false;
                match result {
                    Ok(batch) => {
                        self.scan_error = None;
                        self.replace_items(batch.items);
                    }
                    Err(e) => self.scan_error = Some(format!("scan failed: {e}")),
                }
                Vec::new()
            }
            Message::CountCompleted {
                search_text,
                result,
            } => {
                if !self.is_current(&search_text, "count") {
                    return Vec::new();
                }
                self.counting = false;
                match result {
                    Ok(counted) => {
                        self.count_error = None;
                        self.count = counted.count;
                    }
                    Err(e) => self.count_error = Some(format!("count failed: {e}")),
                }
                Vec::new()
            }
            Message::Tick { clock } => {
                self.clock = Some(clock);
                vec![Command::Tick]
            }
        }
    }

    fn is_current(&self, search_text: &str, kind: &str) -> bool {
        let current = search_text == self.search.text();
        if !current {
            debug!(
                kind,
                issued_for = search_text,
                current = self.search.text(),
                "Discarding stale result"
            );
        }
        current
    }

    /// Swap in a new batch, keeping the highlighted key if it is still present.
    fn replace_items(&mut self, items: Vec<KeyItem>) {
        let previous_key = self.selected_item().map(|item| item.key().to_string());
        self.items = items;

        let selected = previous_key
            .and_then(|key| self.items.iter().position(|item| item.key() == key))
            .unwrap_or(0);
        self.select(selected);
    }

    // ----- list navigation -----

    fn select(&mut self, index: usize) {
        let clamped = index.min(self.items.len().saturating_sub(1));
        if clamped != self.selected {
            self.detail_scroll = 0;
        }
        self.selected = clamped;
    }

    /// Highlight the next item. Saturates at the last item.
    pub fn select_next(&mut self) {
        self.select(self.selected.saturating_add(1));
    }

    /// Highlight the previous item. Saturates at the first item.
    pub fn select_prev(&mut self) {
        self.select(self.selected.saturating_sub(1));
    }

    /// Highlight the first item.
    pub fn select_first(&mut self) {
        self.select(0);
    }

    /// Highlight the last item.
    pub fn select_last(&mut self) {
        self.select(usize::MAX);
    }

    /// Scroll the value pane down, stopping once its last row is at the top.
    ///
    /// `content_rows` is the height of the selected value as laid out in the
    /// pane, wrapped rows included.
    pub fn scroll_detail_down(&mut self, lines: u16, content_rows: usize) {
        let max = u16::try_from(content_rows.saturating_sub(1)).unwrap_or(u16::MAX);
        self.detail_scroll = self.detail_scroll.saturating_add(lines).min(max);
    }

    /// Scroll the value pane up.
    pub fn scroll_detail_up(&mut self, lines: u16) {
        self.detail_scroll = self.detail_scroll.saturating_sub(lines);
    }

    /// Switch focus between search box and key list.
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FocusPane::Search => FocusPane::List,
            FocusPane::List => FocusPane::Search,
        };
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
