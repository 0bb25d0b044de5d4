//! Pane styling configuration.
//!
//! Provides distinct colors for key types, selection, focus and errors.

use crate::model::KeyType;
use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var_os("NO_COLOR").is_none();
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

// ===== ViewStyles =====

/// Styles shared by every pane.
///
/// With colors disabled only modifiers (bold, reversed) remain, so the
/// selection and focus are still visible on monochrome terminals.
#[derive(Debug, Clone, Copy)]
pub struct ViewStyles {
    /// Border of the focused pane.
    pub focused_border: Style,
    /// Border of unfocused panes.
    pub border: Style,
    /// Highlighted row in the key list.
    pub selected: Style,
    /// Error rows and error values.
    pub error: Style,
    /// Status bar base style.
    pub status: Style,
    /// Status bar notice.
    pub notice: Style,
    colors: bool,
}

impl ViewStyles {
    /// Create styles for the given color configuration.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                focused_border: Style::default().fg(Color::Yellow),
                border: Style::default().fg(Color::DarkGray),
                selected: Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
                error: Style::default().fg(Color::Red),
                status: Style::default().bg(Color::DarkGray).fg(Color::White),
                notice: Style::default().bg(Color::DarkGray).fg(Color::LightRed),
                colors: true,
            }
        } else {
            Self {
                focused_border: Style::default().add_modifier(Modifier::BOLD),
                border: Style::default(),
                selected: Style::default().add_modifier(Modifier::REVERSED),
                error: Style::default(),
                status: Style::default(),
                notice: Style::default().add_modifier(Modifier::BOLD),
                colors: false,
            }
        }
    }

    /// Style of the `[type]` tag in the key list.
    pub fn type_tag(&self, key_type: &KeyType) -> Style {
        if !self.colors {
            return Style::default();
        }
        let color = match key_type {
            KeyType::String => Color::Green,
            KeyType::List => Color::Cyan,
            KeyType::Set => Color::Magenta,
            KeyType::ZSet => Color::Blue,
            KeyType::Hash => Color::Yellow,
            KeyType::Unsupported(_) => Color::Gray,
        };
        Style::default().fg(color)
    }

    /// Border style for a pane with or without focus.
    pub fn border_for(&self, focused: bool) -> Style {
        if focused {
            self.focused_border
        } else {
            self.border
        }
    }
}

impl Default for ViewStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::default())
    }
}

// ===== Tests =====
