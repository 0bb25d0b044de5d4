//! Mouse event handler.
//!
//! Pure functions that transform AppState in response to mouse events. The
//! caller supplies the pane rectangles of the last layout.

use crate::state::{AppState, FocusPane};
use ratatui::layout::Rect;

/// Rows moved by one wheel notch over the value pane.
pub const WHEEL_SCROLL_LINES: u16 = 3;

/// Pane under the mouse pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseTarget {
    /// The search box.
    Search,
    /// The key list.
    KeyList,
    /// The value pane.
    ValuePane,
    /// Borders of the screen, the status bar, or outside the terminal.
    Elsewhere,
}

/// Wheel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelDirection {
    /// Towards the top of the content.
    Up,
    /// Towards the end of the content.
    Down,
}

/// Find the pane containing (`column`, `row`).
pub fn detect_target(column: u16, row: u16, search: Rect, key_list: Rect, value: Rect) -> MouseTarget {
    let contains = |area: Rect| {
        column >= area.x
            && column < area.x.saturating_add(area.width)
            && row >= area.y
            && row < area.y.saturating_add(area.height)
    };

    if contains(search) {
        MouseTarget::Search
    } else if contains(key_list) {
        MouseTarget::KeyList
    } else if contains(value) {
        MouseTarget::ValuePane
    } else {
        MouseTarget::Elsewhere
    }
}

/// Apply one wheel notch.
///
/// Over the key list the selection moves one item. Over the value pane the
/// value scrolls [`WHEEL_SCROLL_LINES`] rows, bounded by `value_rows`. Focus is
/// unchanged.
pub fn handle_wheel(
    state: &mut AppState,
    target: MouseTarget,
    direction: WheelDirection,
    value_rows: usize,
) {
    match (target, direction) {
        (MouseTarget::KeyList, WheelDirection::Down) => state.select_next(),
        (MouseTarget::KeyList, WheelDirection::Up) => state.select_prev(),
        (MouseTarget::ValuePane, WheelDirection::Down) => {
            state.scroll_detail_down(WHEEL_SCROLL_LINES, value_rows);
        }
        (MouseTarget::ValuePane, WheelDirection::Up) => {
            state.scroll_detail_up(WHEEL_SCROLL_LINES);
        }
        (MouseTarget::Search | MouseTarget::Elsewhere, _) => {}
    }
}

/// Apply a left click: the search box takes focus, either other pane gives it
/// to the key list.
pub fn handle_click(state: &mut AppState, target: MouseTarget) {
    match target {
        MouseTarget::Search => state.focus = FocusPane::Search,
        MouseTarget::KeyList | MouseTarget::ValuePane => state.focus = FocusPane::List,
        MouseTarget::Elsewhere => {}
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "mouse_handler_tests.rs"]
mod tests;
