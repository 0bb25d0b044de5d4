//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for all layout-related numeric values to enable
//! consistent tuning across the application.

use std::time::Duration;

/// Height of the search box in lines (border + input line).
pub const SEARCH_INPUT_HEIGHT: u16 = 3;

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Width percentage of the key list; the value pane takes the rest.
pub const KEY_LIST_WIDTH_PERCENT: u16 = 40;

/// Lines moved by one detail page-down / page-up.
pub const DETAIL_PAGE_LINES: u16 = 10;

/// How long the event loop waits for terminal input before draining task results.
pub const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(100);
