//! UI state machine (pure).
//!
//! All state transitions are pure functions testable without TUI.

pub mod app_state;
pub mod mouse_handler;
pub mod search_input_handler;

// Re-export for convenience
pub use app_state::{AppState, FocusPane};
pub use search_input_handler::SearchBox;
