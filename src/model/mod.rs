//! Domain model types (pure).
//!
//! All types in this module are plain data; nothing here performs I/O.

pub mod error;
pub mod key_action;
pub mod key_item;

// Re-export for convenience
pub use error::{AppError, StoreError};
pub use key_action::KeyAction;
pub use key_item::{
    pattern_for, CountResult, KeyItem, KeyType, ScanBatch, SearchQuery, MATCH_ALL,
};
