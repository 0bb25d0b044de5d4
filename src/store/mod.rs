//! Store gateway (impure shell).
//!
//! [`StoreClient`] is the capability the scan pipeline needs from a key-value
//! store: cursor-based enumeration, type inspection and one read per value type.
//! [`RedisStore`] implements it on top of the `redis` crate for standalone,
//! sentinel and cluster deployments.

mod redis_store;

pub use redis_store::{connect, RedisStore};

use crate::model::StoreError;
use std::collections::BTreeMap;

/// Cursor value that starts an enumeration and, when returned, ends it.
pub const TERMINAL_CURSOR: u64 = 0;

/// One round-trip of cursor-based enumeration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanPage {
    /// Keys returned by this round. May be empty even when more remain.
    pub keys: Vec<String>,
    /// Cursor for the next round; [`TERMINAL_CURSOR`] once exhausted.
    pub next_cursor: u64,
}

impl ScanPage {
    /// Whether the store reported the end of the enumeration.
    pub fn is_last(&self) -> bool {
        self.next_cursor == TERMINAL_CURSOR
    }
}

/// Read-only access to a key-value store.
///
/// Implementations must tolerate concurrent calls from several background
/// tasks; the trait is shared as `Arc<dyn StoreClient>`.
pub trait StoreClient: Send + Sync {
    /// Fetch one page of keys matching the glob `pattern`, starting at `cursor`.
    ///
    /// `count_hint` is advisory; the store may return more or fewer keys.
    fn scan_page(&self, cursor: u64, pattern: &str, count_hint: usize)
        -> Result<ScanPage, StoreError>;

    /// Raw type tag of `key` (`"string"`, `"list"`, ..., or `"none"` if missing).
    fn type_of(&self, key: &str) -> Result<String, StoreError>;

    /// Value of a string key.
    fn get_string(&self, key: &str) -> Result<String, StoreError>;

    /// All elements of a list, in order.
    fn get_list_range(&self, key: &str) -> Result<Vec<String>, StoreError>;

    /// All members of a set, in store order.
    fn get_set_members(&self, key: &str) -> Result<Vec<String>, StoreError>;

    /// All members of a sorted set by ascending score, without scores.
    fn get_sorted_set_range(&self, key: &str) -> Result<Vec<String>, StoreError>;

    /// All field/value pairs of a hash.
    fn get_hash_all(&self, key: &str) -> Result<BTreeMap<String, String>, StoreError>;
}
