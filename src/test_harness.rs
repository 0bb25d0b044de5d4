//! In-memory store for tests.
//!
//! Implements [`StoreClient`] over a sorted map with a configurable page size,
//! so tests can force multi-round enumeration, and with hooks to inject
//! enumeration or per-key failures.
//!
//! The integration suites compile this same file through `tests/support`, so
//! paths go through the parent module rather than `crate`.

use super::model::StoreError;
use super::store::{ScanPage, StoreClient, TERMINAL_CURSOR};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};

/// A value held by [`MemoryStore`].
#[derive(Debug, Clone)]
pub enum StoredValue {
    /// Plain string.
    String(String),
    /// List, in order.
    List(Vec<String>),
    /// Set members, in insertion order.
    Set(Vec<String>),
    /// Sorted set members, already ranked.
    ZSet(Vec<String>),
    /// Hash fields.
    Hash(BTreeMap<String, String>),
    /// A type the viewer cannot display, reported under the given tag.
    Other(&'static str),
}

impl StoredValue {
    fn tag(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Set(_) => "set",
            Self::ZSet(_) => "zset",
            Self::Hash(_) => "hash",
            Self::Other(tag) => tag,
        }
    }
}

/// Store double: keys enumerate in sorted order, cursors are offsets + 1.
#[derive(Debug)]
pub struct MemoryStore {
    data: BTreeMap<String, StoredValue>,
    /// Keys examined per round (before pattern filtering), like `SCAN COUNT`.
    page_size: usize,
    fail_scan: bool,
    failing_keys: BTreeSet<String>,
    failing_type_keys: BTreeSet<String>,
    scan_calls: AtomicUsize,
    read_calls: AtomicUsize,
}

impl MemoryStore {
    /// Empty store paging 10 keys per round.
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
            page_size: 10,
            fail_scan: false,
            failing_keys: BTreeSet::new(),
            failing_type_keys: BTreeSet::new(),
            scan_calls: AtomicUsize::new(0),
            read_calls: AtomicUsize::new(0),
        }
    }

    /// Store `value` under `key`.
    pub fn with(mut self, key: &str, value: StoredValue) -> Self {
        self.data.insert(key.to_string(), value);
        self
    }

    /// Store a string value under `key`.
    pub fn with_string(self, key: &str, value: &str) -> Self {
        self.with(key, StoredValue::String(value.to_string()))
    }

    /// `count` string keys named `{prefix}{i}`.
    pub fn with_many(mut self, prefix: &str, count: usize) -> Self {
        for i in 0..count {
            self.data
                .insert(format!("{prefix}{i}"), StoredValue::String(i.to_string()));
        }
        self
    }

    /// One string key per entry of `keys`, each holding `value of {key}`.
    /// Repeated keys are stored once.
    pub fn with_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for key in keys {
            let key = key.as_ref();
            self.data
                .insert(key.to_string(), StoredValue::String(format!("value of {key}")));
        }
        self
    }

    /// Keys examined per enumeration round; at least 1.
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Every enumeration round fails.
    pub fn failing_scan(mut self) -> Self {
        self.fail_scan = true;
        self
    }

    /// Value reads for `key` fail.
    pub fn failing_read(mut self, key: &str) -> Self {
        self.failing_keys.insert(key.to_string());
        self
    }

    /// Type lookups for `key` fail.
    pub fn failing_type(mut self, key: &str) -> Self {
        self.failing_type_keys.insert(key.to_string());
        self
    }

    /// Number of distinct stored keys matching `pattern`.
    pub fn matching(&self, pattern: &str) -> usize {
        self.data.keys().filter(|key| glob_match(pattern, key)).count()
    }

    /// Enumeration rounds served so far.
    pub fn scan_calls(&self) -> usize {
        self.scan_calls.load(Ordering::SeqCst)
    }

    /// Value reads served so far.
    pub fn read_calls(&self) -> usize {
        self.read_calls.load(Ordering::SeqCst)
    }

    fn read(&self, op: &'static str, key: &str) -> Result<&StoredValue, StoreError> {
        self.read_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_keys.contains(key) {
            return Err(StoreError::command(op, "injected read failure"));
        }
        self.data
            .get(key)
            .ok_or_else(|| StoreError::command(op, "no such key"))
    }
}

fn wrong_type(op: &'static str) -> StoreError {
    StoreError::command(
        op,
        "WRONGTYPE Operation against a key holding the wrong kind of value",
    )
}

impl StoreClient for MemoryStore {
    fn scan_page(
        &self,
        cursor: u64,
        pattern: &str,
        _count_hint: usize,
    ) -> Result<ScanPage, StoreError> {
        self.scan_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_scan {
            return Err(StoreError::command("SCAN", "injected scan failure"));
        }

        let start = cursor as usize;
        let end = (start + self.page_size).min(self.data.len());
        let keys = self
            .data
            .keys()
            .skip(start)
            .take(end.saturating_sub(start))
            .filter(|key| glob_match(pattern, key))
            .cloned()
            .collect();
        let next_cursor = if end >= self.data.len() {
            TERMINAL_CURSOR
        } else {
            end as u64
        };

        Ok(ScanPage { keys, next_cursor })
    }

    fn type_of(&self, key: &str) -> Result<String, StoreError> {
        if self.failing_type_keys.contains(key) {
            return Err(StoreError::command("TYPE", "injected type failure"));
        }
        Ok(self
            .data
            .get(key)
            .map(|value| value.tag())
            .unwrap_or("none")
            .to_string())
    }

    fn get_string(&self, key: &str) -> Result<String, StoreError> {
        match self.read("GET", key)? {
            StoredValue::String(s) => Ok(s.clone()),
            _ => Err(wrong_type("GET")),
        }
    }

    fn get_list_range(&self, key: &str) -> Result<Vec<String>, StoreError> {
        match self.read("LRANGE", key)? {
            StoredValue::List(items) => Ok(items.clone()),
            _ => Err(wrong_type("LRANGE")),
        }
    }

    fn get_set_members(&self, key: &str) -> Result<Vec<String>, StoreError> {
        match self.read("SMEMBERS", key)? {
            StoredValue::Set(items) => Ok(items.clone()),
            _ => Err(wrong_type("SMEMBERS")),
        }
    }

    fn get_sorted_set_range(&self, key: &str) -> Result<Vec<String>, StoreError> {
        match self.read("ZRANGE", key)? {
            StoredValue::ZSet(items) => Ok(items.clone()),
            _ => Err(wrong_type("ZRANGE")),
        }
    }

    fn get_hash_all(&self, key: &str) -> Result<BTreeMap<String, String>, StoreError> {
        match self.read("HGETALL", key)? {
            StoredValue::Hash(fields) => Ok(fields.clone()),
            _ => Err(wrong_type("HGETALL")),
        }
    }
}

/// Glob matching with `*` and `?`, enough for test patterns.
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let (mut p, mut t) = (0, 0);
    let mut star: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() && (pattern[p] == '?' || pattern[p] == text[t]) {
            p += 1;
            t += 1;
        } else if p < pattern.len() && pattern[p] == '*' {
            star = Some((p, t));
            p += 1;
        } else if let Some((star_p, star_t)) = star {
            p = star_p + 1;
            t = star_t + 1;
            star = Some((star_p, star_t + 1));
        } else {
            return false;
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}

#[test]
fn glob_match_handles_wildcards() {
    assert!(glob_match("*", "anything"));
    assert!(glob_match("user:*", "user:1"));
    assert!(!glob_match("user:*", "session:1"));
    assert!(glob_match("u?er:*", "user:42"));
    assert!(glob_match("*:1", "user:1"));
    assert!(!glob_match("user", "user:1"));
}

#[test]
fn memory_store_pages_until_terminal_cursor() {
    let store = MemoryStore::new().with_many("k", 25).page_size(10);

    let first = store.scan_page(0, "*", 10).unwrap();
    assert_eq!(first.keys.len(), 10);
    assert_eq!(first.next_cursor, 10);

    let last = store.scan_page(20, "*", 10).unwrap();
    assert_eq!(last.keys.len(), 5);
    assert!(last.is_last());
}

#[test]
fn with_keys_stores_each_key_once() {
    let store = MemoryStore::new().with_keys(["user:1", "user:2", "user:1", "order:1"]);

    assert_eq!(store.matching("*"), 3);
    assert_eq!(store.matching("user:*"), 2);
    assert_eq!(store.get_string("order:1").unwrap(), "value of order:1");
}
