//! Key items, scan batches and search queries.
//!
//! All types here are immutable values produced by background tasks and handed to the
//! UI thread inside result messages.

use std::fmt;

// ===== KeyType =====

/// The data type a store reports for a key.
///
/// Closed set: anything the viewer cannot read lands in [`KeyType::Unsupported`]
/// carrying the raw tag the store reported.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// Plain scalar value.
    String,
    /// Ordered sequence.
    List,
    /// Unordered collection of unique members.
    Set,
    /// Sorted set (members ordered by score).
    ZSet,
    /// Field/value mapping.
    Hash,
    /// Any other tag (`stream`, `none`, module types, ...).
    Unsupported(String),
}

impl KeyType {
    /// Classify a raw type tag as returned by the store's `TYPE` command.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "string" => Self::String,
            "list" => Self::List,
            "set" => Self::Set,
            "zset" => Self::ZSet,
            "hash" => Self::Hash,
            other => Self::Unsupported(other.to_string()),
        }
    }

    /// The tag as the store spells it.
    pub fn as_tag(&self) -> &str {
        match self {
            Self::String => "string",
            Self::List => "list",
            Self::Set => "set",
            Self::ZSet => "zset",
            Self::Hash => "hash",
            Self::Unsupported(tag) => tag,
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

// ===== KeyItem =====

/// One scanned key together with its rendered value.
///
/// `rendered` is either the pretty-printed value or, when `is_error` is set, the
/// reason the value could not be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyItem {
    key: String,
    key_type: KeyType,
    rendered: String,
    is_error: bool,
}

impl KeyItem {
    /// Item whose value was fetched and rendered successfully.
    pub fn value(key: impl Into<String>, key_type: KeyType, rendered: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            key_type,
            rendered: rendered.into(),
            is_error: false,
        }
    }

    /// Item whose value could not be shown; `message` explains why.
    pub fn error(key: impl Into<String>, key_type: KeyType, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            key_type,
            rendered: message.into(),
            is_error: true,
        }
    }

    /// The key name.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The type the store reported.
    pub fn key_type(&self) -> &KeyType {
        &self.key_type
    }

    /// Pretty-printed value or error text.
    pub fn rendered(&self) -> &str {
        &self.rendered
    }

    /// Whether `rendered` holds an error message.
    pub fn is_error(&self) -> bool {
        self.is_error
    }
}

// ===== ScanBatch / CountResult =====

/// Result of one scan task, in store enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanBatch {
    /// The resolved items.
    pub items: Vec<KeyItem>,
}

/// Result of one count task. An estimate, not a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountResult {
    /// Number of keys the enumeration yielded.
    pub count: usize,
}

// ===== SearchQuery =====

/// Pattern used when the search box is empty.
pub const MATCH_ALL: &str = "*";

/// Parameters of one scan, captured when the task is issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pattern: String,
    limit: usize,
}

impl SearchQuery {
    /// Build a query from the raw search box text.
    ///
    /// Empty text matches every key. A zero limit is raised to one.
    pub fn new(search_text: &str, limit: usize) -> Self {
        Self {
            pattern: pattern_for(search_text),
            limit: limit.max(1),
        }
    }

    /// Glob pattern passed to the store.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Upper bound on the number of keys in the batch.
    pub fn limit(&self) -> usize {
        self.limit
    }
}

/// Glob pattern for the given search box text.
pub fn pattern_for(search_text: &str) -> String {
    if search_text.is_empty() {
        MATCH_ALL.to_string()
    } else {
        search_text.to_string()
    }
}
