//! Key scanner: the first `limit` keys matching a pattern, fully resolved.

use super::dispatch;
use crate::model::{KeyItem, ScanBatch, SearchQuery, StoreError};
use crate::store::{StoreClient, TERMINAL_CURSOR};
use std::collections::HashSet;
use tracing::debug;

/// Collect up to `query.limit()` keys matching `query.pattern()` and resolve each.
///
/// Cursor enumeration returns an arbitrary number of keys per round (often none
/// for selective patterns), so rounds continue until the limit is reached or the
/// store reports the terminal cursor. Keys repeated across rounds are kept once.
/// Order is the store's enumeration order.
///
/// # Errors
///
/// Fails only if an enumeration round-trip fails. Per-key problems are captured
/// inside the returned items.
pub fn scan(store: &dyn StoreClient, query: &SearchQuery) -> Result<ScanBatch, StoreError> {
    let keys = collect_keys(store, query)?;
    let items: Vec<KeyItem> = keys
        .iter()
        .map(|key| dispatch::resolve(store, key))
        .collect();

    Ok(ScanBatch { items })
}

fn collect_keys(store: &dyn StoreClient, query: &SearchQuery) -> Result<Vec<String>, StoreError> {
    let limit = query.limit();
    let mut seen = HashSet::new();
    let mut keys = Vec::with_capacity(limit);
    let mut cursor = TERMINAL_CURSOR;
    let mut rounds = 0usize;

    loop {
        let page = store.scan_page(cursor, query.pattern(), limit)?;
        rounds += 1;

        let last = page.is_last();
        cursor = page.next_cursor;
        for key in page.keys {
            if keys.len() == limit {
                break;
            }
            if seen.insert(key.clone()) {
                keys.push(key);
            }
        }

        if keys.len() >= limit || last {
            break;
        }
    }

    debug!(
        pattern = query.pattern(),
        limit,
        found = keys.len(),
        rounds,
        "Key enumeration finished"
    );
    Ok(keys)
}
