//! Approximate count of keys matching a pattern.

use crate::model::{CountResult, StoreError};
use crate::store::{StoreClient, TERMINAL_CURSOR};
use tracing::debug;

/// `COUNT` hint per enumeration round. Counting reads no values, so large
/// pages keep the number of round-trips down.
pub const COUNT_PAGE_HINT: usize = 1000;

/// Enumerate `pattern` to exhaustion, summing the keys returned per round.
///
/// No type lookups or value reads happen. The result is an estimate: keys added
/// or removed during enumeration, and keys the cursor yields twice, skew it.
///
/// # Errors
///
/// Fails if any enumeration round-trip fails.
pub fn count(store: &dyn StoreClient, pattern: &str) -> Result<CountResult, StoreError> {
    let mut cursor = TERMINAL_CURSOR;
    let mut total = 0usize;
    let mut rounds = 0usize;

    loop {
        let page = store.scan_page(cursor, pattern, COUNT_PAGE_HINT)?;
        total += page.keys.len();
        rounds += 1;
        if page.is_last() {
            break;
        }
        cursor = page.next_cursor;
    }

    debug!(pattern, total, rounds, "Count finished");
    Ok(CountResult { count: total })
}
