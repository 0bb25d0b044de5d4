//! Type dispatch: resolve one key into a [`KeyItem`].
//!
//! One `TYPE` round-trip selects the read operation, a second fetches the value,
//! which is then pretty-printed as indented JSON. Every failure is folded into
//! the item itself so a bad key never aborts its batch.

use crate::model::{KeyItem, KeyType, StoreError};
use crate::store::StoreClient;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

/// Type tag recorded when the type lookup itself failed.
pub const UNKNOWN_TYPE_TAG: &str = "unknown";

/// Look up the type of `key`, read its value and render it.
///
/// Never fails: unsupported types and store errors become error items.
pub fn resolve(store: &dyn StoreClient, key: &str) -> KeyItem {
    let key_type = match store.type_of(key) {
        Ok(tag) => KeyType::from_tag(&tag),
        Err(e) => {
            warn!(key, error = %e, "Type lookup failed");
            return KeyItem::error(
                key,
                KeyType::Unsupported(UNKNOWN_TYPE_TAG.to_string()),
                e.to_string(),
            );
        }
    };

    match read_rendered(store, key, &key_type) {
        Ok(rendered) => KeyItem::value(key, key_type, rendered),
        Err(e) => {
            warn!(key, key_type = %key_type, error = %e, "Value unavailable");
            KeyItem::error(key, key_type, e.to_string())
        }
    }
}

/// Why a value could not be shown. The message becomes the item's text.
#[derive(Debug, Error)]
enum ReadError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("unsupported type: {0}")]
    Unsupported(String),

    #[error("cannot render value: {0}")]
    Render(#[from] serde_json::Error),
}

fn read_rendered(
    store: &dyn StoreClient,
    key: &str,
    key_type: &KeyType,
) -> Result<String, ReadError> {
    match key_type {
        KeyType::String => render(&store.get_string(key)?),
        KeyType::List => render(&store.get_list_range(key)?),
        KeyType::Set => {
            // Member order is arbitrary; sort so repeated views diff cleanly.
            let mut members = store.get_set_members(key)?;
            members.sort();
            render(&members)
        }
        KeyType::ZSet => render(&store.get_sorted_set_range(key)?),
        KeyType::Hash => render(&store.get_hash_all(key)?),
        KeyType::Unsupported(tag) => Err(ReadError::Unsupported(tag.clone())),
    }
}

/// Pretty-print a value as two-space indented JSON.
fn render<T: Serialize + ?Sized>(value: &T) -> Result<String, ReadError> {
    Ok(serde_json::to_string_pretty(value)?)
}
