//! First-writer-wins merge primitive for the repository's mappings
//!
//! Every property and source mapping in this crate merges under the same
//! contract: the earliest value registered under a key is retained, and
//! later insertions under that key are discarded at that mapping level.
//! The contract is expressed once here and used at every mapping.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

/// Insert `value` under `key` unless the key is already present.
///
/// Returns `true` when the value was inserted, `false` when an earlier
/// writer already holds the key. The map is unchanged in the latter case.
pub fn put_if_absent<K, V>(map: &mut HashMap<K, V>, key: K, value: V) -> bool
where
    K: Eq + Hash,
{
    match map.entry(key) {
        Entry::Vacant(slot) => {
            slot.insert(value);
            true
        }
        Entry::Occupied(_) => false,
    }
}
