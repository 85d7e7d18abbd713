//! The expiration table: which proxy access keys should be blocked, and from when.

mod key_id;
#[cfg(any(test, feature = "test-utils"))]
mod memory_store;
mod store;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use key_id::KeyId;
#[cfg(any(test, feature = "test-utils"))]
pub use memory_store::MemoryExpirationStore;
pub use store::{ExpirationStore, JsonFileExpirationStore};

/// Whether a key with the given expiry should be blocked at `now_millis`.
/// A key expiring in the same millisecond counts as expired.
pub fn is_expired(expires_at: i64, now_millis: i64) -> bool {
    expires_at <= now_millis
}

/// Every tracked key mapped to the millisecond timestamp after which it must be blocked.
///
/// Serialized as a flat JSON object, e.g. `{"abc": 1700000000000}`. A key which is not
/// present has no expiry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ExpirationTable(BTreeMap<KeyId, i64>);

impl ExpirationTable {
    pub fn get(&self, key_id: &KeyId) -> Option<i64> {
        self.0.get(key_id).copied()
    }

    /// Sets the expiry of a key, replacing any previous value.
    pub fn upsert(&mut self, key_id: KeyId, expires_at: i64) {
        self.0.insert(key_id, expires_at);
    }

    pub fn remove(&mut self, key_id: &KeyId) -> Option<i64> {
        self.0.remove(key_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&KeyId, i64)> {
        self.0.iter().map(|(key_id, expires_at)| (key_id, *expires_at))
    }
}

impl FromIterator<(KeyId, i64)> for ExpirationTable {
    fn from_iter<T: IntoIterator<Item = (KeyId, i64)>>(iter: T) -> Self {
        ExpirationTable(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_replaces_existing_expiry() {
        let mut table = ExpirationTable::default();

        table.upsert(KeyId::from("abc"), 1000);
        table.upsert(KeyId::from("abc"), 2000);

        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&KeyId::from("abc")), Some(2000));
    }

    #[test]
    fn expiry_is_inclusive_of_now() {
        assert!(is_expired(999, 1000));
        assert!(is_expired(1000, 1000));
        assert!(!is_expired(1001, 1000));
    }

    #[test]
    fn serializes_as_flat_object() {
        let table: ExpirationTable = [(KeyId::from("k1"), 1000), (KeyId::from("k2"), 2000)]
            .into_iter()
            .collect();

        let json = serde_json::to_value(&table).unwrap();

        assert_eq!(json, serde_json::json!({ "k1": 1000, "k2": 2000 }));
    }

    #[test]
    fn non_integer_expiry_does_not_parse() {
        let result = serde_json::from_str::<ExpirationTable>(r#"{"k1": "soon"}"#);

        assert!(result.is_err());
    }
}
