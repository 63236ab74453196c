//! In-memory route store for tests and local runs.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::store::{RouteStore, StoreError};

/// HashMap-backed store.
///
/// Keys can be poisoned to simulate a store failure on lookup, which is how
/// the store-unavailable path is exercised without a real backend.
#[derive(Default)]
pub struct MemoryRouteStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
    poisoned: RwLock<HashSet<String>>,
}

impl MemoryRouteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw value at `key`.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.entries
            .write()
            .expect("store lock poisoned")
            .insert(key.into(), value.into());
    }

    /// Make every lookup of `key` fail with a query error.
    pub fn poison(&self, key: impl Into<String>) {
        self.poisoned
            .write()
            .expect("store lock poisoned")
            .insert(key.into());
    }
}

#[async_trait]
impl RouteStore for MemoryRouteStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        if self
            .poisoned
            .read()
            .expect("store lock poisoned")
            .contains(key)
        {
            return Err(StoreError::Query(format!("injected failure for {key}")));
        }
        Ok(self
            .entries
            .read()
            .expect("store lock poisoned")
            .get(key)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_absent_key_is_none() {
        let store = MemoryRouteStore::new();
        assert!(store.get("/nothing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_inserted_value_round_trips() {
        let store = MemoryRouteStore::new();
        store.insert("/a", br#"{"kind":"string","data":"hi"}"#.to_vec());
        let value = store.get("/a").await.unwrap().unwrap();
        assert_eq!(value, br#"{"kind":"string","data":"hi"}"#);
    }

    #[tokio::test]
    async fn test_poisoned_key_errors() {
        let store = MemoryRouteStore::new();
        store.poison("/broken");
        assert!(matches!(
            store.get("/broken").await,
            Err(StoreError::Query(_))
        ));
    }
}
