//! In-memory persistence backend.
//!
//! Collections live in a mutex-guarded map. `find` returns records in key
//! order so bulk reads are deterministic.

use std::collections::{BTreeMap, HashMap};
use std::convert::Infallible;

use serde_json::Value;
use tokio::sync::Mutex;

use super::PersistentStore;

/// A `PersistentStore` backed by process memory.
///
/// Suitable for tests and for embedding the addon where no real persistence
/// is wired up. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, BTreeMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistentStore for MemoryStore {
    type Error = Infallible;

    async fn find_by_id(&self, collection: &str, key: &str) -> Result<Option<Value>, Infallible> {
        let collections = self.collections.lock().await;
        Ok(collections
            .get(collection)
            .and_then(|records| records.get(key))
            .cloned())
    }

    async fn find(&self, collection: &str) -> Result<Vec<Value>, Infallible> {
        let collections = self.collections.lock().await;
        Ok(collections
            .get(collection)
            .map(|records| records.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn save(&self, collection: &str, key: &str, record: Value) -> Result<(), Infallible> {
        let mut collections = self.collections.lock().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(key.to_string(), record);
        Ok(())
    }
}
