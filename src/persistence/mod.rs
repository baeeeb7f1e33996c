//! Persistence seam for place records.
//!
//! The addon does not own a storage engine: it writes through whatever
//! key-value persistence the hosting service provides. This module defines
//! that seam as a trait over named collections of schema-less JSON records,
//! plus an in-memory implementation for tests and embedding.
//!
//! The trait-based design enables:
//! - Mock stores for testing
//! - Backing the addon with the platform's own persistence in production
//!
//! The store adds no synchronization of its own: concurrent saves to the
//! same key race at this layer, and the last write to complete wins.

mod memory;

pub use memory::MemoryStore;

use std::future::Future;

use serde_json::Value;

/// The consumed key-value persistence interface.
///
/// Records are opaque JSON values grouped into named collections. All
/// methods are asynchronous; implementations surface their own error type,
/// which callers propagate unchanged.
pub trait PersistentStore {
    /// The error type returned by this store.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Looks up a single record by key, yielding `None` when absent.
    fn find_by_id(
        &self,
        collection: &str,
        key: &str,
    ) -> impl Future<Output = Result<Option<Value>, Self::Error>> + Send;

    /// Reads every record in a collection.
    fn find(&self, collection: &str)
        -> impl Future<Output = Result<Vec<Value>, Self::Error>> + Send;

    /// Writes a record under a key, creating or replacing it wholesale.
    ///
    /// Merge semantics live above this seam; the store sees only the final
    /// record.
    fn save(
        &self,
        collection: &str,
        key: &str,
        record: Value,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
