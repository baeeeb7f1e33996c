//! The record store for linked places.
//!
//! This module owns the persisted place records and the two behaviors that
//! make them livable: merge-on-write saves (partial updates never destroy
//! existing nested fields) and lazy, self-healing hydration of the
//! externally-sourced repository linkage on every read path.
//!
//! # Key invariants
//!
//! 1. **Key validation is synchronous**: an empty place key fails before
//!    any collaborator I/O, on every operation that accepts a key.
//!
//! 2. **Refresh writes are suppressed**: the write a refresh performs never
//!    re-stamps the cache, so a read can trigger at most one refresh cycle.
//!
//! 3. **Unlinked records are untouchable**: a record with no `jive` field
//!    is returned exactly as stored, with no collaborator calls.

pub mod error;
pub mod merge;
pub mod place_store;

pub use error::StoreError;
pub use merge::deep_merge;
pub use place_store::{PlaceStore, PLACES_COLLECTION};
