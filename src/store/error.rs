//! Error types for store operations.

use thiserror::Error;

use crate::types::InvalidPlaceUrl;
use crate::BoxError;

/// An error from a place-store operation.
///
/// Collaborator failures (persistence, community resolution, extended
/// properties) are wrapped with their source preserved and otherwise
/// propagate unchanged: the store performs no retry and never downgrades a
/// failure to a default value. A failed read means "unknown", not "cache
/// still valid".
#[derive(Debug, Error)]
pub enum StoreError {
    /// The supplied place key is not a usable record key. Raised before any
    /// collaborator is touched.
    #[error(transparent)]
    InvalidPlaceUrl(#[from] InvalidPlaceUrl),

    /// The update would leave the record as something other than a JSON
    /// object, which the store cannot persist under merge semantics.
    #[error("update for {key} must be a JSON object")]
    UpdateNotAnObject { key: String },

    /// The persistence collaborator failed.
    #[error("persistence failure: {source}")]
    Persistence {
        #[source]
        source: BoxError,
    },

    /// Resolving the owning community failed during refresh.
    #[error("community resolution failed for {jive_url}: {source}")]
    Community {
        jive_url: String,
        #[source]
        source: BoxError,
    },

    /// The extended-properties fetch failed during refresh.
    #[error("extended properties fetch failed for {path}: {source}")]
    ExtProps {
        path: String,
        #[source]
        source: BoxError,
    },

    /// A persisted record could not be decoded into the record shape.
    #[error("malformed place record under {key}: {source}")]
    MalformedRecord {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub(crate) fn persistence(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        StoreError::Persistence {
            source: Box::new(source),
        }
    }
}
