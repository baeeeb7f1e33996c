//! The persisted place record and its linked sub-objects.
//!
//! The record is the one wire format this crate owns. Key names are the
//! provider's camelCase names (`placeUrl`, `jiveUrl`, `placeID`,
//! `invalidCache`, `github.repoOwner`); the store is schema-flexible, so any
//! client-supplied fields beyond the ones modeled here are retained verbatim
//! in the flattened `extra` maps.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Credentials linking a record to its collaboration-platform account.
///
/// Opaque to the store apart from the token pair, which the refresh path
/// uses to construct an authenticated session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JiveLink {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The externally-sourced repository linkage cached on a record.
///
/// `repo` and `repo_owner` are populated lazily by the store's refresh path
/// from the provider's extended properties. Absent fields serialize to
/// absent keys, so a refresh that learned nothing new leaves the previously
/// stored values untouched under merge-on-write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GitHubLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    #[serde(rename = "repoOwner", default, skip_serializing_if = "Option::is_none")]
    pub repo_owner: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GitHubLink {
    /// Whether both externally-sourced fields are present and non-empty.
    pub fn is_complete(&self) -> bool {
        self.repo.as_deref().is_some_and(|s| !s.is_empty())
            && self.repo_owner.as_deref().is_some_and(|s| !s.is_empty())
    }
}

/// A place record as stored under its place URL.
///
/// `place_url`, `jive_url` and `place_id` are recomputed from the key on
/// every save; `invalid_cache` is the staleness stamp for the
/// externally-sourced `github` sub-object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    #[serde(rename = "placeUrl")]
    pub place_url: String,
    #[serde(rename = "jiveUrl")]
    pub jive_url: String,
    #[serde(rename = "placeID")]
    pub place_id: String,
    #[serde(rename = "invalidCache", default)]
    pub invalid_cache: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jive: Option<JiveLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<GitHubLink>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PlaceRecord {
    /// Decodes a record from its persisted JSON form.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Whether the cached repository linkage must be refetched before the
    /// record is handed to a caller.
    ///
    /// True when the staleness stamp is set, or when the `github` sub-object
    /// is missing either externally-sourced field (an absent sub-object
    /// counts as incomplete). Platform linkage is a separate precondition
    /// checked by the refresh path itself.
    pub fn cache_stale(&self) -> bool {
        self.invalid_cache || !self.github.as_ref().is_some_and(GitHubLink::is_complete)
    }
}
