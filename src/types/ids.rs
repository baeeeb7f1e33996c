//! Newtype wrappers for domain identifiers.
//!
//! These types prevent accidental mixing of different identifier kinds (e.g.,
//! using an event subscription token where a place key is expected) and make
//! the code more self-documenting.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error returned when a place key fails validation.
///
/// Raised synchronously by every store operation that accepts a key, before
/// any collaborator is touched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid place: key must be a non-empty string")]
pub struct InvalidPlaceUrl;

/// The full API URL of a place, used as the unique record key.
///
/// A place URL is immutable once set on a record. The domain prefix and the
/// place ID are both derived from it, so the derivation lives here rather
/// than on the record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceUrl(String);

impl PlaceUrl {
    /// Validates and wraps a place key.
    ///
    /// The only runtime rule: the key must be a non-empty string.
    /// Whitespace-only keys are rejected for the same reason empty ones
    /// are. Anything else is the caller's responsibility.
    pub fn parse(s: impl Into<String>) -> Result<PlaceUrl, InvalidPlaceUrl> {
        let s = s.into();
        if s.trim().is_empty() {
            return Err(InvalidPlaceUrl);
        }
        Ok(PlaceUrl(s))
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The domain-plus-context prefix: the first three `/`-delimited tokens
    /// of the key, rejoined.
    ///
    /// For `https://x.com/api/core/v3/places/42` the tokens are
    /// `["https:", "", "x.com", ...]`, so the prefix is `https://x.com`.
    pub fn jive_url(&self) -> String {
        let tokens: Vec<&str> = self.0.split('/').collect();
        let prefix_len = tokens.len().min(3);
        tokens[..prefix_len].join("/")
    }

    /// The place ID: the final `/`-delimited token of the key.
    pub fn place_id(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for PlaceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PlaceUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An opaque token identifying an upstream repository event subscription.
///
/// Issued by the event facade on subscribe and required to unsubscribe.
/// The facade owns the token format; nothing else may look inside it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventToken(String);

impl EventToken {
    pub fn new(s: impl Into<String>) -> Self {
        EventToken(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EventToken {
    fn from(s: String) -> Self {
        EventToken(s)
    }
}

impl From<&str> for EventToken {
    fn from(s: &str) -> Self {
        EventToken(s.to_string())
    }
}
