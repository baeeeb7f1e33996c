//! GitHub API error type.
//!
//! Failures out of the facade keep whatever the API reported: the HTTP
//! status when one is available, a description, and the underlying octocrab
//! error as the source. Callers receive them unchanged; no retry happens at
//! this layer.

use std::fmt;
use thiserror::Error;

/// An error from a GitHub API call made by the event facade.
#[derive(Debug, Error)]
pub struct GitHubApiError {
    /// The HTTP status code, if available.
    pub status_code: Option<u16>,

    /// A human-readable description of the error.
    pub message: String,

    /// The underlying octocrab error, if available.
    #[source]
    pub source: Option<octocrab::Error>,
}

impl fmt::Display for GitHubApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status_code {
            Some(code) => write!(f, "GitHub API error (HTTP {}): {}", code, self.message),
            None => write!(f, "GitHub API error: {}", self.message),
        }
    }
}

impl GitHubApiError {
    /// Creates an error from a failed octocrab request.
    pub fn request(message: impl Into<String>, source: octocrab::Error) -> Self {
        let status_code = Self::extract_status_code(&source);
        Self {
            status_code,
            message: message.into(),
            source: Some(source),
        }
    }

    /// Creates an error from an unexpected HTTP status.
    pub fn status(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code: Some(status_code),
            message: message.into(),
            source: None,
        }
    }

    /// Creates an error without an octocrab source.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status_code: None,
            message: message.into(),
            source: None,
        }
    }

    fn extract_status_code(source: &octocrab::Error) -> Option<u16> {
        match source {
            octocrab::Error::GitHub { source, .. } => Some(source.status_code.as_u16()),
            _ => None,
        }
    }
}
