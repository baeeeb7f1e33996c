//! Authenticated platform session.

/// An authenticated session against the collaboration platform, scoped to
/// one place.
///
/// Construction is pure: the token pair comes straight off the place record
/// and no I/O happens until the session is handed to a [`PlaceApi`] call.
/// Token refresh, retry and timeouts are the platform facade's concern, not
/// this type's.
///
/// [`PlaceApi`]: super::PlaceApi
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JiveSession {
    place_url: String,
    access_token: String,
    refresh_token: String,
}

impl JiveSession {
    pub fn new(
        place_url: impl Into<String>,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        JiveSession {
            place_url: place_url.into(),
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }

    /// The place this session is scoped to.
    pub fn place_url(&self) -> &str {
        &self.place_url
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }
}
