//! The event facade trait and its request types.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::types::EventToken;

use super::RepoEvent;

/// An OAuth credential for acting against the GitHub API on a user's
/// behalf.
///
/// Built by [`EventFacade::create_oauth_object`] from the raw token a place
/// has on file. Construction is synchronous and performs no I/O.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OauthCredential {
    access_token: String,
}

impl OauthCredential {
    pub fn new(access_token: impl Into<String>) -> Self {
        OauthCredential {
            access_token: access_token.into(),
        }
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

/// A request to subscribe a place to one repository event.
///
/// `callback_url` is where the provider should deliver matching events;
/// strategies supply it from their setup options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoEventSubscription {
    pub owner: String,
    pub repo: String,
    pub event: RepoEvent,
    pub callback_url: String,
}

impl RepoEventSubscription {
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        event: RepoEvent,
        callback_url: impl Into<String>,
    ) -> Self {
        RepoEventSubscription {
            owner: owner.into(),
            repo: repo.into(),
            event,
            callback_url: callback_url.into(),
        }
    }
}

/// The repository event subscription facade.
///
/// Strategies reach the source-control provider exclusively through this
/// trait. A successful subscribe yields an opaque [`EventToken`]; holding
/// that token (plus a credential) is all unsubscription requires, so the
/// token must carry whatever the implementation needs to find the
/// subscription again.
///
/// # Example (mock for testing)
///
/// ```ignore
/// struct StaticFacade;
///
/// impl EventFacade for StaticFacade {
///     type Error = std::convert::Infallible;
///
///     fn create_oauth_object(&self, github_token: &str) -> OauthCredential {
///         OauthCredential::new(github_token)
///     }
///
///     async fn subscribe_to_repo_event(
///         &self,
///         _subscription: &RepoEventSubscription,
///         _auth: &OauthCredential,
///     ) -> Result<EventToken, Self::Error> {
///         Ok(EventToken::new("token"))
///     }
///
///     async fn unsubscribe_from_repo_event(
///         &self,
///         _token: &EventToken,
///         _auth: &OauthCredential,
///     ) -> Result<(), Self::Error> {
///         Ok(())
///     }
/// }
/// ```
pub trait EventFacade {
    /// The error type returned by this facade.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds an authenticated credential object from a raw GitHub token.
    fn create_oauth_object(&self, github_token: &str) -> OauthCredential;

    /// Subscribes to a repository event, yielding the subscription token.
    fn subscribe_to_repo_event(
        &self,
        subscription: &RepoEventSubscription,
        auth: &OauthCredential,
    ) -> impl Future<Output = Result<EventToken, Self::Error>> + Send;

    /// Cancels the subscription identified by `token`.
    fn unsubscribe_from_repo_event(
        &self,
        token: &EventToken,
        auth: &OauthCredential,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
