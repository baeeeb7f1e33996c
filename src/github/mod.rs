//! GitHub event facade.
//!
//! Strategies subscribe places to repository events through the facade
//! defined here, and hold only the opaque token it returns. The module
//! provides:
//!
//! - The [`EventFacade`] trait: build an OAuth credential from a raw token,
//!   subscribe to a repository event, unsubscribe by token.
//! - [`OctocrabEventFacade`], an implementation managing repository
//!   webhooks through the GitHub REST API via octocrab.
//!
//! Webhook payload handling is out of scope; the facade manages
//! subscriptions, nothing more.

mod client;
mod error;
mod events;
mod facade;

pub use client::OctocrabEventFacade;
pub use error::GitHubApiError;
pub use events::RepoEvent;
pub use facade::{EventFacade, OauthCredential, RepoEventSubscription};
