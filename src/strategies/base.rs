//! The strategy contract.

use std::future::Future;

use thiserror::Error;
use tracing::debug;

use crate::github::EventFacade;
use crate::types::EventToken;
use crate::BoxError;

use super::options::{SetupOptions, TeardownOptions};

/// An error from a strategy lifecycle operation.
#[derive(Debug, Error)]
pub enum StrategyError {
    /// A required field was absent from the options the caller supplied.
    #[error("missing required option `{0}`")]
    MissingOption(&'static str),

    /// The event facade call failed; the source is the facade's own error,
    /// unchanged.
    #[error("event facade call failed: {0}")]
    Facade(#[source] BoxError),
}

impl StrategyError {
    pub(crate) fn facade(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        StrategyError::Facade(Box::new(source))
    }
}

/// A pluggable event strategy for a place.
///
/// Implementors must provide [`name`](Self::name) and
/// [`setup`](Self::setup); a strategy type that forgets either simply does
/// not compile. The provided [`teardown`](Self::teardown) covers the
/// common case: build a credential from the GitHub token and unsubscribe
/// the event token through the facade.
pub trait EventStrategy {
    /// The unique, human-readable identifier this strategy registers
    /// under. Must contain no whitespace; collisions across registered
    /// strategies are a configuration error for the strategy-set builder
    /// to prevent (see [`validate_strategy_name`]).
    fn name(&self) -> &'static str;

    /// Subscribes the place to a repository event channel, yielding the
    /// subscription token.
    ///
    /// Implementations extract whatever fields they need from `options`;
    /// the base enforces no schema, and the caller is responsible for
    /// supplying options matching the chosen strategy.
    fn setup<F>(
        &self,
        facade: &F,
        options: SetupOptions,
    ) -> impl Future<Output = Result<EventToken, StrategyError>> + Send
    where
        F: EventFacade + Sync;

    /// Cancels the subscription named by the options' event token.
    ///
    /// The default builds an authenticated credential from the options'
    /// GitHub token and requests unsubscription of the event token, in
    /// that order, through the facade. Override only when teardown must
    /// clean up more than the subscription - and an override remains
    /// responsible for unsubscribing with `options.event_token`; failing
    /// to do so leaks the subscription upstream.
    ///
    /// A teardown failure leaves the pairing indeterminate: the token may
    /// or may not still be subscribed. No automatic retry happens here;
    /// see [`PairingState`](super::PairingState) for how callers track
    /// that.
    fn teardown<F>(
        &self,
        facade: &F,
        options: TeardownOptions,
    ) -> impl Future<Output = Result<(), StrategyError>> + Send
    where
        F: EventFacade + Sync,
    {
        async move {
            let auth = facade.create_oauth_object(&options.github_token);
            facade
                .unsubscribe_from_repo_event(&options.event_token, &auth)
                .await
                .map_err(StrategyError::facade)?;
            debug!(token = %options.event_token, "unsubscribed event strategy");
            Ok(())
        }
    }
}

/// Error returned when a strategy name fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidStrategyName {
    #[error("strategy name must not be empty")]
    Empty,
    #[error("strategy name `{0}` must not contain whitespace")]
    ContainsWhitespace(String),
}

/// Validates a strategy name for registration.
///
/// Names must be non-empty and whitespace-free. Uniqueness across the
/// registered set stays the builder's job; this checks shape only.
pub fn validate_strategy_name(name: &str) -> Result<(), InvalidStrategyName> {
    if name.is_empty() {
        return Err(InvalidStrategyName::Empty);
    }
    if name.chars().any(char::is_whitespace) {
        return Err(InvalidStrategyName::ContainsWhitespace(name.to_string()));
    }
    Ok(())
}
