//! Pluggable event strategies.
//!
//! A strategy is a named, stateless behavior unit implementing the event
//! subscription lifecycle for a place: `setup` subscribes to a repository
//! event through the facade and yields the subscription token, `teardown`
//! unsubscribes by token. Strategies are registered and selected by name
//! by an external strategy-set builder; this module defines and enforces
//! the contract each concrete strategy must satisfy.
//!
//! There is no guarantee the correct options are present on a call: the
//! client hydrates the options as well as consuming them, so strategies
//! extract what they need and fail with a missing-option error otherwise.
//!
//! Overriding `teardown` is rare - only when cleanup goes beyond
//! unsubscription - and any override remains responsible for unsubscribing
//! with the token it was handed. Skipping that is a leaked subscription.

pub mod base;
pub mod options;
pub mod pairing;

pub use base::{validate_strategy_name, EventStrategy, InvalidStrategyName, StrategyError};
pub use options::{SetupOptions, TeardownOptions};
pub use pairing::{next_pairing_state, PairingOutcome, PairingState, PairingTransitionError};

#[cfg(test)]
mod lifecycle_tests;
