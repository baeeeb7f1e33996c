//! Lifecycle state for a place-strategy pairing.
//!
//! Pure transition functions over the pairing's state: Unregistered until
//! a setup succeeds, Active while a subscription token is held, and
//! Indeterminate after a failed teardown - the token may or may not still
//! be subscribed upstream. The contract defines no automatic retry; the
//! caller decides whether to retry teardown or treat the token as leaked.

use crate::types::EventToken;

/// The state of one place-strategy pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairingState {
    /// No subscription exists.
    Unregistered,

    /// A subscription is live and its token held.
    Active { token: EventToken },

    /// A teardown failed; the token may or may not still be subscribed.
    Indeterminate { token: EventToken },
}

impl PairingState {
    fn name(&self) -> &'static str {
        match self {
            PairingState::Unregistered => "Unregistered",
            PairingState::Active { .. } => "Active",
            PairingState::Indeterminate { .. } => "Indeterminate",
        }
    }
}

/// The outcome of a lifecycle operation on the pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairingOutcome {
    /// Setup completed and yielded a subscription token.
    SetupSucceeded { token: EventToken },

    /// Setup failed; nothing was subscribed.
    SetupFailed,

    /// Teardown completed; the subscription is gone upstream.
    TeardownSucceeded,

    /// Teardown failed; the subscription's fate is unknown.
    TeardownFailed,
}

/// Error returned when an outcome is not valid in the current state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid pairing transition from {from} with outcome {outcome:?}")]
pub struct PairingTransitionError {
    pub from: &'static str,
    pub outcome: PairingOutcome,
}

/// Computes the pairing's next state for an operation outcome.
///
/// Setup is only valid while Unregistered - running it with a token still
/// held would orphan that token. Teardown is valid while a token is held,
/// including retries from Indeterminate.
pub fn next_pairing_state(
    current: &PairingState,
    outcome: PairingOutcome,
) -> Result<PairingState, PairingTransitionError> {
    match (current, outcome) {
        (PairingState::Unregistered, PairingOutcome::SetupSucceeded { token }) => {
            Ok(PairingState::Active { token })
        }
        (PairingState::Unregistered, PairingOutcome::SetupFailed) => {
            Ok(PairingState::Unregistered)
        }

        (PairingState::Active { .. }, PairingOutcome::TeardownSucceeded) => {
            Ok(PairingState::Unregistered)
        }
        (PairingState::Active { token }, PairingOutcome::TeardownFailed) => {
            Ok(PairingState::Indeterminate {
                token: token.clone(),
            })
        }

        // A teardown retry from Indeterminate either drains the leak or
        // leaves it unresolved.
        (PairingState::Indeterminate { .. }, PairingOutcome::TeardownSucceeded) => {
            Ok(PairingState::Unregistered)
        }
        (PairingState::Indeterminate { token }, PairingOutcome::TeardownFailed) => {
            Ok(PairingState::Indeterminate {
                token: token.clone(),
            })
        }

        (current, outcome) => Err(PairingTransitionError {
            from: current.name(),
            outcome,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> EventToken {
        EventToken::new("octocat/hello-world/7")
    }

    #[test]
    fn setup_success_activates() {
        let next = next_pairing_state(
            &PairingState::Unregistered,
            PairingOutcome::SetupSucceeded { token: token() },
        )
        .unwrap();
        assert_eq!(next, PairingState::Active { token: token() });
    }

    #[test]
    fn setup_failure_stays_unregistered() {
        let next =
            next_pairing_state(&PairingState::Unregistered, PairingOutcome::SetupFailed).unwrap();
        assert_eq!(next, PairingState::Unregistered);
    }

    #[test]
    fn teardown_success_unregisters() {
        let next = next_pairing_state(
            &PairingState::Active { token: token() },
            PairingOutcome::TeardownSucceeded,
        )
        .unwrap();
        assert_eq!(next, PairingState::Unregistered);
    }

    #[test]
    fn teardown_failure_is_indeterminate_and_keeps_the_token() {
        let next = next_pairing_state(
            &PairingState::Active { token: token() },
            PairingOutcome::TeardownFailed,
        )
        .unwrap();
        assert_eq!(next, PairingState::Indeterminate { token: token() });
    }

    #[test]
    fn teardown_retry_can_drain_an_indeterminate_pairing() {
        let indeterminate = PairingState::Indeterminate { token: token() };
        let next =
            next_pairing_state(&indeterminate, PairingOutcome::TeardownSucceeded).unwrap();
        assert_eq!(next, PairingState::Unregistered);

        let still = next_pairing_state(&indeterminate, PairingOutcome::TeardownFailed).unwrap();
        assert_eq!(still, indeterminate);
    }

    #[test]
    fn setup_while_a_token_is_held_is_invalid() {
        for state in [
            PairingState::Active { token: token() },
            PairingState::Indeterminate { token: token() },
        ] {
            let err = next_pairing_state(
                &state,
                PairingOutcome::SetupSucceeded { token: token() },
            )
            .unwrap_err();
            assert_eq!(err.from, state.name());
        }
    }

    #[test]
    fn teardown_while_unregistered_is_invalid() {
        let err = next_pairing_state(
            &PairingState::Unregistered,
            PairingOutcome::TeardownSucceeded,
        )
        .unwrap_err();
        assert_eq!(err.from, "Unregistered");
    }
}
