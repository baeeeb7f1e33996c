//! Lifecycle tests for the strategy contract.
//!
//! A small concrete strategy stands in for the ones an external builder
//! would register; the facade is the recording double from `test_utils`.

use crate::github::{EventFacade, RepoEvent, RepoEventSubscription};
use crate::strategies::{EventStrategy, SetupOptions, StrategyError, TeardownOptions};
use crate::test_utils::{FacadeCall, RecordingFacade};
use crate::types::EventToken;

/// Announces issue activity into a place. Setup subscribes the repository's
/// `issues` channel; teardown is the provided default.
struct IssueEventsStrategy;

impl EventStrategy for IssueEventsStrategy {
    fn name(&self) -> &'static str {
        "issue-events"
    }

    async fn setup<F>(
        &self,
        facade: &F,
        options: SetupOptions,
    ) -> Result<EventToken, StrategyError>
    where
        F: EventFacade + Sync,
    {
        let auth = facade.create_oauth_object(options.require("gitHubToken")?);
        let subscription = RepoEventSubscription::new(
            options.require("owner")?,
            options.require("repo")?,
            RepoEvent::Issues,
            options.require("callbackUrl")?,
        );
        facade
            .subscribe_to_repo_event(&subscription, &auth)
            .await
            .map_err(StrategyError::facade)
    }
}

fn setup_options() -> SetupOptions {
    serde_json::from_value(serde_json::json!({
        "owner": "octocat",
        "repo": "hello-world",
        "gitHubToken": "gh-token",
        "callbackUrl": "https://addon.example/webhooks",
    }))
    .unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Setup
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn setup_subscribes_and_yields_the_token() {
    let facade = RecordingFacade::new();

    let token = IssueEventsStrategy
        .setup(&facade, setup_options())
        .await
        .unwrap();

    assert_eq!(token, facade.token);
    assert_eq!(
        facade.calls(),
        vec![
            FacadeCall::CreateOauth {
                github_token: "gh-token".to_string()
            },
            FacadeCall::Subscribe {
                owner: "octocat".to_string(),
                repo: "hello-world".to_string(),
                event: RepoEvent::Issues,
            },
        ]
    );
}

#[tokio::test]
async fn setup_with_missing_options_never_reaches_the_facade() {
    let facade = RecordingFacade::new();
    let mut options = setup_options();
    options.repo = None;

    let err = IssueEventsStrategy
        .setup(&facade, options)
        .await
        .unwrap_err();

    assert!(matches!(err, StrategyError::MissingOption("repo")));
    // create_oauth_object ran (it comes first), but nothing was subscribed.
    assert!(facade
        .calls()
        .iter()
        .all(|c| !matches!(c, FacadeCall::Subscribe { .. })));
}

#[tokio::test]
async fn setup_failure_propagates_the_facade_error() {
    let mut facade = RecordingFacade::new();
    facade.fail_subscribe = true;

    let err = IssueEventsStrategy
        .setup(&facade, setup_options())
        .await
        .unwrap_err();

    assert!(matches!(err, StrategyError::Facade(_)));
}

// ─────────────────────────────────────────────────────────────────────────────
// Teardown (provided default)
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn default_teardown_creates_oauth_then_unsubscribes() {
    let facade = RecordingFacade::new();
    let options = TeardownOptions::new("octocat/hello-world/7", "gh-token");

    IssueEventsStrategy
        .teardown(&facade, options)
        .await
        .unwrap();

    assert_eq!(
        facade.calls(),
        vec![
            FacadeCall::CreateOauth {
                github_token: "gh-token".to_string()
            },
            FacadeCall::Unsubscribe {
                token: "octocat/hello-world/7".to_string(),
                auth_token: "gh-token".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn default_teardown_propagates_unsubscribe_failure() {
    let mut facade = RecordingFacade::new();
    facade.fail_unsubscribe = true;

    let err = IssueEventsStrategy
        .teardown(
            &facade,
            TeardownOptions::new("octocat/hello-world/7", "gh-token"),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, StrategyError::Facade(_)));
}

#[tokio::test]
async fn teardown_options_round_trip_through_json() {
    // Callers hydrate teardown options from stored place state; the wire
    // names must line up with what setup handed back.
    let options: TeardownOptions = serde_json::from_value(serde_json::json!({
        "eventToken": "octocat/hello-world/7",
        "gitHubToken": "gh-token",
    }))
    .unwrap();

    let facade = RecordingFacade::new();
    IssueEventsStrategy
        .teardown(&facade, options)
        .await
        .unwrap();

    assert_eq!(facade.calls().len(), 2);
}
