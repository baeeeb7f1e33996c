//! Option envelopes for strategy lifecycle calls.
//!
//! Options are hydrated by the client that invokes the strategy, not by
//! the strategies themselves, so no schema is enforced beyond what each
//! operation cannot work without. The conventionally-present fields are
//! typed; anything else rides in the flattened `extra` map and is reachable
//! through [`SetupOptions::require`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::EventToken;

use super::base::StrategyError;

/// Options handed to [`EventStrategy::setup`](super::EventStrategy::setup).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetupOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    #[serde(rename = "gitHubToken", default, skip_serializing_if = "Option::is_none")]
    pub github_token: Option<String>,
    #[serde(rename = "placeUrl", default, skip_serializing_if = "Option::is_none")]
    pub place_url: Option<String>,
    #[serde(rename = "callbackUrl", default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SetupOptions {
    /// Extracts a required string field, failing with
    /// [`StrategyError::MissingOption`] when it is absent or empty.
    ///
    /// Typed fields are looked up by their wire name; anything else is
    /// searched in the extras.
    pub fn require(&self, field: &'static str) -> Result<&str, StrategyError> {
        let value = match field {
            "owner" => self.owner.as_deref(),
            "repo" => self.repo.as_deref(),
            "gitHubToken" => self.github_token.as_deref(),
            "placeUrl" => self.place_url.as_deref(),
            "callbackUrl" => self.callback_url.as_deref(),
            other => self.extra.get(other).and_then(Value::as_str),
        };
        value
            .filter(|s| !s.is_empty())
            .ok_or(StrategyError::MissingOption(field))
    }
}

/// Options handed to
/// [`EventStrategy::teardown`](super::EventStrategy::teardown).
///
/// The two fields the default teardown cannot work without are required
/// here; everything else rides in `extra` for overrides that clean up
/// more.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeardownOptions {
    #[serde(rename = "eventToken")]
    pub event_token: EventToken,
    #[serde(rename = "gitHubToken")]
    pub github_token: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TeardownOptions {
    pub fn new(event_token: impl Into<EventToken>, github_token: impl Into<String>) -> Self {
        TeardownOptions {
            event_token: event_token.into(),
            github_token: github_token.into(),
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn require_finds_typed_fields_by_wire_name() {
        let options: SetupOptions = serde_json::from_value(json!({
            "owner": "octocat",
            "repo": "hello-world",
            "gitHubToken": "gh",
            "placeUrl": "https://x.com/api/core/v3/places/42",
        }))
        .unwrap();

        assert_eq!(options.require("owner").unwrap(), "octocat");
        assert_eq!(options.require("gitHubToken").unwrap(), "gh");
    }

    #[test]
    fn require_falls_back_to_extras() {
        let options: SetupOptions =
            serde_json::from_value(json!({"channel": "announcements"})).unwrap();
        assert_eq!(options.require("channel").unwrap(), "announcements");
    }

    #[test]
    fn require_rejects_absent_and_empty_fields() {
        let options: SetupOptions = serde_json::from_value(json!({"owner": ""})).unwrap();
        assert!(matches!(
            options.require("owner"),
            Err(StrategyError::MissingOption("owner"))
        ));
        assert!(matches!(
            options.require("repo"),
            Err(StrategyError::MissingOption("repo"))
        ));
    }

    #[test]
    fn teardown_options_use_wire_names() {
        let options: TeardownOptions = serde_json::from_value(json!({
            "eventToken": "octocat/hello-world/7",
            "gitHubToken": "gh",
            "note": "kept",
        }))
        .unwrap();

        assert_eq!(options.event_token.as_str(), "octocat/hello-world/7");
        assert_eq!(options.github_token, "gh");
        assert_eq!(options.extra["note"], json!("kept"));
    }
}
