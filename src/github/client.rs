//! Octocrab-backed event facade.
//!
//! Subscriptions are repository webhooks managed over the REST API. The
//! typed octocrab surface doesn't cover hook management, so the raw routes
//! are used directly, the same way other endpoints gaps are handled.
//!
//! The tokens this facade issues encode `owner/repo/hook-id`: the facade
//! trait promises that a token plus a credential is enough to unsubscribe,
//! so everything needed to address the hook again must ride in the token.

use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::EventToken;

use super::error::GitHubApiError;
use super::facade::{EventFacade, OauthCredential, RepoEventSubscription};

/// An [`EventFacade`] managing GitHub repository webhooks via octocrab.
///
/// Carries no credentials of its own: every call authenticates with the
/// credential passed in, since each place subscribes with its own token.
#[derive(Debug, Clone, Default)]
pub struct OctocrabEventFacade;

impl OctocrabEventFacade {
    pub fn new() -> Self {
        OctocrabEventFacade
    }

    fn authenticated_client(&self, auth: &OauthCredential) -> Result<Octocrab, GitHubApiError> {
        Octocrab::builder()
            .personal_token(auth.access_token().to_string())
            .build()
            .map_err(|e| GitHubApiError::request("failed to build GitHub client", e))
    }
}

/// A parsed facade token addressing one repository webhook.
#[derive(Debug, Clone, PartialEq, Eq)]
struct HookRef {
    owner: String,
    repo: String,
    id: u64,
}

impl HookRef {
    fn encode(owner: &str, repo: &str, id: u64) -> EventToken {
        EventToken::new(format!("{}/{}/{}", owner, repo, id))
    }

    fn parse(token: &EventToken) -> Result<HookRef, GitHubApiError> {
        let mut parts = token.as_str().splitn(3, '/');
        let malformed =
            || GitHubApiError::message(format!("malformed event token `{}`", token));

        let owner = parts.next().filter(|s| !s.is_empty()).ok_or_else(malformed)?;
        let repo = parts.next().filter(|s| !s.is_empty()).ok_or_else(malformed)?;
        let id = parts
            .next()
            .and_then(|s| s.parse::<u64>().ok())
            .ok_or_else(malformed)?;

        Ok(HookRef {
            owner: owner.to_string(),
            repo: repo.to_string(),
            id,
        })
    }
}

#[derive(Serialize)]
struct CreateHookRequest<'a> {
    name: &'static str,
    active: bool,
    events: [&'static str; 1],
    config: HookConfig<'a>,
}

#[derive(Serialize)]
struct HookConfig<'a> {
    url: &'a str,
    content_type: &'static str,
}

#[derive(Deserialize)]
struct HookCreated {
    id: u64,
}

impl EventFacade for OctocrabEventFacade {
    type Error = GitHubApiError;

    fn create_oauth_object(&self, github_token: &str) -> OauthCredential {
        OauthCredential::new(github_token)
    }

    async fn subscribe_to_repo_event(
        &self,
        subscription: &RepoEventSubscription,
        auth: &OauthCredential,
    ) -> Result<EventToken, GitHubApiError> {
        let client = self.authenticated_client(auth)?;
        let route = format!(
            "/repos/{}/{}/hooks",
            subscription.owner, subscription.repo
        );
        let request = CreateHookRequest {
            name: "web",
            active: true,
            events: [subscription.event.as_api_str()],
            config: HookConfig {
                url: &subscription.callback_url,
                content_type: "json",
            },
        };

        let hook: HookCreated = client
            .post(&route, Some(&request))
            .await
            .map_err(|e| GitHubApiError::request("failed to create webhook", e))?;

        debug!(
            owner = %subscription.owner,
            repo = %subscription.repo,
            event = %subscription.event,
            hook_id = hook.id,
            "subscribed to repository event"
        );
        Ok(HookRef::encode(&subscription.owner, &subscription.repo, hook.id))
    }

    async fn unsubscribe_from_repo_event(
        &self,
        token: &EventToken,
        auth: &OauthCredential,
    ) -> Result<(), GitHubApiError> {
        let hook = HookRef::parse(token)?;
        let client = self.authenticated_client(auth)?;
        let route = format!("/repos/{}/{}/hooks/{}", hook.owner, hook.repo, hook.id);

        let response = client
            ._delete(&route, None::<&()>)
            .await
            .map_err(|e| GitHubApiError::request("failed to delete webhook", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GitHubApiError::status(
                status.as_u16(),
                format!("webhook deletion returned {}", status),
            ));
        }

        debug!(owner = %hook.owner, repo = %hook.repo, hook_id = hook.id, "unsubscribed from repository event");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::RepoEvent;

    #[test]
    fn token_round_trip() {
        let token = HookRef::encode("octocat", "hello-world", 97);
        assert_eq!(token.as_str(), "octocat/hello-world/97");

        let hook = HookRef::parse(&token).unwrap();
        assert_eq!(
            hook,
            HookRef {
                owner: "octocat".to_string(),
                repo: "hello-world".to_string(),
                id: 97,
            }
        );
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        for raw in ["", "octocat", "octocat/repo", "octocat/repo/not-a-number", "//7"] {
            let err = HookRef::parse(&EventToken::new(raw)).unwrap_err();
            assert!(err.message.contains("malformed event token"), "{raw}: {err}");
        }
    }

    #[test]
    fn create_oauth_object_wraps_the_raw_token() {
        let facade = OctocrabEventFacade::new();
        let auth = facade.create_oauth_object("gh-token");
        assert_eq!(auth.access_token(), "gh-token");
    }

    #[test]
    fn hook_request_serializes_to_the_rest_shape() {
        let request = CreateHookRequest {
            name: "web",
            active: true,
            events: [RepoEvent::IssueComment.as_api_str()],
            config: HookConfig {
                url: "https://addon.example/webhooks",
                content_type: "json",
            },
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "name": "web",
                "active": true,
                "events": ["issue_comment"],
                "config": {
                    "url": "https://addon.example/webhooks",
                    "content_type": "json",
                },
            })
        );
    }
}
