//! Community resolution and extended-properties fetch.

use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::JiveSession;

/// The community/context owning a place, as resolved from its context URL.
///
/// Opaque to this addon beyond the URL itself; whatever else the platform
/// returns rides along in `extra` for the API facade's benefit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityContext {
    #[serde(rename = "jiveUrl")]
    pub jive_url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CommunityContext {
    pub fn new(jive_url: impl Into<String>) -> Self {
        CommunityContext {
            jive_url: jive_url.into(),
            extra: Map::new(),
        }
    }
}

/// The extended-properties payload for a place.
///
/// The provider stores the repository linkage under its own property names;
/// the record keeps them as `github.repo` / `github.repoOwner`. Fields the
/// provider has not set come back absent, not empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtProps {
    #[serde(rename = "github4jiveRepo", default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    #[serde(
        rename = "github4jiveRepoOwner",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub repo_owner: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Resolves the community owning a given context URL.
pub trait CommunityResolver {
    /// The error type returned by this resolver.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Looks up the community registered for a context URL.
    fn find_by_context_url(
        &self,
        jive_url: &str,
    ) -> impl Future<Output = Result<CommunityContext, Self::Error>> + Send;
}

/// The platform REST facade, reduced to the one lookup the store needs.
///
/// `path` is the provider-side property path, e.g. `places/42`.
pub trait PlaceApi {
    /// The error type returned by this facade.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetches all extended properties stored under `path`, authenticated
    /// as `session` against `community`.
    fn get_all_ext_props(
        &self,
        community: &CommunityContext,
        session: &JiveSession,
        path: &str,
    ) -> impl Future<Output = Result<ExtProps, Self::Error>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ext_props_use_provider_field_names() {
        let props: ExtProps = serde_json::from_value(json!({
            "github4jiveRepo": "place-link",
            "github4jiveRepoOwner": "octocat",
            "somethingElse": true,
        }))
        .unwrap();

        assert_eq!(props.repo.as_deref(), Some("place-link"));
        assert_eq!(props.repo_owner.as_deref(), Some("octocat"));
        assert_eq!(props.extra["somethingElse"], json!(true));
    }

    #[test]
    fn unset_ext_props_come_back_absent() {
        let props: ExtProps = serde_json::from_value(json!({})).unwrap();
        assert_eq!(props.repo, None);
        assert_eq!(props.repo_owner, None);
    }
}
