//! Shared test doubles and arbitrary generators.
//!
//! The mocks record every observed call in arrival order so tests can
//! assert not just counts but sequencing across collaborators.

use std::convert::Infallible;
use std::sync::{Arc, Mutex};

use proptest::prelude::*;
use serde_json::Value;

use crate::github::{EventFacade, OauthCredential, RepoEvent, RepoEventSubscription};
use crate::jive::{CommunityContext, CommunityResolver, ExtProps, JiveSession, PlaceApi};
use crate::persistence::{MemoryStore, PersistentStore};
use crate::types::EventToken;

/// A failure injected by a test double.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct CollaboratorFailure(pub &'static str);

/// One observed collaborator call.
#[derive(Debug, Clone, PartialEq)]
pub enum CollabCall {
    FindById { key: String },
    FindAll,
    Save { key: String, invalid_cache: Option<bool> },
    ResolveCommunity { jive_url: String },
    FetchExtProps { path: String, place_url: String, access_token: String },
}

pub type CallLog = Arc<Mutex<Vec<CollabCall>>>;

pub fn new_call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn drain(log: &CallLog) -> Vec<CollabCall> {
    std::mem::take(&mut *log.lock().unwrap())
}

/// Memory-backed persistence that records every call in a shared log.
pub struct LoggingStore {
    pub inner: MemoryStore,
    pub log: CallLog,
}

impl LoggingStore {
    pub fn new(log: CallLog) -> Self {
        LoggingStore {
            inner: MemoryStore::new(),
            log,
        }
    }
}

impl PersistentStore for LoggingStore {
    type Error = Infallible;

    async fn find_by_id(&self, collection: &str, key: &str) -> Result<Option<Value>, Infallible> {
        self.log.lock().unwrap().push(CollabCall::FindById {
            key: key.to_string(),
        });
        self.inner.find_by_id(collection, key).await
    }

    async fn find(&self, collection: &str) -> Result<Vec<Value>, Infallible> {
        self.log.lock().unwrap().push(CollabCall::FindAll);
        self.inner.find(collection).await
    }

    async fn save(&self, collection: &str, key: &str, record: Value) -> Result<(), Infallible> {
        self.log.lock().unwrap().push(CollabCall::Save {
            key: key.to_string(),
            invalid_cache: record.get("invalidCache").and_then(Value::as_bool),
        });
        self.inner.save(collection, key, record).await
    }
}

/// Resolver returning a community for whatever URL it is asked about.
pub struct StaticResolver {
    pub log: CallLog,
    pub fail: bool,
}

impl StaticResolver {
    pub fn new(log: CallLog) -> Self {
        StaticResolver { log, fail: false }
    }
}

impl CommunityResolver for StaticResolver {
    type Error = CollaboratorFailure;

    async fn find_by_context_url(
        &self,
        jive_url: &str,
    ) -> Result<CommunityContext, CollaboratorFailure> {
        self.log.lock().unwrap().push(CollabCall::ResolveCommunity {
            jive_url: jive_url.to_string(),
        });
        if self.fail {
            return Err(CollaboratorFailure("community resolution refused"));
        }
        Ok(CommunityContext::new(jive_url))
    }
}

/// Extended-properties source returning a fixed owner/name pair.
pub struct StaticPlaceApi {
    pub log: CallLog,
    pub repo: Option<String>,
    pub repo_owner: Option<String>,
    pub fail: bool,
}

impl StaticPlaceApi {
    pub fn new(log: CallLog) -> Self {
        StaticPlaceApi {
            log,
            repo: Some("hello-world".to_string()),
            repo_owner: Some("octocat".to_string()),
            fail: false,
        }
    }
}

impl PlaceApi for StaticPlaceApi {
    type Error = CollaboratorFailure;

    async fn get_all_ext_props(
        &self,
        _community: &CommunityContext,
        session: &JiveSession,
        path: &str,
    ) -> Result<ExtProps, CollaboratorFailure> {
        self.log.lock().unwrap().push(CollabCall::FetchExtProps {
            path: path.to_string(),
            place_url: session.place_url().to_string(),
            access_token: session.access_token().to_string(),
        });
        if self.fail {
            return Err(CollaboratorFailure("extended properties unavailable"));
        }
        Ok(ExtProps {
            repo: self.repo.clone(),
            repo_owner: self.repo_owner.clone(),
            ..ExtProps::default()
        })
    }
}

/// One observed facade call.
#[derive(Debug, Clone, PartialEq)]
pub enum FacadeCall {
    CreateOauth { github_token: String },
    Subscribe { owner: String, repo: String, event: RepoEvent },
    Unsubscribe { token: String, auth_token: String },
}

/// An event facade that records calls and returns a fixed token.
pub struct RecordingFacade {
    calls: Mutex<Vec<FacadeCall>>,
    pub token: EventToken,
    pub fail_subscribe: bool,
    pub fail_unsubscribe: bool,
}

impl RecordingFacade {
    pub fn new() -> Self {
        RecordingFacade {
            calls: Mutex::new(Vec::new()),
            token: EventToken::new("octocat/hello-world/7"),
            fail_subscribe: false,
            fail_unsubscribe: false,
        }
    }

    pub fn calls(&self) -> Vec<FacadeCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl EventFacade for RecordingFacade {
    type Error = CollaboratorFailure;

    fn create_oauth_object(&self, github_token: &str) -> OauthCredential {
        self.calls.lock().unwrap().push(FacadeCall::CreateOauth {
            github_token: github_token.to_string(),
        });
        OauthCredential::new(github_token)
    }

    async fn subscribe_to_repo_event(
        &self,
        subscription: &RepoEventSubscription,
        _auth: &OauthCredential,
    ) -> Result<EventToken, CollaboratorFailure> {
        self.calls.lock().unwrap().push(FacadeCall::Subscribe {
            owner: subscription.owner.clone(),
            repo: subscription.repo.clone(),
            event: subscription.event,
        });
        if self.fail_subscribe {
            return Err(CollaboratorFailure("subscribe refused"));
        }
        Ok(self.token.clone())
    }

    async fn unsubscribe_from_repo_event(
        &self,
        token: &EventToken,
        auth: &OauthCredential,
    ) -> Result<(), CollaboratorFailure> {
        self.calls.lock().unwrap().push(FacadeCall::Unsubscribe {
            token: token.as_str().to_string(),
            auth_token: auth.access_token().to_string(),
        });
        if self.fail_unsubscribe {
            return Err(CollaboratorFailure("unsubscribe refused"));
        }
        Ok(())
    }
}

pub fn arb_place_url() -> impl Strategy<Value = String> {
    ("[a-z]{3,8}", 0u32..100_000)
        .prop_map(|(host, id)| format!("https://{host}.com/api/core/v3/places/{id}"))
}
