//! Repository event names.

use serde::{Deserialize, Serialize};

/// A repository webhook event a strategy can subscribe a place to.
///
/// These correspond to GitHub webhook event names. Only the names are
/// modeled here; payload schemas belong to the consumers of the deliveries,
/// not to the subscription lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepoEvent {
    /// Commits pushed to the repository.
    Push,
    /// Issue opened/edited/closed etc.
    Issues,
    /// Comment on an issue or pull request.
    IssueComment,
    /// Pull request opened/synchronized/closed etc.
    PullRequest,
    /// Release published.
    Release,
    /// Collaborator membership changed.
    Member,
}

impl RepoEvent {
    /// Returns the GitHub API event name for this event.
    pub fn as_api_str(&self) -> &'static str {
        match self {
            RepoEvent::Push => "push",
            RepoEvent::Issues => "issues",
            RepoEvent::IssueComment => "issue_comment",
            RepoEvent::PullRequest => "pull_request",
            RepoEvent::Release => "release",
            RepoEvent::Member => "member",
        }
    }
}

impl std::fmt::Display for RepoEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_api_str())
    }
}
