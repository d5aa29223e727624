//! Typed webhook payloads accepted by the gate.
//!
//! Only the fields the gate reads are modelled; anything else in the payload
//! is ignored. Payloads missing a required field are rejected up front rather
//! than failing later during validation.

use std::fmt;

use serde::Deserialize;

use super::error::GateError;

/// The kind of event that triggered the CI job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// One or more commits were pushed.
    Push,
    /// A pull request changed.
    PullRequest,
}

impl EventKind {
    /// Parses the event name reported by the CI system.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::UnsupportedEvent`] for anything other than `push`
    /// or `pull_request`.
    pub fn parse(value: &str) -> Result<Self, GateError> {
        match value.trim() {
            "push" => Ok(Self::Push),
            "pull_request" => Ok(Self::PullRequest),
            other => Err(GateError::UnsupportedEvent {
                kind: other.to_owned(),
            }),
        }
    }

    /// The event name as used by the CI system.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::PullRequest => "pull_request",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A pushed commit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Commit {
    /// Commit SHA.
    pub id: String,
    /// Full commit message. Missing messages deserialise as empty.
    #[serde(default)]
    pub message: String,
}

/// Pull request fields used by the gate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequest {
    /// Pull request title.
    pub title: String,
}

/// Pull request webhook action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum PullRequestAction {
    /// The pull request was opened.
    Opened,
    /// A closed pull request was reopened.
    Reopened,
    /// The title or body was edited.
    Edited,
    /// A draft was marked ready for review.
    ReadyForReview,
    /// New commits were pushed to the head branch.
    Synchronize,
    /// Any other action, such as `closed` or `labeled`.
    Other(String),
}

impl PullRequestAction {
    /// Whether the gate checks pull requests for this action.
    #[must_use]
    pub const fn is_gated(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// The action name as sent in the payload.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Opened => "opened",
            Self::Reopened => "reopened",
            Self::Edited => "edited",
            Self::ReadyForReview => "ready_for_review",
            Self::Synchronize => "synchronize",
            Self::Other(action) => action.as_str(),
        }
    }
}

impl From<String> for PullRequestAction {
    fn from(value: String) -> Self {
        match value.as_str() {
            "opened" => Self::Opened,
            "reopened" => Self::Reopened,
            "edited" => Self::Edited,
            "ready_for_review" => Self::ReadyForReview,
            "synchronize" => Self::Synchronize,
            _ => Self::Other(value),
        }
    }
}

/// Payload of a `push` event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PushEvent {
    /// Commits included in the push, oldest first.
    pub commits: Vec<Commit>,
}

/// Payload of a `pull_request` event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequestEvent {
    /// What happened to the pull request.
    pub action: PullRequestAction,
    /// The pull request itself.
    pub pull_request: PullRequest,
}

/// An event the gate knows how to check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateEvent {
    /// Commits were pushed.
    Push(PushEvent),
    /// A pull request changed.
    PullRequest(PullRequestEvent),
}

impl GateEvent {
    /// Parses a JSON payload according to the shape expected for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidPayload`] when the JSON is malformed or a
    /// required field is missing.
    pub fn from_json(kind: EventKind, payload: &str) -> Result<Self, GateError> {
        let parsed = match kind {
            EventKind::Push => serde_json::from_str(payload).map(Self::Push),
            EventKind::PullRequest => serde_json::from_str(payload).map(Self::PullRequest),
        };

        parsed.map_err(|error| GateError::InvalidPayload {
            message: format!("{kind} payload: {error}"),
        })
    }

    /// The kind of this event.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Push(_) => EventKind::Push,
            Self::PullRequest(_) => EventKind::PullRequest,
        }
    }
}
