//! Commit and pull request gating.
//!
//! This module turns a CI event into a pass/fail verdict: it extracts issue
//! keys from commit messages or the pull request title, applies the
//! key-presence policy, and hands the collected keys to an
//! [`IssueTracker`](crate::tracker::IssueTracker) for verification.

pub mod driver;
pub mod error;
pub mod event;
pub mod keys;
pub mod validation;

pub use driver::{GateOutcome, GateReport, run_gate};
pub use error::GateError;
pub use event::{
    Commit, EventKind, GateEvent, PullRequest, PullRequestAction, PullRequestEvent, PushEvent,
};
pub use keys::{IssueKey, extract_keys};
pub use validation::{CommitValidator, PullRequestValidator, ValidationOutcome, is_release_title};
