//! Issue tracker verification.
//!
//! Every referenced issue key is checked against the tracker: it must exist
//! and sit in one of the accepted workflow statuses. Placeholder keys such as
//! `ABC-0` stand for tickets that have not been cut yet and are accepted
//! without a lookup.
//!
//! The [`IssueTracker`] trait performs a single remote lookup so tests can
//! substitute a mock; [`JiraClient`] is the HTTP implementation.

pub mod jira;
mod models;

pub use jira::{JiraClient, JiraClientConfig, JiraSite, TrackerCredentials};

use crate::gate::{GateError, IssueKey};

/// Workflow statuses in which a referenced issue is acceptable.
pub const ACCEPTED_STATUSES: [&str; 3] = ["Ready For Release", "Ready For Test", "In Progress"];

/// How a lookup resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStatus {
    /// The tracker returned the issue.
    Ok,
    /// The tracker does not know the issue.
    NotFound,
    /// The tracker answered with an unexpected HTTP status.
    Other(u16),
    /// The key is a placeholder and was not looked up.
    Placeholder,
}

/// Raw answer from the tracker for one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueLookup {
    /// How the lookup resolved.
    pub status: LookupStatus,
    /// Workflow status name reported by the tracker.
    pub status_name: Option<String>,
    /// Issue type name (e.g. `Story`).
    pub issue_type: Option<String>,
    /// Display name of the assignee.
    pub assignee: Option<String>,
}

impl IssueLookup {
    /// A lookup that found the issue in `status_name`.
    #[must_use]
    pub fn found(status_name: impl Into<String>) -> Self {
        Self {
            status: LookupStatus::Ok,
            status_name: Some(status_name.into()),
            issue_type: None,
            assignee: None,
        }
    }

    /// A lookup for an issue the tracker does not know.
    #[must_use]
    pub const fn not_found() -> Self {
        Self::bare(LookupStatus::NotFound)
    }

    /// A lookup answered with some other HTTP status code.
    #[must_use]
    pub const fn unexpected(code: u16) -> Self {
        Self::bare(LookupStatus::Other(code))
    }

    const fn bare(status: LookupStatus) -> Self {
        Self {
            status,
            status_name: None,
            issue_type: None,
            assignee: None,
        }
    }
}

/// Verification verdict for one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerVerificationResult {
    /// The key that was checked.
    pub key: IssueKey,
    /// Whether the key passed verification.
    pub valid: bool,
    /// How the lookup resolved.
    pub status: LookupStatus,
    /// Workflow status name reported by the tracker.
    pub remote_status_name: Option<String>,
    /// Issue type name reported by the tracker.
    pub issue_type: Option<String>,
    /// Display name of the assignee.
    pub assignee: Option<String>,
}

impl TrackerVerificationResult {
    fn placeholder(key: IssueKey) -> Self {
        Self {
            key,
            valid: true,
            status: LookupStatus::Placeholder,
            remote_status_name: None,
            issue_type: None,
            assignee: None,
        }
    }

    fn from_lookup(key: IssueKey, lookup: IssueLookup) -> Self {
        let valid = lookup.status == LookupStatus::Ok
            && lookup
                .status_name
                .as_deref()
                .is_some_and(is_accepted_status);
        Self {
            key,
            valid,
            status: lookup.status,
            remote_status_name: lookup.status_name,
            issue_type: lookup.issue_type,
            assignee: lookup.assignee,
        }
    }
}

/// Whether `status_name` is one of the [`ACCEPTED_STATUSES`].
#[must_use]
pub fn is_accepted_status(status_name: &str) -> bool {
    ACCEPTED_STATUSES.contains(&status_name)
}

/// Looks up issues in a remote tracker.
#[cfg_attr(test, mockall::automock)]
pub trait IssueTracker: Send + Sync {
    /// Performs one lookup for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Network`] when the tracker cannot be reached and
    /// [`GateError::Api`] when a successful response cannot be decoded.
    /// Unknown issues and unexpected status codes are not errors; they are
    /// reported through [`IssueLookup::status`].
    fn lookup(&self, key: &IssueKey) -> Result<IssueLookup, GateError>;
}

/// Verifies `keys` in order, one result per key.
///
/// Duplicate keys are looked up again. Placeholder keys are accepted without
/// contacting the tracker.
///
/// # Errors
///
/// Stops at the first lookup error; no partial results are returned.
pub fn verify_keys(
    tracker: &dyn IssueTracker,
    keys: &[IssueKey],
) -> Result<Vec<TrackerVerificationResult>, GateError> {
    keys.iter()
        .map(|key| {
            if key.is_placeholder() {
                tracing::debug!("{key} is a placeholder; skipping lookup");
                return Ok(TrackerVerificationResult::placeholder(key.clone()));
            }

            let lookup = tracker.lookup(key)?;
            let result = TrackerVerificationResult::from_lookup(key.clone(), lookup);
            if !result.valid {
                tracing::warn!(
                    "{key} rejected: {:?} (status {:?})",
                    result.status,
                    result.remote_status_name
                );
            }
            Ok(result)
        })
        .collect()
}
