//! Per-commit and per-title validation.
//!
//! Validators are evaluated lazily: the first query scans the text and every
//! later query returns the cached [`ValidationOutcome`].

use std::cell::OnceCell;
use std::sync::LazyLock;

use regex::Regex;

use super::event::{Commit, PullRequest};
use super::keys::{IssueKey, extract_keys};

static RELEASE_TITLE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new("^(?i:release)/[0-9]{4}(?:-[abc])?$").ok());

/// Result of validating one commit or pull request title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    /// Commit SHA or pull request title.
    pub subject_id: String,
    /// Whether the subject satisfied the key policy.
    pub is_valid: bool,
    /// Keys found in the subject, in order of appearance.
    pub keys: Vec<IssueKey>,
}

impl ValidationOutcome {
    fn from_keys(subject_id: &str, keys: Vec<IssueKey>) -> Self {
        Self {
            subject_id: subject_id.to_owned(),
            is_valid: !keys.is_empty(),
            keys,
        }
    }
}

/// Checks that a commit message references at least one issue key.
#[derive(Debug)]
pub struct CommitValidator {
    commit: Commit,
    outcome: OnceCell<ValidationOutcome>,
}

impl CommitValidator {
    /// Wraps a commit without evaluating it.
    #[must_use]
    pub const fn new(commit: Commit) -> Self {
        Self {
            commit,
            outcome: OnceCell::new(),
        }
    }

    /// The commit under validation.
    #[must_use]
    pub const fn commit(&self) -> &Commit {
        &self.commit
    }

    /// Evaluates the commit on first call and returns the cached outcome.
    #[must_use]
    pub fn outcome(&self) -> &ValidationOutcome {
        self.outcome.get_or_init(|| {
            ValidationOutcome::from_keys(&self.commit.id, extract_keys(&self.commit.message))
        })
    }

    /// Whether the commit message contains an issue key.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.outcome().is_valid
    }

    /// Keys referenced by the commit message.
    #[must_use]
    pub fn keys(&self) -> &[IssueKey] {
        &self.outcome().keys
    }
}

/// Checks a pull request title.
///
/// Release titles (`release/YYMM`, optionally suffixed `-a`, `-b` or `-c`)
/// pass without referencing an issue. Any other title must contain at least
/// one issue key.
#[derive(Debug)]
pub struct PullRequestValidator {
    pull_request: PullRequest,
    outcome: OnceCell<ValidationOutcome>,
}

impl PullRequestValidator {
    /// Wraps a pull request without evaluating it.
    #[must_use]
    pub const fn new(pull_request: PullRequest) -> Self {
        Self {
            pull_request,
            outcome: OnceCell::new(),
        }
    }

    /// Evaluates the title on first call and returns the cached outcome.
    #[must_use]
    pub fn outcome(&self) -> &ValidationOutcome {
        self.outcome.get_or_init(|| {
            let title = self.pull_request.title.as_str();
            if is_release_title(title) {
                tracing::debug!("pull request title {title:?} is a release title");
                return ValidationOutcome {
                    subject_id: title.to_owned(),
                    is_valid: true,
                    keys: Vec::new(),
                };
            }
            ValidationOutcome::from_keys(title, extract_keys(title))
        })
    }

    /// Whether the title satisfies the policy.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.outcome().is_valid
    }

    /// Keys referenced by the title. Empty for release titles.
    #[must_use]
    pub fn keys(&self) -> &[IssueKey] {
        &self.outcome().keys
    }
}

/// Whether `title` follows the `release/YYMM[-a|-b|-c]` convention.
#[must_use]
pub fn is_release_title(title: &str) -> bool {
    RELEASE_TITLE
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(title.trim()))
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
