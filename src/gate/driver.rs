//! Runs the gate over one event.

use super::error::GateError;
use super::event::{EventKind, GateEvent, PullRequestEvent, PushEvent};
use super::keys::IssueKey;
use super::validation::{CommitValidator, PullRequestValidator, ValidationOutcome};
use crate::tracker::{IssueTracker, TrackerVerificationResult, verify_keys};

/// Final verdict of a gate run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Every subject referenced an issue and every issue was accepted.
    Passed,
    /// A subject lacked an issue key or an issue was rejected.
    Failed,
    /// The event needs no checking.
    Skipped {
        /// Why the event was not checked.
        reason: String,
    },
}

/// Everything a gate run found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateReport {
    /// The kind of event that was checked.
    pub kind: EventKind,
    /// Final verdict.
    pub outcome: GateOutcome,
    /// One entry per commit, or a single entry for the pull request title.
    pub validations: Vec<ValidationOutcome>,
    /// Keys sent for verification, in order, including duplicates.
    pub keys: Vec<IssueKey>,
    /// One result per entry in `keys`.
    pub verifications: Vec<TrackerVerificationResult>,
}

impl GateReport {
    fn skipped(kind: EventKind, reason: String) -> Self {
        Self {
            kind,
            outcome: GateOutcome::Skipped { reason },
            validations: Vec::new(),
            keys: Vec::new(),
            verifications: Vec::new(),
        }
    }

    /// Whether the CI job should fail.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self.outcome, GateOutcome::Failed)
    }

    /// Subjects that did not reference an issue.
    pub fn failing_subjects(&self) -> impl Iterator<Item = &ValidationOutcome> {
        self.validations
            .iter()
            .filter(|validation| !validation.is_valid)
    }

    /// Verification results that rejected their key.
    pub fn rejected_keys(&self) -> impl Iterator<Item = &TrackerVerificationResult> {
        self.verifications.iter().filter(|result| !result.valid)
    }
}

/// Checks `event`, verifying every referenced key with `tracker`.
///
/// # Errors
///
/// Propagates tracker errors (network failures or undecodable responses).
/// Missing keys and rejected issues are reported in the [`GateReport`], not
/// as errors.
pub fn run_gate(event: &GateEvent, tracker: &dyn IssueTracker) -> Result<GateReport, GateError> {
    match event {
        GateEvent::Push(push) => check_push(push, tracker),
        GateEvent::PullRequest(pull_request) => check_pull_request(pull_request, tracker),
    }
}

fn check_push(push: &PushEvent, tracker: &dyn IssueTracker) -> Result<GateReport, GateError> {
    let validations: Vec<ValidationOutcome> = push
        .commits
        .iter()
        .map(|commit| CommitValidator::new(commit.clone()).outcome().clone())
        .collect();

    for failing in validations.iter().filter(|validation| !validation.is_valid) {
        tracing::info!("commit {} does not reference an issue", failing.subject_id);
    }

    let keys: Vec<IssueKey> = validations
        .iter()
        .flat_map(|validation| validation.keys.iter().cloned())
        .collect();

    finish(EventKind::Push, validations, keys, tracker)
}

fn check_pull_request(
    event: &PullRequestEvent,
    tracker: &dyn IssueTracker,
) -> Result<GateReport, GateError> {
    if !event.action.is_gated() {
        let action = event.action.as_str();
        tracing::info!("pull request action {action:?} is not checked");
        return Ok(GateReport::skipped(
            EventKind::PullRequest,
            format!("pull request action {action:?} is not checked"),
        ));
    }

    let validator = PullRequestValidator::new(event.pull_request.clone());
    let validation = validator.outcome().clone();

    if !validation.is_valid {
        tracing::info!(
            "pull request title {:?} does not reference an issue",
            validation.subject_id
        );
        return Ok(GateReport {
            kind: EventKind::PullRequest,
            outcome: GateOutcome::Failed,
            validations: vec![validation],
            keys: Vec::new(),
            verifications: Vec::new(),
        });
    }

    let keys = validation.keys.clone();
    finish(EventKind::PullRequest, vec![validation], keys, tracker)
}

fn finish(
    kind: EventKind,
    validations: Vec<ValidationOutcome>,
    keys: Vec<IssueKey>,
    tracker: &dyn IssueTracker,
) -> Result<GateReport, GateError> {
    let verifications = verify_keys(tracker, &keys)?;

    let all_subjects_valid = validations.iter().all(|validation| validation.is_valid);
    let all_keys_valid = verifications.iter().all(|result| result.valid);
    let outcome = if all_subjects_valid && all_keys_valid {
        GateOutcome::Passed
    } else {
        GateOutcome::Failed
    };
    tracing::info!(
        "{kind} gate {:?}: {} subject(s), {} key(s)",
        outcome,
        validations.len(),
        keys.len()
    );

    Ok(GateReport {
        kind,
        outcome,
        validations,
        keys,
        verifications,
    })
}
