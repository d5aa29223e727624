//! Error types surfaced while loading events or verifying issue keys.

use thiserror::Error;

/// Errors that abort a gate run.
///
/// Validation failures and rejected issue keys are not errors; they are
/// recorded in the [`GateReport`](super::GateReport) and folded into the
/// final outcome. Only preconditions and transport problems end up here.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GateError {
    /// A tracker credential was absent or blank.
    #[error("{name} is required")]
    MissingCredential {
        /// Human-readable name of the missing credential.
        name: &'static str,
    },

    /// No event kind was configured.
    #[error("event name is required (use --event-name or GITHUB_EVENT_NAME)")]
    MissingEventName,

    /// No event payload path was configured.
    #[error("event payload path is required (use --event-path or GITHUB_EVENT_PATH)")]
    MissingEventPath,

    /// Neither a Jira organisation nor an explicit base URL was configured.
    #[error("Jira organisation is required (use --jira-organisation or JIRA_ORGANISATION)")]
    MissingOrganisation,

    /// A tracker URL could not be parsed.
    #[error("Jira URL is invalid: {0}")]
    InvalidUrl(String),

    /// The event kind is neither `push` nor `pull_request`.
    #[error("unsupported event kind: {kind}")]
    UnsupportedEvent {
        /// The event kind as supplied by the caller.
        kind: String,
    },

    /// The event payload does not match the expected shape.
    #[error("event payload is invalid: {message}")]
    InvalidPayload {
        /// Parser detail describing the mismatch.
        message: String,
    },

    /// The tracker answered with a body that could not be understood.
    #[error("Jira API error: {message}")]
    Api {
        /// Details about the malformed response.
        message: String,
    },

    /// Networking failed while calling the tracker.
    #[error("network error talking to Jira: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },
}
