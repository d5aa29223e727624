//! Ticketgate library crate providing the issue-key gate for CI jobs.
//!
//! The library extracts issue keys from pushed commit messages or pull
//! request titles, checks that every commit or title references one, and
//! verifies each referenced issue against Jira. The CLI turns the resulting
//! [`GateReport`] into a summary and an exit code.

pub mod config;
pub mod gate;
pub mod tracker;

pub use config::TicketGateConfig;
pub use gate::{
    EventKind, GateError, GateEvent, GateOutcome, GateReport, IssueKey, extract_keys, run_gate,
};
pub use tracker::{
    IssueTracker, JiraClient, JiraClientConfig, JiraSite, LookupStatus, TrackerCredentials,
    TrackerVerificationResult, verify_keys,
};
