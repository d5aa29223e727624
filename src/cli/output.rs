//! Output formatting utilities for CLI operations.

use std::io::{self, Write};

use ticketgate::gate::ValidationOutcome;
use ticketgate::{
    GateError, GateOutcome, GateReport, IssueKey, LookupStatus, TrackerVerificationResult,
};

/// Writes the gate report to stdout.
pub fn write_report(report: &GateReport) -> Result<(), GateError> {
    let mut stdout = io::stdout().lock();
    write_report_to(&mut stdout, report)
}

/// Writes the gate report to the given writer.
pub fn write_report_to<W: Write>(writer: &mut W, report: &GateReport) -> Result<(), GateError> {
    if let GateOutcome::Skipped { reason } = &report.outcome {
        writeln!(writer, "{} event skipped: {reason}", report.kind).map_err(|e| io_error(&e))?;
        return Ok(());
    }

    writeln!(
        writer,
        "{} event: {} subject(s) checked",
        report.kind,
        report.validations.len()
    )
    .map_err(|e| io_error(&e))?;
    for validation in &report.validations {
        writeln!(writer, "  {}", describe_validation(validation)).map_err(|e| io_error(&e))?;
    }

    if !report.verifications.is_empty() {
        writeln!(writer, "Issue verification:").map_err(|e| io_error(&e))?;
        for result in &report.verifications {
            writeln!(writer, "  {}", describe_verification(result)).map_err(|e| io_error(&e))?;
        }
    }

    let verdict = if report.is_failure() { "FAILED" } else { "passed" };
    writeln!(writer, "Result: {verdict}").map_err(|e| io_error(&e))
}

fn describe_validation(validation: &ValidationOutcome) -> String {
    if !validation.is_valid {
        return format!("{} has no issue key", validation.subject_id);
    }
    if validation.keys.is_empty() {
        return format!("{} is a release title", validation.subject_id);
    }
    let keys: Vec<&str> = validation.keys.iter().map(IssueKey::as_str).collect();
    format!("{} references {}", validation.subject_id, keys.join(", "))
}

fn describe_verification(result: &TrackerVerificationResult) -> String {
    let status_name = result.remote_status_name.as_deref().unwrap_or("no status");
    let detail = match result.status {
        LookupStatus::Placeholder => "placeholder, not looked up".to_owned(),
        LookupStatus::NotFound => "not found".to_owned(),
        LookupStatus::Other(code) => format!("unexpected HTTP status {code}"),
        LookupStatus::Ok => match result.assignee.as_deref() {
            Some(assignee) => format!("{status_name}, assigned to {assignee}"),
            None => status_name.to_owned(),
        },
    };
    let verdict = if result.valid { "ok" } else { "rejected" };
    format!("{} {verdict}: {detail}", result.key)
}

/// Converts an I/O error to a [`GateError::Io`].
pub(crate) fn io_error(error: &io::Error) -> GateError {
    GateError::Io {
        message: error.to_string(),
    }
}
