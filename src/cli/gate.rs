//! Gate run for the CI event described by the configuration.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use ticketgate::{GateError, GateEvent, GateReport, JiraClient, TicketGateConfig, run_gate};

use super::output::write_report;

/// Loads the event payload, checks it, and prints the report.
///
/// Credentials and the Jira site are resolved before the payload is read, so
/// a misconfigured job fails before any validation runs.
///
/// # Errors
///
/// Returns [`GateError`] for missing configuration, an unreadable or
/// malformed payload, or a failed Jira request.
pub fn run(config: &TicketGateConfig) -> Result<GateReport, GateError> {
    let tracker_config = config.tracker_config()?;
    let kind = config.resolve_event_kind()?;
    let event_path = config.resolve_event_path()?;

    let payload = read_payload(&event_path)?;
    let event = GateEvent::from_json(kind, &payload)?;

    let client = JiraClient::new(tracker_config)?;
    tracing::debug!("checking {kind} event against {}", client.site().base_url());
    let report = run_gate(&event, &client)?;

    write_report(&report)?;
    Ok(report)
}

fn read_payload(path: &Utf8Path) -> Result<String, GateError> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path.file_name().ok_or_else(|| GateError::Io {
        message: format!("invalid event path '{path}': no file name"),
    })?;

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|error| GateError::Io {
        message: format!("failed to open '{parent}': {error}"),
    })?;
    dir.read_to_string(file_name).map_err(|error| GateError::Io {
        message: format!("failed to read event payload '{path}': {error}"),
    })
}
