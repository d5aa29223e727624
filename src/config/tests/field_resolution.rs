//! Tests for field resolution methods (`resolve_event_kind`,
//! `resolve_event_path`, `resolve_credentials`, `resolve_site`,
//! `tracker_config`).

use std::time::Duration;

use rstest::rstest;

use crate::TicketGateConfig;
use crate::gate::{EventKind, GateError};

const FALLBACK_VARIABLES: [&str; 5] = [
    "GITHUB_EVENT_NAME",
    "GITHUB_EVENT_PATH",
    "JIRA_USERNAME",
    "JIRA_API_TOKEN",
    "JIRA_ORGANISATION",
];

fn configured() -> TicketGateConfig {
    TicketGateConfig {
        event_name: Some("push".to_owned()),
        event_path: Some("/tmp/event.json".to_owned()),
        jira_username: Some("ci-bot".to_owned()),
        jira_token: Some("token".to_owned()),
        jira_organisation: Some("acme".to_owned()),
        ..Default::default()
    }
}

#[rstest]
fn resolves_configured_values() {
    let config = configured();

    assert_eq!(config.resolve_event_kind(), Ok(EventKind::Push));
    assert_eq!(
        config.resolve_event_path().ok().as_deref().map(camino::Utf8Path::as_str),
        Some("/tmp/event.json")
    );
    assert_eq!(
        config
            .resolve_credentials()
            .ok()
            .map(|credentials| credentials.username().to_owned()),
        Some("ci-bot".to_owned())
    );
    assert_eq!(
        config
            .resolve_site()
            .ok()
            .map(|site| site.base_url().as_str().to_owned()),
        Some("https://acme.atlassian.net/".to_owned())
    );
}

#[rstest]
fn falls_back_to_ci_environment() {
    let _guard = env_lock::lock_env([
        ("GITHUB_EVENT_NAME", Some("pull_request")),
        ("GITHUB_EVENT_PATH", Some("/github/workflow/event.json")),
        ("JIRA_USERNAME", Some("env-user")),
        ("JIRA_API_TOKEN", Some("env-token")),
        ("JIRA_ORGANISATION", Some("envorg")),
    ]);
    let config = TicketGateConfig::default();

    assert_eq!(config.resolve_event_kind(), Ok(EventKind::PullRequest));
    assert_eq!(
        config.resolve_event_path().ok().map(|path| path.to_string()),
        Some("/github/workflow/event.json".to_owned())
    );
    assert!(config.resolve_credentials().is_ok(), "env credentials should resolve");
    assert_eq!(
        config.resolve_site().map(|site| site.base_url().as_str().to_owned()),
        Ok("https://envorg.atlassian.net/".to_owned())
    );
}

#[rstest]
fn reports_missing_values() {
    let _guard = env_lock::lock_env(FALLBACK_VARIABLES.map(|name| (name, None::<&str>)));
    let config = TicketGateConfig::default();

    assert_eq!(config.resolve_event_kind(), Err(GateError::MissingEventName));
    assert_eq!(config.resolve_event_path(), Err(GateError::MissingEventPath));
    assert_eq!(
        config.resolve_credentials().map(|_| ()),
        Err(GateError::MissingCredential {
            name: "Jira username"
        })
    );
    assert_eq!(config.resolve_site(), Err(GateError::MissingOrganisation));
}

#[rstest]
fn blank_token_is_treated_as_missing() {
    let _guard = env_lock::lock_env([("JIRA_API_TOKEN", None::<&str>)]);
    let config = TicketGateConfig {
        jira_token: Some("   ".to_owned()),
        ..configured()
    };

    assert_eq!(
        config.resolve_credentials().map(|_| ()),
        Err(GateError::MissingCredential {
            name: "Jira API token"
        })
    );
}

#[rstest]
fn unknown_event_name_is_rejected() {
    let config = TicketGateConfig {
        event_name: Some("release".to_owned()),
        ..configured()
    };

    assert_eq!(
        config.resolve_event_kind(),
        Err(GateError::UnsupportedEvent {
            kind: "release".to_owned()
        })
    );
}

#[rstest]
fn base_url_takes_precedence_over_organisation() {
    let config = TicketGateConfig {
        jira_base_url: Some("https://jira.example.com".to_owned()),
        ..configured()
    };

    let site = config.resolve_site().expect("site should resolve");

    assert_eq!(site.base_url().as_str(), "https://jira.example.com/");
}

#[rstest]
fn tracker_config_carries_timeout() {
    let config = TicketGateConfig {
        jira_timeout_seconds: 4,
        ..configured()
    };

    let tracker = config.tracker_config().expect("tracker config should build");

    assert_eq!(tracker.timeout, Duration::from_secs(4));
    assert_eq!(tracker.credentials.username(), "ci-bot");
}

#[rstest]
fn zero_timeout_is_rejected() {
    let config = TicketGateConfig {
        jira_timeout_seconds: 0,
        ..configured()
    };

    assert_eq!(
        config.tracker_config().map(|_| ()),
        Err(GateError::Configuration {
            message: "jira_timeout_seconds must be at least 1".to_owned()
        })
    );
}

#[rstest]
fn tracker_config_reports_credentials_before_site() {
    let _guard = env_lock::lock_env(FALLBACK_VARIABLES.map(|name| (name, None::<&str>)));
    let config = TicketGateConfig::default();

    assert_eq!(
        config.tracker_config().map(|_| ()),
        Err(GateError::MissingCredential {
            name: "Jira username"
        })
    );
}
