//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.ticketgate.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `TICKETGATE_*`, falling back to the
//!    variables a CI runner already exports (`GITHUB_EVENT_NAME`,
//!    `GITHUB_EVENT_PATH`, `JIRA_USERNAME`, `JIRA_API_TOKEN`,
//!    `JIRA_ORGANISATION`)
//! 4. **Command-line arguments** – `--event-name`/`-e`, `--jira-token`/`-t`,
//!    and friends
//!
//! # Configuration File
//!
//! ```toml
//! jira_organisation = "acme"
//! jira_username = "ci-bot@example.com"
//! jira_timeout_seconds = 5
//! ```

use std::env;
use std::time::Duration;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::gate::{EventKind, GateError};
use crate::tracker::{JiraClientConfig, JiraSite, TrackerCredentials};

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use ticketgate::TicketGateConfig;
///
/// let config = TicketGateConfig::load().expect("failed to load configuration");
/// let tracker = config.tracker_config().expect("tracker settings required");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "TICKETGATE",
    discovery(
        dotfile_name = ".ticketgate.toml",
        config_file_name = "ticketgate.toml",
        app_name = "ticketgate"
    )
)]
pub struct TicketGateConfig {
    /// Kind of event being checked (`push` or `pull_request`).
    ///
    /// Can be provided via:
    /// - CLI: `--event-name <NAME>` or `-e <NAME>`
    /// - Environment: `TICKETGATE_EVENT_NAME` or `GITHUB_EVENT_NAME`
    #[ortho_config(cli_short = 'e')]
    pub event_name: Option<String>,

    /// Path to the JSON event payload.
    ///
    /// Can be provided via:
    /// - CLI: `--event-path <PATH>` or `-p <PATH>`
    /// - Environment: `TICKETGATE_EVENT_PATH` or `GITHUB_EVENT_PATH`
    #[ortho_config(cli_short = 'p')]
    pub event_path: Option<String>,

    /// Jira account used for basic authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--jira-username <USER>` or `-u <USER>`
    /// - Environment: `TICKETGATE_JIRA_USERNAME` or `JIRA_USERNAME`
    /// - Config file: `jira_username = "..."`
    #[ortho_config(cli_short = 'u')]
    pub jira_username: Option<String>,

    /// Jira API token paired with `jira_username`.
    ///
    /// Can be provided via:
    /// - CLI: `--jira-token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `TICKETGATE_JIRA_TOKEN` or `JIRA_API_TOKEN`
    #[ortho_config(cli_short = 't')]
    pub jira_token: Option<String>,

    /// Atlassian Cloud organisation; the site is
    /// `https://{organisation}.atlassian.net`.
    ///
    /// Can be provided via:
    /// - CLI: `--jira-organisation <ORG>` or `-o <ORG>`
    /// - Environment: `TICKETGATE_JIRA_ORGANISATION` or `JIRA_ORGANISATION`
    /// - Config file: `jira_organisation = "..."`
    #[ortho_config(cli_short = 'o')]
    pub jira_organisation: Option<String>,

    /// Explicit Jira base URL. Takes precedence over `jira_organisation`.
    /// Must be `https` unless the host is loopback.
    ///
    /// Can be provided via:
    /// - CLI: `--jira-base-url <URL>`
    /// - Environment: `TICKETGATE_JIRA_BASE_URL`
    /// - Config file: `jira_base_url = "..."`
    #[ortho_config()]
    pub jira_base_url: Option<String>,

    /// Timeout applied to each Jira request, in seconds.
    ///
    /// Defaults to 10 seconds; zero is rejected.
    #[ortho_config()]
    pub jira_timeout_seconds: u64,
}

const DEFAULT_JIRA_TIMEOUT_SECONDS: u64 = 10;

impl Default for TicketGateConfig {
    fn default() -> Self {
        Self {
            event_name: None,
            event_path: None,
            jira_username: None,
            jira_token: None,
            jira_organisation: None,
            jira_base_url: None,
            jira_timeout_seconds: DEFAULT_JIRA_TIMEOUT_SECONDS,
        }
    }
}

/// Returns the configured value or the named environment variable, ignoring
/// blank values from either source.
fn value_or_env(value: Option<&String>, variable: &str) -> Option<String> {
    value
        .cloned()
        .filter(|configured| !configured.trim().is_empty())
        .or_else(|| env::var(variable).ok())
        .filter(|resolved| !resolved.trim().is_empty())
}

impl TicketGateConfig {
    /// Resolves the event kind, falling back to `GITHUB_EVENT_NAME`.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::MissingEventName`] when no source provides a
    /// value and [`GateError::UnsupportedEvent`] for unknown kinds.
    pub fn resolve_event_kind(&self) -> Result<EventKind, GateError> {
        let name = value_or_env(self.event_name.as_ref(), "GITHUB_EVENT_NAME")
            .ok_or(GateError::MissingEventName)?;
        EventKind::parse(&name)
    }

    /// Resolves the payload path, falling back to `GITHUB_EVENT_PATH`.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::MissingEventPath`] when no source provides a
    /// value.
    pub fn resolve_event_path(&self) -> Result<Utf8PathBuf, GateError> {
        value_or_env(self.event_path.as_ref(), "GITHUB_EVENT_PATH")
            .map(Utf8PathBuf::from)
            .ok_or(GateError::MissingEventPath)
    }

    /// Resolves the Jira credentials, falling back to `JIRA_USERNAME` and
    /// `JIRA_API_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::MissingCredential`] when either value is absent
    /// or blank.
    pub fn resolve_credentials(&self) -> Result<TrackerCredentials, GateError> {
        let username = value_or_env(self.jira_username.as_ref(), "JIRA_USERNAME").ok_or(
            GateError::MissingCredential {
                name: "Jira username",
            },
        )?;
        let token = value_or_env(self.jira_token.as_ref(), "JIRA_API_TOKEN").ok_or(
            GateError::MissingCredential {
                name: "Jira API token",
            },
        )?;
        TrackerCredentials::new(username, token)
    }

    /// Resolves the Jira site from `jira_base_url`, or else from the
    /// organisation (falling back to `JIRA_ORGANISATION`).
    ///
    /// # Errors
    ///
    /// Returns [`GateError::MissingOrganisation`] when neither is set and
    /// [`GateError::InvalidUrl`] when the value is malformed.
    pub fn resolve_site(&self) -> Result<JiraSite, GateError> {
        if let Some(base_url) = self
            .jira_base_url
            .as_deref()
            .filter(|base_url| !base_url.trim().is_empty())
        {
            return JiraSite::parse(base_url);
        }

        let organisation = value_or_env(self.jira_organisation.as_ref(), "JIRA_ORGANISATION")
            .ok_or(GateError::MissingOrganisation)?;
        JiraSite::for_organisation(&organisation)
    }

    /// The per-request Jira timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.jira_timeout_seconds)
    }

    /// Assembles the Jira client configuration.
    ///
    /// Credentials are checked first so a missing secret is reported before
    /// any site problem.
    ///
    /// # Errors
    ///
    /// Propagates failures from [`Self::resolve_credentials`] and
    /// [`Self::resolve_site`], and returns [`GateError::Configuration`] when
    /// `jira_timeout_seconds` is zero.
    pub fn tracker_config(&self) -> Result<JiraClientConfig, GateError> {
        let credentials = self.resolve_credentials()?;
        let site = self.resolve_site()?;
        if self.jira_timeout_seconds == 0 {
            return Err(GateError::Configuration {
                message: "jira_timeout_seconds must be at least 1".to_owned(),
            });
        }
        Ok(JiraClientConfig::new(site, credentials).with_timeout(self.request_timeout()))
    }
}

#[cfg(test)]
mod tests;
