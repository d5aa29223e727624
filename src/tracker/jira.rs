//! Jira Cloud implementation of [`IssueTracker`].

use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use url::{Host, Url};

use super::models::ApiIssue;
use super::{IssueLookup, IssueTracker};
use crate::gate::{GateError, IssueKey};

const ISSUE_FIELDS: &str = "key,assignee,status,issuetype";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Base URL of a Jira site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JiraSite(Url);

impl JiraSite {
    /// The Atlassian Cloud site for `organisation`
    /// (`https://{organisation}.atlassian.net`).
    ///
    /// # Errors
    ///
    /// Returns [`GateError::MissingOrganisation`] for a blank organisation
    /// and [`GateError::InvalidUrl`] when it does not form a valid host.
    pub fn for_organisation(organisation: &str) -> Result<Self, GateError> {
        let trimmed = organisation.trim();
        if trimmed.is_empty() {
            return Err(GateError::MissingOrganisation);
        }
        if !trimmed
            .chars()
            .all(|character| character.is_ascii_alphanumeric() || character == '-')
        {
            return Err(GateError::InvalidUrl(format!(
                "organisation {trimmed:?} is not a valid host label"
            )));
        }
        Self::parse(&format!("https://{trimmed}.atlassian.net"))
    }

    /// Uses an explicit base URL such as `https://jira.example.com`.
    ///
    /// Plain `http` is only accepted for loopback hosts.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidUrl`] when the URL cannot be parsed, is
    /// not HTTP(S), or uses `http` for a host other than loopback.
    pub fn parse(base_url: &str) -> Result<Self, GateError> {
        let parsed =
            Url::parse(base_url.trim()).map_err(|error| GateError::InvalidUrl(error.to_string()))?;

        match parsed.scheme() {
            "https" => Ok(Self(parsed)),
            "http" if is_loopback(&parsed) => Ok(Self(parsed)),
            "http" => Err(GateError::InvalidUrl(format!(
                "plain http is only allowed for loopback hosts, got {base_url}"
            ))),
            scheme => Err(GateError::InvalidUrl(format!(
                "unsupported scheme {scheme:?} in {base_url}"
            ))),
        }
    }

    /// Borrow the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.0
    }

    /// The issue lookup endpoint for `key`.
    #[must_use]
    pub fn issue_url(&self, key: &IssueKey) -> String {
        format!(
            "{}/rest/api/3/issue/{key}?fields={ISSUE_FIELDS}",
            self.0.as_str().trim_end_matches('/')
        )
    }
}

fn is_loopback(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(address)) => address.is_loopback(),
        Some(Host::Ipv6(address)) => address.is_loopback(),
        None => false,
    }
}

/// Username and API token used for basic authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct TrackerCredentials {
    username: String,
    token: String,
}

impl TrackerCredentials {
    /// Validates that both values are present, trimming whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::MissingCredential`] naming the blank value.
    pub fn new(username: impl AsRef<str>, token: impl AsRef<str>) -> Result<Self, GateError> {
        let username_value = username.as_ref().trim();
        if username_value.is_empty() {
            return Err(GateError::MissingCredential {
                name: "Jira username",
            });
        }
        let token_value = token.as_ref().trim();
        if token_value.is_empty() {
            return Err(GateError::MissingCredential {
                name: "Jira API token",
            });
        }
        Ok(Self {
            username: username_value.to_owned(),
            token: token_value.to_owned(),
        })
    }

    /// Borrow the username.
    #[must_use]
    pub const fn username(&self) -> &str {
        self.username.as_str()
    }
}

impl fmt::Debug for TrackerCredentials {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("TrackerCredentials")
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Configuration for [`JiraClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JiraClientConfig {
    /// Jira site to query.
    pub site: JiraSite,
    /// Basic authentication credentials.
    pub credentials: TrackerCredentials,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl JiraClientConfig {
    /// Constructs configuration with the default request timeout.
    #[must_use]
    pub const fn new(site: JiraSite, credentials: TrackerCredentials) -> Self {
        Self {
            site,
            credentials,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Overrides the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Blocking Jira REST client.
#[derive(Debug)]
pub struct JiraClient {
    config: JiraClientConfig,
    client: Client,
}

impl JiraClient {
    /// Builds the HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Configuration`] when the HTTP client cannot be
    /// constructed.
    pub fn new(config: JiraClientConfig) -> Result<Self, GateError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|error| GateError::Configuration {
                message: format!("failed to configure Jira HTTP client: {error}"),
            })?;
        Ok(Self { config, client })
    }

    /// The site this client queries.
    #[must_use]
    pub const fn site(&self) -> &JiraSite {
        &self.config.site
    }
}

impl IssueTracker for JiraClient {
    fn lookup(&self, key: &IssueKey) -> Result<IssueLookup, GateError> {
        let endpoint = self.config.site.issue_url(key);
        let credentials = &self.config.credentials;
        tracing::debug!("looking up {key} at {endpoint}");

        let response = self
            .client
            .get(endpoint)
            .basic_auth(&credentials.username, Some(&credentials.token))
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|error| GateError::Network {
                message: format!("lookup of {key} failed: {error}"),
            })?;

        match response.status() {
            StatusCode::OK => {
                let issue: ApiIssue = response.json().map_err(|error| {
                    if error.is_timeout() {
                        GateError::Network {
                            message: format!("reading {key} timed out: {error}"),
                        }
                    } else {
                        GateError::Api {
                            message: format!("{key} response JSON decoding failed: {error}"),
                        }
                    }
                })?;
                Ok(issue.into())
            }
            StatusCode::NOT_FOUND => Ok(IssueLookup::not_found()),
            status => {
                tracing::debug!("{key} lookup answered {status}");
                Ok(IssueLookup::unexpected(status.as_u16()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{JiraSite, TrackerCredentials};
    use crate::gate::{GateError, IssueKey};

    #[rstest]
    fn organisation_site_builds_lookup_url() {
        let site = JiraSite::for_organisation("acme").expect("site should build");
        let key = IssueKey::parse("ABC-12").expect("key should parse");

        assert_eq!(
            site.issue_url(&key),
            "https://acme.atlassian.net/rest/api/3/issue/ABC-12?fields=key,assignee,status,issuetype"
        );
    }

    #[rstest]
    fn explicit_base_url_keeps_path_prefix() {
        let site = JiraSite::parse("http://127.0.0.1:8080/jira/").expect("site should parse");
        let key = IssueKey::parse("X-1").expect("key should parse");

        assert_eq!(
            site.issue_url(&key),
            "http://127.0.0.1:8080/jira/rest/api/3/issue/X-1?fields=key,assignee,status,issuetype"
        );
    }

    #[rstest]
    #[case::blank("  ", GateError::MissingOrganisation)]
    fn rejects_blank_organisation(#[case] organisation: &str, #[case] expected: GateError) {
        assert_eq!(JiraSite::for_organisation(organisation), Err(expected));
    }

    #[rstest]
    #[case("acme/evil")]
    #[case("acme.example")]
    fn rejects_organisation_that_is_not_a_label(#[case] organisation: &str) {
        let result = JiraSite::for_organisation(organisation);
        assert!(
            matches!(result, Err(GateError::InvalidUrl(_))),
            "expected InvalidUrl, got {result:?}"
        );
    }

    #[rstest]
    #[case::ipv4("http://127.0.0.1:9000")]
    #[case::ipv6("http://[::1]:9000")]
    #[case::localhost("http://localhost:9000")]
    #[case::remote_https("https://jira.example.com")]
    fn accepts_secure_or_loopback_base_url(#[case] base_url: &str) {
        assert!(JiraSite::parse(base_url).is_ok(), "{base_url} should parse");
    }

    #[rstest]
    #[case::remote_host("http://jira.example.com")]
    #[case::remote_address("http://10.0.0.5:8080")]
    fn rejects_plain_http_to_remote_host(#[case] base_url: &str) {
        let result = JiraSite::parse(base_url);
        assert!(
            matches!(result, Err(GateError::InvalidUrl(_))),
            "expected InvalidUrl, got {result:?}"
        );
    }

    #[rstest]
    fn rejects_non_http_base_url() {
        let result = JiraSite::parse("ftp://jira.example.com");
        assert!(
            matches!(result, Err(GateError::InvalidUrl(_))),
            "expected InvalidUrl, got {result:?}"
        );
    }

    #[rstest]
    #[case::blank_username("", "token", "Jira username")]
    #[case::blank_token("user", "   ", "Jira API token")]
    fn rejects_blank_credentials(
        #[case] username: &str,
        #[case] token: &str,
        #[case] expected: &'static str,
    ) {
        assert_eq!(
            TrackerCredentials::new(username, token),
            Err(GateError::MissingCredential { name: expected })
        );
    }

    #[rstest]
    fn debug_output_redacts_token() {
        let credentials =
            TrackerCredentials::new("ci-bot", "s3cr3t").expect("credentials should build");

        let rendered = format!("{credentials:?}");

        assert!(rendered.contains("ci-bot"));
        assert!(!rendered.contains("s3cr3t"), "token leaked: {rendered}");
    }
}
