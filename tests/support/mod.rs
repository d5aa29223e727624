//! Mock Jira responses shared by the integration tests.
//!
//! Helpers needed by only some test crates live beside this module and are
//! included with `#[path]` where used: `runtime.rs` for the rstest-bdd
//! runtime slots and `event_files.rs` for payload files on disk.

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

/// Jira issue response body with the given workflow status.
pub fn issue_body(key: &str, status: &str) -> Value {
    json!({
        "key": key,
        "fields": {
            "status": { "name": status },
            "issuetype": { "name": "Story" },
            "assignee": { "displayName": "Ada Lovelace" }
        }
    })
}

/// A mock answering the issue lookup for `key` with `status`.
pub fn issue_mock(key: &str, status: &str) -> Mock {
    Mock::given(method("GET"))
        .and(path(format!("/rest/api/3/issue/{key}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(issue_body(key, status)))
}
