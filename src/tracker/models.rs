//! Deserialisation targets for Jira issue responses.

use serde::Deserialize;

use super::{IssueLookup, LookupStatus};

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiIssue {
    #[serde(default)]
    pub(super) fields: ApiIssueFields,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct ApiIssueFields {
    pub(super) status: Option<ApiNamed>,
    pub(super) issuetype: Option<ApiNamed>,
    pub(super) assignee: Option<ApiUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiNamed {
    pub(super) name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiUser {
    #[serde(rename = "displayName")]
    pub(super) display_name: Option<String>,
}

impl From<ApiIssue> for IssueLookup {
    fn from(value: ApiIssue) -> Self {
        let ApiIssueFields {
            status,
            issuetype,
            assignee,
        } = value.fields;

        Self {
            status: LookupStatus::Ok,
            status_name: status.and_then(|named| named.name),
            issue_type: issuetype.and_then(|named| named.name),
            assignee: assignee.and_then(|user| user.display_name),
        }
    }
}
