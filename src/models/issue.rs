use serde::{Deserialize, Serialize};

use super::Version;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Issue {
    pub id: String,
    pub key: String,
    #[serde(default)]
    pub fields: IssueFields,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct IssueFields {
    #[serde(rename = "fixVersions", default)]
    pub fix_versions: Vec<Version>,
}

/// Reference to a version by id, as accepted in issue update payloads.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct FixVersionRef {
    pub id: String,
}

/// Payload for `PUT /issue/{key}` that sets the fix versions.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct IssueUpdate {
    pub fields: IssueUpdateFields,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct IssueUpdateFields {
    #[serde(rename = "fixVersions")]
    pub fix_versions: Vec<FixVersionRef>,
}

impl IssueUpdate {
    /// Replaces the issue's fix versions with exactly `version`.
    pub fn replace_fix_versions(version: &Version) -> Self {
        Self {
            fields: IssueUpdateFields {
                fix_versions: vec![FixVersionRef {
                    id: version.id.clone(),
                }],
            },
        }
    }
}
