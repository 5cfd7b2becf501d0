pub mod issue;
pub mod project;
pub mod user;
pub mod version;

// Re-export commonly used types
pub use issue::{FixVersionRef, Issue, IssueFields, IssueUpdate};
pub use project::Project;
pub use user::User;
pub use version::{NewVersion, Version};

use serde::Deserialize;

/// Error body returned by the Jira REST API on failed requests.
#[derive(Debug, Deserialize, Default)]
pub struct JiraErrorBody {
    #[serde(rename = "errorMessages", default)]
    pub error_messages: Vec<String>,
    #[serde(default)]
    pub errors: std::collections::HashMap<String, String>,
}

impl JiraErrorBody {
    pub fn summary(&self) -> Option<String> {
        let mut parts: Vec<String> = self.error_messages.clone();
        let mut fields: Vec<_> = self.errors.iter().collect();
        fields.sort();
        parts.extend(fields.into_iter().map(|(field, msg)| format!("{}: {}", field, msg)));

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}
