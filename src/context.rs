use std::collections::HashMap;
use std::fmt;

/// Keys of the values actions share with each other during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextKey {
    Changelog,
    CreatedVersionId,
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContextKey::Changelog => "FL_CHANGELOG",
            ContextKey::CreatedVersionId => "CREATE_JIRA_VERSION_VERSION_ID",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextValue {
    Text(String),
    List(Vec<String>),
}

/// Shared state for one run, owned by the caller and handed to each action.
#[derive(Debug, Default, Clone)]
pub struct ActionContext {
    values: HashMap<ContextKey, ContextValue>,
}

impl ActionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_changelog(mut self, issue_keys: Vec<String>) -> Self {
        self.set_changelog(issue_keys);
        self
    }

    pub fn changelog(&self) -> Option<&[String]> {
        match self.values.get(&ContextKey::Changelog) {
            Some(ContextValue::List(keys)) => Some(keys.as_slice()),
            _ => None,
        }
    }

    pub fn set_changelog(&mut self, issue_keys: Vec<String>) {
        self.values
            .insert(ContextKey::Changelog, ContextValue::List(issue_keys));
    }

    pub fn created_version_id(&self) -> Option<&str> {
        match self.values.get(&ContextKey::CreatedVersionId) {
            Some(ContextValue::Text(id)) => Some(id.as_str()),
            _ => None,
        }
    }

    pub fn set_created_version_id(&mut self, id: impl Into<String>) {
        self.values
            .insert(ContextKey::CreatedVersionId, ContextValue::Text(id.into()));
    }
}
