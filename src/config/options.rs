//! Options accepted by the tag action and their validation.
//!
//! `TagOptions` is the raw, possibly incomplete input as collected from flags,
//! environment and the saved config. `TagOptions::validate` turns it into a
//! `ValidatedOptions` or returns every problem found at once.

use chrono::NaiveDate;

use super::Config;
use crate::constants::{DEFAULT_READ_TIMEOUT_SECS, START_DATE_FORMAT};
use crate::error::ValidationError;

/// Everything needed to talk to a Jira instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub site: String,
    pub username: String,
    pub password: String,
    pub read_timeout_secs: u64,
}

/// The version to find or create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSpec {
    pub name: String,
    pub description: String,
    pub archived: bool,
    pub released: bool,
    pub start_date: Option<NaiveDate>,
}

impl VersionSpec {
    pub fn start_date_or(&self, today: NaiveDate) -> String {
        self.start_date
            .unwrap_or(today)
            .format(START_DATE_FORMAT)
            .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOptions {
    pub connection: ConnectionConfig,
    pub project_name: String,
    pub version: VersionSpec,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOptions {
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub project_name: Option<String>,
    pub name: Option<String>,
    pub description: String,
    pub archived: bool,
    pub released: bool,
    pub start_date: Option<String>,
    pub read_timeout_secs: u64,
}

impl Default for TagOptions {
    fn default() -> Self {
        TagOptions {
            url: None,
            username: None,
            password: None,
            project_name: None,
            name: None,
            description: String::new(),
            archived: false,
            released: false,
            start_date: None,
            read_timeout_secs: DEFAULT_READ_TIMEOUT_SECS,
        }
    }
}

impl TagOptions {
    /// Fills connection fields that were not given explicitly from the saved config.
    pub fn with_fallback(mut self, config: &Config) -> Self {
        fn fill(slot: &mut Option<String>, fallback: &Option<String>) {
            if slot.as_deref().map_or(true, str::is_empty) {
                if let Some(value) = fallback {
                    *slot = Some(value.clone());
                }
            }
        }

        fill(&mut self.url, &config.url);
        fill(&mut self.username, &config.username);
        fill(&mut self.password, &config.password);
        fill(&mut self.project_name, &config.project_name);
        self
    }

    pub fn validate(&self) -> Result<ValidatedOptions, Vec<ValidationError>> {
        let mut errors = Vec::new();

        let url = collect(&mut errors, validate_url(self.url.as_deref()));
        let username = collect(
            &mut errors,
            require(
                "username",
                self.username.as_deref(),
                "No username given, pass using `--username jira_user`",
            ),
        );
        let password = collect(
            &mut errors,
            require(
                "password",
                self.password.as_deref(),
                "No password given, pass using `--password T0PS3CR3T`",
            ),
        );
        let project_name = collect(
            &mut errors,
            require(
                "project_name",
                self.project_name.as_deref(),
                "No project given, pass using `--project-name PROJ`",
            )
            .map(|key| key.trim().to_string()),
        );
        let name = collect(
            &mut errors,
            require(
                "name",
                self.name.as_deref(),
                "No version name given, pass using `--name 1.0.0`",
            ),
        );
        let start_date = collect(&mut errors, validate_start_date(self.start_date.as_deref()));
        let read_timeout = collect(&mut errors, validate_read_timeout(self.read_timeout_secs));

        match (url, username, password, project_name, name, start_date, read_timeout) {
            (
                Some(site),
                Some(username),
                Some(password),
                Some(project_name),
                Some(name),
                Some(start_date),
                Some(read_timeout_secs),
            ) if errors.is_empty() => Ok(ValidatedOptions {
                connection: ConnectionConfig {
                    site,
                    username,
                    password,
                    read_timeout_secs,
                },
                project_name,
                version: VersionSpec {
                    name,
                    description: self.description.clone(),
                    archived: self.archived,
                    released: self.released,
                    start_date,
                },
            }),
            _ => Err(errors),
        }
    }
}

fn collect<T>(errors: &mut Vec<ValidationError>, result: Result<T, ValidationError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            errors.push(e);
            None
        }
    }
}

/// Rejects missing or blank values. The value itself is returned as given, since
/// passwords and version names are compared byte for byte.
pub fn require(
    field: &'static str,
    value: Option<&str>,
    hint: &str,
) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
        _ => Err(ValidationError::new(field, hint)),
    }
}

pub fn validate_url(value: Option<&str>) -> Result<String, ValidationError> {
    let url = require("url", value, "No url for Jira given, pass using `--url <URL>`")?
        .trim()
        .to_string();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ValidationError::new(
            "url",
            format!("'{}' is not an http(s) URL", url),
        ));
    }
    Ok(url)
}

pub fn validate_start_date(value: Option<&str>) -> Result<Option<NaiveDate>, ValidationError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => NaiveDate::parse_from_str(v, START_DATE_FORMAT)
            .map(Some)
            .map_err(|_| {
                ValidationError::new(
                    "start_date",
                    format!("'{}' is not a date, expected YYYY-MM-DD", v),
                )
            }),
    }
}

pub fn validate_read_timeout(value: u64) -> Result<u64, ValidationError> {
    if value == 0 {
        return Err(ValidationError::new(
            "read_timeout",
            "Read timeout must be at least one second",
        ));
    }
    Ok(value)
}
