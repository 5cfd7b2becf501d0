use std::fmt;

use thiserror::Error;

/// A single problem found while validating tag options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_validation(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Error, Debug)]
pub enum FixVersionError {
    #[error("Invalid options: {}", join_validation(.0))]
    Validation(Vec<ValidationError>),

    #[error("Project '{0}' could not be found")]
    ProjectNotFound(String),

    #[error("Jira request failed [{status}]: {message}")]
    Http { status: u16, message: String },

    #[error("Failed to create version: {0}")]
    VersionCreate(String),

    #[error("Changelog error: {0}")]
    Changelog(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl FixVersionError {
    /// HTTP status carried by the error, if it came from a Jira response.
    pub fn status(&self) -> Option<u16> {
        match self {
            FixVersionError::Http { status, .. } => Some(*status),
            FixVersionError::RequestError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type FixVersionResult<T> = Result<T, FixVersionError>;

pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> FixVersionResult<T>;
    fn with_context<F>(self, f: F) -> FixVersionResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn context(self, msg: &str) -> FixVersionResult<T> {
        self.map_err(|e| FixVersionError::Unknown(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> FixVersionResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| FixVersionError::Unknown(format!("{}: {}", f(), e)))
    }
}

impl<T> ErrorContext<T> for Option<T> {
    fn context(self, msg: &str) -> FixVersionResult<T> {
        self.ok_or_else(|| FixVersionError::Unknown(msg.to_string()))
    }

    fn with_context<F>(self, f: F) -> FixVersionResult<T>
    where
        F: FnOnce() -> String,
    {
        self.ok_or_else(|| FixVersionError::Unknown(f()))
    }
}

#[macro_export]
macro_rules! fix_version_error {
    ($error_type:ident, $msg:expr) => {
        $crate::error::FixVersionError::$error_type($msg.to_string())
    };
    ($error_type:ident, $fmt:expr, $($arg:tt)*) => {
        $crate::error::FixVersionError::$error_type(format!($fmt, $($arg)*))
    };
}
