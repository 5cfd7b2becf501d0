// Module declarations
pub mod changelog;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod formatting;
pub mod logging;
pub mod models;
pub mod tagger;


// Re-export commonly used items
pub use changelog::{ChangelogProvider, GitChangelog};
pub use client::JiraClient;
pub use config::{load_config, save_config, Config, ConnectionConfig, TagOptions};
pub use context::{ActionContext, ContextKey};
pub use error::{FixVersionError, FixVersionResult, ValidationError};
pub use models::*;
pub use tagger::{TagReport, VersionTagger};
