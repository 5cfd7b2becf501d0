#[allow(clippy::module_inception)]
pub mod config;
pub mod options;

pub use config::{config_path, load_config, load_config_from, save_config, save_config_to, Config};
pub use options::{ConnectionConfig, TagOptions, ValidatedOptions, VersionSpec};
