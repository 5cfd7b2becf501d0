use std::fs::{create_dir_all, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Local;
use colored::*;

use crate::constants::LOG_DIR_NAME;

/// How much of the log is mirrored to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Echo {
    Quiet,
    Normal,
    Verbose,
}

struct LogState {
    file: Option<PathBuf>,
    echo: Echo,
}

lazy_static::lazy_static! {
    static ref LOG_STATE: Mutex<LogState> = Mutex::new(LogState {
        file: None,
        echo: Echo::Normal,
    });
}

pub fn init_logging(echo: Echo) -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join(LOG_DIR_NAME)
        .join("logs");

    create_dir_all(&log_dir)?;

    let log_file = log_dir.join(format!(
        "jira-fix-version-{}.log",
        Local::now().format("%Y%m%d-%H%M%S")
    ));

    if let Ok(mut state) = LOG_STATE.lock() {
        state.file = Some(log_file.clone());
        state.echo = echo;
    }

    log_debug(&format!("Logging initialized to: {}", log_file.display()));

    Ok(())
}

/// Changes the stderr echo level without touching the log file.
pub fn set_echo(echo: Echo) {
    if let Ok(mut state) = LOG_STATE.lock() {
        state.echo = echo;
    }
}

pub fn log_error(message: &str) {
    log_with_level("ERROR", message);
}

pub fn log_warn(message: &str) {
    log_with_level("WARN", message);
}

pub fn log_info(message: &str) {
    log_with_level("INFO", message);
}

pub fn log_debug(message: &str) {
    log_with_level("DEBUG", message);
}

fn log_with_level(level: &str, message: &str) {
    let (file, echo) = match LOG_STATE.lock() {
        Ok(state) => (state.file.clone(), state.echo),
        Err(_) => return,
    };

    if let Some(log_file) = file {
        if let Ok(mut handle) = OpenOptions::new().create(true).append(true).open(&log_file) {
            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
            let _ = writeln!(handle, "[{}] {} - {}", timestamp, level, message);
        }
    }

    let show = match echo {
        Echo::Quiet => level == "ERROR",
        Echo::Normal => level != "DEBUG",
        Echo::Verbose => true,
    };
    if show {
        eprintln!("{} {}", format_level(level), message);
    }
}

fn format_level(level: &str) -> ColoredString {
    match level {
        "ERROR" => "[ERROR]".red().bold(),
        "WARN" => "[WARN]".yellow(),
        "DEBUG" => "[DEBUG]".dimmed(),
        _ => "[INFO]".blue(),
    }
}

pub fn get_log_file_path() -> Option<PathBuf> {
    LOG_STATE.lock().ok().and_then(|state| state.file.clone())
}
