use std::process;

use colored::*;

use jira_fix_version::cli::build_cli;
use jira_fix_version::commands::{handle_auth, handle_info, handle_tag};
use jira_fix_version::logging::{get_log_file_path, init_logging, log_error, set_echo, Echo};

#[tokio::main]
async fn main() {
    let matches = build_cli().get_matches();

    let echo = if matches.get_flag("quiet") {
        Echo::Quiet
    } else if matches.get_flag("verbose") {
        Echo::Verbose
    } else {
        Echo::Normal
    };
    if let Err(e) = init_logging(echo) {
        // Still echo to stderr without a log file
        set_echo(echo);
        eprintln!("{} {}", "Failed to initialize logging:".yellow(), e);
    }

    let result = match matches.subcommand() {
        Some(("tag", sub_matches)) => handle_tag(sub_matches).await,
        Some(("auth", sub_matches)) => handle_auth(sub_matches).await,
        Some(("info", sub_matches)) => handle_info(sub_matches).await,
        _ => {
            eprintln!("Unknown command. Use 'jira-fix-version --help' for available commands.");
            process::exit(1);
        }
    };

    if let Err(e) = result {
        log_error(&format!("Error: {}", e));
        if let Some(path) = get_log_file_path() {
            eprintln!("{} {}", "Log file:".dimmed(), path.display());
        }
        process::exit(1);
    }
}
