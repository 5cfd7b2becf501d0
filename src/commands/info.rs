use clap::ArgMatches;
use colored::*;

use crate::constants::{ACTION_AUTHORS, ACTION_DESCRIPTION, ACTION_DETAILS, ACTION_RETURN_VALUE};

/// Every platform is supported; the action only talks to Jira and git.
pub fn is_supported(_platform: &str) -> bool {
    true
}

pub async fn handle_info(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "jira-fix-version".bold());
    println!("{}: {}", "Description".bold(), ACTION_DESCRIPTION);
    println!("{}: {}", "Authors".bold(), ACTION_AUTHORS.join(", "));
    println!("{}: {}", "Returns".bold(), ACTION_RETURN_VALUE);
    println!("{}: {}", "Details".bold(), ACTION_DETAILS);

    if let Some(platform) = matches.get_one::<String>("platform") {
        let supported = if is_supported(platform) {
            "yes".green()
        } else {
            "no".red()
        };
        println!("{} {}: {}", "Supported on".bold(), platform, supported);
    }

    Ok(())
}
