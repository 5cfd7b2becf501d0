use clap::{value_parser, Arg, ArgAction, Command};

use crate::constants::*;

pub fn build_cli() -> Command {
    Command::new("jira-fix-version")
        .about("Tag Jira issues from the git changelog with a fix version")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Echo debug log lines to stderr")
                .action(ArgAction::SetTrue)
                .global(true)
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .help("Only echo errors to stderr")
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose")
                .global(true)
        )
        .subcommand(tag_command())
        .subcommand(
            Command::new("auth")
                .about("Save Jira credentials as defaults")
                .arg(Arg::new("url").long("url").value_name("URL").help("URL for the Jira instance"))
                .arg(Arg::new("username").long("username").value_name("USER").help("Username for the Jira instance"))
                .arg(Arg::new("password").long("password").value_name("PASSWORD").help("Password or API token for Jira"))
                .arg(Arg::new("project-name").long("project-name").value_name("KEY").help("Default project key"))
                .arg(
                    Arg::new("show")
                        .long("show")
                        .help("Show saved credentials")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("info")
                .about("Describe what the action does and what it returns")
                .arg(
                    Arg::new("platform")
                        .long("platform")
                        .value_name("PLATFORM")
                        .help("Check whether the action supports a platform")
                )
        )
}

fn tag_command() -> Command {
    Command::new("tag")
        .about("Find or create a version and set it as fix version on every issue in the changelog")
        .arg(
            Arg::new("url")
                .long("url")
                .value_name("URL")
                .env(ENV_SITE)
                .help("URL for the Jira instance")
        )
        .arg(
            Arg::new("username")
                .long("username")
                .value_name("USER")
                .env(ENV_USERNAME)
                .help("Username for the Jira instance")
        )
        .arg(
            Arg::new("password")
                .long("password")
                .value_name("PASSWORD")
                .env(ENV_PASSWORD)
                .hide_env_values(true)
                .help("Password for Jira")
        )
        .arg(
            Arg::new("project-name")
                .long("project-name")
                .short('p')
                .value_name("KEY")
                .env(ENV_PROJECT_NAME)
                .help("Key of the Jira project, e.g. the prefix of its issue keys")
        )
        .arg(
            Arg::new("name")
                .long("name")
                .short('n')
                .value_name("VERSION")
                .env(ENV_NAME)
                .help("The name of the version, e.g. 1.0.0")
        )
        .arg(
            Arg::new("description")
                .long("description")
                .short('d')
                .value_name("TEXT")
                .env(ENV_DESCRIPTION)
                .help("The description of the version")
        )
        .arg(
            Arg::new("archived")
                .long("archived")
                .env(ENV_ARCHIVED)
                .help("Whether the version should be archived")
                .action(ArgAction::SetTrue)
        )
        .arg(
            Arg::new("released")
                .long("released")
                .env(ENV_RELEASED)
                .help("Whether the version should be released")
                .action(ArgAction::SetTrue)
        )
        .arg(
            Arg::new("start-date")
                .long("start-date")
                .value_name("YYYY-MM-DD")
                .env(ENV_START_DATE)
                .help("The date this version starts on (defaults to today)")
        )
        .arg(
            Arg::new("read-timeout")
                .long("read-timeout")
                .value_name("SECONDS")
                .env(ENV_READ_TIMEOUT)
                .value_parser(value_parser!(u64))
                .default_value("120")
                .help("Request timeout for slow Jira instances")
        )
        .arg(
            Arg::new("changelog")
                .long("changelog")
                .value_name("ISSUE_KEY")
                .action(ArgAction::Append)
                .help("Issue key to tag instead of reading git commits (repeatable)")
        )
        .arg(
            Arg::new("changelog-file")
                .long("changelog-file")
                .value_name("PATH")
                .help("File with one issue key per line to tag instead of reading git commits")
        )
        .arg(
            Arg::new("repo")
                .long("repo")
                .value_name("DIR")
                .help("Git repository to read the changelog from")
        )
        .arg(
            Arg::new("from")
                .long("from")
                .value_name("REV")
                .help("Start of the commit range (defaults to the most recent tag)")
        )
        .arg(
            Arg::new("to")
                .long("to")
                .value_name("REV")
                .help("End of the commit range (defaults to HEAD)")
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .value_name("FORMAT")
                .value_parser(["table", "json"])
                .default_value("table")
                .help("Output format for the report")
        )
}
