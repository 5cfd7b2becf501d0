use std::fs;
use std::path::Path;

use clap::ArgMatches;

use crate::changelog::GitChangelog;
use crate::config::{load_config, TagOptions};
use crate::constants::DEFAULT_READ_TIMEOUT_SECS;
use crate::context::ActionContext;
use crate::error::{ErrorContext, FixVersionResult};
use crate::formatting::print_report;
use crate::logging::log_info;
use crate::tagger;

pub async fn handle_tag(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    handle_tag_impl(matches)
        .await
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
}

async fn handle_tag_impl(matches: &ArgMatches) -> FixVersionResult<()> {
    let options = options_from_matches(matches).with_fallback(&load_config()?);
    let mut context = context_from_matches(matches)?;
    let changelog = changelog_from_matches(matches);

    log_info("Running jira-fix-version");
    let report = tagger::run(&options, &mut context, &changelog).await?;

    let format = matches
        .get_one::<String>("format")
        .map(|s| s.as_str())
        .unwrap_or("table");
    print_report(&report, format);

    Ok(())
}

pub fn options_from_matches(matches: &ArgMatches) -> TagOptions {
    let text = |id: &str| matches.get_one::<String>(id).cloned();

    TagOptions {
        url: text("url"),
        username: text("username"),
        password: text("password"),
        project_name: text("project-name"),
        name: text("name"),
        description: text("description").unwrap_or_default(),
        archived: matches.get_flag("archived"),
        released: matches.get_flag("released"),
        start_date: text("start-date"),
        read_timeout_secs: matches
            .get_one::<u64>("read-timeout")
            .copied()
            .unwrap_or(DEFAULT_READ_TIMEOUT_SECS),
    }
}

/// Preloads the changelog when it was handed in explicitly, so git is not consulted.
pub fn context_from_matches(matches: &ArgMatches) -> FixVersionResult<ActionContext> {
    let mut keys: Vec<String> = matches
        .get_many::<String>("changelog")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    if let Some(path) = matches.get_one::<String>("changelog-file") {
        keys.extend(read_changelog_file(Path::new(path))?);
    }

    let context = ActionContext::new();
    if keys.is_empty() {
        Ok(context)
    } else {
        Ok(context.with_changelog(keys))
    }
}

fn changelog_from_matches(matches: &ArgMatches) -> GitChangelog {
    let mut changelog = GitChangelog::new();
    if let Some(repo) = matches.get_one::<String>("repo") {
        changelog = changelog.in_repo(repo);
    }
    if let Some(from) = matches.get_one::<String>("from") {
        changelog = changelog.since(from);
    }
    if let Some(to) = matches.get_one::<String>("to") {
        changelog = changelog.until(to);
    }
    changelog
}

/// One issue key per line; blank lines and `#` comments are ignored.
pub fn read_changelog_file(path: &Path) -> FixVersionResult<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read changelog file {}", path.display()))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}
