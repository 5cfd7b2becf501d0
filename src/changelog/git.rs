use std::collections::HashSet;
use std::path::PathBuf;
use std::process::Command;

use regex::Regex;

use super::ChangelogProvider;
use crate::constants::ISSUE_KEY_PATTERN;
use crate::error::FixVersionResult;
use crate::fix_version_error;
use crate::logging::{log_debug, log_info};

lazy_static::lazy_static! {
    static ref ISSUE_KEY_RE: Regex = Regex::new(ISSUE_KEY_PATTERN).expect("valid issue key pattern");
}

/// Collects issue keys from commit messages, by default everything since the last tag.
#[derive(Debug, Clone, Default)]
pub struct GitChangelog {
    repo: Option<PathBuf>,
    from: Option<String>,
    to: Option<String>,
}

impl GitChangelog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_repo(mut self, repo: impl Into<PathBuf>) -> Self {
        self.repo = Some(repo.into());
        self
    }

    pub fn since(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn until(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }

    fn git(&self, args: &[&str]) -> FixVersionResult<String> {
        let mut command = Command::new("git");
        if let Some(repo) = &self.repo {
            command.arg("-C").arg(repo);
        }
        let output = command.args(args).output()?;

        if !output.status.success() {
            return Err(fix_version_error!(
                Changelog,
                "git {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Most recent tag reachable from `rev`.
    fn last_tag(&self, rev: &str) -> Option<String> {
        self.git(&["describe", "--tags", "--abbrev=0", rev])
            .ok()
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
    }

    /// The revision range handed to `git log`.
    pub fn range(&self) -> String {
        let to = self.to.clone().unwrap_or_else(|| "HEAD".to_string());
        match self.from.clone().or_else(|| self.last_tag(&to)) {
            Some(from) => format!("{}..{}", from, to),
            None => to,
        }
    }

    pub fn messages(&self) -> FixVersionResult<String> {
        let range = self.range();
        log_debug(&format!("Reading commit messages for {}", range));
        self.git(&["log", "--pretty=%B", range.as_str()])
    }
}

impl ChangelogProvider for GitChangelog {
    fn issue_keys(&self) -> FixVersionResult<Vec<String>> {
        let messages = self.messages()?;
        let keys = extract_issue_keys(&messages);
        log_info(&format!("Found {} issue keys in git changelog", keys.len()));
        Ok(keys)
    }
}

/// Issue keys mentioned in `text`, first occurrence first.
pub fn extract_issue_keys(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    ISSUE_KEY_RE
        .captures_iter(text)
        .map(|cap| cap[1].to_string())
        .filter(|key| seen.insert(key.clone()))
        .collect()
}
