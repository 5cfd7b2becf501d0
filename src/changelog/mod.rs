pub mod git;

pub use git::{extract_issue_keys, GitChangelog};

use crate::error::FixVersionResult;

/// Source of the issue keys that make up a release's changelog.
pub trait ChangelogProvider {
    /// Issue keys in changelog order, without duplicates.
    fn issue_keys(&self) -> FixVersionResult<Vec<String>>;
}
