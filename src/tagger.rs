//! The tag action: find or create a fix version and attach it to every issue
//! in the changelog.

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::changelog::ChangelogProvider;
use crate::client::JiraClient;
use crate::config::{ConnectionConfig, TagOptions, ValidatedOptions, VersionSpec};
use crate::context::{ActionContext, ContextKey};
use crate::error::{FixVersionError, FixVersionResult};
use crate::fix_version_error;
use crate::logging::{log_debug, log_error, log_info, log_warn};
use crate::models::{NewVersion, Project, Version};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SkippedIssue {
    pub key: String,
    pub reason: String,
}

/// Outcome of a tag run. Skipped issues do not make the run fail.
#[derive(Debug, Clone, Serialize)]
pub struct TagReport {
    pub version: Version,
    pub created: bool,
    pub tagged: Vec<String>,
    pub skipped: Vec<SkippedIssue>,
}

impl TagReport {
    pub fn version_id(&self) -> &str {
        &self.version.id
    }
}

pub struct VersionTagger {
    client: JiraClient,
    today: NaiveDate,
}

impl VersionTagger {
    pub fn new(client: JiraClient) -> Self {
        Self {
            client,
            today: Local::now().date_naive(),
        }
    }

    pub fn connect(connection: &ConnectionConfig) -> FixVersionResult<Self> {
        let client = JiraClient::new(connection)?;
        log_info(&format!("Client created for {}", client.base_url()));
        Ok(Self::new(client))
    }

    /// Overrides the date used when no start date was given.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub async fn resolve_project(&self, key: &str) -> FixVersionResult<Project> {
        log_info(&format!("Looking for project {}", key));
        match self.client.get_project(key).await {
            Ok(project) => {
                log_info(&format!("Project found: {} (id {})", project.key, project.id));
                Ok(project)
            }
            Err(e) => {
                log_error(&format!(
                    "Error while accessing project {} [{}]: {}",
                    key,
                    status_label(&e),
                    e
                ));
                Err(e)
            }
        }
    }

    /// Returns the version named `spec.name` and whether it had to be created.
    /// An existing version is reused as is, even if its other fields differ.
    pub async fn find_or_create_version(
        &self,
        project: &Project,
        spec: &VersionSpec,
    ) -> FixVersionResult<(Version, bool)> {
        log_info("Looking for versions");
        let versions = self.client.get_project_versions(&project.key).await?;

        if let Some(existing) = versions.into_iter().find(|v| v.name == spec.name) {
            log_info(&format!(
                "Version {} already exists (id {})",
                existing.name, existing.id
            ));
            return Ok((existing, false));
        }

        let project_id = project.id.parse::<u64>().map_err(|_| {
            fix_version_error!(
                InvalidInput,
                "Project {} has a non-numeric id '{}'",
                project.key,
                project.id
            )
        })?;

        let new_version = NewVersion {
            name: spec.name.clone(),
            description: spec.description.clone(),
            archived: spec.archived,
            released: spec.released,
            start_date: spec.start_date_or(self.today),
            project_id,
        };

        log_info(&format!("Trying to create a version with name: {}", spec.name));
        match self.client.create_version(&new_version).await {
            Ok(version) => {
                log_info(&format!("Version saved: {} (id {})", version.name, version.id));
                Ok((version, true))
            }
            Err(e) => {
                log_error(&format!(
                    "Error while saving version {} [{}]",
                    spec.name,
                    status_label(&e)
                ));
                Err(FixVersionError::VersionCreate(e.to_string()))
            }
        }
    }

    /// Replaces the fix versions of each issue with `version`. Failures are
    /// logged and collected, never retried.
    pub async fn tag_issues(
        &self,
        issue_keys: &[String],
        version: &Version,
    ) -> (Vec<String>, Vec<SkippedIssue>) {
        let mut tagged = Vec::new();
        let mut skipped = Vec::new();

        for key in issue_keys {
            match self.tag_issue(key, version).await {
                Ok(()) => {
                    log_debug(&format!("Set fix version {} on {}", version.name, key));
                    tagged.push(key.clone());
                }
                Err(e) => {
                    log_warn(&format!("Skipping issue {}: {}", key, e));
                    skipped.push(SkippedIssue {
                        key: key.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        (tagged, skipped)
    }

    async fn tag_issue(&self, key: &str, version: &Version) -> FixVersionResult<()> {
        let issue = self.client.get_issue(key).await?;
        if !issue.fields.fix_versions.is_empty() {
            let previous: Vec<&str> = issue
                .fields
                .fix_versions
                .iter()
                .map(|v| v.name.as_str())
                .collect();
            log_debug(&format!("{} drops fix versions: {}", key, previous.join(", ")));
        }
        self.client.set_fix_version(&issue.key, version).await
    }

    pub async fn run(
        &self,
        options: &ValidatedOptions,
        context: &mut ActionContext,
        changelog: &dyn ChangelogProvider,
    ) -> FixVersionResult<TagReport> {
        let project = self.resolve_project(&options.project_name).await?;
        let (version, created) = self
            .find_or_create_version(&project, &options.version)
            .await?;

        context.set_created_version_id(version.id.clone());
        log_debug(&format!("{} = {}", ContextKey::CreatedVersionId, version.id));

        let issue_keys = changelog_issue_keys(context, changelog)?;
        log_info(&format!(
            "Received ticket numbers: {}",
            if issue_keys.is_empty() {
                "(none)".to_string()
            } else {
                issue_keys.join(", ")
            }
        ));

        let (tagged, skipped) = self.tag_issues(&issue_keys, &version).await;

        Ok(TagReport {
            version,
            created,
            tagged,
            skipped,
        })
    }
}

/// Status code for log lines, `-` when the error did not come from a response.
fn status_label(error: &FixVersionError) -> String {
    error
        .status()
        .map(|status| status.to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Issue keys from the context, asking `provider` only when none are cached yet.
pub fn changelog_issue_keys(
    context: &mut ActionContext,
    provider: &dyn ChangelogProvider,
) -> FixVersionResult<Vec<String>> {
    if context.changelog().is_none() {
        log_info("No changelog in context, reading it from git commits");
        let keys = provider.issue_keys()?;
        context.set_changelog(keys);
    }

    Ok(context.changelog().map(<[String]>::to_vec).unwrap_or_default())
}

/// Validates `options`, connects and runs the action. Nothing touches the
/// network when validation fails.
pub async fn run(
    options: &TagOptions,
    context: &mut ActionContext,
    changelog: &dyn ChangelogProvider,
) -> FixVersionResult<TagReport> {
    let validated = options.validate().map_err(FixVersionError::Validation)?;
    let tagger = VersionTagger::connect(&validated.connection)?;
    tagger.run(&validated, context, changelog).await
}
