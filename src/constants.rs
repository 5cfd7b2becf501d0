pub const JIRA_API_PREFIX: &str = "/rest/api/2";
pub const JIRA_CONTEXT_PATH: &str = "";
pub const CONFIG_FILE: &str = ".jira-fix-version.json";
pub const LOG_DIR_NAME: &str = "jira-fix-version";

/// Slow Jira instances routinely take well over a minute on project lookups.
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 120;

pub const START_DATE_FORMAT: &str = "%Y-%m-%d";

// Environment variables, one per option
pub const ENV_SITE: &str = "FL_CREATE_JIRA_VERSION_SITE";
pub const ENV_USERNAME: &str = "FL_CREATE_JIRA_VERSION_USERNAME";
pub const ENV_PASSWORD: &str = "FL_CREATE_JIRA_VERSION_PASSWORD";
pub const ENV_PROJECT_NAME: &str = "FL_CREATE_JIRA_VERSION_PROJECT_NAME";
pub const ENV_NAME: &str = "FL_CREATE_JIRA_VERSION_NAME";
pub const ENV_DESCRIPTION: &str = "FL_CREATE_JIRA_VERSION_DESCRIPTION";
pub const ENV_ARCHIVED: &str = "FL_CREATE_JIRA_VERSION_ARCHIVED";
pub const ENV_RELEASED: &str = "FL_CREATE_JIRA_VERSION_CREATED";
pub const ENV_START_DATE: &str = "FL_CREATE_JIRA_VERSION_START_DATE";
pub const ENV_READ_TIMEOUT: &str = "FL_CREATE_JIRA_VERSION_READ_TIMEOUT";

// Issue keys as they appear in commit messages, e.g. PROJ-123 or AB2-7
pub const ISSUE_KEY_PATTERN: &str = r"\b([A-Z][A-Z0-9]+-\d+)\b";

// Keys that are safe to put in a URL path segment
pub const ISSUE_KEY_EXACT_PATTERN: &str = r"^[A-Z][A-Z0-9]+-\d+$";
pub const PROJECT_KEY_PATTERN: &str = r"^[A-Za-z0-9_]+$";

// Field selection used when looking up an issue before updating it
pub const ISSUE_FIELDS: &str = "fixVersions";

pub const ACTION_DESCRIPTION: &str =
    "Tags all Jira issues mentioned in the git changelog with the fix version given by --name";
pub const ACTION_AUTHORS: &[&str] = &["Tommy Sadiq Hinrichsen"];
pub const ACTION_RETURN_VALUE: &str = "The id of the Jira version that was found or created";
pub const ACTION_DETAILS: &str =
    "Finds or creates the version in the given project, then replaces the fix versions of every issue in the changelog with it";
