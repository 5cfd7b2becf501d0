use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use regex::Regex;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ConnectionConfig;
use crate::constants::{
    ISSUE_FIELDS, ISSUE_KEY_EXACT_PATTERN, JIRA_API_PREFIX, JIRA_CONTEXT_PATH, PROJECT_KEY_PATTERN,
};
use crate::error::{FixVersionError, FixVersionResult};
use crate::logging::log_debug;
use crate::fix_version_error;
use crate::models::*;

lazy_static::lazy_static! {
    static ref ISSUE_KEY_RE: Regex = Regex::new(ISSUE_KEY_EXACT_PATTERN).expect("valid issue key pattern");
    static ref PROJECT_KEY_RE: Regex = Regex::new(PROJECT_KEY_PATTERN).expect("valid project key pattern");
}

/// Rejects keys that would change the request path, e.g. `PROJ-1/watchers`.
pub fn checked_issue_key(key: &str) -> FixVersionResult<&str> {
    if ISSUE_KEY_RE.is_match(key) {
        Ok(key)
    } else {
        Err(fix_version_error!(InvalidInput, "'{}' is not an issue key", key))
    }
}

pub fn checked_project_key(key: &str) -> FixVersionResult<&str> {
    if PROJECT_KEY_RE.is_match(key) {
        Ok(key)
    } else {
        Err(fix_version_error!(InvalidInput, "'{}' is not a project key", key))
    }
}

/// Jira REST client authenticating every request with basic auth.
pub struct JiraClient {
    client: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
}

impl JiraClient {
    pub fn new(config: &ConnectionConfig) -> FixVersionResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.read_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: format!(
                "{}{}",
                config.site.trim_end_matches('/'),
                JIRA_CONTEXT_PATH
            ),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!("{}{}{}", self.base_url, JIRA_API_PREFIX, endpoint)
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = self.api_url(endpoint);
        log_debug(&format!("{} {}", method, url));
        self.client
            .request(method, url)
            .basic_auth(&self.username, Some(&self.password))
    }

    async fn send(&self, request: RequestBuilder) -> FixVersionResult<Response> {
        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<JiraErrorBody>(&body)
                .ok()
                .and_then(|b| b.summary())
                .unwrap_or_else(|| {
                    if body.trim().is_empty() {
                        status.canonical_reason().unwrap_or("Unknown").to_string()
                    } else {
                        body
                    }
                });
            return Err(FixVersionError::Http {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> FixVersionResult<T> {
        let response = self.send(request).await?;
        Ok(response.json().await?)
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: &B,
    ) -> FixVersionResult<T> {
        self.get_json(self.request(method, endpoint).json(body)).await
    }

    pub async fn get_myself(&self) -> FixVersionResult<User> {
        self.get_json(self.request(Method::GET, "/myself")).await
    }

    pub async fn get_project(&self, key: &str) -> FixVersionResult<Project> {
        let key = checked_project_key(key)?;
        self.get_json(self.request(Method::GET, &format!("/project/{}", key)))
            .await
            .map_err(|e| match e {
                FixVersionError::Http { status: 404, .. } => {
                    FixVersionError::ProjectNotFound(key.to_string())
                }
                other => other,
            })
    }

    pub async fn get_project_versions(&self, key: &str) -> FixVersionResult<Vec<Version>> {
        let key = checked_project_key(key)?;
        self.get_json(self.request(Method::GET, &format!("/project/{}/versions", key)))
            .await
    }

    pub async fn create_version(&self, version: &NewVersion) -> FixVersionResult<Version> {
        self.send_json(Method::POST, "/version", version).await
    }

    pub async fn get_issue(&self, key: &str) -> FixVersionResult<Issue> {
        let key = checked_issue_key(key)?;
        self.get_json(
            self.request(Method::GET, &format!("/issue/{}", key))
                .query(&[("fields", ISSUE_FIELDS)]),
        )
        .await
    }

    /// Jira answers a successful issue edit with `204 No Content`.
    pub async fn update_issue(&self, key: &str, update: &IssueUpdate) -> FixVersionResult<()> {
        let key = checked_issue_key(key)?;
        self.send(
            self.request(Method::PUT, &format!("/issue/{}", key))
                .json(update),
        )
        .await?;
        Ok(())
    }

    pub async fn set_fix_version(&self, key: &str, version: &Version) -> FixVersionResult<()> {
        self.update_issue(key, &IssueUpdate::replace_fix_versions(version))
            .await
    }
}
