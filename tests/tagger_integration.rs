use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{any, basic_auth, body_json, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use jira_fix_version::tagger::{self, VersionTagger};
use jira_fix_version::{
    ActionContext, ChangelogProvider, FixVersionError, FixVersionResult, TagOptions,
};

struct FixedChangelog(Vec<&'static str>);

impl ChangelogProvider for FixedChangelog {
    fn issue_keys(&self) -> FixVersionResult<Vec<String>> {
        Ok(self.0.iter().map(|k| k.to_string()).collect())
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
}

fn options(server: &MockServer, name: &str) -> TagOptions {
    TagOptions {
        url: Some(server.uri()),
        username: Some("bot".to_string()),
        password: Some("T0PS3CR3T".to_string()),
        project_name: Some("PROJ".to_string()),
        name: Some(name.to_string()),
        read_timeout_secs: 5,
        ..TagOptions::default()
    }
}

fn version_json(id: &str, name: &str) -> serde_json::Value {
    json!({
        "self": format!("https://jira.example.com/rest/api/2/version/{}", id),
        "id": id,
        "name": name,
        "description": "",
        "archived": false,
        "released": false,
        "startDate": "2026-10-01",
        "projectId": 10000
    })
}

async fn mount_project(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/rest/api/2/project/PROJ"))
        .and(basic_auth("bot", "T0PS3CR3T"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "10000",
            "key": "PROJ",
            "name": "Project"
        })))
        .mount(server)
        .await;
}

async fn mount_versions(server: &MockServer, versions: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/rest/api/2/project/PROJ/versions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(versions))
        .mount(server)
        .await;
}

async fn mount_issue(server: &MockServer, key: &str, fix_versions: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/rest/api/2/issue/{}", key)))
        .and(query_param("fields", "fixVersions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "20000",
            "key": key,
            "fields": { "fixVersions": fix_versions }
        })))
        .mount(server)
        .await;
}

async fn expect_fix_version(server: &MockServer, key: &str, version_id: &str) {
    Mock::given(method("PUT"))
        .and(path(format!("/rest/api/2/issue/{}", key)))
        .and(body_json(json!({
            "fields": { "fixVersions": [ { "id": version_id } ] }
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(server)
        .await;
}

async fn run(
    server: &MockServer,
    name: &str,
    context: &mut ActionContext,
) -> FixVersionResult<tagger::TagReport> {
    let validated = options(server, name).validate().unwrap();
    let tagger = VersionTagger::connect(&validated.connection)
        .unwrap()
        .with_today(today());
    tagger
        .run(&validated, context, &FixedChangelog(vec![]))
        .await
}

#[tokio::test]
async fn test_existing_version_is_reused() {
    let server = MockServer::start().await;
    mount_project(&server).await;
    mount_versions(
        &server,
        json!([version_json("10010", "0.9.0"), version_json("10011", "1.0.0")]),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/rest/api/2/version"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let mut context = ActionContext::new().with_changelog(vec![]);
    let report = run(&server, "1.0.0", &mut context).await.unwrap();

    assert_eq!(report.version_id(), "10011");
    assert!(!report.created);
    assert_eq!(context.created_version_id(), Some("10011"));
}

#[tokio::test]
async fn test_version_name_match_is_case_sensitive() {
    let server = MockServer::start().await;
    mount_project(&server).await;
    mount_versions(&server, json!([version_json("10010", "Release-A")])).await;
    Mock::given(method("POST"))
        .and(path("/rest/api/2/version"))
        .respond_with(ResponseTemplate::new(201).set_body_json(version_json("10020", "release-a")))
        .expect(1)
        .mount(&server)
        .await;

    let mut context = ActionContext::new().with_changelog(vec![]);
    let report = run(&server, "release-a", &mut context).await.unwrap();

    assert!(report.created);
    assert_eq!(report.version_id(), "10020");
}

#[tokio::test]
async fn test_missing_version_is_created_with_today_as_start_date() {
    let server = MockServer::start().await;
    mount_project(&server).await;
    mount_versions(&server, json!([version_json("10010", "1.0.0")])).await;
    Mock::given(method("POST"))
        .and(path("/rest/api/2/version"))
        .and(body_json(json!({
            "name": "2.0.0",
            "description": "",
            "archived": false,
            "released": false,
            "startDate": "2026-10-17",
            "projectId": 10000
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(version_json("10012", "2.0.0")))
        .expect(1)
        .mount(&server)
        .await;

    let mut context = ActionContext::new().with_changelog(vec![]);
    let report = run(&server, "2.0.0", &mut context).await.unwrap();

    assert!(report.created);
    assert_eq!(report.version_id(), "10012");
    assert_eq!(context.created_version_id(), Some("10012"));
}

#[tokio::test]
async fn test_fix_versions_are_replaced_not_merged() {
    let server = MockServer::start().await;
    mount_project(&server).await;
    mount_versions(&server, json!([version_json("10011", "1.0.0")])).await;
    mount_issue(&server, "PROJ-1", json!([version_json("10005", "0.5.0")])).await;
    mount_issue(&server, "PROJ-2", json!([])).await;
    expect_fix_version(&server, "PROJ-1", "10011").await;
    expect_fix_version(&server, "PROJ-2", "10011").await;

    let mut context = ActionContext::new().with_changelog(vec!["PROJ-1".into(), "PROJ-2".into()]);
    let report = run(&server, "1.0.0", &mut context).await.unwrap();

    assert_eq!(report.tagged, vec!["PROJ-1", "PROJ-2"]);
    assert!(report.skipped.is_empty());
}

#[tokio::test]
async fn test_failed_issue_is_skipped() {
    let server = MockServer::start().await;
    mount_project(&server).await;
    mount_versions(&server, json!([version_json("10011", "1.0.0")])).await;
    Mock::given(method("GET"))
        .and(path("/rest/api/2/issue/PROJ-1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errorMessages": ["Issue does not exist or you do not have permission to see it."],
            "errors": {}
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/rest/api/2/issue/PROJ-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;
    mount_issue(&server, "PROJ-2", json!([])).await;
    expect_fix_version(&server, "PROJ-2", "10011").await;

    let mut context = ActionContext::new().with_changelog(vec!["PROJ-1".into(), "PROJ-2".into()]);
    let report = run(&server, "1.0.0", &mut context).await.unwrap();

    assert_eq!(report.version_id(), "10011");
    assert_eq!(report.tagged, vec!["PROJ-2"]);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].key, "PROJ-1");
    assert!(report.skipped[0].reason.contains("404"));
    assert!(report.skipped[0].reason.contains("Issue does not exist"));
}

#[tokio::test]
async fn test_rejected_update_is_skipped() {
    let server = MockServer::start().await;
    mount_project(&server).await;
    mount_versions(&server, json!([version_json("10011", "1.0.0")])).await;
    mount_issue(&server, "PROJ-1", json!([])).await;
    Mock::given(method("PUT"))
        .and(path("/rest/api/2/issue/PROJ-1"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errorMessages": [],
            "errors": { "fixVersions": "Field 'fixVersions' cannot be set." }
        })))
        .mount(&server)
        .await;
    mount_issue(&server, "PROJ-2", json!([])).await;
    expect_fix_version(&server, "PROJ-2", "10011").await;

    let mut context = ActionContext::new().with_changelog(vec!["PROJ-1".into(), "PROJ-2".into()]);
    let report = run(&server, "1.0.0", &mut context).await.unwrap();

    assert_eq!(report.tagged, vec!["PROJ-2"]);
    assert!(report.skipped[0].reason.contains("fixVersions: Field 'fixVersions' cannot be set."));
}

#[tokio::test]
async fn test_missing_required_fields_abort_before_network() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let mut options = options(&server, "1.0.0");
    options.password = None;
    options.name = Some(String::new());

    let mut context = ActionContext::new();
    let result = tagger::run(&options, &mut context, &FixedChangelog(vec!["PROJ-1"])).await;

    match result {
        Err(FixVersionError::Validation(errors)) => {
            let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
            assert_eq!(fields, vec!["password", "name"]);
        }
        other => panic!("Expected validation error, got {:?}", other.map(|r| r.version)),
    }
    assert!(context.changelog().is_none());
}

#[tokio::test]
async fn test_running_twice_reuses_the_created_version() {
    let server = MockServer::start().await;
    mount_project(&server).await;
    Mock::given(method("GET"))
        .and(path("/rest/api/2/project/PROJ/versions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_versions(&server, json!([version_json("10012", "2.0.0")])).await;
    Mock::given(method("POST"))
        .and(path("/rest/api/2/version"))
        .respond_with(ResponseTemplate::new(201).set_body_json(version_json("10012", "2.0.0")))
        .expect(1)
        .mount(&server)
        .await;

    let first = run(&server, "2.0.0", &mut ActionContext::new().with_changelog(vec![]))
        .await
        .unwrap();
    let second = run(&server, "2.0.0", &mut ActionContext::new().with_changelog(vec![]))
        .await
        .unwrap();

    assert_eq!(first.version_id(), second.version_id());
    assert!(first.created);
    assert!(!second.created);
}

#[tokio::test]
async fn test_unknown_project_stops_the_run() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/2/project/PROJ"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errorMessages": ["No project could be found with key 'PROJ'."],
            "errors": {}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/api/2/project/PROJ/versions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let mut context = ActionContext::new().with_changelog(vec!["PROJ-1".into()]);
    let result = run(&server, "1.0.0", &mut context).await;

    assert!(matches!(result, Err(FixVersionError::ProjectNotFound(ref key)) if key == "PROJ"));
    assert!(context.created_version_id().is_none());
}

#[tokio::test]
async fn test_failed_version_creation_stops_the_run() {
    let server = MockServer::start().await;
    mount_project(&server).await;
    mount_versions(&server, json!([])).await;
    Mock::given(method("POST"))
        .and(path("/rest/api/2/version"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "errorMessages": ["You must have global or project administrator permissions."],
            "errors": {}
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let mut context = ActionContext::new().with_changelog(vec!["PROJ-1".into()]);
    let result = run(&server, "3.0.0", &mut context).await;

    match result {
        Err(FixVersionError::VersionCreate(msg)) => assert!(msg.contains("403")),
        other => panic!("Expected VersionCreate, got {:?}", other.map(|r| r.version)),
    }
    assert!(context.created_version_id().is_none());
}

#[tokio::test]
async fn test_changelog_provider_used_when_context_is_empty() {
    let server = MockServer::start().await;
    mount_project(&server).await;
    mount_versions(&server, json!([version_json("10011", "1.0.0")])).await;
    mount_issue(&server, "PROJ-7", json!([])).await;
    expect_fix_version(&server, "PROJ-7", "10011").await;

    let validated = options(&server, "1.0.0").validate().unwrap();
    let tagger = VersionTagger::connect(&validated.connection).unwrap();
    let mut context = ActionContext::new();
    let report = tagger
        .run(&validated, &mut context, &FixedChangelog(vec!["PROJ-7"]))
        .await
        .unwrap();

    assert_eq!(report.tagged, vec!["PROJ-7"]);
    assert_eq!(context.changelog(), Some(&["PROJ-7".to_string()][..]));
}

#[tokio::test]
async fn test_malformed_changelog_key_never_reaches_jira() {
    let server = MockServer::start().await;
    mount_project(&server).await;
    mount_versions(&server, json!([version_json("10011", "1.0.0")])).await;
    Mock::given(path_regex(r"^/rest/api/2/issue/PROJ-1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;
    mount_issue(&server, "PROJ-2", json!([])).await;
    expect_fix_version(&server, "PROJ-2", "10011").await;

    let mut context = ActionContext::new()
        .with_changelog(vec!["PROJ-1/watchers".into(), "PROJ-2".into()]);
    let report = run(&server, "1.0.0", &mut context).await.unwrap();

    assert_eq!(report.tagged, vec!["PROJ-2"]);
    assert_eq!(report.skipped[0].key, "PROJ-1/watchers");
    assert!(report.skipped[0].reason.contains("is not an issue key"));
}
