use std::time::Duration;

use issueboard_core::FetchError;
use issueboard_core::GiteaClient;
use issueboard_core::IssueRecord;
use issueboard_core::ListIssuesOptions;
use issueboard_core::RemoteIssueClient;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::header;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::matchers::query_param;

const SEARCH: &str = "/api/v1/repos/issues/search";

fn client_for(server: &MockServer, api_key: &str) -> GiteaClient {
    GiteaClient::new(&server.uri(), api_key, Duration::from_secs(5)).expect("client")
}

/// The single list request carries the open/issue filters, one page and
/// the token header.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn sends_single_page_open_issue_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH))
        .and(query_param("type", "issues"))
        .and(query_param("state", "open"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "30"))
        .and(header("authorization", "token secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "secret-token");
    let issues = client
        .list_open_issues(&ListIssuesOptions::default())
        .await
        .unwrap();

    assert!(issues.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn maps_issues_in_server_order() {
    let server = MockServer::start().await;

    let body = json!([
        {
            "id": 11,
            "number": 3,
            "title": "Fix bug",
            "body": "oops\ndetails",
            "state": "open",
            "repository": { "id": 1, "name": "core", "owner": "team", "full_name": "team/core" }
        },
        {
            "id": 12,
            "number": 9,
            "title": "Add docs",
            "body": "none",
            "state": "open",
            "repository": { "id": 2, "name": "web", "owner": "team", "full_name": "team/web" }
        }
    ]);

    Mock::given(method("GET"))
        .and(path(SEARCH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let client = client_for(&server, "");
    let issues = client
        .list_open_issues(&ListIssuesOptions::open_issues(5))
        .await
        .unwrap();

    assert_eq!(
        issues,
        vec![
            IssueRecord::new(11, "Fix bug", "oops\ndetails", "core"),
            IssueRecord::new(12, "Add docs", "none", "web"),
        ]
    );

    // No token configured: no authorization header.
    let request = &server.received_requests().await.unwrap()[0];
    assert!(request.headers.get("authorization").is_none());
    assert!(request.url.query().unwrap_or_default().contains("limit=5"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn non_success_status_becomes_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "unauthorized", "url": "" })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, "bad");
    let err = client
        .list_open_issues(&ListIssuesOptions::default())
        .await
        .unwrap_err();

    match err {
        FetchError::Status { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "unauthorized");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn malformed_body_becomes_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, "");
    let err = client
        .list_open_issues(&ListIssuesOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Parse(_)), "got {err:?}");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unreachable_server_becomes_network_error() {
    // Nothing listens on the discard port locally.
    let client = GiteaClient::new("http://127.0.0.1:9", "", Duration::from_secs(2)).unwrap();
    let err = client
        .list_open_issues(&ListIssuesOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Network(_)), "got {err:?}");
}
