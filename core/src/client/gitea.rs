//! Gitea issue search client.
//!
//! Uses the instance-wide search endpoint, which returns issues across every
//! repository the token can see:
//! `GET {domain}/api/v1/repos/issues/search?type=issues&state=open&page=1&limit=N`

use std::time::Duration;

use async_trait::async_trait;
use issueboard_utils_string::take_bytes_at_char_boundary;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use url::Url;

use crate::config_types::GiteaSettings;
use crate::issue::IssueRecord;

use super::{FetchError, FetchResult, ListIssuesOptions, RemoteIssueClient};

const SEARCH_PATH: &str = "api/v1/repos/issues/search";

/// Longest error body carried into a [`FetchError::Status`] message.
const MAX_ERROR_BODY_BYTES: usize = 200;

/// Authenticated client for one Gitea instance.
#[derive(Debug, Clone)]
pub struct GiteaClient {
    http: reqwest::Client,
    search_url: Url,
}

/// Gitea error response format.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

#[derive(Debug, Deserialize)]
struct WireIssue {
    id: u64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    repository: Option<WireRepository>,
}

#[derive(Debug, Deserialize)]
struct WireRepository {
    #[serde(default)]
    name: String,
}

impl From<WireIssue> for IssueRecord {
    fn from(wire: WireIssue) -> Self {
        IssueRecord {
            id: wire.id,
            title: wire.title,
            body: wire.body.unwrap_or_default(),
            repository_name: wire.repository.map(|r| r.name).unwrap_or_default(),
        }
    }
}

impl GiteaClient {
    /// Build a client for `domain`, sending `api_key` as a token when it is
    /// non-empty.
    pub fn new(domain: &str, api_key: &str, timeout: Duration) -> FetchResult<Self> {
        let search_url = search_url(domain)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if !api_key.is_empty() {
            let value = HeaderValue::from_str(&format!("token {api_key}"))
                .map_err(|e| FetchError::InvalidConfig(format!("api key: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .user_agent(concat!("issueboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::InvalidConfig(format!("http client: {e}")))?;

        Ok(Self { http, search_url })
    }

    pub fn from_settings(settings: &GiteaSettings) -> FetchResult<Self> {
        Self::new(
            &settings.domain,
            &settings.api_key,
            Duration::from_secs(settings.request_timeout_secs),
        )
    }

    pub fn search_url(&self) -> &Url {
        &self.search_url
    }
}

fn search_url(domain: &str) -> FetchResult<Url> {
    // Keep any sub-path the instance is served under.
    let base = format!("{}/", domain.trim_end_matches('/'));
    let base = Url::parse(&base)
        .map_err(|e| FetchError::InvalidConfig(format!("domain '{domain}': {e}")))?;
    base.join(SEARCH_PATH)
        .map_err(|e| FetchError::InvalidConfig(format!("domain '{domain}': {e}")))
}

fn status_message(status: StatusCode, body: &str) -> String {
    if let Ok(err) = serde_json::from_str::<ErrorResponse>(body)
        && !err.message.trim().is_empty()
    {
        return err.message;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown status")
            .to_string()
    } else {
        take_bytes_at_char_boundary(trimmed, MAX_ERROR_BODY_BYTES).to_string()
    }
}

#[async_trait]
impl RemoteIssueClient for GiteaClient {
    fn service_name(&self) -> &str {
        "Gitea"
    }

    async fn list_open_issues(
        &self,
        options: &ListIssuesOptions,
    ) -> FetchResult<Vec<IssueRecord>> {
        let limit = options.page_size.to_string();
        let response = self
            .http
            .get(self.search_url.clone())
            .query(&[
                ("type", options.kind.as_query_value()),
                ("state", options.state.as_query_value()),
                ("page", "1"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "issue search rejected");
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: status_message(status, &body),
            });
        }

        let issues: Vec<WireIssue> =
            serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))?;
        tracing::debug!(count = issues.len(), "issue search returned");

        Ok(issues.into_iter().map(IssueRecord::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn search_url_preserves_sub_path() {
        let url = search_url("https://git.example.com/gitea/").unwrap();
        assert_eq!(
            url.as_str(),
            "https://git.example.com/gitea/api/v1/repos/issues/search"
        );
    }

    #[test]
    fn search_url_rejects_garbage_domain() {
        let err = search_url("not a url").unwrap_err();
        assert!(matches!(err, FetchError::InvalidConfig(_)));
    }

    #[test]
    fn wire_issue_tolerates_missing_body_and_repository() {
        let wire: WireIssue = serde_json::from_str(r#"{"id": 7, "title": "t", "body": null}"#)
            .unwrap();
        let record = IssueRecord::from(wire);
        assert_eq!(record, IssueRecord::new(7, "t", "", ""));
    }

    #[test]
    fn status_message_prefers_json_message() {
        let msg = status_message(StatusCode::UNAUTHORIZED, r#"{"message":"token is required"}"#);
        assert_eq!(msg, "token is required");
        assert_eq!(status_message(StatusCode::UNAUTHORIZED, ""), "Unauthorized");
        assert_eq!(status_message(StatusCode::BAD_GATEWAY, " upstream down "), "upstream down");
    }
}
