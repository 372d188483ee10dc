//! Remote issue sources.
//!
//! The widget only ever talks to a [`RemoteIssueClient`]; the Gitea HTTP
//! implementation lives in [`gitea`]. Tests substitute their own clients.

mod gitea;

pub use gitea::GiteaClient;

use async_trait::async_trait;
use thiserror::Error;

use crate::issue::IssueRecord;

/// Page size requested when the settings do not override it.
pub const DEFAULT_PAGE_SIZE: u32 = 30;

/// Errors from fetching the issue list.
///
/// A fetch error is never fatal: the widget stores it and renders its
/// message in place of the list.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network request failed.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The tracker answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error message from the tracker, or the status reason.
        message: String,
    },

    /// Failed to decode the response body.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The client was built from unusable settings.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failure reported by a non-HTTP source, shown verbatim.
    #[error("{0}")]
    Remote(String),
}

/// Result type for remote issue operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// Record type filter sent to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IssueKind {
    #[default]
    Issue,
    PullRequest,
}

impl IssueKind {
    pub fn as_query_value(self) -> &'static str {
        match self {
            IssueKind::Issue => "issues",
            IssueKind::PullRequest => "pulls",
        }
    }
}

/// State filter sent to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IssueState {
    #[default]
    Open,
    Closed,
}

impl IssueState {
    pub fn as_query_value(self) -> &'static str {
        match self {
            IssueState::Open => "open",
            IssueState::Closed => "closed",
        }
    }
}

/// Parameters of the single list request issued per refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListIssuesOptions {
    pub page_size: u32,
    pub kind: IssueKind,
    pub state: IssueState,
}

impl ListIssuesOptions {
    /// Open issues, one page of `page_size` records.
    pub fn open_issues(page_size: u32) -> Self {
        Self {
            page_size,
            kind: IssueKind::Issue,
            state: IssueState::Open,
        }
    }
}

impl Default for ListIssuesOptions {
    fn default() -> Self {
        Self::open_issues(DEFAULT_PAGE_SIZE)
    }
}

/// Source of open issues for the widget.
///
/// Implementations own authentication and request timeouts. A call returns
/// exactly one page; there is no accumulation across pages.
#[async_trait]
pub trait RemoteIssueClient: Send + Sync {
    /// Human readable service name used in the widget title ("Gitea").
    fn service_name(&self) -> &str;

    /// Fetch one page of issues matching `options`, in server order.
    async fn list_open_issues(&self, options: &ListIssuesOptions)
    -> FetchResult<Vec<IssueRecord>>;
}
