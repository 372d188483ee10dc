//! Stand-ins for the remote tracker used by unit tests.

#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use issueboard_core::{FetchError, FetchResult, IssueRecord, ListIssuesOptions, RemoteIssueClient};
use tokio::sync::Notify;

/// One canned answer.
#[derive(Debug, Clone)]
pub(crate) enum Scripted {
    Issues(Vec<IssueRecord>),
    Error(String),
}

/// Replays canned answers in order; the last answer repeats once the
/// script runs out.
pub(crate) struct ScriptedClient {
    script: Mutex<VecDeque<Scripted>>,
    last: Mutex<Option<Scripted>>,
    calls: AtomicUsize,
    seen_page_sizes: Mutex<Vec<u32>>,
}

impl ScriptedClient {
    pub(crate) fn new(script: Vec<Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
            calls: AtomicUsize::new(0),
            seen_page_sizes: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn issues(items: Vec<IssueRecord>) -> Self {
        Self::new(vec![Scripted::Issues(items)])
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn seen_page_sizes(&self) -> Vec<u32> {
        self.seen_page_sizes.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteIssueClient for ScriptedClient {
    fn service_name(&self) -> &str {
        "Gitea"
    }

    async fn list_open_issues(&self, options: &ListIssuesOptions) -> FetchResult<Vec<IssueRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_page_sizes.lock().unwrap().push(options.page_size);

        let next = self.script.lock().unwrap().pop_front();
        let answer = match next {
            Some(answer) => {
                *self.last.lock().unwrap() = Some(answer.clone());
                answer
            }
            None => self
                .last
                .lock()
                .unwrap()
                .clone()
                .unwrap_or(Scripted::Issues(Vec::new())),
        };

        match answer {
            Scripted::Issues(items) => Ok(items),
            Scripted::Error(message) => Err(FetchError::Remote(message)),
        }
    }
}

pub(crate) fn sample_issues() -> Vec<IssueRecord> {
    vec![
        IssueRecord::new(1, "Fix bug", "oops\ndetails", "core"),
        IssueRecord::new(2, "Add docs", "none", "web"),
    ]
}

/// Client whose every request waits until the test opens the gate.
pub(crate) struct GatedClient {
    gate: Arc<Notify>,
    items: Vec<IssueRecord>,
    calls: AtomicUsize,
}

impl GatedClient {
    pub(crate) fn new(gate: Arc<Notify>, items: Vec<IssueRecord>) -> Self {
        Self {
            gate,
            items,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteIssueClient for GatedClient {
    fn service_name(&self) -> &str {
        "Gitea"
    }

    async fn list_open_issues(&self, _options: &ListIssuesOptions) -> FetchResult<Vec<IssueRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;
        Ok(self.items.clone())
    }
}
