//! Shared fakes for the refresh pipeline tests.

#![allow(dead_code)]
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use issueboard_core::{FetchError, FetchResult, IssueRecord, ListIssuesOptions, RemoteIssueClient};
use issueboard_tui::ScrollSelectionModel;
use issueboard_tui::app_event::AppEvent;

/// Remote client answering from a fixed queue. Once the queue is empty
/// every call fails with "script exhausted".
pub struct FakeTracker {
    answers: Mutex<VecDeque<FetchResult<Vec<IssueRecord>>>>,
    calls: AtomicUsize,
}

impl FakeTracker {
    pub fn new(answers: Vec<FetchResult<Vec<IssueRecord>>>) -> Arc<Self> {
        Arc::new(Self {
            answers: Mutex::new(answers.into()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteIssueClient for FakeTracker {
    fn service_name(&self) -> &str {
        "Gitea"
    }

    async fn list_open_issues(&self, _options: &ListIssuesOptions) -> FetchResult<Vec<IssueRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Remote("script exhausted".to_string())))
    }
}

/// Selection model that records every count it is given and whether a
/// redraw had already been queued at that moment.
pub struct RecordingSelection {
    pub counts: Vec<usize>,
    pub redraw_seen_before_count: Vec<bool>,
    redraws: Option<Arc<Mutex<Receiver<AppEvent>>>>,
}

impl RecordingSelection {
    pub fn new() -> Self {
        Self {
            counts: Vec::new(),
            redraw_seen_before_count: Vec::new(),
            redraws: None,
        }
    }

    pub fn watching(redraws: Arc<Mutex<Receiver<AppEvent>>>) -> Self {
        Self {
            redraws: Some(redraws),
            ..Self::new()
        }
    }
}

impl ScrollSelectionModel for RecordingSelection {
    fn set_item_count(&mut self, count: usize) {
        self.counts.push(count);
        if let Some(rx) = &self.redraws {
            let pending = rx.lock().unwrap().try_recv().is_ok();
            self.redraw_seen_before_count.push(pending);
        }
    }

    fn row_color(&self, idx: usize) -> String {
        if idx % 2 == 0 { "white:-" } else { "lightblue:-" }.to_string()
    }

    fn selected(&self) -> Option<usize> {
        None
    }
}

pub fn issue(id: u64, title: &str, body: &str, repo: &str) -> IssueRecord {
    IssueRecord::new(id, title, body, repo)
}
