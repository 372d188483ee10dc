//! The Gitea todo widget: refresh pipeline, view state and the no-op write
//! commands.

pub mod commands;
mod content;
pub mod state;

use std::sync::Arc;

use issueboard_core::{FetchResult, GiteaSettings, IssueRecord, ListIssuesOptions, RemoteIssueClient};

use crate::app_event::AppEvent;
use crate::app_event_sender::AppEventSender;
use crate::scroll::ScrollSelectionModel;

use self::commands::WidgetCommand;
use self::state::ListRenderState;

pub use content::NO_ITEMS_MESSAGE;
pub use content::trim_todo_body;

/// What the host paints: panel title, tagged body text, and whether the
/// body is an error message rather than a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedContent {
    pub title: String,
    pub body: String,
    pub is_error: bool,
}

/// One page request prepared by [`TodoWidget::begin_refresh`].
///
/// It borrows nothing from the widget, so the host can await it on another
/// task and hand the outcome back through [`TodoWidget::commit`].
pub struct PendingFetch {
    client: Arc<dyn RemoteIssueClient>,
    options: ListIssuesOptions,
}

impl PendingFetch {
    pub async fn run(self) -> FetchResult<Vec<IssueRecord>> {
        let result = self.client.list_open_issues(&self.options).await;
        if let Err(err) = &result {
            tracing::warn!("issue refresh failed: {err}");
        }
        result
    }
}

/// Open-issue list backed by a [`RemoteIssueClient`].
///
/// The widget owns its [`ListRenderState`] outright; only [`refresh`]
/// replaces it. Selection lives in the injected model `S`, which the host
/// also drives from key input.
///
/// [`refresh`]: TodoWidget::refresh
pub struct TodoWidget<S: ScrollSelectionModel> {
    client: Arc<dyn RemoteIssueClient>,
    selection: S,
    settings: GiteaSettings,
    state: ListRenderState,
    enabled: bool,
    view_width: usize,
    redraw_tx: Option<AppEventSender>,
}

impl<S: ScrollSelectionModel> TodoWidget<S> {
    pub fn new(client: Arc<dyn RemoteIssueClient>, selection: S, settings: GiteaSettings) -> Self {
        let enabled = settings.enabled;
        Self {
            client,
            selection,
            settings,
            state: ListRenderState::never_fetched(),
            enabled,
            view_width: 0,
            redraw_tx: None,
        }
    }

    /// Route render requests to the app event loop.
    pub fn with_redraw_sender(mut self, tx: AppEventSender) -> Self {
        self.redraw_tx = Some(tx);
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Host-controlled visibility toggle. A disabled widget ignores refresh.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn state(&self) -> &ListRenderState {
        &self.state
    }

    pub fn settings(&self) -> &GiteaSettings {
        &self.settings
    }

    pub fn selection(&self) -> &S {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut S {
        &mut self.selection
    }

    /// Inner width of the panel, used to pad highlight regions.
    pub fn set_view_width(&mut self, width: usize) {
        self.view_width = width;
    }

    /// Fetch one page of open issues and commit the outcome.
    ///
    /// Failures become state: the error replaces the list and is rendered
    /// in its place. Hosts that must keep painting while the request runs
    /// split this into [`begin_refresh`] and [`commit`].
    ///
    /// [`begin_refresh`]: TodoWidget::begin_refresh
    /// [`commit`]: TodoWidget::commit
    pub async fn refresh(&mut self) {
        let Some(fetch) = self.begin_refresh() else {
            return;
        };
        let result = fetch.run().await;
        self.commit(result);
    }

    /// Prepare a request for the configured page size. `None` while the
    /// widget is disabled.
    pub fn begin_refresh(&self) -> Option<PendingFetch> {
        if !self.enabled {
            return None;
        }

        let options = ListIssuesOptions::open_issues(self.settings.page_size);
        tracing::debug!(
            service = self.client.service_name(),
            page_size = options.page_size,
            "refreshing open issues"
        );
        Some(PendingFetch {
            client: Arc::clone(&self.client),
            options,
        })
    }

    /// Replace the render state with a finished fetch. The selection model
    /// learns the new row count before a render is requested. Results that
    /// land after the widget was disabled are dropped.
    pub fn commit(&mut self, result: FetchResult<Vec<IssueRecord>>) {
        if !self.enabled {
            tracing::debug!("dropping fetch result for disabled widget");
            return;
        }

        self.state = ListRenderState::from_fetch(result);
        self.selection.set_item_count(self.state.item_count());
        tracing::debug!(count = self.state.item_count(), "issue list committed");

        self.render();
    }

    /// Ask the host to repaint. Safe to call any number of times.
    pub fn render(&self) {
        if let Some(tx) = &self.redraw_tx {
            tx.send(AppEvent::RequestRedraw);
        }
    }

    /// Run the commands the widget owns. Navigation and help belong to the
    /// host and return `false`.
    pub async fn handle_command(&mut self, command: WidgetCommand) -> bool {
        match command {
            WidgetCommand::Refresh => {
                self.refresh().await;
                true
            }
            WidgetCommand::MarkAsDone => {
                self.mark_as_done();
                true
            }
            WidgetCommand::Open => {
                self.open_todo();
                true
            }
            WidgetCommand::Next
            | WidgetCommand::Prev
            | WidgetCommand::Unselect
            | WidgetCommand::ToggleHelp => false,
        }
    }

    /// Marking a todo as done is disabled; the tracker is read-only here.
    pub fn mark_as_done(&self) {
        tracing::debug!(selected = ?self.selection.selected(), "mark as done is disabled");
    }

    /// Opening a todo's link is disabled.
    pub fn open_todo(&self) {
        tracing::debug!(selected = ?self.selection.selected(), "open todo is disabled");
    }
}
