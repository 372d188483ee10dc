use issueboard_core::{FetchError, FetchResult, IssueRecord};

/// The widget's materialized view.
///
/// Built in one piece from a fetch outcome, so items and error are always
/// replaced together. `items == None` with no error is the never-fetched
/// state; `Some(vec![])` is a successful empty fetch.
#[derive(Debug, Default)]
pub struct ListRenderState {
    items: Option<Vec<IssueRecord>>,
    last_error: Option<FetchError>,
}

impl ListRenderState {
    /// State for a widget that has not refreshed yet.
    pub fn never_fetched() -> Self {
        Self::default()
    }

    /// Commit a fetch outcome. A failure discards any earlier items.
    pub fn from_fetch(result: FetchResult<Vec<IssueRecord>>) -> Self {
        match result {
            Ok(items) => Self {
                items: Some(items),
                last_error: None,
            },
            Err(err) => Self {
                items: None,
                last_error: Some(err),
            },
        }
    }

    pub fn items(&self) -> Option<&[IssueRecord]> {
        self.items.as_deref()
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    /// Row count used for titles and scroll bounds; 0 when unset.
    pub fn item_count(&self) -> usize {
        self.items.as_ref().map_or(0, Vec::len)
    }

    pub fn is_never_fetched(&self) -> bool {
        self.items.is_none() && self.last_error.is_none()
    }
}
