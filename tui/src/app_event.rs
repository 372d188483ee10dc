use crossterm::event::KeyEvent;
use issueboard_core::{FetchResult, IssueRecord};

/// Events delivered to the main loop.
#[derive(Debug)]
pub enum AppEvent {
    /// A key press from the input thread.
    KeyEvent(KeyEvent),

    /// The widget state changed; repaint on the next loop turn.
    RequestRedraw,

    /// The refresh ticker fired.
    RefreshTick,

    /// A background fetch finished; commit it on the UI thread.
    Fetched(FetchResult<Vec<IssueRecord>>),
}
