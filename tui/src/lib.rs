//! Terminal front end for the Gitea todo widget.
//!
//! [`widget::TodoWidget`] owns the refresh pipeline and produces tagged
//! text; [`markup`] turns that text into ratatui lines; [`app`] runs the
//! crossterm event loop and the refresh ticker around them.

pub mod app;
pub mod app_event;
pub mod app_event_sender;
pub mod cli;
pub mod colors;
pub mod logging;
pub mod markup;
pub mod scroll;
pub mod widget;

#[cfg(test)]
mod test_support;

pub use scroll::ScrollSelectionModel;
pub use scroll::ScrollableList;
pub use widget::PendingFetch;
pub use widget::RenderedContent;
pub use widget::TodoWidget;
pub use widget::commands::WidgetCommand;
pub use widget::state::ListRenderState;
