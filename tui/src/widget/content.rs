use issueboard_core::IssueRecord;
use issueboard_utils_string::{first_line, row_padding};

use crate::markup::{REGION_END, escape, region_start};
use crate::scroll::ScrollSelectionModel;

use super::{RenderedContent, TodoWidget};

/// Body shown before the first refresh has run.
pub const NO_ITEMS_MESSAGE: &str = "No ToDos to display";

/// Cut a todo body down to its first line so each row stays one line tall.
pub fn trim_todo_body(body: &str) -> &str {
    first_line(body)
}

/// Wrap a row in a highlight region keyed by `idx`. The padding is sized
/// from `offset`, the length of the full content behind the row, so region
/// addressing matches the underlying text rather than the trimmed row.
fn highlightable_row(row: &str, idx: usize, offset: usize, width: usize) -> String {
    format!(
        "{}{row}{}{REGION_END}\n",
        region_start(idx),
        row_padding(offset, width)
    )
}

impl<S: ScrollSelectionModel> TodoWidget<S> {
    /// Title, body and error flag for the current state. Pure: no I/O and
    /// no state changes.
    pub fn content(&self) -> RenderedContent {
        let title = format!(
            "{} ToDos ({})",
            self.client.service_name(),
            self.state.item_count()
        );

        if let Some(err) = self.state.last_error() {
            return RenderedContent {
                title,
                body: err.to_string(),
                is_error: true,
            };
        }

        let Some(items) = self.state.items() else {
            return RenderedContent {
                title,
                body: NO_ITEMS_MESSAGE.to_string(),
                is_error: false,
            };
        };

        RenderedContent {
            title,
            body: self.content_from(items),
            is_error: false,
        }
    }

    /// One tagged row per item, in list order.
    ///
    /// `show_project` is accepted in the settings but rows always carry the
    /// repository label and nothing else.
    pub(crate) fn content_from(&self, items: &[IssueRecord]) -> String {
        let accent = &self.settings.colors.accent;
        let mut out = String::new();

        for (idx, todo) in items.iter().enumerate() {
            let row_color = self.selection.row_color(idx);
            let row = format!(
                "[{row_color}]{:2}. [{accent}]({})[{row_color}] {} - {}",
                idx + 1,
                escape(&todo.repository_name),
                escape(&todo.title),
                escape(trim_todo_body(&todo.body)),
            );
            out.push_str(&highlightable_row(
                &row,
                idx,
                todo.body.chars().count(),
                self.view_width,
            ));
        }

        out
    }
}
