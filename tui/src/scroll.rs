//! Scroll and selection state shared by the widget and the host's input
//! handling.
//!
//! The widget only writes the item count and reads row colors and the
//! selection through [`ScrollSelectionModel`]; moving the selection is the
//! host's job and goes through [`ScrollableList`] directly.

use issueboard_core::ColorSettings;

/// The slice of scroll/selection state the widget is allowed to touch.
pub trait ScrollSelectionModel {
    /// Record the number of rows in the current list.
    fn set_item_count(&mut self, count: usize);

    /// Markup color tag for row `idx`, encoding whether it is highlighted.
    fn row_color(&self, idx: usize) -> String;

    /// Currently selected row, if any.
    fn selected(&self) -> Option<usize>;
}

/// Host-side list cursor with wrap-around navigation.
#[derive(Debug, Clone)]
pub struct ScrollableList {
    selected: Option<usize>,
    item_count: usize,
    focused: bool,
    scroll_offset: usize,
    colors: ColorSettings,
}

impl ScrollableList {
    pub fn new(colors: ColorSettings) -> Self {
        Self {
            selected: None,
            item_count: 0,
            focused: false,
            scroll_offset: 0,
            colors,
        }
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Rows are highlighted only while the panel has focus.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Select the next row, wrapping to the top.
    pub fn next(&mut self) {
        if self.item_count == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(idx) if idx + 1 < self.item_count => idx + 1,
            _ => 0,
        });
    }

    /// Select the previous row, wrapping to the bottom.
    pub fn prev(&mut self) {
        if self.item_count == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(idx) if idx > 0 && idx < self.item_count => idx - 1,
            _ => self.item_count - 1,
        });
    }

    pub fn unselect(&mut self) {
        self.selected = None;
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Adjust the scroll offset so `line` is inside a viewport of `height`
    /// lines holding `total_lines`. Returns the new offset.
    pub fn scroll_to_line(&mut self, line: usize, height: usize, total_lines: usize) -> usize {
        if height == 0 {
            self.scroll_offset = 0;
            return 0;
        }
        if line < self.scroll_offset {
            self.scroll_offset = line;
        } else if line >= self.scroll_offset + height {
            self.scroll_offset = line + 1 - height;
        }
        let max_offset = total_lines.saturating_sub(height);
        self.scroll_offset = self.scroll_offset.min(max_offset);
        self.scroll_offset
    }
}

impl ScrollSelectionModel for ScrollableList {
    fn set_item_count(&mut self, count: usize) {
        self.item_count = count;
        if self.selected.is_some_and(|idx| idx >= count) {
            self.selected = None;
        }
        if count == 0 {
            self.scroll_offset = 0;
        }
    }

    /// Always a `fore:back` pair. Tags carry over into the following
    /// rows, so an unselected row has to reset the highlight background.
    fn row_color(&self, idx: usize) -> String {
        let (fore, back) = if self.focused && self.selected == Some(idx) {
            (&self.colors.highlight_fore, &self.colors.highlight_back)
        } else if idx % 2 == 0 {
            (&self.colors.row_even, &self.colors.row_even_back)
        } else {
            (&self.colors.row_odd, &self.colors.row_odd_back)
        };
        format!("{fore}:{back}")
    }

    fn selected(&self) -> Option<usize> {
        self.selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn list_with(count: usize) -> ScrollableList {
        let mut list = ScrollableList::new(ColorSettings::default());
        list.set_item_count(count);
        list
    }

    #[test]
    fn next_and_prev_wrap() {
        let mut list = list_with(3);
        list.next();
        assert_eq!(list.selected(), Some(0));
        list.next();
        list.next();
        assert_eq!(list.selected(), Some(2));
        list.next();
        assert_eq!(list.selected(), Some(0));
        list.prev();
        assert_eq!(list.selected(), Some(2));
    }

    #[test]
    fn navigation_on_empty_list_is_inert() {
        let mut list = list_with(0);
        list.next();
        list.prev();
        assert_eq!(list.selected(), None);
    }

    #[test]
    fn shrinking_count_drops_out_of_range_selection() {
        let mut list = list_with(5);
        list.prev();
        assert_eq!(list.selected(), Some(4));
        list.set_item_count(2);
        assert_eq!(list.selected(), None);

        list.next();
        list.set_item_count(4);
        assert_eq!(list.selected(), Some(0));
    }

    #[test]
    fn row_color_highlights_selection_only_when_focused() {
        let mut list = list_with(3);
        list.next();
        assert_eq!(list.row_color(0), "white:-");
        assert_eq!(list.row_color(1), "lightblue:-");

        list.set_focused(true);
        assert_eq!(list.row_color(0), "black:orange");
        assert_eq!(list.row_color(1), "lightblue:-");
    }

    #[test]
    fn scroll_keeps_line_visible() {
        let mut list = list_with(20);
        assert_eq!(list.scroll_to_line(12, 5, 20), 8);
        assert_eq!(list.scroll_to_line(9, 5, 20), 8);
        assert_eq!(list.scroll_to_line(2, 5, 20), 2);
        assert_eq!(list.scroll_to_line(19, 5, 20), 15);
        assert_eq!(list.scroll_to_line(3, 0, 20), 0);
    }
}
