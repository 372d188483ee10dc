//! Keyboard command table for the todo widget.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Every command the widget exposes to the keyboard.
///
/// `MarkAsDone` and `Open` stay in the table even though both are no-ops:
/// write access to the tracker was removed, the bindings were not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetCommand {
    Refresh,
    Next,
    Prev,
    Unselect,
    MarkAsDone,
    Open,
    ToggleHelp,
}

impl WidgetCommand {
    pub const ALL: [WidgetCommand; 7] = [
        WidgetCommand::Refresh,
        WidgetCommand::Next,
        WidgetCommand::Prev,
        WidgetCommand::Unselect,
        WidgetCommand::MarkAsDone,
        WidgetCommand::Open,
        WidgetCommand::ToggleHelp,
    ];

    /// Map a key press to a command. Modified keys (other than shift) are
    /// left to the host.
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return None;
        }
        match key.code {
            KeyCode::Char('r') => Some(WidgetCommand::Refresh),
            KeyCode::Char('j') | KeyCode::Down => Some(WidgetCommand::Next),
            KeyCode::Char('k') | KeyCode::Up => Some(WidgetCommand::Prev),
            KeyCode::Esc => Some(WidgetCommand::Unselect),
            KeyCode::Char('d') => Some(WidgetCommand::MarkAsDone),
            KeyCode::Char('o') | KeyCode::Enter => Some(WidgetCommand::Open),
            KeyCode::Char('?') => Some(WidgetCommand::ToggleHelp),
            _ => None,
        }
    }

    pub fn keys(self) -> &'static str {
        match self {
            WidgetCommand::Refresh => "r",
            WidgetCommand::Next => "j, ↓",
            WidgetCommand::Prev => "k, ↑",
            WidgetCommand::Unselect => "esc",
            WidgetCommand::MarkAsDone => "d",
            WidgetCommand::Open => "o, enter",
            WidgetCommand::ToggleHelp => "?",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            WidgetCommand::Refresh => "Refresh widget",
            WidgetCommand::Next => "Select next item",
            WidgetCommand::Prev => "Select previous item",
            WidgetCommand::Unselect => "Clear selection",
            WidgetCommand::MarkAsDone => "Mark todo as done (disabled)",
            WidgetCommand::Open => "Open todo in browser (disabled)",
            WidgetCommand::ToggleHelp => "Show/hide this help",
        }
    }
}

/// One line per command, keys padded into a column.
pub fn help_text() -> String {
    let width = WidgetCommand::ALL
        .iter()
        .map(|cmd| cmd.keys().chars().count())
        .max()
        .unwrap_or(0);

    WidgetCommand::ALL
        .iter()
        .map(|cmd| {
            let keys = cmd.keys();
            let pad = width - keys.chars().count();
            format!("  {keys}{}  {}", " ".repeat(pad), cmd.description())
        })
        .collect::<Vec<_>>()
        .join("\n")
}
