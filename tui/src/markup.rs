//! Tagged text used between the widget and the painter.
//!
//! Tags:
//! - `[fg]` / `[fg:bg]` set colors; an empty part keeps the current color,
//!   `-` or `default` resets it.
//! - `["id"]` opens a highlight region, `[""]` closes it.
//! - `[[` is a literal `[`.
//!
//! Bracketed text that is not a valid tag is kept as-is, so stray brackets
//! in plain text survive even without escaping.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::colors::parse_color;

/// Closes the current highlight region.
pub const REGION_END: &str = "[\"\"]";

/// Make user text safe to embed in markup.
pub fn escape(text: &str) -> String {
    text.replace('[', "[[")
}

/// Open a highlight region keyed by `id`.
pub fn region_start(id: impl std::fmt::Display) -> String {
    format!("[\"{id}\"]")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColorChange {
    Keep,
    Reset,
    Set(Color),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Text(String),
    Colors { fg: ColorChange, bg: ColorChange },
    RegionStart(String),
    RegionEnd,
    Newline,
}

/// Markup converted to ratatui lines plus where each region starts.
#[derive(Debug, Default, Clone)]
pub struct ParsedMarkup {
    pub lines: Vec<Line<'static>>,
    regions: Vec<(String, usize)>,
}

impl ParsedMarkup {
    /// Line index at which region `id` opens.
    pub fn region_line(&self, id: &str) -> Option<usize> {
        self.regions
            .iter()
            .find(|(region, _)| region == id)
            .map(|(_, line)| *line)
    }
}

fn parse_color_change(part: &str) -> Option<ColorChange> {
    match part {
        "" => Some(ColorChange::Keep),
        "-" | "default" => Some(ColorChange::Reset),
        name => parse_color(name).map(ColorChange::Set),
    }
}

fn parse_tag(inner: &str) -> Option<Token> {
    if inner.contains(['[', '\n']) {
        return None;
    }

    if inner.len() >= 2 && inner.starts_with('"') && inner.ends_with('"') {
        let id = &inner[1..inner.len() - 1];
        if id.contains('"') {
            return None;
        }
        return Some(if id.is_empty() {
            Token::RegionEnd
        } else {
            Token::RegionStart(id.to_string())
        });
    }

    if inner.is_empty() {
        return None;
    }

    let mut parts = inner.split(':');
    let fg = parse_color_change(parts.next().unwrap_or_default())?;
    let bg = match parts.next() {
        Some(part) => parse_color_change(part)?,
        None => ColorChange::Keep,
    };
    if parts.next().is_some() {
        return None;
    }
    Some(Token::Colors { fg, bg })
}

fn tokenize(input: &str) -> Vec<Token> {
    fn flush(text: &mut String, tokens: &mut Vec<Token>) {
        if !text.is_empty() {
            tokens.push(Token::Text(std::mem::take(text)));
        }
    }

    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut rest = input;

    while let Some(ch) = rest.chars().next() {
        match ch {
            '\n' => {
                flush(&mut text, &mut tokens);
                tokens.push(Token::Newline);
                rest = &rest[1..];
            }
            '[' => {
                let after = &rest[1..];
                if after.starts_with('[') {
                    text.push('[');
                    rest = &after[1..];
                    continue;
                }
                if let Some(end) = after.find(']')
                    && let Some(tag) = parse_tag(&after[..end])
                {
                    flush(&mut text, &mut tokens);
                    tokens.push(tag);
                    rest = &after[end + 1..];
                    continue;
                }
                text.push('[');
                rest = after;
            }
            _ => {
                text.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
    }
    flush(&mut text, &mut tokens);
    tokens
}

fn apply(change: ColorChange, slot: &mut Option<Color>) {
    match change {
        ColorChange::Keep => {}
        ColorChange::Reset => *slot = None,
        ColorChange::Set(color) => *slot = Some(color),
    }
}

/// Parse markup into styled lines. A trailing newline does not produce an
/// empty final line.
pub fn parse(markup: &str) -> ParsedMarkup {
    let mut parsed = ParsedMarkup::default();
    let mut style = Style::default();
    let mut spans: Vec<Span<'static>> = Vec::new();

    for token in tokenize(markup) {
        match token {
            Token::Text(text) => spans.push(Span::styled(text, style)),
            Token::Colors { fg, bg } => {
                apply(fg, &mut style.fg);
                apply(bg, &mut style.bg);
            }
            Token::RegionStart(id) => {
                let line = parsed.lines.len();
                if parsed.region_line(&id).is_none() {
                    parsed.regions.push((id, line));
                }
            }
            Token::RegionEnd => {}
            Token::Newline => parsed.lines.push(Line::from(std::mem::take(&mut spans))),
        }
    }
    if !spans.is_empty() {
        parsed.lines.push(Line::from(spans));
    }
    parsed
}

/// Strip all tags, keeping text and line breaks.
pub fn to_plain(markup: &str) -> String {
    let mut out = String::new();
    for token in tokenize(markup) {
        match token {
            Token::Text(text) => out.push_str(&text),
            Token::Newline => out.push('\n'),
            Token::Colors { .. } | Token::RegionStart(_) | Token::RegionEnd => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn colors_apply_to_following_text() {
        let parsed = parse("[red]a[blue:white]b[-]c");
        assert_eq!(parsed.lines.len(), 1);
        let spans = &parsed.lines[0].spans;
        assert_eq!(spans[0].style.fg, Some(Color::Red));
        assert_eq!(spans[1].style.fg, Some(Color::Blue));
        assert_eq!(spans[1].style.bg, Some(Color::White));
        assert_eq!(spans[2].style.fg, None);
        assert_eq!(spans[2].style.bg, Some(Color::White));
    }

    #[test]
    fn escaped_brackets_stay_literal() {
        let raw = "[red] is not a tag";
        let parsed = parse(&escape(raw));
        assert_eq!(line_text(&parsed.lines[0]), raw);
        assert_eq!(parsed.lines[0].spans[0].style.fg, None);
    }

    #[test]
    fn unknown_brackets_are_text() {
        assert_eq!(to_plain("[WIP] fix [x] bugs"), "[WIP] fix [x] bugs");
        assert_eq!(to_plain("unclosed [bracket"), "unclosed [bracket");
    }

    #[test]
    fn regions_record_their_line() {
        let markup = format!(
            "{}first{REGION_END}\n{}second{REGION_END}\n",
            region_start(0),
            region_start(1)
        );
        let parsed = parse(&markup);
        assert_eq!(parsed.lines.len(), 2);
        assert_eq!(parsed.region_line("0"), Some(0));
        assert_eq!(parsed.region_line("1"), Some(1));
        assert_eq!(parsed.region_line("2"), None);
        assert_eq!(line_text(&parsed.lines[1]), "second");
    }

    #[test]
    fn trailing_newline_adds_no_empty_line() {
        assert_eq!(parse("a\nb\n").lines.len(), 2);
        assert!(parse("").lines.is_empty());
    }

    #[test]
    fn plain_keeps_line_breaks() {
        assert_eq!(to_plain("[white] 1. [mediumpurple](core)[white] x\n"), " 1. (core) x\n");
    }
}
