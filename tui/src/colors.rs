//! Color names used in widget markup and the fixed palette of the panel.

use ratatui::style::Color;

/// Resolve a markup color: a named color (case-insensitive, W3C names the
/// widget themes use plus the ANSI set) or `#rrggbb`.
pub fn parse_color(name: &str) -> Option<Color> {
    let name = name.trim();
    if let Some(hex) = name.strip_prefix('#') {
        return parse_hex(hex);
    }

    let color = match name.to_ascii_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::Rgb(173, 216, 230),
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        "white" => Color::White,
        "orange" => Color::Rgb(255, 165, 0),
        "mediumpurple" => Color::Rgb(147, 112, 219),
        "purple" => Color::Rgb(128, 0, 128),
        "pink" => Color::Rgb(255, 192, 203),
        "navy" => Color::Rgb(0, 0, 128),
        "teal" => Color::Rgb(0, 128, 128),
        "olive" => Color::Rgb(128, 128, 0),
        "maroon" => Color::Rgb(128, 0, 0),
        "silver" => Color::Rgb(192, 192, 192),
        "lime" => Color::Rgb(0, 255, 0),
        "aqua" => Color::Rgb(0, 255, 255),
        "fuchsia" => Color::Rgb(255, 0, 255),
        "gold" => Color::Rgb(255, 215, 0),
        "transparent" => Color::Reset,
        _ => return None,
    };
    Some(color)
}

fn parse_hex(hex: &str) -> Option<Color> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

pub fn error() -> Color {
    Color::Red
}

pub fn border() -> Color {
    Color::Gray
}

pub fn border_focused() -> Color {
    Color::Rgb(255, 165, 0)
}

pub fn text_dim() -> Color {
    Color::DarkGray
}
