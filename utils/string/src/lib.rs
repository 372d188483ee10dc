//! UTF-8 safe string helpers shared by the issueboard crates.
//!
//! Everything here works on character boundaries so that multi-byte
//! characters are never split when text is cut down for display.

/// Return the portion of `s` before the first line break.
///
/// The scan walks characters, not bytes, so the cut always lands on a
/// character boundary. When `s` has no line break it is returned unchanged.
///
/// # Examples
///
/// ```
/// use issueboard_utils_string::first_line;
///
/// assert_eq!(first_line("Steps to reproduce\nDo X then Y"), "Steps to reproduce");
/// assert_eq!(first_line("single line"), "single line");
/// assert_eq!(first_line("héllo\nwörld"), "héllo");
/// ```
#[inline]
pub fn first_line(s: &str) -> &str {
    for (i, ch) in s.char_indices() {
        if ch == '\n' {
            return &s[..i];
        }
    }
    s
}

/// Truncate a `&str` to a byte budget at a character boundary (prefix).
///
/// Returns the longest prefix of `s` that fits within `max_bytes` bytes
/// while ending at a valid UTF-8 character boundary.
///
/// # Examples
///
/// ```
/// use issueboard_utils_string::take_bytes_at_char_boundary;
///
/// assert_eq!(take_bytes_at_char_boundary("hello world", 5), "hello");
/// assert_eq!(take_bytes_at_char_boundary("héllo", 2), "h"); // é is 2 bytes
/// assert_eq!(take_bytes_at_char_boundary("😀abc", 3), "");
/// ```
#[inline]
pub fn take_bytes_at_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut last_ok = 0;
    for (i, ch) in s.char_indices() {
        let next_byte = i + ch.len_utf8();
        if next_byte > max_bytes {
            break;
        }
        last_ok = next_byte;
    }
    &s[..last_ok]
}

/// Blank padding that fills a row of `width` cells after `offset` cells of
/// content. Never negative: an offset past the width yields an empty pad.
#[inline]
pub fn row_padding(offset: usize, width: usize) -> String {
    " ".repeat(width.saturating_sub(offset))
}
