//! Styled text with embedded SGR markers
//!
//! Lines produced by the renderers carry `ESC [ ... m` color markers inline.
//! Markers occupy no columns: [`clip_columns`] slices by printable column and
//! keeps the color state correct across the cut, and [`to_line`] converts a
//! styled line into a ratatui [`Line`] for drawing.

use super::theme::DEFAULT_THEME;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

const TAB_WIDTH: usize = 8;

/// Byte length of the escape sequence starting at `s[0] == ESC`
fn escape_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    if bytes.get(1) != Some(&b'[') {
        return 1;
    }
    bytes[2..]
        .iter()
        .position(|b| (0x40..=0x7e).contains(b))
        .map(|p| p + 3)
        .unwrap_or(bytes.len())
}

/// Visible slice `[offset, offset + width)` of `line`, in printable columns
///
/// The marker in effect at `offset` is re-emitted at the start of the slice,
/// short lines are padded with spaces, and the last marker after the slice
/// is appended so the next line starts from the state the full line left.
pub fn clip_columns(line: &str, offset: usize, width: usize) -> String {
    let end = offset + width;
    let mut out = String::with_capacity(width + 16);
    let mut pending: Option<&str> = None;
    let mut trailing: Option<&str> = None;
    let mut col = 0;
    let mut rest = line;

    while let Some(c) = rest.chars().next() {
        if c == '\x1b' {
            let len = escape_len(rest);
            let marker = &rest[..len];
            if col < offset {
                pending = Some(marker);
            } else if col < end {
                pending = None;
                out.push_str(marker);
            } else {
                trailing = Some(marker);
            }
            rest = &rest[len..];
            continue;
        }
        rest = &rest[c.len_utf8()..];
        if col >= end {
            continue;
        }
        let cells = if c == '\t' {
            TAB_WIDTH - col % TAB_WIDTH
        } else {
            1
        };
        for _ in 0..cells {
            if col >= offset && col < end {
                if let Some(marker) = pending.take() {
                    out.push_str(marker);
                }
                out.push(if c == '\t' { ' ' } else { c });
            }
            col += 1;
        }
    }

    if col < end {
        if let Some(marker) = pending.take() {
            out.push_str(marker);
        }
        let pad = end - col.max(offset);
        out.extend(std::iter::repeat(' ').take(pad));
    }
    if let Some(marker) = trailing {
        out.push_str(marker);
    }
    out
}

/// Number of printable columns in `line`
pub fn visible_width(line: &str) -> usize {
    let mut width = 0;
    let mut rest = line;
    while let Some(c) = rest.chars().next() {
        if c == '\x1b' {
            rest = &rest[escape_len(rest)..];
            continue;
        }
        width += if c == '\t' {
            TAB_WIDTH - width % TAB_WIDTH
        } else {
            1
        };
        rest = &rest[c.len_utf8()..];
    }
    width
}

/// `line` with every marker removed
pub fn strip(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;
    while let Some(c) = rest.chars().next() {
        if c == '\x1b' {
            rest = &rest[escape_len(rest)..];
        } else {
            out.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }
    out
}

fn apply_sgr(style: Style, params: &str, bold: &mut bool) -> Style {
    let mut style = style;
    let codes: Vec<u16> = params
        .split(';')
        .map(|p| p.parse().unwrap_or(0))
        .collect();
    for code in &codes {
        match code {
            0 => {
                style = Style::default();
                *bold = false;
            }
            1 => *bold = true,
            22 => {
                *bold = false;
                style.add_modifier.remove(Modifier::BOLD);
            }
            39 => style.fg = None,
            _ => {}
        }
    }
    for code in codes {
        if let Some(color) = DEFAULT_THEME.sgr_foreground(code, *bold) {
            style = style.fg(color);
        }
    }
    if *bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    style
}

/// Convert a styled line into spans; markers other than SGR are dropped
pub fn to_line(text: &str) -> Line<'static> {
    let mut spans = Vec::new();
    let mut style = Style::default();
    let mut bold = false;
    let mut current = String::new();
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        if c == '\x1b' {
            let len = escape_len(rest);
            let marker = &rest[..len];
            if !current.is_empty() {
                spans.push(Span::styled(std::mem::take(&mut current), style));
            }
            if let Some(params) = marker
                .strip_prefix("\x1b[")
                .and_then(|m| m.strip_suffix('m'))
            {
                style = apply_sgr(style, params, &mut bold);
            }
            rest = &rest[len..];
            continue;
        }
        current.push(c);
        rest = &rest[c.len_utf8()..];
    }
    if !current.is_empty() {
        spans.push(Span::styled(current, style));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_keeps_color_across_cut() {
        let line = "\x1b[1;32m0123456789\x1b[0m";
        assert_eq!(clip_columns(line, 5, 3), "\x1b[1;32m567\x1b[0m");
    }

    #[test]
    fn test_clip_pads_short_lines() {
        assert_eq!(clip_columns("abc", 0, 5), "abc  ");
        assert_eq!(clip_columns("abc", 4, 2), "  ");
    }

    #[test]
    fn test_clip_passes_markers_inside_window() {
        let line = "ab\x1b[31mcd\x1b[0mef";
        assert_eq!(clip_columns(line, 1, 4), "b\x1b[31mcd\x1b[0me");
    }

    #[test]
    fn test_clip_expands_tabs() {
        assert_eq!(clip_columns("a\tb", 0, 10), "a       b ");
        assert_eq!(visible_width("a\tb"), 9);
    }

    #[test]
    fn test_strip_and_width_ignore_markers() {
        let line = "x = \x1b[1;31m5\x1b[0m";
        assert_eq!(strip(line), "x = 5");
        assert_eq!(visible_width(line), 5);
    }

    #[test]
    fn test_to_line_splits_styled_spans() {
        let line = to_line("a \x1b[1;31mb\x1b[0m c");
        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[1].content, "b");
        assert_eq!(line.spans[1].style.fg, Some(DEFAULT_THEME.red));
        assert_eq!(line.spans[2].style, Style::default());
    }
}
