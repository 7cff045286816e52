//! Display-width helpers for terminal text.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Columns `s` occupies on screen.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Columns `c` occupies; zero for control and combining characters.
pub fn char_width(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(0)
}

/// Collapse runs of whitespace into single spaces and trim both ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Fit `s` into `max_width` columns, ending in `…` when anything was cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    let Some(budget) = max_width.checked_sub(1) else {
        return String::new();
    };

    let mut used = 0;
    let mut kept: String = s
        .chars()
        .take_while(|&ch| {
            used += char_width(ch);
            used <= budget
        })
        .collect();
    kept.push('…');
    kept
}
