use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string, accounting for CJK double-width, emoji, etc.
pub(crate) fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Longest prefix of `s` that fits in `width` display columns.
/// Square cells are a few columns wide, so no ".." marker is added.
pub(crate) fn clip(s: &str, width: usize) -> &str {
    let mut used = 0;
    for (i, ch) in s.char_indices() {
        let cw = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + cw > width {
            return &s[..i];
        }
        used += cw;
    }
    s
}

/// Clip and right-pad to exactly `width` display columns.
pub(crate) fn pad_right(s: &str, width: usize) -> String {
    let clipped = clip(s, width);
    format!("{}{}", clipped, " ".repeat(width - display_width(clipped)))
}

/// Clip and center within exactly `width` display columns.
pub(crate) fn pad_center(s: &str, width: usize) -> String {
    let clipped = clip(s, width);
    let spare = width - display_width(clipped);
    let left = spare / 2;
    format!("{}{}{}", " ".repeat(left), clipped, " ".repeat(spare - left))
}
