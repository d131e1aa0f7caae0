//! Presentation flags derived from a square's title. Recomputed on every
//! render, never stored.

/// `[Go]` renders as a button labelled `Go`.
pub fn button_label(title: &str) -> Option<&str> {
    title.strip_prefix('[')?.strip_suffix(']')
}

pub fn is_button(title: &str) -> bool {
    button_label(title).is_some()
}

/// Titles of at most two characters get compact rendering.
pub fn is_short(title: &str) -> bool {
    title.chars().count() <= 2
}
