//! Input vocabulary for the navigator.
//!
//! Host UIs translate their native key events into `KeyPress` values. Only
//! the keys the navigator reacts to are named; everything else is `Other`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Tab,
    Backspace,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Char(char),
    Other,
}

impl Key {
    pub fn is_arrow(self) -> bool {
        matches!(self, Key::Up | Key::Down | Key::Left | Key::Right)
    }

    /// `(dx, dy)` of an arrow key.
    pub fn direction(self) -> Option<(isize, isize)> {
        match self {
            Key::Up => Some((0, -1)),
            Key::Down => Some((0, 1)),
            Key::Left => Some((-1, 0)),
            Key::Right => Some((1, 0)),
            _ => None,
        }
    }
}

/// Modifier keys held during a press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { shift: false, ctrl: false, alt: false };
    pub const SHIFT: Modifiers = Modifiers { shift: true, ctrl: false, alt: false };
    pub const CTRL: Modifiers = Modifiers { shift: false, ctrl: true, alt: false };
    pub const CTRL_SHIFT: Modifiers = Modifiers { shift: true, ctrl: true, alt: false };

    /// Neither shift nor ctrl.
    pub fn is_plain(&self) -> bool {
        !self.shift && !self.ctrl
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyPress {
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub const fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    pub const fn shift(key: Key) -> Self {
        Self::new(key, Modifiers::SHIFT)
    }

    pub const fn ctrl(key: Key) -> Self {
        Self::new(key, Modifiers::CTRL)
    }

    pub const fn ctrl_shift(key: Key) -> Self {
        Self::new(key, Modifiers::CTRL_SHIFT)
    }
}

/// Selection range of the title input, in characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Caret {
    pub start: usize,
    pub end: usize,
    /// Length of the title text.
    pub len: usize,
}

impl Caret {
    /// Collapsed caret at `pos`.
    pub fn at(pos: usize, len: usize) -> Self {
        Self { start: pos, end: pos, len }
    }

    /// Whole text selected, as a freshly focused input has it.
    pub fn all(len: usize) -> Self {
        Self { start: 0, end: len, len }
    }

    pub fn at_start(&self) -> bool {
        self.start == 0 && self.end == 0
    }

    pub fn at_end(&self) -> bool {
        self.start == self.len && self.end == self.len
    }
}
