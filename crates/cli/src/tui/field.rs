use squares_core::Caret;

/// Editable text with a caret and an optional selection, positions in chars.
///
/// Stands in for the title input and the code editor of the terminal UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    chars: Vec<char>,
    /// Selection anchor; equals `cursor` when nothing is selected.
    anchor: usize,
    cursor: usize,
}

impl TextField {
    pub fn new(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let end = chars.len();
        Self { chars, anchor: end, cursor: end }
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    /// Replace the text and select all of it, as a freshly focused input.
    pub fn load(&mut self, text: &str) {
        *self = Self::new(text);
        self.select_all();
    }

    pub fn select_all(&mut self) {
        self.anchor = 0;
        self.cursor = self.chars.len();
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn range(&self) -> (usize, usize) {
        (self.anchor.min(self.cursor), self.anchor.max(self.cursor))
    }

    pub fn caret(&self) -> Caret {
        let (start, end) = self.range();
        Caret { start, end, len: self.chars.len() }
    }

    pub fn has_selection(&self) -> bool {
        self.anchor != self.cursor
    }

    fn delete_selection(&mut self) -> bool {
        if !self.has_selection() {
            return false;
        }
        let (start, end) = self.range();
        self.chars.drain(start..end);
        self.anchor = start;
        self.cursor = start;
        true
    }

    pub fn insert(&mut self, ch: char) {
        self.delete_selection();
        self.chars.insert(self.cursor, ch);
        self.cursor += 1;
        self.anchor = self.cursor;
    }

    pub fn insert_str(&mut self, s: &str) {
        for ch in s.chars() {
            self.insert(ch);
        }
    }

    /// Returns true if the text changed.
    pub fn backspace(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.chars.remove(self.cursor);
        self.anchor = self.cursor;
        true
    }

    /// Collapses a selection to its start, else steps one char left.
    pub fn left(&mut self) {
        if self.has_selection() {
            self.cursor = self.range().0;
        } else {
            self.cursor = self.cursor.saturating_sub(1);
        }
        self.anchor = self.cursor;
    }

    pub fn right(&mut self) {
        if self.has_selection() {
            self.cursor = self.range().1;
        } else if self.cursor < self.chars.len() {
            self.cursor += 1;
        }
        self.anchor = self.cursor;
    }

    pub fn home(&mut self) {
        self.cursor = 0;
        self.anchor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.chars.len();
        self.anchor = self.cursor;
    }

    /// `(line, column)` of the cursor, for placing the terminal cursor.
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let before = &self.chars[..self.cursor];
        let line = before.iter().filter(|c| **c == '\n').count();
        let col = before.iter().rev().take_while(|c| **c != '\n').count();
        (line, col)
    }
}
