//! Keyboard navigation across the grids of a board.
//!
//! The `Navigator` turns discrete input events into selection changes,
//! square mutations and focus requests. It never touches focus itself: the
//! host UI applies `Outcome::focus`. Events are handled one at a time and
//! every handler runs to completion, writes included, before returning.
//!
//! Moves that find no destination leave the selection where it was.
//! Deselecting only happens on Escape.

use squares_engine::{Board, CellId, HueSource, Hsva, KeyValueStore};

use crate::keys::{Caret, Key, KeyPress};
use crate::selection::SelectionModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Unselected,
    /// The selected square's title input has focus.
    EditingTitle,
    /// The code editor has focus; the selection is kept.
    EditingCode,
}

/// Where the host should put keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The selected square's title input (select its text).
    Title,
    CodeEditor,
}

/// What handling one event did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    /// The event was consumed; the host must skip its default action
    /// (inserting text, moving the caret, leaving the field).
    pub handled: bool,
    /// The selection changed.
    pub moved: bool,
    /// Square reset to defaults by this event.
    pub cleared: Option<CellId>,
    pub focus: Option<Focus>,
    /// Label of a button pressed without selecting its square.
    pub pressed: Option<String>,
    /// New page label when a pager square was clicked.
    pub page: Option<String>,
    /// Color assigned automatically by a code write.
    pub auto_color: Option<Hsva>,
}

impl Outcome {
    fn handled() -> Self {
        Self { handled: true, ..Self::default() }
    }
}

#[derive(Debug, Clone)]
pub struct Navigator {
    selection: SelectionModel,
    mode: Mode,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self { selection: SelectionModel::new(), mode: Mode::Unselected }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn selected(&self) -> Option<&CellId> {
        self.selection.current()
    }

    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    /// Click on a square: select it and edit its title. Clicking the square
    /// whose title is already being edited only re-focuses the input.
    pub fn click<S: KeyValueStore, H: HueSource>(
        &mut self,
        board: &mut Board<S, H>,
        cell: CellId,
    ) -> Outcome {
        if self.mode == Mode::EditingTitle && self.selection.is_selected(&cell) {
            return Outcome { focus: Some(Focus::Title), ..Outcome::handled() };
        }

        let mut out = Outcome::handled();
        out.page = board.activate_pager(&cell);
        out.moved = !self.selection.is_selected(&cell);
        log::debug!("select {} (click)", cell);
        self.selection.select(Some(cell));
        self.mode = Mode::EditingTitle;
        out.focus = Some(Focus::Title);
        out
    }

    /// Click on the button a `[label]` square renders as. The press does not
    /// reach the square unless shift is held. The square whose title is being
    /// edited renders as its input, so a click there is a plain click.
    pub fn click_button<S: KeyValueStore, H: HueSource>(
        &mut self,
        board: &mut Board<S, H>,
        cell: CellId,
        shift: bool,
    ) -> Outcome {
        let editing = self.mode == Mode::EditingTitle && self.selection.is_selected(&cell);
        if shift || editing {
            return self.click(board, cell);
        }
        let title = board.title(&cell);
        let pressed = squares_engine::title::button_label(&title).map(str::to_string);
        Outcome { pressed, ..Outcome::handled() }
    }

    /// Escape: drop the selection.
    pub fn deselect(&mut self) -> Outcome {
        let moved = self.selection.current().is_some();
        self.selection.clear();
        self.mode = Mode::Unselected;
        Outcome { moved, ..Outcome::handled() }
    }

    /// Key pressed in the selected square's title input. `caret` is the
    /// input's selection before the key takes effect.
    pub fn title_key<S: KeyValueStore, H: HueSource>(
        &mut self,
        board: &mut Board<S, H>,
        press: KeyPress,
        caret: Caret,
    ) -> Outcome {
        if self.mode != Mode::EditingTitle {
            return Outcome::default();
        }
        let Some(cell) = self.selection.current().cloned() else {
            return Outcome::default();
        };
        let m = press.modifiers;

        match press.key {
            Key::Enter if m.shift => self.go(board, &cell, 0, -1),
            Key::Enter if m.ctrl => {
                self.mode = Mode::EditingCode;
                Outcome { focus: Some(Focus::CodeEditor), ..Outcome::handled() }
            }
            Key::Enter => self.go(board, &cell, 0, 1),
            Key::Up | Key::Down if m.is_plain() => {
                let (dx, dy) = press.key.direction().unwrap_or_default();
                self.go(board, &cell, dx, dy)
            }
            // caret movement inside the text wins until it hits an edge
            Key::Left if m.is_plain() => {
                if caret.at_start() {
                    self.go(board, &cell, -1, 0)
                } else {
                    Outcome::default()
                }
            }
            Key::Right if m.is_plain() => {
                if caret.at_end() {
                    self.go(board, &cell, 1, 0)
                } else {
                    Outcome::default()
                }
            }
            Key::Tab if m.shift => self.go_back_wrapping(board, &cell),
            Key::Tab => self.go_forward_wrapping(board, &cell),
            Key::Backspace if m.ctrl && m.shift => {
                board.clear(&cell);
                let mut out = self.go(board, &cell, 0, -1);
                out.cleared = Some(cell);
                out
            }
            Key::Backspace if m.ctrl => {
                board.clear(&cell);
                let mut out = self.go_back_wrapping(board, &cell);
                out.cleared = Some(cell);
                out
            }
            Key::Backspace if board.title(&cell).is_empty() => {
                if m.shift {
                    self.go(board, &cell, 0, -1)
                } else {
                    self.go_back_wrapping(board, &cell)
                }
            }
            Key::Escape => self.deselect(),
            _ => Outcome::default(),
        }
    }

    /// The title input's text changed. Replaces the title.
    pub fn title_input<S: KeyValueStore, H: HueSource>(
        &mut self,
        board: &mut Board<S, H>,
        text: &str,
    ) -> Outcome {
        match self.selection.current() {
            Some(cell) => {
                board.set_title(cell, text);
                Outcome::handled()
            }
            None => Outcome::default(),
        }
    }

    /// The host moved focus into the code editor (e.g. by clicking it).
    pub fn enter_code(&mut self) -> Outcome {
        if self.selection.current().is_none() {
            return Outcome::default();
        }
        self.mode = Mode::EditingCode;
        Outcome::handled()
    }

    /// Key pressed inside the code editor. Ctrl+arrow moves the selection
    /// and keeps the editor focused; Escape returns to the title.
    pub fn code_key<S: KeyValueStore, H: HueSource>(
        &mut self,
        board: &mut Board<S, H>,
        press: KeyPress,
    ) -> Outcome {
        if self.mode != Mode::EditingCode {
            return Outcome::default();
        }
        let Some(cell) = self.selection.current().cloned() else {
            return Outcome::default();
        };
        let m = press.modifiers;

        match press.key.direction() {
            Some((dx, dy)) if m.ctrl && !m.shift => {
                let mut out = self.go(board, &cell, dx, dy);
                out.focus = Some(Focus::CodeEditor);
                out
            }
            None if press.key == Key::Escape => {
                self.mode = Mode::EditingTitle;
                Outcome { focus: Some(Focus::Title), ..Outcome::handled() }
            }
            _ => Outcome::default(),
        }
    }

    /// The code editor's text changed.
    pub fn code_input<S: KeyValueStore, H: HueSource>(
        &mut self,
        board: &mut Board<S, H>,
        text: &str,
    ) -> Outcome {
        match self.selection.current() {
            Some(cell) => {
                let auto_color = board.write_code(cell, text);
                Outcome { auto_color, ..Outcome::handled() }
            }
            None => Outcome::default(),
        }
    }

    /// The color picker produced a new color.
    pub fn color_input<S: KeyValueStore, H: HueSource>(
        &mut self,
        board: &mut Board<S, H>,
        color: Hsva,
    ) -> Outcome {
        match self.selection.current() {
            Some(cell) => {
                board.set_color(cell, color);
                Outcome::handled()
            }
            None => Outcome::default(),
        }
    }

    // ------------------------------------------------------------------
    // Movement
    // ------------------------------------------------------------------

    fn go<S: KeyValueStore, H: HueSource>(
        &mut self,
        board: &Board<S, H>,
        cell: &CellId,
        dx: isize,
        dy: isize,
    ) -> Outcome {
        let next = board.step(cell, dx, dy);
        self.land(next)
    }

    /// One column right, or the first column of the next row.
    fn go_forward_wrapping<S: KeyValueStore, H: HueSource>(
        &mut self,
        board: &Board<S, H>,
        cell: &CellId,
    ) -> Outcome {
        let wrap = board.cols(cell).unwrap_or(1) as isize - 1;
        let next = board.step(cell, 1, 0).or_else(|| board.step(cell, -wrap, 1));
        self.land(next)
    }

    /// One column left, or the last column of the previous row.
    fn go_back_wrapping<S: KeyValueStore, H: HueSource>(
        &mut self,
        board: &Board<S, H>,
        cell: &CellId,
    ) -> Outcome {
        let wrap = board.cols(cell).unwrap_or(1) as isize - 1;
        let next = board.step(cell, -1, 0).or_else(|| board.step(cell, wrap, -1));
        self.land(next)
    }

    fn land(&mut self, next: Option<CellId>) -> Outcome {
        let Some(next) = next else {
            return Outcome::handled();
        };
        log::debug!("select {}", next);
        self.selection.select(Some(next));
        let focus = match self.mode {
            Mode::EditingCode => Focus::CodeEditor,
            _ => Focus::Title,
        };
        Outcome { moved: true, focus: Some(focus), ..Outcome::handled() }
    }
}
