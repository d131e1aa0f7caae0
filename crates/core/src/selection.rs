use squares_engine::CellId;

/// The one selected square shared by every grid of a board.
///
/// Starts unset. Selecting a square in any grid replaces the selection in
/// all of them; there is never more than one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionModel {
    current: Option<CellId>,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the selection; `None` deselects.
    pub fn select(&mut self, cell: Option<CellId>) {
        self.current = cell;
    }

    pub fn current(&self) -> Option<&CellId> {
        self.current.as_ref()
    }

    pub fn is_selected(&self, cell: &CellId) -> bool {
        self.current.as_ref() == Some(cell)
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
