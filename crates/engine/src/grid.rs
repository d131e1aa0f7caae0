//! Grid addressing.
//!
//! A `GridContext` holds the shapes of every grid on a board and answers
//! addressing questions about them: which `CellId` sits at a coordinate, and
//! which cell is offset from another. Nothing here materializes cells or
//! adjacency; everything is computed on demand.

use std::collections::HashMap;
use std::fmt;

use crate::cell_id::{CellId, GridId};

/// Where a paged grid reads its current page label from.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Paging {
    #[default]
    None,
    /// Label stored under `grid-{id}-page`, written by a pager grid.
    Stored,
    /// Label is the title of another square.
    TitleOf(CellId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridSpec {
    pub id: GridId,
    pub rows: usize,
    pub cols: usize,
    pub paging: Paging,
    /// Set on pager grids: the grid whose page a click selects.
    pub pager_for: Option<GridId>,
}

impl GridSpec {
    pub fn new(id: GridId, rows: usize, cols: usize) -> Self {
        Self { id, rows, cols, paging: Paging::None, pager_for: None }
    }

    pub fn paged(mut self, paging: Paging) -> Self {
        self.paging = paging;
        self
    }

    /// A control grid whose cells select pages of `target`.
    pub fn pager(id: GridId, rows: usize, cols: usize, target: GridId) -> Self {
        Self { pager_for: Some(target), ..Self::new(id, rows, cols) }
    }

    pub fn contains(&self, row: isize, col: isize) -> bool {
        (0..self.rows as isize).contains(&row) && (0..self.cols as isize).contains(&col)
    }

    pub fn is_paged(&self) -> bool {
        self.paging != Paging::None
    }

    /// Store key holding the page label of a `Paging::Stored` grid.
    pub fn page_key(&self) -> String {
        format!("grid-{}-page", self.id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// Grid name rejected by `GridId::parse`.
    InvalidId(String),
    Duplicate(GridId),
    /// Zero rows or zero columns.
    Empty(GridId),
    Unknown(GridId),
    /// Linked grids must have the same width.
    LinkWidth { upper: GridId, lower: GridId },
    /// The grid already has a link on that edge.
    AlreadyLinked(GridId),
    /// A pager must target an existing grid with stored paging.
    PagerTarget { pager: GridId, target: GridId },
    /// A grid can't take its page label from one of its own squares.
    SelfPaging(GridId),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId(name) => write!(f, "invalid grid id: {name:?}"),
            Self::Duplicate(id) => write!(f, "grid '{id}' is already registered"),
            Self::Empty(id) => write!(f, "grid '{id}' has no cells"),
            Self::Unknown(id) => write!(f, "unknown grid: '{id}'"),
            Self::LinkWidth { upper, lower } => {
                write!(f, "cannot link '{upper}' above '{lower}': column counts differ")
            }
            Self::AlreadyLinked(id) => write!(f, "grid '{id}' is already linked on that edge"),
            Self::PagerTarget { pager, target } => {
                write!(f, "pager '{pager}' targets '{target}', which is missing or not stored-paged")
            }
            Self::SelfPaging(id) => write!(f, "grid '{id}' cannot read its page from its own squares"),
        }
    }
}

impl std::error::Error for GridError {}

/// The grids of one board. Owned by the board, passed explicitly to
/// addressing and navigation; nothing global.
#[derive(Debug, Clone, Default)]
pub struct GridContext {
    grids: Vec<GridSpec>,
    below: HashMap<GridId, GridId>,
    above: HashMap<GridId, GridId>,
}

impl GridContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, spec: GridSpec) -> Result<(), GridError> {
        if self.grid(&spec.id).is_some() {
            return Err(GridError::Duplicate(spec.id));
        }
        if spec.rows == 0 || spec.cols == 0 {
            return Err(GridError::Empty(spec.id));
        }
        if let Paging::TitleOf(cell) = &spec.paging {
            if cell.grid == spec.id {
                return Err(GridError::SelfPaging(spec.id));
            }
        }
        if let Some(target) = &spec.pager_for {
            let ok = self.grid(target).is_some_and(|t| t.paging == Paging::Stored);
            if !ok {
                return Err(GridError::PagerTarget { pager: spec.id.clone(), target: target.clone() });
            }
        }
        self.grids.push(spec);
        Ok(())
    }

    /// Declare that `lower` sits directly under `upper`, so vertical moves
    /// can cross from one into the other.
    pub fn link(&mut self, upper: &GridId, lower: &GridId) -> Result<(), GridError> {
        let up = self.grid(upper).ok_or_else(|| GridError::Unknown(upper.clone()))?;
        let low = self.grid(lower).ok_or_else(|| GridError::Unknown(lower.clone()))?;
        if up.cols != low.cols {
            return Err(GridError::LinkWidth { upper: upper.clone(), lower: lower.clone() });
        }
        if self.below.contains_key(upper) {
            return Err(GridError::AlreadyLinked(upper.clone()));
        }
        if self.above.contains_key(lower) {
            return Err(GridError::AlreadyLinked(lower.clone()));
        }
        self.below.insert(upper.clone(), lower.clone());
        self.above.insert(lower.clone(), upper.clone());
        Ok(())
    }

    pub fn grid(&self, id: &GridId) -> Option<&GridSpec> {
        self.grids.iter().find(|g| &g.id == id)
    }

    /// Grids in registration order.
    pub fn grids(&self) -> impl Iterator<Item = &GridSpec> {
        self.grids.iter()
    }

    pub fn below(&self, id: &GridId) -> Option<&GridSpec> {
        self.below.get(id).and_then(|g| self.grid(g))
    }

    pub fn above(&self, id: &GridId) -> Option<&GridSpec> {
        self.above.get(id).and_then(|g| self.grid(g))
    }

    /// Identifier of the square at `(row, col)` of `grid` on `page`.
    ///
    /// The page label only participates for paged grids. None when the grid
    /// is unknown or the coordinate is out of bounds.
    pub fn id_of(&self, grid: &GridId, page: &str, row: usize, col: usize) -> Option<CellId> {
        let spec = self.grid(grid)?;
        if row >= spec.rows || col >= spec.cols {
            return None;
        }
        let page = if spec.is_paged() { page } else { "" };
        Some(CellId::on_page(grid.clone(), page, row, col))
    }

    /// The cell `dx` columns and `dy` rows away from `cell`, on the same grid
    /// and page. None if that falls outside the grid; never wraps.
    pub fn neighbor(&self, cell: &CellId, dx: isize, dy: isize) -> Option<CellId> {
        let spec = self.grid(&cell.grid)?;
        let row = (cell.row as isize).checked_add(dy)?;
        let col = (cell.col as isize).checked_add(dx)?;
        spec.contains(row, col).then(|| cell.at(row as usize, col as usize))
    }

    /// Where a vertical move that leaves `cell`'s grid lands in a linked grid,
    /// as `(grid, row, col)`. The caller supplies the page.
    pub fn crossing(&self, cell: &CellId, dx: isize, dy: isize) -> Option<(&GridSpec, usize, usize)> {
        let spec = self.grid(&cell.grid)?;
        let col = (cell.col as isize).checked_add(dx)?;
        if !(0..spec.cols as isize).contains(&col) {
            return None;
        }
        let row = (cell.row as isize).checked_add(dy)?;

        let (next, row) = if row >= spec.rows as isize {
            let lower = self.below(&spec.id)?;
            (lower, row - spec.rows as isize)
        } else if row < 0 {
            let upper = self.above(&spec.id)?;
            (upper, upper.rows as isize + row)
        } else {
            return None;
        };

        next.contains(row, col).then_some((next, row as usize, col as usize))
    }
}
