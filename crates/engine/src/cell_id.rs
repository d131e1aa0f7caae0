//! Square identity.
//!
//! A `CellId` uniquely identifies a square across every grid of a board,
//! including the page a paged grid was on when the id was computed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Name of a grid ("a", "b", ...). Validated by `GridId::parse`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GridId(String);

impl GridId {
    /// Accepts non-empty ASCII alphanumeric/underscore names. The separators
    /// used by the string form of `CellId` (`-`, `@`) are rejected so that
    /// form stays injective.
    pub fn parse(name: &str) -> Option<Self> {
        let valid = !name.is_empty()
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        valid.then(|| Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GridId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for GridId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        GridId::parse(&value).ok_or_else(|| format!("invalid grid id: {:?}", value))
    }
}

impl From<GridId> for String {
    fn from(id: GridId) -> Self {
        id.0
    }
}

/// Unique identifier for a square.
///
/// `page` is the page label of a paged grid; empty for unpaged grids and for
/// the first page.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId {
    pub grid: GridId,
    pub page: String,
    pub row: usize,
    pub col: usize,
}

impl CellId {
    #[inline]
    pub fn new(grid: GridId, row: usize, col: usize) -> Self {
        Self { grid, page: String::new(), row, col }
    }

    #[inline]
    pub fn on_page(grid: GridId, page: impl Into<String>, row: usize, col: usize) -> Self {
        Self { grid, page: page.into(), row, col }
    }

    /// Same grid and page, different coordinates.
    pub fn at(&self, row: usize, col: usize) -> Self {
        Self { grid: self.grid.clone(), page: self.page.clone(), row, col }
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.page.is_empty() {
            write!(f, "{}-{}-{}", self.grid, self.row, self.col)
        } else {
            write!(f, "{}@{}-{}-{}", self.grid, self.page, self.row, self.col)
        }
    }
}

impl FromStr for CellId {
    type Err = String;

    /// Inverse of `Display`. Row and column are the last two `-` separated
    /// components; everything before is `grid` or `grid@page`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || format!("invalid cell id: {:?}", s);

        let mut parts = s.rsplitn(3, '-');
        let col = parts.next().and_then(|p| p.parse().ok()).ok_or_else(bad)?;
        let row = parts.next().and_then(|p| p.parse().ok()).ok_or_else(bad)?;
        let head = parts.next().ok_or_else(bad)?;

        let (grid, page) = match head.split_once('@') {
            Some((grid, page)) if !page.is_empty() => (grid, page),
            Some(_) => return Err(bad()),
            None => (head, ""),
        };
        let grid = GridId::parse(grid).ok_or_else(bad)?;

        Ok(CellId::on_page(grid, page, row, col))
    }
}
