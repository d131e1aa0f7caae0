//! A board: the grids, the store behind their squares, and the hue counter.
//!
//! Squares are never held in memory. Every read goes to the store and every
//! write goes straight through, so a `Square` snapshot is always rebuilt from
//! what was last written.

use std::collections::BTreeSet;

use crate::cell_id::{CellId, GridId};
use crate::color::{Hsva, DEFAULT_SQUARE_COLOR};
use crate::grid::{GridContext, GridSpec, Paging};
use crate::hue::{AutoColor, HueCounter, HueSource, GLOBAL_HUE_KEY};
use crate::square::{self, AttrValue, CellAttr, Square};
use crate::store::KeyValueStore;

pub struct Board<S, H = HueCounter> {
    store: S,
    grids: GridContext,
    hue: H,
    auto_color: AutoColor,
}

impl<S: KeyValueStore> Board<S, HueCounter> {
    /// Board whose hue counter resumes from the value persisted in `store`.
    pub fn with_stored_hue(store: S, grids: GridContext, step: f64) -> Self {
        let start = square::read_json::<f64>(&store, GLOBAL_HUE_KEY).unwrap_or(0.0);
        Self::new(store, grids, HueCounter::new(start, step))
    }
}

impl<S: KeyValueStore, H: HueSource> Board<S, H> {
    pub fn new(store: S, grids: GridContext, hue: H) -> Self {
        Self { store, grids, hue, auto_color: AutoColor::default() }
    }

    pub fn with_auto_color(mut self, auto_color: AutoColor) -> Self {
        self.auto_color = auto_color;
        self
    }

    pub fn grids(&self) -> &GridContext {
        &self.grids
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn hue(&self) -> &H {
        &self.hue
    }

    // ------------------------------------------------------------------
    // Addressing
    // ------------------------------------------------------------------

    /// Current page label of `grid`. Empty for unpaged grids.
    pub fn page(&self, grid: &GridId) -> String {
        match self.grids.grid(grid).map(|g| &g.paging) {
            Some(Paging::Stored) => {
                let key = self.grids.grid(grid).map(GridSpec::page_key).unwrap_or_default();
                square::read_json(&self.store, &key).unwrap_or_default()
            }
            Some(Paging::TitleOf(cell)) => self.title(cell),
            Some(Paging::None) | None => String::new(),
        }
    }

    /// Switch a stored-paged grid to `label`. Square data is untouched; only
    /// the identifiers addressed from now on change.
    pub fn set_page(&mut self, grid: &GridId, label: &str) -> bool {
        let Some(spec) = self.grids.grid(grid) else {
            return false;
        };
        if spec.paging != Paging::Stored {
            return false;
        }
        let key = spec.page_key();
        log::debug!("grid {} -> page {:?}", grid, label);
        square::write_json(&mut self.store, &key, &label);
        true
    }

    /// Identifier of `(row, col)` in `grid` on its current page.
    pub fn id_of(&self, grid: &GridId, row: usize, col: usize) -> Option<CellId> {
        self.grids.id_of(grid, &self.page(grid), row, col)
    }

    /// Strict neighbor, falling back to crossing into a vertically linked
    /// grid (on that grid's current page).
    pub fn step(&self, cell: &CellId, dx: isize, dy: isize) -> Option<CellId> {
        if let Some(next) = self.grids.neighbor(cell, dx, dy) {
            return Some(next);
        }
        let (grid, row, col) = self.grids.crossing(cell, dx, dy)?;
        self.grids.id_of(&grid.id, &self.page(&grid.id), row, col)
    }

    /// Column count of the grid `cell` belongs to.
    pub fn cols(&self, cell: &CellId) -> Option<usize> {
        self.grids.grid(&cell.grid).map(|g| g.cols)
    }

    /// If `cell` is on a pager grid, flip the target grid to the page that
    /// cell stands for and return the new label. Cell (0, 0) is the first
    /// page, whose label is empty.
    pub fn activate_pager(&mut self, cell: &CellId) -> Option<String> {
        let spec = self.grids.grid(&cell.grid)?;
        let target = spec.pager_for.clone()?;
        let index = cell.row * spec.cols + cell.col;
        let label = if index == 0 { String::new() } else { index.to_string() };
        self.set_page(&target, &label).then_some(label)
    }

    // ------------------------------------------------------------------
    // Persistent square state
    // ------------------------------------------------------------------

    pub fn get(&self, id: &CellId, attr: CellAttr) -> AttrValue {
        square::load_attr(&self.store, id, attr)
    }

    pub fn set(&mut self, id: &CellId, value: AttrValue) {
        square::store_attr(&mut self.store, id, &value);
    }

    pub fn color(&self, id: &CellId) -> Hsva {
        match self.get(id, CellAttr::Color) {
            AttrValue::Color(c) => c,
            _ => DEFAULT_SQUARE_COLOR,
        }
    }

    pub fn title(&self, id: &CellId) -> String {
        match self.get(id, CellAttr::Title) {
            AttrValue::Title(s) => s,
            _ => String::new(),
        }
    }

    pub fn code(&self, id: &CellId) -> String {
        match self.get(id, CellAttr::Code) {
            AttrValue::Code(s) => s,
            _ => String::new(),
        }
    }

    pub fn set_color(&mut self, id: &CellId, color: Hsva) {
        self.set(id, AttrValue::Color(color));
    }

    pub fn set_title(&mut self, id: &CellId, title: &str) {
        self.set(id, AttrValue::Title(title.to_string()));
    }

    /// Write a square's code. Non-empty code on a square that still has the
    /// placeholder color also tags it with the next hue; the assigned color
    /// is returned.
    pub fn write_code(&mut self, id: &CellId, code: &str) -> Option<Hsva> {
        self.set(id, AttrValue::Code(code.to_string()));

        if code.is_empty() || !self.color(id).is_default() {
            return None;
        }
        let color = self.auto_color.with_hue(self.hue.next());
        self.set_color(id, color);
        square::write_json(&mut self.store, GLOBAL_HUE_KEY, &self.hue.peek());
        log::debug!("auto-colored {} with hue {}", id, color.h);
        Some(color)
    }

    /// Reset title, code and color to their defaults.
    pub fn clear(&mut self, id: &CellId) {
        for attr in CellAttr::ALL {
            self.set(id, attr.default_value());
        }
    }

    pub fn square(&self, id: &CellId) -> Square {
        Square::load(&self.store, id)
    }

    /// Every square with at least one stored attribute, in key order.
    pub fn stored_ids(&self) -> Vec<CellId> {
        let ids: BTreeSet<CellId> = self
            .store
            .keys()
            .iter()
            .filter_map(|k| CellAttr::parse_key(k))
            .map(|(id, _)| id)
            .collect();
        ids.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn gid(name: &str) -> GridId {
        GridId::parse(name).unwrap()
    }

    fn board() -> Board<MemoryStore> {
        let mut grids = GridContext::new();
        grids.add(GridSpec::new(gid("a"), 3, 3).paged(Paging::Stored)).unwrap();
        grids.add(GridSpec::pager(gid("p"), 1, 4, gid("a"))).unwrap();
        grids.add(GridSpec::new(gid("b"), 2, 3)).unwrap();
        grids.add(GridSpec::new(gid("c"), 3, 3)).unwrap();
        grids.link(&gid("b"), &gid("c")).unwrap();
        Board::new(MemoryStore::new(), grids, HueCounter::new(10.0, 47.0))
    }

    #[test]
    fn test_defaults_then_write() {
        let mut board = board();
        let id = board.id_of(&gid("a"), 1, 1).unwrap();
        assert!(board.square(&id).is_blank());

        board.set_title(&id, "mid");
        board.set_color(&id, Hsva::new(200.0, 50.0, 50.0, 1.0));
        assert_eq!(board.title(&id), "mid");
        assert_eq!(board.color(&id).h, 200.0);
        assert_eq!(board.code(&id), "");

        // survives a reload of the same store
        let store = board.into_store();
        let reloaded = Board::with_stored_hue(store, board_grids(), 47.0);
        assert_eq!(reloaded.title(&id), "mid");
    }

    fn board_grids() -> GridContext {
        let mut grids = GridContext::new();
        grids.add(GridSpec::new(gid("a"), 3, 3).paged(Paging::Stored)).unwrap();
        grids
    }

    #[test]
    fn test_auto_hue() {
        let mut board = board();
        let id = board.id_of(&gid("a"), 0, 0).unwrap();

        let assigned = board.write_code(&id, "x=1").unwrap();
        assert_eq!(assigned, Hsva::new(10.0, 40.0, 93.0, 1.0));
        assert_eq!(board.color(&id), assigned);
        assert_eq!(board.hue().peek(), 57.0);
        assert_eq!(board.store().get(GLOBAL_HUE_KEY).as_deref(), Some("57.0"));

        // already colored: no new hue
        assert!(board.write_code(&id, "x=2").is_none());
        assert_eq!(board.color(&id), assigned);
        assert_eq!(board.hue().peek(), 57.0);
    }

    #[test]
    fn test_empty_code_does_not_color() {
        let mut board = board();
        let id = board.id_of(&gid("a"), 0, 0).unwrap();
        assert!(board.write_code(&id, "").is_none());
        assert!(board.color(&id).is_default());
        assert_eq!(board.hue().peek(), 10.0);
    }

    #[test]
    fn test_hue_resumes_from_store() {
        let mut board = board();
        let id = board.id_of(&gid("a"), 0, 0).unwrap();
        board.write_code(&id, "1");

        let resumed = Board::with_stored_hue(board.into_store(), board_grids(), 47.0);
        assert_eq!(resumed.hue().peek(), 57.0);
    }

    #[test]
    fn test_clear() {
        let mut board = board();
        let id = board.id_of(&gid("a"), 2, 2).unwrap();
        board.set_title(&id, "hello");
        board.write_code(&id, "x=1");

        board.clear(&id);
        assert!(board.square(&id).is_blank());
    }

    #[test]
    fn test_paging_switches_ids_not_data() {
        let mut board = board();
        let first = board.id_of(&gid("a"), 0, 0).unwrap();
        board.set_title(&first, "page zero");

        let pager = board.id_of(&gid("p"), 0, 2).unwrap();
        assert_eq!(board.activate_pager(&pager).as_deref(), Some("2"));

        let second = board.id_of(&gid("a"), 0, 0).unwrap();
        assert_eq!(second.to_string(), "a@2-0-0");
        assert_eq!(board.title(&second), "");
        board.set_title(&second, "page two");

        let back = board.id_of(&gid("p"), 0, 0).unwrap();
        assert_eq!(board.activate_pager(&back).as_deref(), Some(""));
        assert_eq!(board.id_of(&gid("a"), 0, 0).unwrap(), first);
        assert_eq!(board.title(&first), "page zero");
        assert_eq!(board.title(&second), "page two");
    }

    #[test]
    fn test_activate_non_pager() {
        let mut board = board();
        let id = board.id_of(&gid("b"), 0, 0).unwrap();
        assert!(board.activate_pager(&id).is_none());
        assert!(!board.set_page(&gid("b"), "3"));
    }

    #[test]
    fn test_title_paging() {
        let mut grids = GridContext::new();
        grids.add(GridSpec::new(gid("ctl"), 1, 1)).unwrap();
        let selector = grids.id_of(&gid("ctl"), "", 0, 0).unwrap();
        grids.add(GridSpec::new(gid("a"), 2, 2).paged(Paging::TitleOf(selector.clone()))).unwrap();
        let mut board = Board::new(MemoryStore::new(), grids, HueCounter::default());

        assert_eq!(board.id_of(&gid("a"), 0, 0).unwrap().to_string(), "a-0-0");
        board.set_title(&selector, "notes");
        assert_eq!(board.id_of(&gid("a"), 0, 0).unwrap().to_string(), "a@notes-0-0");
    }

    #[test]
    fn test_step_crosses_links() {
        let board = board();
        let b_end = board.id_of(&gid("b"), 1, 2).unwrap();
        assert_eq!(board.step(&b_end, 0, 1).unwrap().to_string(), "c-0-2");
        assert_eq!(board.step(&b_end, -2, 1).unwrap().to_string(), "c-0-0");
        assert!(board.step(&b_end, 1, 0).is_none());

        let a_corner = board.id_of(&gid("a"), 0, 0).unwrap();
        assert!(board.step(&a_corner, 0, -1).is_none());
    }

    #[test]
    fn test_stored_ids() {
        let mut board = board();
        let a = board.id_of(&gid("a"), 0, 1).unwrap();
        let b = board.id_of(&gid("b"), 1, 0).unwrap();
        board.set_title(&b, "x");
        board.write_code(&a, "y");
        board.set_page(&gid("a"), "4");

        assert_eq!(board.stored_ids(), vec![a, b]);
    }
}
