// JSON export

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use squares_engine::{Board, HueSource, KeyValueStore, Square};

/// Every square with stored state, in identifier order.
pub fn stored_squares<S: KeyValueStore, H: HueSource>(board: &Board<S, H>) -> Vec<Square> {
    board.stored_ids().iter().map(|id| board.square(id)).collect()
}

/// Stored squares as a pretty-printed JSON array.
pub fn to_string<S: KeyValueStore, H: HueSource>(board: &Board<S, H>) -> Result<String, String> {
    serde_json::to_string_pretty(&stored_squares(board)).map_err(|e| e.to_string())
}

/// Write stored squares to `path` as a pretty-printed JSON array.
pub fn export<S: KeyValueStore, H: HueSource>(board: &Board<S, H>, path: &Path) -> Result<(), String> {
    let file = File::create(path).map_err(|e| e.to_string())?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, &stored_squares(board)).map_err(|e| e.to_string())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use squares_engine::{CellId, GridContext, GridId, GridSpec, HueCounter, MemoryStore};
    use tempfile::tempdir;

    fn board() -> Board<MemoryStore> {
        let mut ctx = GridContext::new();
        ctx.add(GridSpec::new(GridId::parse("a").unwrap(), 3, 3)).unwrap();
        Board::new(MemoryStore::new(), ctx, HueCounter::default())
    }

    fn at(row: usize, col: usize) -> CellId {
        CellId::new(GridId::parse("a").unwrap(), row, col)
    }

    #[test]
    fn test_json_export() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("squares.json");

        let mut board = board();
        board.set_title(&at(0, 1), "Name");
        board.set_title(&at(2, 0), "[Go]");
        board.write_code(&at(2, 0), "go()");

        export(&board, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let parsed: Vec<Square> = serde_json::from_str(&content).unwrap();

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].id, "a-0-1");
        assert_eq!(parsed[0].title, "Name");
        assert_eq!(parsed[1].id, "a-2-0");
        assert_eq!(parsed[1].code, "go()");
        assert_eq!(parsed[1].button_label(), Some("Go"));
        assert!(!parsed[1].color.is_default());
    }

    #[test]
    fn test_global_keys_are_not_squares() {
        let mut board = board();
        board.write_code(&at(1, 1), "x");
        // the write above also stored global-hue
        assert!(board.store().len() > 2);
        assert_eq!(stored_squares(&board).len(), 1);
    }

    #[test]
    fn test_empty_board_exports_empty_array() {
        let board = board();
        assert_eq!(to_string(&board).unwrap(), "[]");
    }
}
