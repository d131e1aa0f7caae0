// Integration tests for `squares dump` and the binary's exit codes.
// Run with: cargo test -p squares-cli --test dump_tests -- --nocapture
//
// Manual smoke test (cannot be automated, requires a real TTY):
//   squares --db /tmp/board.db
//   Verify: arrows select a-0-0, typing sets the title, Tab moves,
//   Ctrl+Enter opens the code pane, Ctrl+Q exits and restores the terminal.

use std::path::{Path, PathBuf};
use std::process::Command;

use squares_engine::{Board, CellId, GridId, HueCounter, KeyValueStore};
use squares_io::SqliteStore;
use tempfile::TempDir;

fn squares(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_squares"));
    cmd.args([
        "--db",
        dir.join("squares.db").to_str().unwrap(),
        "--settings",
        dir.join("settings.json").to_str().unwrap(),
    ]);
    cmd.env_remove("SQUARES_DB");
    cmd
}

fn db(dir: &TempDir) -> PathBuf {
    dir.path().join("squares.db")
}

fn seed(path: &Path) {
    let mut store = SqliteStore::open(path).unwrap();
    let a = GridId::parse("a").unwrap();
    let grids = {
        let mut ctx = squares_engine::GridContext::new();
        ctx.add(squares_engine::GridSpec::new(a.clone(), 30, 22)).unwrap();
        ctx
    };
    let mut board = Board::new(&mut store, grids, HueCounter::default());
    board.set_title(&CellId::new(a.clone(), 0, 0), "Start");
    board.write_code(&CellId::new(a.clone(), 4, 7), "run()");
    board.set_title(&CellId::new(a, 4, 7), "[Run]");
    assert!(store.has("global-hue"));
}

// ---------------------------------------------------------------------------
// dump
// ---------------------------------------------------------------------------

#[test]
fn dump_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let output = squares(dir.path()).arg("dump").output().expect("squares dump");

    assert!(output.status.success(), "exit code: {:?}\nstderr: {}",
        output.status, String::from_utf8_lossy(&output.stderr));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "[]");
    // first run writes the commented default settings
    assert!(dir.path().join("settings.json").exists());
}

#[test]
fn dump_lists_stored_squares() {
    let dir = tempfile::tempdir().unwrap();
    seed(&db(&dir));

    let output = squares(dir.path()).arg("dump").output().expect("squares dump");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let squares = parsed.as_array().unwrap();
    assert_eq!(squares.len(), 2);
    assert_eq!(squares[0]["id"], "a-0-0");
    assert_eq!(squares[0]["title"], "Start");
    assert_eq!(squares[1]["id"], "a-4-7");
    assert_eq!(squares[1]["code"], "run()");
    assert_eq!(squares[1]["color"]["s"], 40.0);
}

#[test]
fn dump_to_file() {
    let dir = tempfile::tempdir().unwrap();
    seed(&db(&dir));
    let out_path = dir.path().join("out.json");

    let output = squares(dir.path())
        .args(["dump", "-o", out_path.to_str().unwrap()])
        .output()
        .expect("squares dump -o");
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let content = std::fs::read_to_string(&out_path).unwrap();
    assert!(content.contains("\"[Run]\""));
}

// ---------------------------------------------------------------------------
// exit codes
// ---------------------------------------------------------------------------

#[test]
fn bad_layout_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("settings.json"), r#"{ "grid.rows": 0 }"#).unwrap();

    let output = squares(dir.path()).arg("dump").output().expect("squares dump");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error:"), "stderr: {}", stderr);
    assert!(stderr.contains("hint:"), "stderr: {}", stderr);
}

#[test]
fn oversized_grid_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("settings.json"), r#"{ "grid.cols": 65536 }"#).unwrap();

    let output = squares(dir.path()).arg("dump").output().expect("squares dump");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("grid.cols"), "stderr: {}", stderr);
}

#[test]
fn unknown_subcommand_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = squares(dir.path()).arg("frobnicate").output().expect("squares");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn editor_without_terminal_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    // stdout is a pipe under Command::output
    let output = squares(dir.path()).output().expect("squares");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn unopenable_store_is_error() {
    let dir = tempfile::tempdir().unwrap();
    // a directory where the database file should be
    std::fs::create_dir(db(&dir)).unwrap();

    let output = squares(dir.path()).arg("dump").output().expect("squares dump");
    assert_eq!(output.status.code(), Some(1));
}
