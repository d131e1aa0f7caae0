// Durable square store using SQLite

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use squares_engine::KeyValueStore;

use crate::NATIVE_FORMAT_VERSION;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

/// `KeyValueStore` backed by a single SQLite table.
///
/// Every `set` is its own statement, so a write is on disk before the call
/// returns. Errors are logged and the write is dropped.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the store at `path`. Missing parent directories are
    /// created.
    pub fn open(path: &Path) -> Result<Self, String> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
            }
        }
        let conn = Connection::open(path).map_err(|e| e.to_string())?;
        Self::init(conn)
    }

    pub fn in_memory() -> Result<Self, String> {
        let conn = Connection::open_in_memory().map_err(|e| e.to_string())?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, String> {
        conn.execute_batch(SCHEMA).map_err(|e| e.to_string())?;

        let version: Option<String> = conn
            .query_row("SELECT value FROM meta WHERE key = 'format_version'", [], |row| row.get(0))
            .optional()
            .map_err(|e| e.to_string())?;

        match version.and_then(|v| v.parse::<u32>().ok()) {
            None => {
                conn.execute(
                    "INSERT OR REPLACE INTO meta (key, value) VALUES ('format_version', ?1)",
                    params![NATIVE_FORMAT_VERSION.to_string()],
                )
                .map_err(|e| e.to_string())?;
            }
            Some(v) if v > NATIVE_FORMAT_VERSION => {
                return Err(format!(
                    "store format version {} is newer than supported version {}",
                    v, NATIVE_FORMAT_VERSION
                ));
            }
            Some(_) => {}
        }

        Ok(Self { conn })
    }

    /// Format version recorded in the store.
    pub fn format_version(&self) -> Option<u32> {
        self.conn
            .query_row("SELECT value FROM meta WHERE key = 'format_version'", [], |row| {
                row.get::<_, String>(0)
            })
            .optional()
            .ok()
            .flatten()
            .and_then(|v| v.parse().ok())
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Option<String> {
        let result = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| row.get(0))
            .optional();
        match result {
            Ok(value) => value,
            Err(e) => {
                log::warn!("store read of {} failed: {}", key, e);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: String) {
        if let Err(e) = self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        ) {
            log::warn!("store write of {} dropped: {}", key, e);
        }
    }

    fn keys(&self) -> Vec<String> {
        let mut stmt = match self.conn.prepare("SELECT key FROM kv ORDER BY key") {
            Ok(stmt) => stmt,
            Err(e) => {
                log::warn!("store key listing failed: {}", e);
                return Vec::new();
            }
        };
        let rows = stmt.query_map([], |row| row.get::<_, String>(0));
        match rows {
            Ok(rows) => rows.filter_map(Result::ok).collect(),
            Err(e) => {
                log::warn!("store key listing failed: {}", e);
                Vec::new()
            }
        }
    }
}
