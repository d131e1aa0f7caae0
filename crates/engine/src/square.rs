//! Persistent square state.
//!
//! Each attribute of a square is stored under its own key,
//! `square-{id}-{attr}`, as JSON. Reading an attribute that was never
//! written yields its default without touching the store; the first write
//! commits.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::cell_id::CellId;
use crate::color::{Hsva, DEFAULT_SQUARE_COLOR};
use crate::store::KeyValueStore;
use crate::title;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellAttr {
    Color,
    Title,
    Code,
}

impl CellAttr {
    pub const ALL: [CellAttr; 3] = [CellAttr::Color, CellAttr::Title, CellAttr::Code];

    pub fn name(self) -> &'static str {
        match self {
            CellAttr::Color => "color",
            CellAttr::Title => "title",
            CellAttr::Code => "code",
        }
    }

    /// Storage key of this attribute for `id`.
    pub fn key(self, id: &CellId) -> String {
        format!("square-{}-{}", id, self.name())
    }

    /// Inverse of `key`. None for keys that don't belong to a square.
    pub fn parse_key(key: &str) -> Option<(CellId, CellAttr)> {
        let rest = key.strip_prefix("square-")?;
        let (id, attr) = rest.rsplit_once('-')?;
        let attr = CellAttr::ALL.into_iter().find(|a| a.name() == attr)?;
        Some((id.parse().ok()?, attr))
    }

    pub fn default_value(self) -> AttrValue {
        match self {
            CellAttr::Color => AttrValue::Color(DEFAULT_SQUARE_COLOR),
            CellAttr::Title => AttrValue::Title(String::new()),
            CellAttr::Code => AttrValue::Code(String::new()),
        }
    }
}

/// A value of one square attribute.
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    Color(Hsva),
    Title(String),
    Code(String),
}

impl AttrValue {
    pub fn attr(&self) -> CellAttr {
        match self {
            AttrValue::Color(_) => CellAttr::Color,
            AttrValue::Title(_) => CellAttr::Title,
            AttrValue::Code(_) => CellAttr::Code,
        }
    }
}

/// Decode the JSON stored under `key`. Absent, empty and malformed values
/// all come back as None.
pub fn read_json<T: DeserializeOwned>(store: &(impl KeyValueStore + ?Sized), key: &str) -> Option<T> {
    let raw = store.get(key)?;
    if raw.is_empty() {
        return None;
    }
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::debug!("ignoring malformed value under {}: {}", key, e);
            None
        }
    }
}

pub fn write_json<T: Serialize>(store: &mut (impl KeyValueStore + ?Sized), key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => store.set(key, json),
        Err(e) => log::warn!("dropping write to {}: {}", key, e),
    }
}

/// Current value of `attr` for `id`, or the attribute's default.
pub fn load_attr(store: &(impl KeyValueStore + ?Sized), id: &CellId, attr: CellAttr) -> AttrValue {
    let key = attr.key(id);
    let stored = match attr {
        CellAttr::Color => read_json(store, &key).map(AttrValue::Color),
        CellAttr::Title => read_json(store, &key).map(AttrValue::Title),
        CellAttr::Code => read_json(store, &key).map(AttrValue::Code),
    };
    stored.unwrap_or_else(|| attr.default_value())
}

pub fn store_attr(store: &mut (impl KeyValueStore + ?Sized), id: &CellId, value: &AttrValue) {
    let key = value.attr().key(id);
    match value {
        AttrValue::Color(c) => write_json(store, &key, c),
        AttrValue::Title(s) | AttrValue::Code(s) => write_json(store, &key, s),
    }
}

/// Snapshot of a square, rebuilt from the store whenever it's needed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Square {
    pub id: String,
    pub row: usize,
    pub col: usize,
    pub color: Hsva,
    pub title: String,
    pub code: String,
}

impl Square {
    pub fn load(store: &(impl KeyValueStore + ?Sized), id: &CellId) -> Self {
        let color = match load_attr(store, id, CellAttr::Color) {
            AttrValue::Color(c) => c,
            _ => DEFAULT_SQUARE_COLOR,
        };
        let title = match load_attr(store, id, CellAttr::Title) {
            AttrValue::Title(s) => s,
            _ => String::new(),
        };
        let code = match load_attr(store, id, CellAttr::Code) {
            AttrValue::Code(s) => s,
            _ => String::new(),
        };
        Self { id: id.to_string(), row: id.row, col: id.col, color, title, code }
    }

    /// True when every attribute still reads as its default.
    pub fn is_blank(&self) -> bool {
        self.color.is_default() && self.title.is_empty() && self.code.is_empty()
    }

    pub fn button_label(&self) -> Option<&str> {
        title::button_label(&self.title)
    }

    pub fn is_short(&self) -> bool {
        title::is_short(&self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell_id::GridId;
    use crate::store::MemoryStore;

    fn id(row: usize, col: usize) -> CellId {
        CellId::new(GridId::parse("a").unwrap(), row, col)
    }

    #[test]
    fn test_keys() {
        assert_eq!(CellAttr::Color.key(&id(1, 2)), "square-a-1-2-color");
        assert_eq!(CellAttr::Title.key(&id(0, 0)), "square-a-0-0-title");

        let (parsed, attr) = CellAttr::parse_key("square-a-1-2-code").unwrap();
        assert_eq!(parsed, id(1, 2));
        assert_eq!(attr, CellAttr::Code);

        assert!(CellAttr::parse_key("global-hue").is_none());
        assert!(CellAttr::parse_key("square-a-1-2-size").is_none());
    }

    #[test]
    fn test_read_is_free() {
        let store = MemoryStore::new();
        assert_eq!(load_attr(&store, &id(0, 0), CellAttr::Title), AttrValue::Title(String::new()));
        assert_eq!(load_attr(&store, &id(0, 0), CellAttr::Color), AttrValue::Color(DEFAULT_SQUARE_COLOR));
        assert!(store.is_empty());
    }

    #[test]
    fn test_write_commits() {
        let mut store = MemoryStore::new();
        store_attr(&mut store, &id(0, 0), &AttrValue::Title("hello".into()));

        assert_eq!(store.get("square-a-0-0-title").as_deref(), Some("\"hello\""));
        assert_eq!(load_attr(&store, &id(0, 0), CellAttr::Title), AttrValue::Title("hello".into()));
        // untouched attributes are still not stored
        assert!(!store.has("square-a-0-0-code"));
    }

    #[test]
    fn test_malformed_reads_as_default() {
        let mut store = MemoryStore::new();
        store.set("square-a-0-0-color", "{not json".to_string());
        store.set("square-a-0-0-title", "42".to_string());
        store.set("square-a-0-0-code", String::new());

        let sq = Square::load(&store, &id(0, 0));
        assert!(sq.color.is_default());
        assert_eq!(sq.title, "");
        assert_eq!(sq.code, "");
        assert!(sq.is_blank());
    }

    #[test]
    fn test_square_flags() {
        let mut store = MemoryStore::new();
        store_attr(&mut store, &id(0, 0), &AttrValue::Title("[Go]".into()));
        let sq = Square::load(&store, &id(0, 0));
        assert_eq!(sq.button_label(), Some("Go"));
        assert!(!sq.is_short());
        assert!(!sq.is_blank());
    }
}
