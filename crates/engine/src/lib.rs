//! Square grid model: identity, addressing, and persistent per-square state.

pub mod board;
pub mod cell_id;
pub mod color;
pub mod grid;
pub mod hue;
pub mod square;
pub mod store;
pub mod title;

pub use board::Board;
pub use cell_id::{CellId, GridId};
pub use color::{Hsva, DEFAULT_SQUARE_COLOR};
pub use grid::{GridContext, GridError, GridSpec, Paging};
pub use hue::{AutoColor, HueCounter, HueSource};
pub use square::{AttrValue, CellAttr, Square};
pub use store::{KeyValueStore, MemoryStore};
