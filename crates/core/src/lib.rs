pub mod keys;
pub mod navigation;
pub mod selection;

pub use keys::{Caret, Key, KeyPress, Modifiers};
pub use navigation::{Focus, Mode, Navigator, Outcome};
pub use selection::SelectionModel;
