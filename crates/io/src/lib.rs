// Square storage and export

pub mod json;
pub mod native;

pub use native::SqliteStore;

/// Store format version
/// Increment when schema changes in a way that old versions can't read
pub const NATIVE_FORMAT_VERSION: u32 = 1;
