pub mod error;
pub mod storage;
pub mod theme;

pub use error::{StorageError, UnknownTheme};
pub use storage::KeyValueStorage;
pub use theme::ThemeName;
