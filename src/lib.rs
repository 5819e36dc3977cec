//! Theme preference store: keeps the selected chat theme in memory, mirrors
//! it into durable key-value storage under a key shared with the web client,
//! and notifies subscribers on change.

pub mod app;
pub mod domain;
pub mod infrastructure;

pub use app::{ThemeStore, THEME_KEY};
pub use domain::{KeyValueStorage, StorageError, ThemeName};
