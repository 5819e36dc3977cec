pub mod cli;
pub mod config;
pub mod store;
pub mod watcher;

pub use store::{ThemeStore, THEME_KEY};
