pub mod file_storage;
pub mod memory_storage;

pub use file_storage::{default_storage_path, FileStorage};
pub use memory_storage::MemoryStorage;
