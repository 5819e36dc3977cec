use super::error::StorageError;
use async_trait::async_trait;

/// Durable string key-value storage shared with other clients.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    // Absent keys are `Ok(None)`, not an error.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
