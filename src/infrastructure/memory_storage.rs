use crate::domain::{KeyValueStorage, StorageError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// In-process storage. Clones share the same entries, which is how a
/// "restart" is simulated: drop the store, keep a clone of the storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
    offline: Arc<AtomicBool>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_string(), value.to_string());
        Self {
            entries: Arc::new(Mutex::new(entries)),
            offline: Arc::default(),
        }
    }

    /// While offline every read and write fails with `StorageError::Unavailable`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub async fn snapshot(&self) -> HashMap<String, String> {
        self.entries.lock().await.clone()
    }

    fn check_online(&self) -> Result<(), StorageError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(StorageError::Unavailable("memory storage is offline".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_online()?;
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_online()?;
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clones_share_entries() {
        let storage = MemoryStorage::new();
        let other = storage.clone();
        storage.set("chat-theme", "nord").await.unwrap();
        assert_eq!(other.get("chat-theme").await.unwrap().as_deref(), Some("nord"));
        assert_eq!(other.get("missing").await.unwrap(), None);
        assert_eq!(storage.snapshot().await.len(), 1);
    }

    #[tokio::test]
    async fn test_offline_fails_both_ways() {
        let storage = MemoryStorage::with_entry("chat-theme", "dim");
        storage.set_offline(true);
        assert!(matches!(
            storage.get("chat-theme").await,
            Err(StorageError::Unavailable(_))
        ));
        assert!(storage.set("chat-theme", "light").await.is_err());

        storage.set_offline(false);
        assert_eq!(storage.get("chat-theme").await.unwrap().as_deref(), Some("dim"));
    }
}
