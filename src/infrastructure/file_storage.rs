use crate::domain::{KeyValueStorage, StorageError};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

type Entries = BTreeMap<String, String>;

pub fn default_storage_path() -> Option<PathBuf> {
    home::home_dir().map(|mut path| {
        path.push(".config");
        path.push("chat-theme");
        path.push("storage.toml");
        path
    })
}

/// Key-value storage persisted as one flat TOML table of strings.
///
/// Every `set` rewrites the whole document through a uniquely named sibling
/// temp file and a rename, so readers never observe a half-written file and
/// concurrent writers (other processes included) never share a temp file.
/// A document that no longer parses is replaced on the next `set`.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self, key: &str) -> Result<Entries, StorageError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Entries::new()),
            Err(source) => Err(StorageError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    async fn write_entries(&self, key: &str, entries: &Entries) -> Result<(), StorageError> {
        let content = toml::to_string(entries)?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomically(&path, &content))
            .await
            .unwrap_or_else(|e| Err(std::io::Error::other(e)))
            .map_err(|source| StorageError::Write {
                key: key.to_string(),
                source,
            })
    }
}

fn write_atomically(path: &Path, content: &str) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[async_trait]
impl KeyValueStorage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut entries = self.read_entries(key).await?;
        Ok(entries.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = match self.read_entries(key).await {
            Err(StorageError::Decode(e)) => {
                tracing::warn!(
                    error = %e,
                    path = %self.path.display(),
                    "storage document is corrupt, rewriting it"
                );
                Entries::new()
            }
            other => other?,
        };
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(key, &entries).await?;
        tracing::debug!(path = %self.path.display(), key, "storage entry written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_reads_as_absent() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let storage = FileStorage::new(dir.path().join("storage.toml"));
        assert_eq!(storage.get("chat-theme").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_set_keeps_other_keys() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested").join("deeper").join("storage.toml");
        std::fs::create_dir_all(path.parent().unwrap())?;
        std::fs::write(&path, "other = \"kept\"\n")?;

        let storage = FileStorage::new(&path);
        storage.set("chat-theme", "dracula").await?;

        assert_eq!(storage.get("chat-theme").await?.as_deref(), Some("dracula"));
        assert_eq!(storage.get("other").await?.as_deref(), Some("kept"));
        let raw = std::fs::read_to_string(&path)?;
        assert!(raw.contains("chat-theme = \"dracula\""));
        let leftovers: Vec<_> = std::fs::read_dir(path.parent().unwrap())?
            .filter_map(|e| e.ok())
            .filter(|e| e.path() != path)
            .collect();
        assert!(leftovers.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_set_creates_missing_directories() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("a").join("b").join("storage.toml");
        let storage = FileStorage::new(&path);
        storage.set("chat-theme", "winter").await?;
        assert!(path.exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_corrupt_document_is_a_decode_error() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("storage.toml");
        std::fs::write(&path, "this is = = not toml")?;
        let storage = FileStorage::new(&path);
        assert!(matches!(
            storage.get("chat-theme").await,
            Err(StorageError::Decode(_))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_set_replaces_corrupt_document() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("storage.toml");
        std::fs::write(&path, "this is = = not toml")?;
        let storage = FileStorage::new(&path);

        storage.set("chat-theme", "acid").await?;
        assert_eq!(storage.get("chat-theme").await?.as_deref(), Some("acid"));
        Ok(())
    }

    #[tokio::test]
    async fn test_unreadable_path_is_a_read_error() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        // A directory where the file should be.
        let storage = FileStorage::new(dir.path());
        assert!(matches!(
            storage.get("chat-theme").await,
            Err(StorageError::Read { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_default_path_is_under_config() {
        if let Some(path) = default_storage_path() {
            assert!(path.ends_with(".config/chat-theme/storage.toml"));
        }
    }
}
