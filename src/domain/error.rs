use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme '{0}'")]
pub struct UnknownTheme(pub String);

/// Failures of the durable key-value storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read key '{key}'")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write key '{key}'")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("storage document is corrupt")]
    Decode(#[from] toml::de::Error),

    #[error("failed to encode storage document")]
    Encode(#[from] toml::ser::Error),

    #[error("storage is unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    /// True for failures raised while saving rather than loading.
    #[must_use]
    pub fn is_write(&self) -> bool {
        matches!(self, StorageError::Write { .. } | StorageError::Encode(_))
    }
}
