use crate::domain::{KeyValueStorage, StorageError, ThemeName};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;

/// Storage key shared with the web client. Both read and write the same
/// plain-text wire name under it.
pub const THEME_KEY: &str = "chat-theme";

struct Inner {
    theme: ThemeName,
    subscribers: Vec<mpsc::UnboundedSender<ThemeName>>,
}

/// Owns the active theme and mirrors it into durable storage.
///
/// The in-memory value is authoritative: setters update it and notify
/// subscribers before the storage write is awaited, so the last `set_theme`
/// to run wins in memory even if its write settles first. Overlapping writes
/// are not ordered against each other.
pub struct ThemeStore {
    inner: Mutex<Inner>,
    storage: Arc<dyn KeyValueStorage>,
}

impl std::fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStore")
            .field("theme", &self.theme())
            .finish_non_exhaustive()
    }
}

impl ThemeStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                theme: ThemeName::default(),
                subscribers: Vec::new(),
            }),
            storage,
        }
    }

    /// Builds a store and restores the persisted theme, if any.
    pub async fn restore(storage: Arc<dyn KeyValueStorage>) -> Self {
        let store = Self::new(storage);
        store.load_theme().await;
        store
    }

    #[must_use]
    pub fn theme(&self) -> ThemeName {
        self.lock().theme
    }

    /// Registers a consumer. The receiver gets every subsequent theme change,
    /// delivered synchronously from the thread that made it.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<ThemeName> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.lock().subscribers.push(tx);
        rx
    }

    /// Sets the theme, then persists it.
    ///
    /// The in-memory value and subscribers are updated before this awaits,
    /// and are not rolled back if the write fails.
    pub async fn set_theme(&self, theme: ThemeName) -> Result<(), StorageError> {
        self.apply(theme, true);

        if let Err(e) = self.storage.set(THEME_KEY, theme.as_str()).await {
            tracing::error!(error = %e, %theme, "failed to persist theme");
            return Err(e);
        }
        tracing::debug!(%theme, "theme persisted");
        Ok(())
    }

    /// Restores the persisted theme and returns the resulting value.
    ///
    /// Never fails: an absent key, a read error, or a stored name outside the
    /// known set all leave the current theme in place.
    pub async fn load_theme(&self) -> ThemeName {
        match self.storage.get(THEME_KEY).await {
            Ok(Some(raw)) => match raw.parse::<ThemeName>() {
                Ok(theme) => {
                    self.apply(theme, false);
                    tracing::debug!(%theme, "theme restored");
                }
                Err(e) => tracing::warn!(error = %e, "ignoring stored theme"),
            },
            Ok(None) => tracing::debug!("no stored theme, keeping current"),
            Err(e) => tracing::warn!(error = %e, "failed to load theme"),
        }
        self.theme()
    }

    // Notifies while holding the lock so subscribers observe changes in the
    // same order as the in-memory writes.
    fn apply(&self, theme: ThemeName, always_notify: bool) {
        let mut inner = self.lock();
        let changed = inner.theme != theme;
        inner.theme = theme;
        if changed || always_notify {
            inner.subscribers.retain(|tx| tx.send(theme).is_ok());
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
