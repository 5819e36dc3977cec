use crate::app::store::ThemeStore;

use anyhow::{anyhow, Result};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const DEBOUNCE: Duration = Duration::from_millis(200);

/// Keeps the storage watcher alive. Dropping it stops reloading.
pub struct StorageWatch {
    _watcher: RecommendedWatcher,
    task: JoinHandle<()>,
}

impl Drop for StorageWatch {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Reloads the theme whenever the storage file changes on disk, e.g. after
/// the web client wrote the shared key.
///
/// The parent directory is watched rather than the file itself because
/// writes replace the file by renaming over it.
pub fn watch_storage(store: Arc<ThemeStore>, path: &Path) -> Result<StorageWatch> {
    let dir = path
        .parent()
        .ok_or_else(|| anyhow!("storage path {} has no parent", path.display()))?;
    // Blocking, but runs once at startup before anything is awaited.
    std::fs::create_dir_all(dir)?;
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("storage path {} has no file name", path.display()))?
        .to_os_string();

    let (notify_tx, mut notify_rx) = mpsc::channel(1);
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if let Ok(event) = res {
            let touches_file = event
                .paths
                .iter()
                .any(|p: &PathBuf| p.file_name() == Some(file_name.as_os_str()));
            if touches_file {
                let _ = notify_tx.try_send(());
            }
        }
    })?;
    watcher.watch(dir, RecursiveMode::NonRecursive)?;
    tracing::debug!(dir = %dir.display(), "watching theme storage");

    let task = tokio::spawn(async move {
        let mut pending = false;

        loop {
            if pending {
                tokio::select! {
                    Some(()) = notify_rx.recv() => {}
                    () = tokio::time::sleep(DEBOUNCE) => {
                        let theme = store.load_theme().await;
                        tracing::debug!(%theme, "reloaded theme after external change");
                        pending = false;
                    }
                }
            } else if notify_rx.recv().await.is_some() {
                pending = true;
            } else {
                break;
            }
        }
    });

    Ok(StorageWatch {
        _watcher: watcher,
        task,
    })
}
