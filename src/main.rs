use anyhow::{anyhow, Result};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use chat_theme::app::cli::{format_list, CliCommand};
use chat_theme::app::config::Config;
use chat_theme::app::watcher::watch_storage;
use chat_theme::infrastructure::FileStorage;
use chat_theme::ThemeStore;

fn setup_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load();
    setup_logging(&config);

    // Parse before touching storage so a typo never writes anything.
    let command = CliCommand::parse(std::env::args().skip(1))?;

    let path = config
        .storage_path()
        .ok_or_else(|| anyhow!("no home directory; set CHAT_THEME_STORAGE"))?;
    tracing::debug!(path = %path.display(), "using theme storage");

    let store = Arc::new(ThemeStore::restore(Arc::new(FileStorage::new(&path))).await);

    match command {
        CliCommand::Get => println!("{}", store.theme()),
        CliCommand::List => println!("{}", format_list(store.theme())),
        CliCommand::Set(theme) => {
            store.set_theme(theme).await?;
            println!("{theme}");
        }
        CliCommand::Watch => {
            let mut changes = store.subscribe();
            let _watch = watch_storage(store.clone(), &path)?;
            println!("{}", store.theme());
            loop {
                tokio::select! {
                    Some(theme) = changes.recv() => println!("{theme}"),
                    res = tokio::signal::ctrl_c() => {
                        res?;
                        break;
                    }
                }
            }
        }
    }

    Ok(())
}
