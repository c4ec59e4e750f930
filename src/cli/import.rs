use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use tokio::io::AsyncReadExt;
use tracing::info;

use crate::{
    config::Config,
    journal::service::EntryService,
    server::storage::entry_store::SqliteEntryStore,
    utils::clock::DefaultClock,
};

/// Command to process `import`. Reads the entry text from `file`, or from
/// standard input when no file was given, and stores it for `date` through
/// the backfill path.
pub async fn process_import_command(
    date: NaiveDate,
    file: Option<PathBuf>,
    config: &Config,
) -> Result<()> {
    let text = match &file {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => {
            let mut buffer = String::new();
            tokio::io::stdin().read_to_string(&mut buffer).await?;
            buffer
        }
    };

    let store = SqliteEntryStore::open(&config.database)?;
    let service = EntryService::new(
        Box::new(store),
        Box::new(DefaultClock),
        config.daily_target,
    );

    service.import_entry(date, text).await?;
    info!(%date, source = ?file, "imported entry");

    Ok(())
}
