use std::path::Path;

use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::utils::time::{date_to_key, key_to_date};

use super::entities::EntryRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("stored date {0:?} is not a valid YYYY-MM-DD key")]
    BadDateKey(String),
}

/// Interface for abstracting persistence of entries. The journal only ever
/// needs a point lookup, a range lookup for the calendar, and an upsert.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntryStore: Sync + Send + 'static {
    /// Retrieves the entry written on `date`, if any.
    async fn entry_for(&self, date: NaiveDate) -> Result<Option<EntryRecord>, StoreError>;

    /// Word counts for every entry with a date in `[from, to]`. No order is
    /// promised to callers.
    async fn entries_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<(NaiveDate, u32)>, StoreError>;

    /// Inserts the entry, replacing whatever was stored for its date before.
    async fn upsert(&self, entry: EntryRecord) -> Result<(), StoreError>;
}

/// The main realization of [EntryStore], backed by a single SQLite file.
/// SQLite serializes writers on its own; the mutex only keeps the connection
/// handle from being shared between requests mid-statement.
pub struct SqliteEntryStore {
    conn: Mutex<Connection>,
}

impl SqliteEntryStore {
    /// Opens (or creates) the database file and ensures the schema exists.
    /// Failure here is fatal at startup, the journal refuses to run without
    /// its store.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS entries (date TEXT PRIMARY KEY, text TEXT, words INTEGER)",
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

#[async_trait]
impl EntryStore for SqliteEntryStore {
    async fn entry_for(&self, date: NaiveDate) -> Result<Option<EntryRecord>, StoreError> {
        let conn = self.conn.lock().await;
        let row = conn
            .query_row(
                "SELECT text, words FROM entries WHERE date = ?1",
                params![date_to_key(date)],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, u32>(1)?)),
            )
            .optional()?;

        Ok(row.map(|(text, words)| EntryRecord { date, text, words }))
    }

    async fn entries_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<(NaiveDate, u32)>, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt =
            conn.prepare("SELECT date, words FROM entries WHERE date >= ?1 AND date <= ?2")?;
        let rows = stmt.query_map(params![date_to_key(from), date_to_key(to)], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, u32>(1)?))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (key, words) = row?;
            let date = key_to_date(&key).map_err(|_| StoreError::BadDateKey(key))?;
            entries.push((date, words));
        }
        Ok(entries)
    }

    async fn upsert(&self, entry: EntryRecord) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT OR REPLACE INTO entries (date, text, words) VALUES (?1, ?2, ?3)",
            params![date_to_key(entry.date), entry.text, entry.words],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    use super::{EntryRecord, EntryStore, SqliteEntryStore};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(d: NaiveDate, text: &str, words: u32) -> EntryRecord {
        EntryRecord {
            date: d,
            text: text.into(),
            words,
        }
    }

    #[tokio::test]
    async fn missing_day_reads_back_as_none() -> Result<()> {
        let dir = tempdir()?;
        let store = SqliteEntryStore::open(&dir.path().join("journal.db"))?;

        assert_eq!(store.entry_for(date(2024, 2, 5)).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn upsert_then_lookup_round_trips() -> Result<()> {
        let dir = tempdir()?;
        let store = SqliteEntryStore::open(&dir.path().join("journal.db"))?;
        let stored = entry(date(2024, 2, 5), "wrote a bit today", 4);

        store.upsert(stored.clone()).await?;

        assert_eq!(store.entry_for(stored.date).await?, Some(stored));
        Ok(())
    }

    #[tokio::test]
    async fn second_upsert_replaces_the_first() -> Result<()> {
        let dir = tempdir()?;
        let store = SqliteEntryStore::open(&dir.path().join("journal.db"))?;
        let day = date(2024, 2, 5);

        store.upsert(entry(day, "first draft", 2)).await?;
        store.upsert(entry(day, "second draft entirely", 3)).await?;

        let stored = store.entry_for(day).await?.unwrap();
        assert_eq!(stored.text, "second draft entirely");
        assert_eq!(stored.words, 3);
        Ok(())
    }

    #[tokio::test]
    async fn range_lookup_is_inclusive_on_both_ends() -> Result<()> {
        let dir = tempdir()?;
        let store = SqliteEntryStore::open(&dir.path().join("journal.db"))?;

        store.upsert(entry(date(2024, 1, 31), "before", 1)).await?;
        store.upsert(entry(date(2024, 2, 1), "first", 1)).await?;
        store.upsert(entry(date(2024, 2, 29), "last", 1)).await?;
        store.upsert(entry(date(2024, 3, 1), "after", 1)).await?;

        let mut counts = store
            .entries_between(date(2024, 2, 1), date(2024, 2, 29))
            .await?;
        counts.sort_by_key(|(date, _)| *date);

        assert_eq!(
            counts,
            vec![(date(2024, 2, 1), 1), (date(2024, 2, 29), 1)]
        );
        Ok(())
    }

    #[tokio::test]
    async fn reopening_the_file_keeps_existing_entries() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("journal.db");
        let day = date(2024, 2, 5);

        {
            let store = SqliteEntryStore::open(&path)?;
            store.upsert(entry(day, "persisted", 1)).await?;
        }

        let store = SqliteEntryStore::open(&path)?;
        assert!(store.entry_for(day).await?.is_some());
        Ok(())
    }
}
