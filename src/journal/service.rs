use chrono::{DateTime, Local, NaiveDate};
use thiserror::Error;

use crate::{
    server::storage::{
        entities::EntryRecord,
        entry_store::{EntryStore, StoreError},
    },
    utils::clock::Clock,
};

use super::{
    calendar::{annotate_days, days_of_month, CalendarDay},
    words::count_words,
};

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("entries can only be written for the current day, not {date}")]
    NotToday { date: NaiveDate },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Everything the page needs to show one day of the journal.
#[derive(Debug, Clone, PartialEq)]
pub struct DayView {
    pub date: NaiveDate,
    pub days: Vec<CalendarDay>,
    pub text: String,
    pub words: u32,
    pub editable: bool,
}

/// Orchestrates the two use cases of the journal: rendering a day and saving
/// an entry. Holds no state of its own, everything lives in the store.
pub struct EntryService {
    store: Box<dyn EntryStore>,
    clock: Box<dyn Clock>,
    daily_target: u32,
}

impl EntryService {
    pub fn new(store: Box<dyn EntryStore>, clock: Box<dyn Clock>, daily_target: u32) -> Self {
        Self {
            store,
            clock,
            daily_target,
        }
    }

    pub fn daily_target(&self) -> u32 {
        self.daily_target
    }

    pub fn now(&self) -> DateTime<Local> {
        self.clock.now()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.now().date_naive()
    }

    /// Fetches `date`'s entry along with its whole month annotated with word
    /// counts. Only the current day is reported as editable.
    pub async fn render_day(&self, date: NaiveDate) -> Result<DayView, JournalError> {
        let days = days_of_month(date);
        let last = days[days.len() - 1];
        let counts = self.store.entries_between(days[0], last).await?;
        let annotated = annotate_days(counts, &days);

        let (text, words) = match self.store.entry_for(date).await? {
            Some(entry) => (entry.text, entry.words),
            None => (String::new(), 0),
        };

        Ok(DayView {
            date,
            days: annotated,
            text,
            words,
            editable: date == self.today(),
        })
    }

    /// Saves the entry for `date`, replacing whatever was written before.
    /// Only the current day can be saved; past days are read-only, you cannot
    /// rewrite history through the editor.
    pub async fn save_entry(&self, date: NaiveDate, text: String) -> Result<(), JournalError> {
        if date != self.today() {
            return Err(JournalError::NotToday { date });
        }
        self.persist(date, text).await
    }

    /// Backfill path used by `import`: same persistence as [Self::save_entry]
    /// without the current-day restriction.
    pub async fn import_entry(&self, date: NaiveDate, text: String) -> Result<(), JournalError> {
        self.persist(date, text).await
    }

    async fn persist(&self, date: NaiveDate, text: String) -> Result<(), JournalError> {
        let words = count_words(&text);
        self.store.upsert(EntryRecord { date, text, words }).await?;
        Ok(())
    }
}
