use chrono::NaiveDate;

/// The struct used for storing a journal entry on disk. One row per calendar
/// date; saving again for the same date replaces the previous text and count,
/// so the stored word count always reflects the text next to it.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct EntryRecord {
    pub date: NaiveDate,
    pub text: String,
    pub words: u32,
}
