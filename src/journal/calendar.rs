use chrono::{Datelike, Months, NaiveDate};

/// Every date of `reference`'s month, ascending from the first day up to and
/// including the month's final day.
pub fn days_of_month(reference: NaiveDate) -> Vec<NaiveDate> {
    let first = reference.with_day(1).unwrap();
    let next_month = first + Months::new(1);
    first.iter_days().take_while(|day| *day < next_month).collect()
}

/// A single cell of the monthly calendar strip. Computed per render, never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub words: u32,
}

impl CalendarDay {
    /// Background intensity for the cell, in `[0, 0.5]`. Capped so that a very
    /// productive day doesn't saturate the page.
    pub fn score(&self, daily_target: u32) -> f32 {
        let score = self.words as f32 / (2 * daily_target) as f32;
        score.min(0.5)
    }

    /// CSS classes for the cell: `past` or `future`, with `written` once
    /// anything was saved and `yay` once the daily target is met.
    pub fn classes(&self, today: NaiveDate, daily_target: u32) -> String {
        let mut classes = if self.date <= today { "past" } else { "future" }.to_string();

        if self.words >= 1 {
            classes.push_str(" written");
        }

        if self.words >= daily_target {
            classes.push_str(" yay");
        }

        classes
    }
}

/// Attaches stored word counts to a month of days with a linear merge-join,
/// walking both sequences in lockstep and advancing the entry cursor only on
/// an exact date match. Days without an entry get a count of 0.
///
/// The merge requires both sides ascending by date. `days` comes from
/// [days_of_month] which is ascending by construction; the entries are sorted
/// here because the store's range contract doesn't promise an order.
pub fn annotate_days(mut entries: Vec<(NaiveDate, u32)>, days: &[NaiveDate]) -> Vec<CalendarDay> {
    entries.sort_by_key(|(date, _)| *date);
    let mut entries = entries.into_iter().peekable();

    days.iter()
        .map(|&date| {
            let words = match entries.peek() {
                Some(&(entry_date, words)) if entry_date == date => {
                    entries.next();
                    words
                }
                _ => 0,
            };
            CalendarDay { date, words }
        })
        .collect()
}
