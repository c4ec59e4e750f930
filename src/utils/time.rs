
use chrono::NaiveDate;

pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// This is the standard way of converting a date to a string in daywords.
/// Doubles as the primary key of the entries table.
pub fn date_to_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Inverse of [date_to_key].
pub fn key_to_date(key: &str) -> chrono::ParseResult<NaiveDate> {
    NaiveDate::parse_from_str(key, DATE_KEY_FORMAT)
}
