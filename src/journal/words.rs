/// Counts whitespace-delimited words in a piece of text. Runs of whitespace
/// count once, so the result matches what the in-page counter shows.
pub fn count_words(text: &str) -> u32 {
    text.split_whitespace().count() as u32
}
