//! Personal daily-writing journal served from your own machine. One free-text
//! entry per day, a word count tracked against a daily target, and a monthly
//! calendar of your writing history.
//!

pub mod cli;
pub mod config;
pub mod journal;
pub mod server;
pub mod utils;
