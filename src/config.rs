use std::path::PathBuf;

use anyhow::Result;

use crate::utils::dir::create_application_default_path;

pub const DEFAULT_DAILY_TARGET: u32 = 900;
pub const DEFAULT_ADDRESS: &str = "localhost:12345";
pub const DEFAULT_DATABASE_NAME: &str = "journal.db";

/// Runtime settings, assembled once at startup from the command line and
/// passed down explicitly. Nothing in the application reads configuration
/// from anywhere else.
#[derive(Debug, Clone)]
pub struct Config {
    /// Word count at which a day counts as successfully written.
    pub daily_target: u32,
    /// Location of the SQLite database file.
    pub database: PathBuf,
    /// Address the web server binds to.
    pub address: String,
}

impl Config {
    /// Fills in the default database location (inside the application state
    /// directory) when none was given on the command line.
    pub fn new(daily_target: u32, database: Option<PathBuf>, address: String) -> Result<Self> {
        let database = match database {
            Some(path) => path,
            None => create_application_default_path()?.join(DEFAULT_DATABASE_NAME),
        };

        Ok(Self {
            daily_target,
            database,
            address,
        })
    }
}
