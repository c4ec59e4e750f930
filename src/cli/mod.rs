pub mod import;

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;

use crate::{
    config::{Config, DEFAULT_ADDRESS, DEFAULT_DAILY_TARGET},
    server::start_server,
    utils::{
        dir::create_application_default_path,
        logging::{enable_logging, IMPORT_PREFIX, SERVER_PREFIX},
    },
};

use import::process_import_command;

#[derive(Parser, Debug)]
#[command(name = "Daywords", version, long_about = None)]
#[command(about = "Personal daily writing journal served from your own machine", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, help = "Print logs to the console")]
    log: bool,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Start the journal web server")]
    Serve {
        #[arg(
            long,
            default_value_t = DEFAULT_DAILY_TARGET,
            help = "The number of words to write daily"
        )]
        target: u32,
        #[arg(
            long,
            help = "Database file. By default journal.db inside $XDG_STATE_HOME or $HOME/.local/state"
        )]
        db: Option<PathBuf>,
        #[arg(long, default_value = DEFAULT_ADDRESS, help = "The address of the server")]
        addr: String,
    },
    #[command(
        about = "Import an entry for a given date from a file or standard input, bypassing the current-day restriction"
    )]
    Import {
        #[arg(help = "Date of the entry, YYYY-MM-DD")]
        date: NaiveDate,
        #[arg(help = "File to read the text from. Standard input when omitted")]
        file: Option<PathBuf>,
        #[arg(
            long,
            help = "Database file. By default journal.db inside $XDG_STATE_HOME or $HOME/.local/state"
        )]
        db: Option<PathBuf>,
    },
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    let application_path = create_application_default_path()?;

    match args.commands {
        Commands::Serve { target, db, addr } => {
            enable_logging(SERVER_PREFIX, &application_path, logging_level, args.log)?;
            let config = Config::new(target, db, addr)?;
            start_server(config).await
        }
        Commands::Import { date, file, db } => {
            enable_logging(IMPORT_PREFIX, &application_path, logging_level, args.log)?;
            let config = Config::new(DEFAULT_DAILY_TARGET, db, DEFAULT_ADDRESS.to_string())?;
            process_import_command(date, file, &config).await
        }
    }
}
