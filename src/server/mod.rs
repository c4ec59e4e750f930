//! HTTP presentation layer: routing, request handling and HTML rendering on
//! top of the journal core. State lives in [AppState] and is shared across
//! requests; everything in it is behind an [Arc].

use std::sync::Arc;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tracing::info;

use crate::{
    config::Config,
    journal::service::EntryService,
    utils::clock::DefaultClock,
};

use self::storage::entry_store::SqliteEntryStore;

pub mod handlers;
pub mod render;
pub mod storage;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<EntryService>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index_handler))
        .route("/day/:date", get(handlers::day_handler))
        .route("/save", post(handlers::save_handler))
        .with_state(state)
}

/// Represents the starting point for the web server. Blocks until the server
/// is shut down. A store that cannot be opened is fatal here, the journal
/// refuses to run without it.
pub async fn start_server(config: Config) -> Result<()> {
    let store = SqliteEntryStore::open(&config.database)?;
    let service = EntryService::new(
        Box::new(store),
        Box::new(DefaultClock),
        config.daily_target,
    );

    let router = build_router(AppState {
        service: Arc::new(service),
    });

    let listener = TcpListener::bind(&config.address).await?;
    println!("Starting server on http://{}", config.address);
    info!(address = %config.address, database = %config.database.display(), "server listening");

    axum::serve(listener, router).await?;
    Ok(())
}
