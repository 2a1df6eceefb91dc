//! HTTP service for leadsift
//!
//! Exposes the crawl and export operations over HTTP. Shared state is
//! crawl-independent (client, config, store); crawl-scoped state lives
//! inside each invocation of the crawl engine.

pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::crawler::Crawler;
use crate::export::ExportStore;
use crate::LeadsiftError;

/// Shared state behind the router
pub struct AppState {
    pub config: Config,
    pub crawler: Crawler,
    pub store: ExportStore,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, LeadsiftError> {
        let crawler = Crawler::new(config.crawler.clone(), &config.user_agent)?;
        let store = ExportStore::new(&config.export.uploads_dir)?;
        Ok(Self {
            config,
            crawler,
            store,
        })
    }
}

/// Builds the service router
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/scrape", get(handlers::scrape))
        .route("/csv", post(handlers::create_csv))
        .route("/add-csv", post(handlers::append_csv))
        .route("/download/{file_id}", get(handlers::download))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the HTTP service until the process is stopped
pub async fn serve(config: Config) -> Result<(), LeadsiftError> {
    let addr = format!("{}:{}", config.server.bind_address, config.server.port);
    let state = Arc::new(AppState::new(config)?);
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, router).await?;

    Ok(())
}
