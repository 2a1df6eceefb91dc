//! HTTP handlers for the leadsift service
//!
//! The endpoint set mirrors what callers of the crawler need: trigger a
//! crawl, submit records for export, retrieve an exported file. Handlers own
//! no crawl state; every `/scrape` request runs with its own crawl context.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use tracing::warn;

use crate::crawler::CrawlResult;
use crate::export::ExportStore;
use crate::server::AppState;
use crate::{ExportError, LeadsiftError};

#[derive(Deserialize)]
pub struct ScrapeParams {
    #[serde(rename = "targetUrl")]
    pub target_url: String,
    pub depth: u32,
}

#[derive(Deserialize)]
pub struct AppendParams {
    #[serde(rename = "fileId")]
    pub file_id: Option<String>,
}

/// `GET /scrape?targetUrl=...&depth=N` — crawl and return the aggregate record
pub async fn scrape(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ScrapeParams>,
) -> Response {
    match state.crawler.crawl(&params.target_url, params.depth).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => {
            let status = match &e {
                LeadsiftError::InvalidSeed { .. } | LeadsiftError::DepthLimit { .. } => {
                    StatusCode::BAD_REQUEST
                }
                LeadsiftError::SeedFetch { .. } => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            warn!(error = %e, "Scrape request failed");
            (status, Json(serde_json::json!({ "error": e.to_string() }))).into_response()
        }
    }
}

/// `POST /csv` — write one record as a fresh comma-delimited export
pub async fn create_csv(
    State(state): State<Arc<AppState>>,
    Json(record): Json<CrawlResult>,
) -> Response {
    match state.store.create_csv(&record) {
        Ok(file_id) => {
            (StatusCode::OK, Json(serde_json::json!({ "fileId": file_id }))).into_response()
        }
        Err(e) => export_error_response(e),
    }
}

/// `POST /add-csv[?fileId=...]` — append a batch as a semicolon-delimited block
pub async fn append_csv(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AppendParams>,
    Json(records): Json<Vec<CrawlResult>>,
) -> Response {
    match state
        .store
        .append_records(&records, params.file_id.as_deref())
    {
        Ok(file_id) => {
            (StatusCode::OK, Json(serde_json::json!({ "fileId": file_id }))).into_response()
        }
        Err(e) => export_error_response(e),
    }
}

/// `GET /download/{file_id}` — return a stored export as an attachment
pub async fn download(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<String>,
) -> Response {
    match state.store.read(&file_id) {
        Ok(content) => {
            let disposition = format!(
                "attachment; filename=\"{}\"",
                ExportStore::file_name(&file_id)
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                content,
            )
                .into_response()
        }
        Err(e) => export_error_response(e),
    }
}

fn export_error_response(e: ExportError) -> Response {
    let status = match &e {
        ExportError::FileNotFound(_) => StatusCode::NOT_FOUND,
        ExportError::InvalidFileId(_) => StatusCode::BAD_REQUEST,
        _ => {
            warn!(error = %e, "Export operation failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(serde_json::json!({ "error": e.to_string() }))).into_response()
}
