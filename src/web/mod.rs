//! HTTP surface for the report board.
//!
//! Collects report submissions, resolves the hotel, and hands the report to
//! the recorder. Listing endpoints return JSON.

pub mod reports;

use std::sync::Arc;

use axum::{response::Json, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::database::Database;
use crate::ledger::LedgerConnector;
use crate::reports::ReportRecorder;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub database: Database,
    pub recorder: ReportRecorder,
    pub ledger: Arc<dyn LedgerConnector>,
}

impl AppState {
    pub fn new(database: Database, ledger: Arc<dyn LedgerConnector>) -> Self {
        Self {
            recorder: ReportRecorder::new(database.clone()),
            database,
            ledger,
        }
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/hotels", get(reports::list_hotels))
        .route(
            "/reports",
            get(reports::list_reports).post(reports::create_report),
        )
        .route("/reports/:id", get(reports::get_report))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .into_inner(),
        )
        .with_state(state)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "ecohotel-board",
        "timestamp": chrono::Utc::now()
    }))
}
