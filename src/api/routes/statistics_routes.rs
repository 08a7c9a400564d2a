//! Statistics routes (e.g., /api/v1/statistics/*)

use axum::{routing::get, Router};

use crate::api::controller::statistics::StatisticsController;
use crate::app_state::AppState;

pub fn statistics_routes() -> Router<AppState> {
    Router::new()
        .route("/billing/sequence", get(StatisticsController::get_billing_sequence))
        .route("/billing/summary", get(StatisticsController::get_billing_summary))
        .route("/connections/sequence", get(StatisticsController::get_connections_sequence))
        .route("/connections/summary", get(StatisticsController::get_connections_summary))
}
