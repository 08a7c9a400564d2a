//! Statistics controller: billing and connection charts

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde_json::Value;

use crate::api::dto::statistics_dto::StatisticsQuery;
use crate::api::dto::ApiResponse;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::domain::statistics::dto::StatisticsSource;
use crate::errors::AppError;

pub struct StatisticsController;

impl StatisticsController {
    pub async fn get_billing_sequence(
        State(state): State<AppState>,
        q: Result<Query<StatisticsQuery>, QueryRejection>,
    ) -> Result<Json<ApiResponse<Value>>, AppError> {
        let Query(q) = q?;
        to_json(
            state
                .statistics_service
                .get_sequence(StatisticsSource::Billing, q)
                .await,
        )
    }

    pub async fn get_billing_summary(
        State(state): State<AppState>,
        q: Result<Query<StatisticsQuery>, QueryRejection>,
    ) -> Result<Json<ApiResponse<Value>>, AppError> {
        let Query(q) = q?;
        to_json(
            state
                .statistics_service
                .get_summary(StatisticsSource::Billing, q)
                .await,
        )
    }

    pub async fn get_connections_sequence(
        State(state): State<AppState>,
        q: Result<Query<StatisticsQuery>, QueryRejection>,
    ) -> Result<Json<ApiResponse<Value>>, AppError> {
        let Query(q) = q?;
        to_json(
            state
                .statistics_service
                .get_sequence(StatisticsSource::Connections, q)
                .await,
        )
    }

    pub async fn get_connections_summary(
        State(state): State<AppState>,
        q: Result<Query<StatisticsQuery>, QueryRejection>,
    ) -> Result<Json<ApiResponse<Value>>, AppError> {
        let Query(q) = q?;
        to_json(
            state
                .statistics_service
                .get_summary(StatisticsSource::Connections, q)
                .await,
        )
    }
}
