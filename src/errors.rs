use std::io;

use axum::extract::rejection::QueryRejection;
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::domain::statistics::error::StatisticsError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Internal server error: {0}")]
    InternalServerError(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        if let Some(stats_err) = err.downcast_ref::<StatisticsError>() {
            return match stats_err {
                StatisticsError::InvalidInterval(_) => AppError::BadRequest(stats_err.to_string()),
                StatisticsError::NoData => AppError::NotFound(stats_err.to_string()),
            };
        }

        if let Some(validation) = err.downcast_ref::<validator::ValidationErrors>() {
            return AppError::BadRequest(validation.to_string());
        }

        if let Some(io_err) = err.downcast_ref::<io::Error>() {
            if io_err.kind() == io::ErrorKind::NotFound {
                return AppError::NotFound(io_err.to_string());
            }
        }

        error!(error = %err, "Request failed");
        AppError::InternalServerError(err.to_string())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        let body = Json(json!({
            "message": self.to_string()
        }));

        (status, body).into_response()
    }
}
