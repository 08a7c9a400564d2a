use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::api::dto::ApiResponse;
use crate::app_state::AppState;

/// Build the main application router
pub fn app_router() -> Router<AppState> {
    let api_v1 = Router::new()
        .nest("/statistics", crate::api::routes::statistics_routes::statistics_routes())
        .nest("/system", crate::api::routes::system_routes::system_routes());

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", api_v1)
        .fallback(handler_404)
        .layer(CorsLayer::very_permissive())
}

async fn root() -> &'static str {
    "Server is running!"
}

async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "OK" }))
}

async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::err("The requested resource was not found")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::build_app_state;
    use crate::config::AppConfig;
    use crate::core::persistence::events::transaction::{TransactionEventEntity, TransactionEventRepository};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use chrono::{TimeZone, Utc};
    use serde_json::Value;
    use tempfile::{tempdir, TempDir};
    use tower::ServiceExt;

    fn app(tmp: &TempDir) -> Router {
        let config = AppConfig {
            data_dir: tmp.path().join("data"),
            log_dir: tmp.path().join("logs"),
            ..Default::default()
        };
        app_router().with_state(build_app_state(&config))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let res = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn billing_sequence_over_an_interval() {
        let tmp = tempdir().unwrap();
        let repo = TransactionEventRepository::new(&tmp.path().join("data"));
        repo.append(&TransactionEventEntity {
            time: Utc.with_ymd_and_hms(2024, 2, 22, 5, 30, 0).unwrap(),
            server_id: "srv-1".into(),
            user_id: "u-1".into(),
            amount: 12.5,
        })
        .unwrap();

        let (status, body) = get_json(
            app(&tmp),
            "/api/v1/statistics/billing/sequence?period_type=interval\
             &interval_begin=2024-02-22%2000:00:00&interval_end=2024-02-23%2000:00:00&step=HOUR",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_successful"], true);
        assert_eq!(body["data"]["total_items"], 24);
        assert_eq!(body["data"]["items"][5]["date_time"], "2024-02-22 05:00:00");
        assert_eq!(body["data"]["items"][5]["value"], 12.5);
        assert_eq!(body["data"]["items"][5]["transactions_total"], 1);
        assert_eq!(body["data"]["items"][6]["transactions_total"], 0);
    }

    #[tokio::test]
    async fn reversed_interval_is_bad_request() {
        let tmp = tempdir().unwrap();
        let (status, body) = get_json(
            app(&tmp),
            "/api/v1/statistics/connections/summary?period_type=interval\
             &interval_begin=2024-02-23&interval_end=2024-02-22",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("Bad request"));
    }

    #[tokio::test]
    async fn malformed_query_parameters_get_json_bad_request() {
        let tmp = tempdir().unwrap();

        let (status, body) = get_json(app(&tmp), "/api/v1/statistics/billing/sequence?step=fortnight").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().starts_with("Bad request"));

        let (status, body) = get_json(
            app(&tmp),
            "/api/v1/statistics/connections/summary?period_type=interval&interval_begin=yesterday",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn all_time_without_events_is_not_found() {
        let tmp = tempdir().unwrap();
        let (status, _) = get_json(
            app(&tmp),
            "/api/v1/statistics/connections/sequence?period_type=all_time",
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn system_health_and_unknown_routes() {
        let tmp = tempdir().unwrap();

        let (status, body) = get_json(app(&tmp), "/api/v1/system/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "degraded");

        let (status, body) = get_json(app(&tmp), "/api/v1/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["is_successful"], false);
    }
}
