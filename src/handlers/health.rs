use crate::models::HealthResponse;
use crate::routes;
use axum::{http::StatusCode, Json};

/// GET /api/app1/home handler - Health check endpoint
///
/// Liveness only: the status is a constant and nothing is probed.
#[utoipa::path(
    get,
    path = routes::APP1_HOME,
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 405, description = "Method other than GET")
    ),
    tag = "health"
)]
pub async fn health_handler() -> (StatusCode, Json<HealthResponse>) {
    tracing::debug!("Health check passed");
    (StatusCode::OK, Json(HealthResponse::HEALTHY))
}
