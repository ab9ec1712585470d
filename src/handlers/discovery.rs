use crate::models::DescriptorResponse;
use crate::routes;
use axum::{http::StatusCode, Json};

/// GET /api/ handler - Lists every mounted group and its endpoints
#[utoipa::path(
    get,
    path = routes::API_ROOT,
    responses(
        (status = 200, description = "API route listing", body = DescriptorResponse)
    ),
    tag = "discovery"
)]
pub async fn api_root_handler() -> (StatusCode, Json<DescriptorResponse>) {
    (StatusCode::OK, Json(DescriptorResponse::from(&routes::API)))
}

/// GET /api/app1/ handler - Lists the app1 endpoints
#[utoipa::path(
    get,
    path = routes::APP1_ROOT,
    responses(
        (status = 200, description = "App1 route listing", body = DescriptorResponse)
    ),
    tag = "discovery"
)]
pub async fn app1_root_handler() -> (StatusCode, Json<DescriptorResponse>) {
    (StatusCode::OK, Json(DescriptorResponse::from(&routes::APP1)))
}
