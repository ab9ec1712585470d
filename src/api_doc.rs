use utoipa::OpenApi;

use crate::handlers;
use crate::models::{DescriptorResponse, HealthResponse};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "route-discovery-api",
        version = "1.0.0",
        description = "Route discovery listings and a liveness check"
    ),
    paths(
        handlers::discovery::api_root_handler,
        handlers::discovery::app1_root_handler,
        handlers::health::health_handler
    ),
    components(schemas(DescriptorResponse, HealthResponse)),
    tags(
        (name = "discovery", description = "Route listing operations"),
        (name = "health", description = "Health check operations")
    )
)]
pub struct ApiDoc;
