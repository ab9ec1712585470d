use axum::{
    handler::Handler,
    http::StatusCode,
    routing::{get, MethodRouter},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::handlers::{api_root_handler, app1_root_handler, health_handler};
use crate::routes;

/// Route accepting GET only.
///
/// `get` also serves HEAD, so HEAD gets its own handler answering 405;
/// axum prefers it over the GET fallback.
fn get_only<H, T>(handler: H) -> MethodRouter
where
    H: Handler<T, ()>,
    T: 'static,
{
    get(handler).head(method_not_allowed)
}

async fn method_not_allowed() -> StatusCode {
    StatusCode::METHOD_NOT_ALLOWED
}

/// Build the HTTP router.
///
/// Every route is GET-only; other methods get 405 and unknown paths 404.
/// `api_docs` additionally mounts the Swagger UI.
pub fn router(api_docs: bool) -> Router {
    let mut router = Router::new()
        .route(routes::API_ROOT, get_only(api_root_handler))
        .route(routes::APP1_ROOT, get_only(app1_root_handler))
        .route(routes::APP1_HOME, get_only(health_handler));

    if api_docs {
        router = router
            .merge(SwaggerUi::new(routes::SWAGGER_UI).url(routes::OPENAPI_JSON, ApiDoc::openapi()));
    }

    router.layer(TraceLayer::new_for_http())
}
