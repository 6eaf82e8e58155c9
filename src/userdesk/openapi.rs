use super::handlers::{health, proxy};
use axum::response::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(health::health, proxy::forward),
    components(schemas(health::Health)),
    tags(
        (name = "health", description = "Service status"),
        (name = "proxy", description = "Same-origin forwarding to remote APIs"),
    )
)]
pub struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

// axum handler for the OpenAPI document
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(openapi())
}
