pub mod api;
pub mod client;
mod middleware;

pub use api::{ApiState, build_api_router};
pub use client::ApiClient;
pub use middleware::RequestContext;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Router, middleware as axum_middleware, routing::get};

use api::error::{ApiError, codes};

/// Full application router: the blog API, a liveness probe and a JSON 404
/// for everything else. Every request gets a request id.
pub fn build_router(state: ApiState) -> Router {
    build_api_router(state)
        .route("/health", get(|| async { StatusCode::NO_CONTENT }))
        .fallback(route_not_found)
        .layer(axum_middleware::from_fn(middleware::set_request_context))
}

async fn route_not_found() -> impl IntoResponse {
    ApiError::new(StatusCode::NOT_FOUND, codes::NOT_FOUND, "route not found", None)
}
