pub mod error;
pub mod handlers;
pub mod state;

pub use state::ApiState;

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post, put},
};

use crate::infra::http::middleware::log_responses;

pub fn build_api_router(state: ApiState) -> Router {
    Router::new()
        .route("/api/posts", get(handlers::list_posts))
        .route("/api/posts/{id}", get(handlers::get_post))
        .route("/api/submit", post(handlers::submit_post))
        .route("/api/editPost/{id}", put(handlers::edit_post))
        .route("/api/delete/{id}", delete(handlers::delete_post))
        .route("/api/tags", get(handlers::list_tags))
        .route("/api/tagAdd", post(handlers::add_tag))
        .route("/api/tagDelete", delete(handlers::delete_tag))
        .with_state(state)
        .layer(axum_middleware::from_fn(log_responses))
}
