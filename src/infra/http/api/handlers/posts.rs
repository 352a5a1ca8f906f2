//! Post handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use blog_admin_api_types::{Acknowledgement, NewPostRequest, UpdatePostRequest};
use tracing::info;

use crate::infra::http::api::error::ApiError;
use crate::infra::http::api::state::ApiState;

pub async fn list_posts(State(state): State<ApiState>) -> impl IntoResponse {
    Json(state.store.list_posts())
}

pub async fn get_post(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state.store.get_post(&id)?;
    Ok(Json(post))
}

pub async fn submit_post(
    State(state): State<ApiState>,
    payload: Result<Json<NewPostRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    let post = state.store.create_post(payload)?;
    info!(target = "blog_admin::http::api", id = %post.id, "post created");
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn edit_post(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdatePostRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    let post = state.store.update_post(&id, payload)?;
    Ok(Json(post))
}

pub async fn delete_post(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let removed = state.store.delete_post(&id)?;
    info!(target = "blog_admin::http::api", id = %removed.id, "post deleted");
    Ok(Json(Acknowledgement::new("Post deleted")))
}
