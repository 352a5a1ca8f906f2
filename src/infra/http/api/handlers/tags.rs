//! Tag vocabulary handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use blog_admin_api_types::{Acknowledgement, TagAddRequest, TagDeleteRequest, TagsResponse};
use tracing::info;

use crate::infra::http::api::error::ApiError;
use crate::infra::http::api::state::ApiState;
use crate::infra::store::TagInsert;

pub async fn list_tags(State(state): State<ApiState>) -> impl IntoResponse {
    Json(TagsResponse {
        tags: state.store.list_tags().await,
    })
}

/// Returns the existing entry with 200 when the name is already known.
pub async fn add_tag(
    State(state): State<ApiState>,
    payload: Result<Json<TagAddRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    match state.store.add_tag(&payload.tag).await? {
        TagInsert::Created(tag) => {
            info!(target = "blog_admin::http::api", id = %tag.id, tag = %tag.tag, "tag created");
            Ok((StatusCode::CREATED, Json(tag)))
        }
        TagInsert::Existing(tag) => Ok((StatusCode::OK, Json(tag))),
    }
}

pub async fn delete_tag(
    State(state): State<ApiState>,
    payload: Result<Json<TagDeleteRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    let removed = state.store.delete_tag(&payload.tag_to_remove).await?;
    info!(target = "blog_admin::http::api", id = %removed.id, "tag deleted");
    Ok(Json(Acknowledgement::new("Tag deleted")))
}
