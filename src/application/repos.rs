//! Remote API seams used by the admin flows.

use async_trait::async_trait;
use blog_admin_api_types::{Acknowledgement, NewPostRequest, Post, Tag, UpdatePostRequest};
use thiserror::Error;

/// Failure of a single request against the blog API.
///
/// Every non-2xx response is reported the same way, carrying its status code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RemoteError {
    #[error("HTTP error, status: {status}")]
    Status { status: u16, body: String },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("failed to parse body: {0}")]
    Decode(String),
}

impl RemoteError {
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Status { status, .. } => Some(*status),
            RemoteError::Transport(_) | RemoteError::Decode(_) => None,
        }
    }
}

#[async_trait]
pub trait PostsApi: Send + Sync {
    async fn list_posts(&self) -> Result<Vec<Post>, RemoteError>;

    async fn get_post(&self, id: &str) -> Result<Post, RemoteError>;

    async fn create_post(&self, request: &NewPostRequest) -> Result<Post, RemoteError>;

    async fn update_post(
        &self,
        id: &str,
        request: &UpdatePostRequest,
    ) -> Result<Post, RemoteError>;

    async fn delete_post(&self, id: &str) -> Result<Acknowledgement, RemoteError>;
}

#[async_trait]
pub trait TagsApi: Send + Sync {
    async fn list_tags(&self) -> Result<Vec<Tag>, RemoteError>;

    /// Create `name` in the vocabulary. The returned tag carries the
    /// identifier the API assigned.
    async fn add_tag(&self, name: &str) -> Result<Tag, RemoteError>;

    async fn delete_tag(&self, tag: &Tag) -> Result<Acknowledgement, RemoteError>;
}
