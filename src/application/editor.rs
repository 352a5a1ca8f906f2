//! Post detail and create screens.
//!
//! The editor is a two-state machine. An existing post opens in
//! [`EditorState::Viewing`]; a new post starts in [`EditorState::Editing`].
//! Field changes are only accepted while editing, and nothing reaches the API
//! until [`PostEditor::save`].

use std::sync::Arc;

use blog_admin_api_types::{Category, NewPostRequest, Post, UpdatePostRequest};
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{info, warn};

use super::repos::{PostsApi, RemoteError};
use crate::domain::error::{DomainError, validate_image_url};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Viewing,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    /// Edits were dropped and the server copy is shown again.
    Reverted,
    /// The unsaved new post was dropped; the caller leaves the create screen.
    Discarded,
}

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("post is not being edited")]
    NotEditing,
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

pub struct PostEditor {
    api: Arc<dyn PostsApi>,
    post: Post,
    // Last copy the server confirmed; cancel falls back to it when the
    // re-fetch fails.
    baseline: Post,
    state: EditorState,
    error: Option<String>,
}

impl PostEditor {
    /// Load an existing post for the detail screen.
    pub async fn open(api: Arc<dyn PostsApi>, id: &str) -> Result<Self, EditorError> {
        let post = api.get_post(id).await.inspect_err(|err| {
            warn!(target = "blog_admin::editor", id, error = %err, "failed to load post");
        })?;
        Ok(Self {
            api,
            baseline: post.clone(),
            post,
            state: EditorState::Viewing,
            error: None,
        })
    }

    /// Start the create screen with an empty Workshop post.
    pub fn create(api: Arc<dyn PostsApi>) -> Self {
        let post = Post::draft(OffsetDateTime::now_utc());
        Self {
            api,
            baseline: post.clone(),
            post,
            state: EditorState::Editing,
            error: None,
        }
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn post(&self) -> &Post {
        &self.post
    }

    pub fn is_new(&self) -> bool {
        self.post.is_new()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn edit(&mut self) {
        self.state = EditorState::Editing;
    }

    /// Mutable access to the in-progress post; refused while viewing.
    pub fn draft_mut(&mut self) -> Result<&mut Post, EditorError> {
        match self.state {
            EditorState::Editing => Ok(&mut self.post),
            EditorState::Viewing => Err(EditorError::NotEditing),
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), EditorError> {
        self.draft_mut()?.title = title.into();
        Ok(())
    }

    pub fn set_category(&mut self, category: Category) -> Result<(), EditorError> {
        self.draft_mut()?.category = category;
        Ok(())
    }

    pub fn set_body(&mut self, body: impl Into<String>) -> Result<(), EditorError> {
        self.draft_mut()?.body = body.into();
        Ok(())
    }

    /// Set or clear the cover image. An empty value clears it.
    pub fn set_cover_image(&mut self, url: Option<&str>) -> Result<(), EditorError> {
        let cover = match url.map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(validate_image_url(raw)?),
            _ => None,
        };
        self.draft_mut()?.cover_image = cover;
        Ok(())
    }

    /// Append an image element to the body.
    pub fn insert_image(&mut self, url: &str) -> Result<(), EditorError> {
        let src = validate_image_url(url)?;
        let draft = self.draft_mut()?;
        draft.body.push_str(&format!("<img src=\"{}\">", src.replace('"', "%22")));
        Ok(())
    }

    /// Leave editing without saving.
    pub async fn cancel(&mut self) -> Result<CancelOutcome, EditorError> {
        if self.post.is_new() {
            self.post = Post::draft(OffsetDateTime::now_utc());
            self.error = None;
            return Ok(CancelOutcome::Discarded);
        }

        self.state = EditorState::Viewing;
        match self.api.get_post(&self.post.id).await {
            Ok(fresh) => {
                self.baseline = fresh.clone();
                self.post = fresh;
                self.error = None;
                Ok(CancelOutcome::Reverted)
            }
            Err(err) => {
                warn!(
                    target = "blog_admin::editor",
                    id = %self.post.id,
                    error = %err,
                    "re-fetch after cancel failed; showing last saved copy"
                );
                self.post = self.baseline.clone();
                self.error = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Persist the current edits. On failure the editor stays in
    /// [`EditorState::Editing`] with the edits intact.
    pub async fn save(&mut self) -> Result<(), EditorError> {
        if self.state != EditorState::Editing {
            return Err(EditorError::NotEditing);
        }

        let result = if self.post.is_new() {
            self.submit_new().await
        } else {
            self.submit_update().await
        };

        match result {
            Ok(saved) => {
                info!(target = "blog_admin::editor", id = %saved.id, "post saved");
                self.baseline = saved.clone();
                self.post = saved;
                self.state = EditorState::Viewing;
                self.error = None;
                Ok(())
            }
            Err(err) => {
                warn!(target = "blog_admin::editor", error = %err, "save failed");
                self.error = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    async fn submit_new(&self) -> Result<Post, RemoteError> {
        let request = NewPostRequest {
            title: self.post.title.clone(),
            category: self.post.category.clone(),
            body: self.post.body.clone(),
            date: OffsetDateTime::now_utc(),
            tags: self.post.tags.clone(),
            cover_image: self.post.cover_image.clone(),
        };
        self.api.create_post(&request).await
    }

    async fn submit_update(&self) -> Result<Post, RemoteError> {
        let request = UpdatePostRequest {
            title: self.post.title.clone(),
            category: self.post.category.clone(),
            body: self.post.body.clone(),
            date: self.post.date,
            updated_date: OffsetDateTime::now_utc(),
            cover_image: self.post.cover_image.clone(),
            tags: self.post.tags.clone(),
        };
        let mut saved = self.api.update_post(&self.post.id, &request).await?;
        if saved.updated_date.is_none() {
            saved.updated_date = Some(OffsetDateTime::now_utc());
        }
        Ok(saved)
    }
}
