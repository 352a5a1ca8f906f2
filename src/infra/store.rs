//! In-memory storage behind the reference backend.

use std::path::Path;

use blog_admin_api_types::{NewPostRequest, Post, PostStatus, Tag, UpdatePostRequest};
use dashmap::DashMap;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use super::error::InfraError;
use crate::domain::error::DomainError;
use crate::domain::tags::normalize_name;

/// Initial content loaded from a JSON file at startup.
#[derive(Debug, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// Outcome of adding a name to the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagInsert {
    Created(Tag),
    Existing(Tag),
}

#[derive(Default)]
pub struct MemoryStore {
    posts: DashMap<String, Post>,
    tags: RwLock<Vec<Tag>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: Seed) -> Self {
        let posts = DashMap::new();
        for mut post in seed.posts {
            if post.id.is_empty() {
                post.id = new_id();
            }
            posts.insert(post.id.clone(), post);
        }
        Self {
            posts,
            tags: RwLock::new(seed.tags),
        }
    }

    pub async fn load_seed(path: &Path) -> Result<Self, InfraError> {
        let shown = path.display().to_string();
        let raw = tokio::fs::read(path)
            .await
            .map_err(|err| InfraError::seed(&shown, err.to_string()))?;
        let seed: Seed = serde_json::from_slice(&raw)
            .map_err(|err| InfraError::seed(&shown, err.to_string()))?;
        info!(
            target = "blog_admin::store",
            path = %shown,
            posts = seed.posts.len(),
            tags = seed.tags.len(),
            "seed loaded"
        );
        Ok(Self::from_seed(seed))
    }

    /// All posts, newest first.
    pub fn list_posts(&self) -> Vec<Post> {
        let mut posts: Vec<Post> = self.posts.iter().map(|entry| entry.value().clone()).collect();
        posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        posts
    }

    pub fn get_post(&self, id: &str) -> Result<Post, DomainError> {
        self.posts
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| DomainError::not_found("post"))
    }

    pub fn create_post(&self, request: NewPostRequest) -> Result<Post, DomainError> {
        require_title(&request.title)?;
        let post = Post {
            id: new_id(),
            title: request.title,
            category: request.category,
            body: request.body,
            cover_image: request.cover_image,
            date: request.date,
            updated_date: None,
            status: Some(PostStatus::Draft),
            tags: request.tags,
        };
        self.posts.insert(post.id.clone(), post.clone());
        Ok(post)
    }

    /// Overwrite a post unconditionally. Status is kept.
    pub fn update_post(&self, id: &str, request: UpdatePostRequest) -> Result<Post, DomainError> {
        require_title(&request.title)?;
        let mut entry = self
            .posts
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found("post"))?;
        let post = entry.value_mut();
        post.title = request.title;
        post.category = request.category;
        post.body = request.body;
        post.cover_image = request.cover_image;
        post.date = request.date;
        post.updated_date = Some(request.updated_date);
        post.tags = request.tags;
        Ok(post.clone())
    }

    pub fn delete_post(&self, id: &str) -> Result<Post, DomainError> {
        self.posts
            .remove(id)
            .map(|(_, post)| post)
            .ok_or_else(|| DomainError::not_found("post"))
    }

    pub async fn list_tags(&self) -> Vec<Tag> {
        self.tags.read().await.clone()
    }

    /// Add `name` unless an entry with the same name (case-insensitive)
    /// already exists.
    pub async fn add_tag(&self, name: &str) -> Result<TagInsert, DomainError> {
        let name = normalize_name(name).ok_or_else(|| DomainError::validation("tag is required"))?;
        let mut tags = self.tags.write().await;
        if let Some(existing) = tags.iter().find(|tag| tag.matches_name(name)) {
            return Ok(TagInsert::Existing(existing.clone()));
        }
        let tag = Tag::new(new_id(), name);
        tags.push(tag.clone());
        Ok(TagInsert::Created(tag))
    }

    /// Remove a vocabulary entry by id, or by name when no id is given.
    /// Posts keep their copies of the tag.
    pub async fn delete_tag(&self, target: &Tag) -> Result<Tag, DomainError> {
        let mut tags = self.tags.write().await;
        let index = if target.id.is_empty() {
            tags.iter().position(|tag| tag.matches_name(&target.tag))
        } else {
            tags.iter().position(|tag| tag.id == target.id)
        };
        index
            .map(|index| tags.remove(index))
            .ok_or_else(|| DomainError::not_found("tag"))
    }
}

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Blank titles are refused; the title is otherwise stored as submitted.
fn require_title(title: &str) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::validation("title is required"));
    }
    Ok(())
}
