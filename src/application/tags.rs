//! Tag management on the editor screen.
//!
//! Associating and dissociating tags only changes the post held by the
//! editor; those changes reach the API with the next save. Creating and
//! deleting vocabulary entries are immediate requests.

use std::sync::Arc;

use blog_admin_api_types::{Post, Tag};
use tracing::{error, info, warn};

use super::confirm::Confirm;
use super::repos::{RemoteError, TagsApi};
use crate::domain::tags::{contains_name, normalize_name, push_unique, remove_id};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddTagOutcome {
    Added(Tag),
    /// The post already carries a tag with this name; nothing was sent.
    AlreadyOnPost,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VocabularyDelete {
    Deleted,
    Declined,
}

pub struct TagSession {
    api: Arc<dyn TagsApi>,
    vocabulary: Vec<Tag>,
    input: String,
}

impl TagSession {
    pub fn new(api: Arc<dyn TagsApi>) -> Self {
        Self {
            api,
            vocabulary: Vec::new(),
            input: String::new(),
        }
    }

    /// Replace the local vocabulary with the server's. A failure is logged and
    /// the previous vocabulary is kept.
    pub async fn fetch_vocabulary(&mut self) -> Result<(), RemoteError> {
        match self.api.list_tags().await {
            Ok(tags) => {
                self.vocabulary = tags;
                Ok(())
            }
            Err(err) => {
                error!(target = "blog_admin::tags", error = %err, "failed to fetch tags");
                Err(err)
            }
        }
    }

    pub fn vocabulary(&self) -> &[Tag] {
        &self.vocabulary
    }

    /// Vocabulary entry by name, compared case-insensitively.
    pub fn find(&self, name: &str) -> Option<&Tag> {
        self.vocabulary.iter().find(|tag| tag.matches_name(name))
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    /// Add whatever is typed in the tag input to the vocabulary and the post.
    ///
    /// The input is cleared when the tag was added or the post already had
    /// it. A failed request leaves the typed name in place.
    pub async fn add_from_input(&mut self, post: &mut Post) -> Result<AddTagOutcome, RemoteError> {
        let typed = self.input.clone();
        let outcome = self.add(&typed, post).await?;
        if matches!(outcome, AddTagOutcome::Added(_) | AddTagOutcome::AlreadyOnPost) {
            self.input.clear();
        }
        Ok(outcome)
    }

    pub async fn add(&mut self, name: &str, post: &mut Post) -> Result<AddTagOutcome, RemoteError> {
        let Some(name) = normalize_name(name) else {
            return Ok(AddTagOutcome::Empty);
        };
        if contains_name(&post.tags, name) {
            return Ok(AddTagOutcome::AlreadyOnPost);
        }

        let tag = self.create_in_vocabulary(name).await?;
        push_unique(&mut post.tags, tag.clone());
        Ok(AddTagOutcome::Added(tag))
    }

    /// Create a vocabulary entry without touching any post.
    pub async fn create_in_vocabulary(&mut self, name: &str) -> Result<Tag, RemoteError> {
        let tag = self.api.add_tag(name).await.inspect_err(|err| {
            error!(target = "blog_admin::tags", tag = name, error = %err, "failed to add tag");
        })?;
        info!(target = "blog_admin::tags", id = %tag.id, tag = %tag.tag, "tag added");
        if !self.vocabulary.iter().any(|known| known.id == tag.id) {
            self.vocabulary.push(tag.clone());
        }
        Ok(tag)
    }

    /// Put an existing vocabulary tag on the post. Returns false when the post
    /// already has it.
    pub fn select(&self, tag: &Tag, post: &mut Post) -> bool {
        push_unique(&mut post.tags, tag.clone())
    }

    /// Take a tag off the post only.
    pub fn deselect(&self, id: &str, post: &mut Post) -> Option<Tag> {
        remove_id(&mut post.tags, id)
    }

    /// Remove a tag from the global vocabulary and from `post`.
    ///
    /// The local removal happens before the request and stays in place when
    /// the request fails.
    pub async fn delete_from_vocabulary(
        &mut self,
        tag: &Tag,
        post: Option<&mut Post>,
        confirm: &dyn Confirm,
    ) -> Result<VocabularyDelete, RemoteError> {
        let prompt = format!(
            "Are you sure you want to delete the tag \"{}\" from all posts?",
            tag.tag
        );
        if !confirm.confirm(&prompt) {
            return Ok(VocabularyDelete::Declined);
        }

        self.vocabulary.retain(|known| known.id != tag.id);
        if let Some(post) = post {
            remove_id(&mut post.tags, &tag.id);
        }

        match self.api.delete_tag(tag).await {
            Ok(_) => {
                info!(target = "blog_admin::tags", id = %tag.id, "tag deleted");
                Ok(VocabularyDelete::Deleted)
            }
            Err(err) => {
                warn!(
                    target = "blog_admin::tags",
                    id = %tag.id,
                    error = %err,
                    "failed to delete tag; local copy already removed"
                );
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::confirm::AssumeYes;
    use crate::application::testing::{FakeTags, sample_post};

    fn vocabulary() -> Vec<Tag> {
        vec![Tag::new("t1", "Rust"), Tag::new("t2", "Axum")]
    }

    async fn session(api: &Arc<FakeTags>) -> TagSession {
        let mut session = TagSession::new(api.clone());
        session.fetch_vocabulary().await.expect("vocabulary");
        session
    }

    #[tokio::test]
    async fn duplicate_on_post_issues_no_request_and_clears_input() {
        let api = Arc::new(FakeTags::with_tags(vocabulary()));
        let mut tags = session(&api).await;
        let mut post = sample_post("p1", "Hello");
        post.tags = vec![Tag::new("t1", "Rust")];

        tags.set_input("rUST");
        let outcome = tags.add_from_input(&mut post).await.expect("add");

        assert_eq!(outcome, AddTagOutcome::AlreadyOnPost);
        assert_eq!(tags.input(), "");
        assert_eq!(post.tags.len(), 1);
        assert_eq!(api.calls(), ["list"]);
    }

    #[tokio::test]
    async fn new_tag_uses_server_identifier() {
        let api = Arc::new(FakeTags::with_tags(vocabulary()));
        let mut tags = session(&api).await;
        let mut post = sample_post("p1", "Hello");

        tags.set_input("  tokio ");
        let outcome = tags.add_from_input(&mut post).await.expect("add");

        let AddTagOutcome::Added(tag) = outcome else {
            panic!("expected a new tag");
        };
        assert_eq!(tag, Tag::new("t100", "tokio"));
        assert_eq!(post.tags, [tag.clone()]);
        assert_eq!(tags.input(), "");
        assert!(tags.vocabulary().contains(&tag));
        assert_eq!(api.calls(), ["list", "add tokio"]);
    }

    #[tokio::test]
    async fn existing_vocabulary_name_is_not_duplicated_locally() {
        let api = Arc::new(FakeTags::with_tags(vocabulary()));
        let mut tags = session(&api).await;
        let mut post = sample_post("p1", "Hello");

        let outcome = tags.add("axum", &mut post).await.expect("add");

        assert_eq!(outcome, AddTagOutcome::Added(Tag::new("t2", "Axum")));
        assert_eq!(tags.vocabulary().len(), 2);
    }

    #[tokio::test]
    async fn blank_input_is_ignored() {
        let api = Arc::new(FakeTags::default());
        let mut tags = TagSession::new(api.clone());
        let mut post = sample_post("p1", "Hello");

        tags.set_input("   ");
        assert_eq!(
            tags.add_from_input(&mut post).await.expect("add"),
            AddTagOutcome::Empty
        );
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn failed_add_leaves_post_and_vocabulary_unchanged() {
        let api = Arc::new(FakeTags::with_tags(vocabulary()));
        let mut tags = session(&api).await;
        let mut post = sample_post("p1", "Hello");
        api.fail("add");

        let err = tags.add("tokio", &mut post).await.expect_err("add fails");
        assert_eq!(err.status(), Some(500));
        assert!(post.tags.is_empty());
        assert_eq!(tags.vocabulary().len(), 2);
    }

    #[tokio::test]
    async fn failed_add_keeps_typed_input() {
        let api = Arc::new(FakeTags::with_tags(vocabulary()));
        let mut tags = session(&api).await;
        let mut post = sample_post("p1", "Hello");
        api.fail("add");

        tags.set_input("tokio");
        assert!(tags.add_from_input(&mut post).await.is_err());
        assert_eq!(tags.input(), "tokio");
        assert!(post.tags.is_empty());
    }

    #[tokio::test]
    async fn select_and_deselect_are_local() {
        let api = Arc::new(FakeTags::with_tags(vocabulary()));
        let tags = session(&api).await;
        let mut post = sample_post("p1", "Hello");

        let rust = tags.find("rust").cloned().expect("known tag");
        assert!(tags.select(&rust, &mut post));
        assert!(!tags.select(&rust, &mut post));
        assert_eq!(post.tags.len(), 1);

        assert_eq!(tags.deselect("t1", &mut post), Some(rust));
        assert!(post.tags.is_empty());
        assert_eq!(api.calls(), ["list"]);
    }

    #[tokio::test]
    async fn vocabulary_delete_strips_tag_from_post() {
        let api = Arc::new(FakeTags::with_tags(vocabulary()));
        let mut tags = session(&api).await;
        let mut post = sample_post("p1", "Hello");
        post.tags = vocabulary();

        let rust = Tag::new("t1", "Rust");
        let outcome = tags
            .delete_from_vocabulary(&rust, Some(&mut post), &AssumeYes)
            .await
            .expect("delete");

        assert_eq!(outcome, VocabularyDelete::Deleted);
        assert_eq!(post.tags, [Tag::new("t2", "Axum")]);
        assert_eq!(tags.vocabulary(), [Tag::new("t2", "Axum")]);
        assert_eq!(api.remote_vocabulary(), [Tag::new("t2", "Axum")]);
    }

    #[tokio::test]
    async fn failed_vocabulary_delete_keeps_local_removal() {
        let api = Arc::new(FakeTags::with_tags(vocabulary()));
        let mut tags = session(&api).await;
        api.fail("delete");

        let rust = Tag::new("t1", "Rust");
        assert!(
            tags.delete_from_vocabulary(&rust, None, &AssumeYes)
                .await
                .is_err()
        );
        assert_eq!(tags.vocabulary().len(), 1);
        assert_eq!(api.remote_vocabulary().len(), 2);
    }

    #[tokio::test]
    async fn declined_vocabulary_delete_changes_nothing() {
        let api = Arc::new(FakeTags::with_tags(vocabulary()));
        let mut tags = session(&api).await;
        let decline = |_: &str| false;

        let outcome = tags
            .delete_from_vocabulary(&Tag::new("t1", "Rust"), None, &decline)
            .await
            .expect("declined");
        assert_eq!(outcome, VocabularyDelete::Declined);
        assert_eq!(tags.vocabulary().len(), 2);
        assert_eq!(api.calls(), ["list"]);
    }
}
