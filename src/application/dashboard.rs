//! Post list screen: load everything once, filter locally, delete on request.

use std::collections::BTreeSet;
use std::sync::Arc;

use blog_admin_api_types::Post;
use tracing::{info, warn};

use super::confirm::Confirm;
use super::repos::{PostsApi, RemoteError};
use crate::domain::filter::PostFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Declined,
}

pub struct Dashboard {
    api: Arc<dyn PostsApi>,
    posts: Vec<Post>,
    error: Option<String>,
    pub filter: PostFilter,
}

impl Dashboard {
    pub fn new(api: Arc<dyn PostsApi>) -> Self {
        Self {
            api,
            posts: Vec::new(),
            error: None,
            filter: PostFilter::default(),
        }
    }

    /// Fetch the full post list. On failure the previous list is kept and the
    /// error message is surfaced through [`Dashboard::error`].
    pub async fn load(&mut self) -> Result<(), RemoteError> {
        match self.api.list_posts().await {
            Ok(posts) => {
                info!(
                    target = "blog_admin::dashboard",
                    count = posts.len(),
                    "posts loaded"
                );
                self.posts = posts;
                self.error = None;
                Ok(())
            }
            Err(err) => {
                warn!(target = "blog_admin::dashboard", error = %err, "failed to load posts");
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn visible(&self) -> Vec<&Post> {
        self.filter.apply(&self.posts)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Every tag name present on a loaded post, for building tag filters.
    pub fn tag_names(&self) -> BTreeSet<&str> {
        self.posts
            .iter()
            .flat_map(|post| post.tags.iter().map(|tag| tag.tag.as_str()))
            .collect()
    }

    /// Delete a post after the user confirms. The local entry is removed only
    /// once the API accepted the delete.
    pub async fn delete(
        &mut self,
        id: &str,
        confirm: &dyn Confirm,
    ) -> Result<DeleteOutcome, RemoteError> {
        let prompt = match self.posts.iter().find(|post| post.id == id) {
            Some(post) => format!("Are you sure you want to delete post \"{}\"?", post.title),
            None => format!("Are you sure you want to delete post {id}?"),
        };
        if !confirm.confirm(&prompt) {
            return Ok(DeleteOutcome::Declined);
        }

        match self.api.delete_post(id).await {
            Ok(ack) => {
                info!(
                    target = "blog_admin::dashboard",
                    id,
                    message = ack.message.as_deref().unwrap_or(""),
                    "post deleted"
                );
                self.posts.retain(|post| post.id != id);
                self.error = None;
                Ok(DeleteOutcome::Deleted)
            }
            Err(err) => {
                warn!(target = "blog_admin::dashboard", id, error = %err, "delete failed");
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::confirm::AssumeYes;
    use crate::application::testing::{FakePosts, sample_post};
    use crate::domain::filter::CategoryFilter;
    use blog_admin_api_types::{Category, PostStatus, Tag};

    fn seeded() -> Arc<FakePosts> {
        let mut workshop = sample_post("a", "Workshop post");
        workshop.category = Category::Workshop;
        workshop.status = Some(PostStatus::Draft);
        workshop.tags = vec![Tag::new("t1", "x")];

        let mut journal = sample_post("b", "Journal post");
        journal.category = Category::Journal;
        journal.status = Some(PostStatus::Published);

        Arc::new(FakePosts::with_posts(vec![workshop, journal]))
    }

    #[tokio::test]
    async fn category_filter_narrows_visible_list() {
        let mut dashboard = Dashboard::new(seeded());
        dashboard.load().await.expect("load");

        dashboard.filter = PostFilter::default().with_category(CategoryFilter::Only(Category::Workshop));
        let visible = dashboard.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "a");
        assert_eq!(dashboard.posts().len(), 2);
    }

    #[tokio::test]
    async fn failed_load_surfaces_error_and_keeps_list() {
        let api = seeded();
        let mut dashboard = Dashboard::new(api.clone());
        dashboard.load().await.expect("first load");

        api.fail("list");
        let err = dashboard.load().await.expect_err("second load fails");
        assert_eq!(err.status(), Some(500));
        assert_eq!(dashboard.error(), Some("HTTP error, status: 500"));
        assert_eq!(dashboard.posts().len(), 2);
    }

    #[tokio::test]
    async fn confirmed_delete_removes_exactly_one_entry() {
        let api = seeded();
        let mut dashboard = Dashboard::new(api.clone());
        dashboard.load().await.expect("load");

        let outcome = dashboard.delete("a", &AssumeYes).await.expect("delete");
        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(
            dashboard.posts().iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
            ["b"]
        );
        assert!(api.calls().contains(&"delete a".to_string()));
    }

    #[tokio::test]
    async fn failed_delete_leaves_list_unchanged() {
        let api = seeded();
        let mut dashboard = Dashboard::new(api.clone());
        dashboard.load().await.expect("load");
        api.fail("delete");

        let err = dashboard.delete("a", &AssumeYes).await.expect_err("delete fails");
        assert_eq!(err.status(), Some(500));
        assert_eq!(dashboard.posts().len(), 2);
        assert_eq!(dashboard.error(), Some("HTTP error, status: 500"));
    }

    #[tokio::test]
    async fn declined_delete_issues_no_request() {
        let api = seeded();
        let mut dashboard = Dashboard::new(api.clone());
        dashboard.load().await.expect("load");

        let asked = std::cell::RefCell::new(String::new());
        let decline = |prompt: &str| {
            asked.replace(prompt.to_string());
            false
        };
        let outcome = dashboard.delete("b", &decline).await.expect("declined");

        assert_eq!(outcome, DeleteOutcome::Declined);
        assert_eq!(
            asked.into_inner(),
            "Are you sure you want to delete post \"Journal post\"?"
        );
        assert_eq!(api.calls(), ["list"]);
        assert_eq!(dashboard.posts().len(), 2);
    }

    #[tokio::test]
    async fn tag_names_are_collected_from_loaded_posts() {
        let mut dashboard = Dashboard::new(seeded());
        dashboard.load().await.expect("load");
        assert_eq!(dashboard.tag_names().into_iter().collect::<Vec<_>>(), ["x"]);
    }
}
