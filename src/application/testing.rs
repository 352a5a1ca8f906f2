//! In-memory stand-ins for the remote seams, shared by the flow tests.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use blog_admin_api_types::{Acknowledgement, NewPostRequest, Post, Tag, UpdatePostRequest};
use time::OffsetDateTime;
use time::macros::datetime;

use super::auth::{AuthError, AuthProvider, User};
use super::repos::{PostsApi, RemoteError, TagsApi};

fn server_error() -> RemoteError {
    RemoteError::Status {
        status: 500,
        body: "boom".into(),
    }
}

fn not_found() -> RemoteError {
    RemoteError::Status {
        status: 404,
        body: "{}".into(),
    }
}

pub fn sample_post(id: &str, title: &str) -> Post {
    let mut post = Post::draft(datetime!(2024-05-01 10:00:00 UTC));
    post.id = id.to_string();
    post.title = title.to_string();
    post.body = format!("<p>{title}</p>");
    post
}

#[derive(Default)]
pub struct FakePosts {
    posts: Mutex<Vec<Post>>,
    failing: Mutex<HashSet<&'static str>>,
    calls: Mutex<Vec<String>>,
    next_id: AtomicUsize,
    stamp_updates: bool,
}

impl FakePosts {
    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts: Mutex::new(posts),
            ..Self::default()
        }
    }

    /// Update responses carry a server-side `updated_date`.
    pub fn stamping_updates(mut self) -> Self {
        self.stamp_updates = true;
        self
    }

    pub fn fail(&self, operation: &'static str) {
        self.failing.lock().expect("lock").insert(operation);
    }

    pub fn recover(&self, operation: &'static str) {
        self.failing.lock().expect("lock").remove(operation);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("lock").clone()
    }

    pub fn stored(&self, id: &str) -> Option<Post> {
        self.posts
            .lock()
            .expect("lock")
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    fn record(&self, operation: &'static str, detail: &str) -> Result<(), RemoteError> {
        self.calls
            .lock()
            .expect("lock")
            .push(format!("{operation} {detail}").trim_end().to_string());
        if self.failing.lock().expect("lock").contains(operation) {
            return Err(server_error());
        }
        Ok(())
    }
}

#[async_trait]
impl PostsApi for FakePosts {
    async fn list_posts(&self) -> Result<Vec<Post>, RemoteError> {
        self.record("list", "")?;
        Ok(self.posts.lock().expect("lock").clone())
    }

    async fn get_post(&self, id: &str) -> Result<Post, RemoteError> {
        self.record("get", id)?;
        self.stored(id).ok_or_else(not_found)
    }

    async fn create_post(&self, request: &NewPostRequest) -> Result<Post, RemoteError> {
        self.record("create", &request.title)?;
        let id = format!("new-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let post = Post {
            id,
            title: request.title.clone(),
            category: request.category.clone(),
            body: request.body.clone(),
            cover_image: request.cover_image.clone(),
            date: request.date,
            updated_date: None,
            status: None,
            tags: request.tags.clone(),
        };
        self.posts.lock().expect("lock").push(post.clone());
        Ok(post)
    }

    async fn update_post(
        &self,
        id: &str,
        request: &UpdatePostRequest,
    ) -> Result<Post, RemoteError> {
        self.record("update", id)?;
        let mut posts = self.posts.lock().expect("lock");
        let post = posts.iter_mut().find(|p| p.id == id).ok_or_else(not_found)?;
        post.title = request.title.clone();
        post.category = request.category.clone();
        post.body = request.body.clone();
        post.cover_image = request.cover_image.clone();
        post.date = request.date;
        post.tags = request.tags.clone();
        let mut response = post.clone();
        if self.stamp_updates {
            post.updated_date = Some(request.updated_date);
            response.updated_date = Some(request.updated_date);
        } else {
            response.updated_date = None;
        }
        Ok(response)
    }

    async fn delete_post(&self, id: &str) -> Result<Acknowledgement, RemoteError> {
        self.record("delete", id)?;
        let mut posts = self.posts.lock().expect("lock");
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(not_found());
        }
        Ok(Acknowledgement::new("Post deleted"))
    }
}

#[derive(Default)]
pub struct FakeTags {
    vocabulary: Mutex<Vec<Tag>>,
    failing: Mutex<HashSet<&'static str>>,
    calls: Mutex<Vec<String>>,
    next_id: AtomicUsize,
}

impl FakeTags {
    pub fn with_tags(tags: Vec<Tag>) -> Self {
        Self {
            vocabulary: Mutex::new(tags),
            ..Self::default()
        }
    }

    pub fn fail(&self, operation: &'static str) {
        self.failing.lock().expect("lock").insert(operation);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("lock").clone()
    }

    pub fn remote_vocabulary(&self) -> Vec<Tag> {
        self.vocabulary.lock().expect("lock").clone()
    }

    fn record(&self, operation: &'static str, detail: &str) -> Result<(), RemoteError> {
        self.calls
            .lock()
            .expect("lock")
            .push(format!("{operation} {detail}").trim_end().to_string());
        if self.failing.lock().expect("lock").contains(operation) {
            return Err(server_error());
        }
        Ok(())
    }
}

#[async_trait]
impl TagsApi for FakeTags {
    async fn list_tags(&self) -> Result<Vec<Tag>, RemoteError> {
        self.record("list", "")?;
        Ok(self.remote_vocabulary())
    }

    async fn add_tag(&self, name: &str) -> Result<Tag, RemoteError> {
        self.record("add", name)?;
        let mut vocabulary = self.vocabulary.lock().expect("lock");
        if let Some(existing) = vocabulary.iter().find(|t| t.matches_name(name)) {
            return Ok(existing.clone());
        }
        let tag = Tag::new(
            format!("t{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 100),
            name,
        );
        vocabulary.push(tag.clone());
        Ok(tag)
    }

    async fn delete_tag(&self, tag: &Tag) -> Result<Acknowledgement, RemoteError> {
        self.record("delete", &tag.id)?;
        self.vocabulary
            .lock()
            .expect("lock")
            .retain(|t| t.id != tag.id);
        Ok(Acknowledgement::new("Tag deleted"))
    }
}

#[derive(Default)]
pub struct FakeAuth {
    credentials: Option<(String, String)>,
    current: Mutex<Option<User>>,
    sign_ins: AtomicUsize,
}

impl FakeAuth {
    pub fn with_password(email: &str, password: &str) -> Self {
        Self {
            credentials: Some((email.to_string(), password.to_string())),
            ..Self::default()
        }
    }

    pub fn signed_in(email: &str) -> Self {
        let auth = Self::default();
        *auth.current.lock().expect("lock") = Some(user(email));
        auth
    }

    pub fn sign_in_calls(&self) -> usize {
        self.sign_ins.load(Ordering::SeqCst)
    }
}

fn user(email: &str) -> User {
    User {
        uid: "uid-1".into(),
        email: email.to_string(),
        id_token: "token".into(),
        expires_at: OffsetDateTime::now_utc() + time::Duration::hours(1),
    }
}

#[async_trait]
impl AuthProvider for FakeAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<User, AuthError> {
        self.sign_ins.fetch_add(1, Ordering::SeqCst);
        match &self.credentials {
            Some((known_email, known_password))
                if known_email == email && known_password == password =>
            {
                let user = user(email);
                *self.current.lock().expect("lock") = Some(user.clone());
                Ok(user)
            }
            _ => Err(AuthError::Rejected {
                code: "auth/wrong-password".into(),
                message: "INVALID_PASSWORD".into(),
            }),
        }
    }

    fn current_user(&self) -> Option<User> {
        self.current.lock().expect("lock").clone()
    }

    fn sign_out(&self) -> Result<(), AuthError> {
        *self.current.lock().expect("lock") = None;
        Ok(())
    }
}
