//! HTTP implementation of the remote seams.

use async_trait::async_trait;
use blog_admin_api_types::{
    Acknowledgement, NewPostRequest, Post, Tag, TagAddRequest, TagDeleteRequest, TagsResponse,
    UpdatePostRequest,
};
use reqwest::{Client, Method, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::application::repos::{PostsApi, RemoteError, TagsApi};
use crate::infra::error::InfraError;

/// Client for the blog REST API.
///
/// Paths are resolved under the configured base URL, so a base such as
/// `https://host/blog` keeps its `/blog` prefix.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base: Url,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, InfraError> {
        let mut base = Url::parse(base_url.trim())
            .map_err(|err| InfraError::configuration(format!("invalid API URL: {err}")))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(InfraError::configuration(format!(
                "API URL must use http or https, got `{}`",
                base.scheme()
            )));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = Client::builder()
            .user_agent(Self::user_agent())
            .build()
            .map_err(|err| InfraError::Client(err.to_string()))?;
        Ok(Self {
            client,
            base,
            token: None,
        })
    }

    /// Send `token` as a bearer credential on every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn user_agent() -> &'static str {
        concat!("blog-admin/", env!("CARGO_PKG_VERSION"))
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, RemoteError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| RemoteError::Transport("API URL cannot carry a path".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<B, T>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<T, RemoteError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        debug!(target = "blog_admin::http::client", %method, %url, "request");

        let mut req = self.client.request(method, url);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req
            .send()
            .await
            .map_err(|err| RemoteError::Transport(err.to_string()))?;
        Self::handle(resp).await
    }

    async fn handle<T: DeserializeOwned>(resp: Response) -> Result<T, RemoteError> {
        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|err| RemoteError::Transport(err.to_string()))?;
        if !status.is_success() {
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }
        if bytes.is_empty() {
            return serde_json::from_slice(b"null").map_err(|e| RemoteError::Decode(e.to_string()));
        }
        serde_json::from_slice(&bytes).map_err(|e| RemoteError::Decode(e.to_string()))
    }
}

#[async_trait]
impl PostsApi for ApiClient {
    async fn list_posts(&self) -> Result<Vec<Post>, RemoteError> {
        self.send::<(), _>(Method::GET, &["api", "posts"], None)
            .await
    }

    async fn get_post(&self, id: &str) -> Result<Post, RemoteError> {
        self.send::<(), _>(Method::GET, &["api", "posts", id], None)
            .await
    }

    async fn create_post(&self, request: &NewPostRequest) -> Result<Post, RemoteError> {
        self.send(Method::POST, &["api", "submit"], Some(request))
            .await
    }

    async fn update_post(
        &self,
        id: &str,
        request: &UpdatePostRequest,
    ) -> Result<Post, RemoteError> {
        self.send(Method::PUT, &["api", "editPost", id], Some(request))
            .await
    }

    async fn delete_post(&self, id: &str) -> Result<Acknowledgement, RemoteError> {
        let payload = self
            .send::<(), Value>(Method::DELETE, &["api", "delete", id], None)
            .await?;
        Ok(acknowledgement(payload))
    }
}

#[async_trait]
impl TagsApi for ApiClient {
    async fn list_tags(&self) -> Result<Vec<Tag>, RemoteError> {
        let response: TagsResponse = self
            .send::<(), _>(Method::GET, &["api", "tags"], None)
            .await?;
        Ok(response.tags)
    }

    async fn add_tag(&self, name: &str) -> Result<Tag, RemoteError> {
        let body = TagAddRequest {
            tag: name.to_string(),
        };
        self.send(Method::POST, &["api", "tagAdd"], Some(&body))
            .await
    }

    async fn delete_tag(&self, tag: &Tag) -> Result<Acknowledgement, RemoteError> {
        let body = TagDeleteRequest {
            tag_to_remove: tag.clone(),
        };
        let payload: Value = self
            .send(Method::DELETE, &["api", "tagDelete"], Some(&body))
            .await?;
        Ok(acknowledgement(payload))
    }
}

/// Any successful delete counts as confirmed; only an object's `message` is
/// kept.
fn acknowledgement(payload: Value) -> Acknowledgement {
    match payload {
        Value::Object(mut fields) => Acknowledgement {
            message: match fields.remove("message") {
                Some(Value::String(message)) => Some(message),
                _ => None,
            },
        },
        _ => Acknowledgement::default(),
    }
}
