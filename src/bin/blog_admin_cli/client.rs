#![deny(clippy::all, clippy::pedantic)]

use std::path::PathBuf;
use std::sync::Arc;

use blog_admin::application::auth::{AuthError, User};
use blog_admin::application::editor::EditorError;
use blog_admin::application::repos::RemoteError;
use blog_admin::application::session::{Access, SessionGate};
use blog_admin::domain::filter::PublishedRule;
use blog_admin::infra::auth::{IdentityProvider, SessionStore};
use blog_admin::infra::error::InfraError;
use blog_admin::infra::http::ApiClient;
use thiserror::Error;

use crate::args::Cli;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("API URL is required (use --api-url or BLOG_ADMIN_API_URL)")]
    MissingApiUrl,
    #[error("identity provider API key is required (use --auth-api-key or BLOG_ADMIN_AUTH_API_KEY)")]
    MissingAuthKey,
    #[error("not signed in; run `blog-admin-cli login --email <EMAIL>` first")]
    SignInRequired,
    #[error("failed to read input file {path}: {source}")]
    InputFile {
        path: String,
        source: std::io::Error,
    },
    #[error(transparent)]
    Setup(#[from] InfraError),
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to render output: {0}")]
    Output(String),
}

pub struct Ctx {
    pub auth: IdentityProvider,
    pub published_rule: PublishedRule,
    api_url: Option<String>,
    has_auth_key: bool,
}

impl Ctx {
    pub fn new(
        api_url: Option<String>,
        auth: IdentityProvider,
        has_auth_key: bool,
        published_rule: PublishedRule,
    ) -> Self {
        Self {
            auth,
            published_rule,
            api_url,
            has_auth_key,
        }
    }

    pub fn gate(&self) -> SessionGate<'_> {
        SessionGate::new(&self.auth)
    }

    /// The signed-in user, or [`CliError::SignInRequired`].
    pub fn session(&self) -> Result<User, CliError> {
        match self.gate().check() {
            Access::Granted(user) => Ok(user),
            Access::RedirectToLogin => Err(CliError::SignInRequired),
        }
    }

    pub fn require_auth_key(&self) -> Result<(), CliError> {
        if self.has_auth_key {
            Ok(())
        } else {
            Err(CliError::MissingAuthKey)
        }
    }

    /// API client acting for `user`.
    pub fn api(&self, user: &User) -> Result<Arc<ApiClient>, CliError> {
        let url = self.api_url.as_deref().ok_or(CliError::MissingApiUrl)?;
        let client = ApiClient::new(url)?.with_token(user.id_token.clone());
        Ok(Arc::new(client))
    }

    /// Pass the session gate and build the API client in one step.
    pub fn signed_in_api(&self) -> Result<Arc<ApiClient>, CliError> {
        let user = self.session()?;
        self.api(&user)
    }
}

pub fn default_session_file() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".blog-admin").join("session.json"),
        None => PathBuf::from(".blog-admin-session.json"),
    }
}

pub fn build_ctx_from_cli(cli: &Cli) -> Result<Ctx, CliError> {
    let session_file = cli
        .session_file
        .clone()
        .unwrap_or_else(default_session_file);
    let api_key = cli
        .auth_api_key
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty());

    let auth = IdentityProvider::new(
        &cli.auth_url,
        api_key.unwrap_or_default(),
        SessionStore::new(session_file),
    )?;
    let api_url = cli
        .api_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string);

    Ok(Ctx::new(
        api_url,
        auth,
        api_key.is_some(),
        cli.published_rule,
    ))
}
