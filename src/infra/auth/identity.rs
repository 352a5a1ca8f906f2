use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tracing::{debug, warn};

use super::store::SessionStore;
use crate::application::auth::{AuthError, AuthProvider, User};
use crate::infra::error::InfraError;

const SIGN_IN_PATH: &str = "v1/accounts:signInWithPassword";
const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    email: String,
    id_token: String,
    #[serde(default)]
    expires_in: Option<String>,
}

#[derive(Deserialize)]
struct ProviderErrorBody {
    error: ProviderError,
}

#[derive(Deserialize)]
struct ProviderError {
    #[serde(default)]
    message: String,
}

/// Email/password identity provider speaking the `accounts:signInWithPassword`
/// REST protocol.
pub struct IdentityProvider {
    client: Client,
    endpoint: Url,
    store: SessionStore,
    current: RwLock<Option<User>>,
}

impl IdentityProvider {
    /// Build the provider and pick up any session saved by an earlier run.
    pub fn new(auth_url: &str, api_key: &str, store: SessionStore) -> Result<Self, InfraError> {
        let mut base = Url::parse(auth_url.trim())
            .map_err(|err| InfraError::configuration(format!("invalid auth URL: {err}")))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let mut endpoint = base
            .join(SIGN_IN_PATH)
            .map_err(|err| InfraError::configuration(format!("invalid auth URL: {err}")))?;
        endpoint.query_pairs_mut().append_pair("key", api_key);

        let client = Client::builder()
            .user_agent(concat!("blog-admin/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| InfraError::Client(err.to_string()))?;

        let saved = match store.load() {
            Ok(user) => user,
            Err(err) => {
                warn!(target = "blog_admin::auth", error = %err, "ignoring unreadable session");
                None
            }
        };

        Ok(Self {
            client,
            endpoint,
            store,
            current: RwLock::new(saved),
        })
    }

    fn remember(&self, user: Option<User>) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = user;
    }
}

#[async_trait]
impl AuthProvider for IdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let request = SignInRequest {
            email,
            password,
            return_secure_token: true,
        };
        let resp = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|err| AuthError::Transport(err.to_string()))?;

        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|err| AuthError::Transport(err.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ProviderErrorBody>(&bytes)
                .map(|body| body.error.message)
                .unwrap_or_else(|_| format!("HTTP error, status: {}", status.as_u16()));
            return Err(AuthError::Rejected {
                code: error_code(&message).to_string(),
                message,
            });
        }

        let body: SignInResponse = serde_json::from_slice(&bytes)
            .map_err(|err| AuthError::Transport(format!("unexpected sign-in response: {err}")))?;
        let lifetime = body
            .expires_in
            .as_deref()
            .and_then(|secs| secs.parse::<i64>().ok())
            .unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS);

        let user = User {
            uid: body.local_id,
            email: body.email,
            id_token: body.id_token,
            expires_at: OffsetDateTime::now_utc() + Duration::seconds(lifetime),
        };
        self.store.save(&user)?;
        debug!(target = "blog_admin::auth", path = %self.store.path().display(), "session saved");
        self.remember(Some(user.clone()));
        Ok(user)
    }

    fn current_user(&self) -> Option<User> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .filter(|user| !user.is_expired(OffsetDateTime::now_utc()))
    }

    fn sign_out(&self) -> Result<(), AuthError> {
        self.remember(None);
        self.store.clear()
    }
}

/// Map the provider's error message onto the client-side error codes users
/// see on the login form.
fn error_code(message: &str) -> &'static str {
    // Messages may carry a suffix such as "TOO_MANY_ATTEMPTS_TRY_LATER : ...".
    let key = message.split([' ', ':']).next().unwrap_or_default();
    match key {
        "INVALID_PASSWORD" => "auth/wrong-password",
        "EMAIL_NOT_FOUND" => "auth/user-not-found",
        "INVALID_LOGIN_CREDENTIALS" => "auth/invalid-credential",
        "INVALID_EMAIL" => "auth/invalid-email",
        "USER_DISABLED" => "auth/user-disabled",
        "TOO_MANY_ATTEMPTS_TRY_LATER" => "auth/too-many-requests",
        "API_KEY_INVALID" | "INVALID_API_KEY" => "auth/invalid-api-key",
        _ => "auth/internal-error",
    }
}
