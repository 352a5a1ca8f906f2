//! Identity provider capability: sign in and ask who is signed in.

use async_trait::async_trait;
use blog_admin_api_types::timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub uid: String,
    pub email: String,
    pub id_token: String,
    #[serde(with = "timestamp")]
    pub expires_at: OffsetDateTime,
}

impl User {
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expires_at <= now
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("email and password are required")]
    MissingCredentials,
    /// The provider refused the credentials; shown as `code message`.
    #[error("{code} {message}")]
    Rejected { code: String, message: String },
    #[error("identity provider unreachable: {0}")]
    Transport(String),
    #[error("session store error: {0}")]
    Store(String),
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<User, AuthError>;

    /// The signed-in user, if any session is still valid.
    fn current_user(&self) -> Option<User>;

    fn sign_out(&self) -> Result<(), AuthError>;
}
