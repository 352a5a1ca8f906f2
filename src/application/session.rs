//! Gate in front of every protected screen.

use tracing::{info, warn};

use super::auth::{AuthError, AuthProvider, User};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Granted(User),
    /// No signed-in user; the caller should show the login flow instead.
    RedirectToLogin,
}

pub struct SessionGate<'a> {
    provider: &'a dyn AuthProvider,
}

impl<'a> SessionGate<'a> {
    pub fn new(provider: &'a dyn AuthProvider) -> Self {
        Self { provider }
    }

    pub fn check(&self) -> Access {
        match self.provider.current_user() {
            Some(user) => Access::Granted(user),
            None => Access::RedirectToLogin,
        }
    }

    /// Sign in with email and password. Failures are returned for display on
    /// the login form; they never redirect.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        match self.provider.sign_in(email, password).await {
            Ok(user) => {
                info!(target = "blog_admin::session", email = %user.email, "signed in");
                Ok(user)
            }
            Err(err) => {
                warn!(target = "blog_admin::session", error = %err, "sign-in failed");
                Err(err)
            }
        }
    }

    pub fn logout(&self) -> Result<(), AuthError> {
        self.provider.sign_out()
    }
}
