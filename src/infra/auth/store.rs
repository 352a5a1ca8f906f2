use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::application::auth::{AuthError, User};

/// JSON file holding the signed-in user.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored user, or `None` when no session file exists.
    pub fn load(&self) -> Result<Option<User>, AuthError> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(self.error("read", &err)),
        };
        serde_json::from_slice(&raw)
            .map(Some)
            .map_err(|err| self.error("parse", &err))
    }

    pub fn save(&self, user: &User) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| self.error("create directory for", &err))?;
        }
        let raw = serde_json::to_vec_pretty(user).map_err(|err| self.error("encode", &err))?;

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        std::os::unix::fs::OpenOptionsExt::mode(&mut options, 0o600);
        let mut file = options
            .open(&self.path)
            .map_err(|err| self.error("write", &err))?;
        // `mode` only applies on creation; an older file may be wider.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))
                .map_err(|err| self.error("restrict", &err))?;
        }
        file.write_all(&raw).map_err(|err| self.error("write", &err))
    }

    pub fn clear(&self) -> Result<(), AuthError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(self.error("remove", &err)),
        }
    }

    fn error(&self, action: &str, err: &dyn std::error::Error) -> AuthError {
        AuthError::Store(format!(
            "failed to {action} {}: {err}",
            self.path.display()
        ))
    }
}
