use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("`{entity}` not found")]
    NotFound { entity: &'static str },
    #[error("validation failed: {message}")]
    Validation { message: String },
    #[error("invalid URL `{value}`: {reason}")]
    InvalidUrl { value: String, reason: String },
}

impl DomainError {
    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn invalid_url(value: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidUrl {
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}

/// Accept only absolute http(s) URLs for images referenced from a post.
pub fn validate_image_url(raw: &str) -> Result<String, DomainError> {
    let trimmed = raw.trim();
    let parsed = url::Url::parse(trimmed).map_err(|err| DomainError::invalid_url(trimmed, err))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed.to_string()),
        other => Err(DomainError::invalid_url(
            trimmed,
            format!("unsupported scheme `{other}`"),
        )),
    }
}
