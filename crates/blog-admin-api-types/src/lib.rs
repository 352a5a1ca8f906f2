//! Request and response shapes for the blog admin REST API.
//!
//! The field names follow the wire format the API already speaks (`_id`,
//! `updated_date`, `tagToRemove`), so both the admin client and the reference
//! backend can share one definition.

#![deny(clippy::all, clippy::pedantic)]

mod posts;
mod tags;
pub mod timestamp;

pub use posts::{Category, NewPostRequest, Post, PostStatus, UpdatePostRequest};
pub use tags::{Tag, TagAddRequest, TagDeleteRequest, TagsResponse};

use serde::{Deserialize, Deserializer, Serialize};

/// Confirmation body returned by the delete endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Acknowledgement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Acknowledgement {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

/// Treat an explicit `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
