use serde::{Deserialize, Serialize};

use crate::null_as_default;

/// A label from the shared vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Tag {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub tag: String,
}

impl Tag {
    pub fn new(id: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag: tag.into(),
        }
    }

    /// Case-insensitive comparison against a display string.
    pub fn matches_name(&self, name: &str) -> bool {
        self.tag.to_lowercase() == name.to_lowercase()
    }
}

/// Body of `GET /api/tags`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TagsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<Tag>,
}

/// Body of `POST /api/tagAdd`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TagAddRequest {
    pub tag: String,
}

/// Body of `DELETE /api/tagDelete`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TagDeleteRequest {
    #[serde(rename = "tagToRemove")]
    pub tag_to_remove: Tag,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_request_uses_wire_name() {
        let body = TagDeleteRequest {
            tag_to_remove: Tag::new("t9", "go"),
        };
        let value = serde_json::to_value(&body).expect("json");
        assert_eq!(value["tagToRemove"]["_id"], "t9");
        assert_eq!(value["tagToRemove"]["tag"], "go");
    }

    #[test]
    fn name_match_ignores_case() {
        let tag = Tag::new("1", "Rust");
        assert!(tag.matches_name("rust"));
        assert!(tag.matches_name("RUST"));
        assert!(!tag.matches_name("rusty"));
    }
}
