use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

use crate::tags::Tag;
use crate::{null_as_default, timestamp};

/// Coarse classification of a post.
///
/// The API has carried different category sets over time, so values outside
/// the known list are kept verbatim in [`Category::Other`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    #[default]
    Workshop,
    Journal,
    Draft,
    Published,
    Book,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Workshop => "Workshop",
            Category::Journal => "Journal",
            Category::Draft => "Draft",
            Category::Published => "Published",
            Category::Book => "Book",
            Category::Other(raw) => raw,
        }
    }

    /// Placeholder for posts the API returned without a category.
    pub fn unspecified() -> Self {
        Category::Other(String::new())
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Workshop" => Category::Workshop,
            "Journal" => Category::Journal,
            "Draft" => Category::Draft,
            "Published" => Category::Published,
            "Book" => Category::Book,
            _ => Category::Other(value),
        }
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for Category {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Category::from(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Publication state of a post.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum PostStatus {
    Draft,
    Published,
    Other(String),
}

impl PostStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PostStatus::Draft => "Draft",
            PostStatus::Published => "Published",
            PostStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for PostStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Draft" => PostStatus::Draft,
            "Published" => PostStatus::Published,
            _ => PostStatus::Other(value),
        }
    }
}

impl From<PostStatus> for String {
    fn from(value: PostStatus) -> Self {
        match value {
            PostStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for PostStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(PostStatus::from(s.to_string()))
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A blog entry as the API returns it.
///
/// `id` is empty only for a post that has not been saved yet.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Post {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(
        default = "Category::unspecified",
        deserialize_with = "category_or_unspecified"
    )]
    pub category: Category,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(
        serialize_with = "timestamp::serialize",
        deserialize_with = "timestamp::deserialize_or_now",
        default = "OffsetDateTime::now_utc"
    )]
    pub date: OffsetDateTime,
    #[serde(
        with = "timestamp::option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_date: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<Tag>,
}

fn category_or_unspecified<'de, D>(deserializer: D) -> Result<Category, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.map_or_else(Category::unspecified, Category::from))
}

impl Post {
    /// An unsaved post as the create screen starts it.
    pub fn draft(now: OffsetDateTime) -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            category: Category::default(),
            body: String::new(),
            cover_image: None,
            date: now,
            updated_date: None,
            status: None,
            tags: Vec::new(),
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_empty()
    }
}

/// Body of `POST /api/submit`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NewPostRequest {
    pub title: String,
    pub category: Category,
    pub body: String,
    #[serde(with = "timestamp")]
    pub date: OffsetDateTime,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<Tag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

/// Body of `PUT /api/editPost/:id`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UpdatePostRequest {
    pub title: String,
    pub category: Category,
    pub body: String,
    #[serde(with = "timestamp")]
    pub date: OffsetDateTime,
    #[serde(with = "timestamp")]
    pub updated_date: OffsetDateTime,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<Tag>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn post_reads_api_shape() {
        let raw = r#"{
            "_id": "66a1",
            "title": "Intro",
            "category": "Workshop",
            "body": "<p>hi</p>",
            "date": "2024-05-01T10:00:00.000Z",
            "updated_date": "",
            "tags": [{"_id": "t1", "tag": "rust"}]
        }"#;
        let post: Post = serde_json::from_str(raw).expect("post");

        assert_eq!(post.id, "66a1");
        assert_eq!(post.category, Category::Workshop);
        assert_eq!(post.date, datetime!(2024-05-01 10:00:00 UTC));
        assert_eq!(post.updated_date, None);
        assert_eq!(post.status, None);
        assert_eq!(post.tags[0].tag, "rust");
    }

    #[test]
    fn null_tags_become_empty() {
        let raw = r#"{"_id":"1","title":"t","category":"Journal","body":"","date":"2024-01-01T00:00:00Z","tags":null}"#;
        let post: Post = serde_json::from_str(raw).expect("post");
        assert!(post.tags.is_empty());
    }

    #[test]
    fn unknown_category_is_preserved() {
        let post: Post = serde_json::from_str(
            r#"{"_id":"1","category":"Essay","date":"2024-01-01T00:00:00Z"}"#,
        )
        .expect("post");
        assert_eq!(post.category, Category::Other("Essay".into()));

        let back = serde_json::to_value(&post).expect("json");
        assert_eq!(back["category"], "Essay");
    }

    #[test]
    fn null_fields_fall_back_to_defaults() {
        let raw = r#"[
            {"_id":"p1","title":null,"category":null,"body":null,"date":null,"tags":null},
            {"_id":"p2","title":"Kept","category":"Book","body":"","date":"2024-01-01T00:00:00Z"}
        ]"#;
        let before = time::OffsetDateTime::now_utc();
        let posts: Vec<Post> = serde_json::from_str(raw).expect("posts");

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].title, "");
        assert_eq!(posts[0].body, "");
        assert_eq!(posts[0].category, Category::unspecified());
        assert!(posts[0].date >= before);
        assert_eq!(posts[1].title, "Kept");
    }

    #[test]
    fn missing_category_is_unspecified() {
        let post: Post =
            serde_json::from_str(r#"{"_id":"1","date":"2024-01-01T00:00:00Z"}"#).expect("post");
        assert_eq!(post.category.as_str(), "");
    }

    #[test]
    fn update_request_writes_expected_fields() {
        let request = UpdatePostRequest {
            title: "T".into(),
            category: Category::Journal,
            body: "B".into(),
            date: datetime!(2024-01-01 00:00:00 UTC),
            updated_date: datetime!(2024-02-01 12:30:00 UTC),
            cover_image: None,
            tags: vec![Tag::new("t1", "rust")],
        };
        let value = serde_json::to_value(&request).expect("json");

        assert_eq!(value["category"], "Journal");
        assert_eq!(value["date"], "2024-01-01T00:00:00Z");
        assert_eq!(value["updated_date"], "2024-02-01T12:30:00Z");
        assert!(value["cover_image"].is_null());
        assert_eq!(value["tags"][0]["_id"], "t1");
    }

    #[test]
    fn draft_is_new_workshop_post() {
        let post = Post::draft(datetime!(2024-01-01 00:00:00 UTC));
        assert!(post.is_new());
        assert_eq!(post.category, Category::Workshop);
        assert!(post.tags.is_empty());
    }
}
