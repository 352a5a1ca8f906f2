//! Client-side filtering of the dashboard list.
//!
//! A post is visible when all three predicates hold: category, status and
//! tag set. Each predicate is open ("All" / no tags) by default.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use blog_admin_api_types::{Category, Post, PostStatus};

const ALL: &str = "All";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, post: &Post) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => &post.category == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(ALL) {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Only(Category::from(s.to_string())))
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL),
            CategoryFilter::Only(category) => f.write_str(category.as_str()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(PostStatus),
}

impl FromStr for StatusFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(ALL) {
            Ok(StatusFilter::All)
        } else {
            Ok(StatusFilter::Only(PostStatus::from(s.to_string())))
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str(ALL),
            StatusFilter::Only(status) => f.write_str(status.as_str()),
        }
    }
}

/// How the "Published" status filter decides membership.
///
/// Older API versions had no status field and marked drafts through the
/// category instead; `NotDraftCategory` reproduces that reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PublishedRule {
    #[default]
    StatusField,
    NotDraftCategory,
}

impl FromStr for PublishedRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "status" | "status-field" => Ok(PublishedRule::StatusField),
            "not-draft" | "not-draft-category" => Ok(PublishedRule::NotDraftCategory),
            other => Err(format!(
                "unknown published rule `{other}` (expected `status` or `not-draft`)"
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub category: CategoryFilter,
    pub status: StatusFilter,
    pub tags: BTreeSet<String>,
    pub published_rule: PublishedRule,
}

impl PostFilter {
    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_published_rule(mut self, rule: PublishedRule) -> Self {
        self.published_rule = rule;
        self
    }

    pub fn matches(&self, post: &Post) -> bool {
        self.category.matches(post) && self.status_matches(post) && self.tags_match(post)
    }

    pub fn apply<'a>(&self, posts: &'a [Post]) -> Vec<&'a Post> {
        posts.iter().filter(|post| self.matches(post)).collect()
    }

    fn status_matches(&self, post: &Post) -> bool {
        match (&self.status, self.published_rule) {
            (StatusFilter::All, _) => true,
            (StatusFilter::Only(PostStatus::Published), PublishedRule::NotDraftCategory) => {
                post.category != Category::Draft
            }
            (StatusFilter::Only(status), _) => post.status.as_ref() == Some(status),
        }
    }

    fn tags_match(&self, post: &Post) -> bool {
        self.tags.is_empty() || post.tags.iter().any(|tag| self.tags.contains(&tag.tag))
    }
}
