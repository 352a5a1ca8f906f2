//! Invariants for the tag list carried by a single post.
//!
//! A post never holds two tags with the same id or the same name compared
//! case-insensitively.

use blog_admin_api_types::Tag;

/// Trimmed tag name, or `None` when nothing usable was typed.
pub fn normalize_name(input: &str) -> Option<&str> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

pub fn contains_name(tags: &[Tag], name: &str) -> bool {
    tags.iter().any(|tag| tag.matches_name(name))
}

pub fn contains_id(tags: &[Tag], id: &str) -> bool {
    tags.iter().any(|tag| tag.id == id)
}

/// Append `tag` unless it would break the no-duplicate invariant.
pub fn push_unique(tags: &mut Vec<Tag>, tag: Tag) -> bool {
    if contains_id(tags, &tag.id) || contains_name(tags, &tag.tag) {
        return false;
    }
    tags.push(tag);
    true
}

pub fn remove_id(tags: &mut Vec<Tag>, id: &str) -> Option<Tag> {
    let index = tags.iter().position(|tag| tag.id == id)?;
    Some(tags.remove(index))
}
