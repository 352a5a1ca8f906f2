use std::fmt::Write as _;

use blog_admin_api_types::{Post, Tag};
use time::OffsetDateTime;

const NONE: &str = "-";

fn day(value: OffsetDateTime) -> String {
    value.date().to_string()
}

fn tag_names(tags: &[Tag]) -> String {
    if tags.is_empty() {
        return NONE.to_string();
    }
    tags.iter()
        .map(|tag| tag.tag.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// One tab-separated dashboard line.
pub fn post_row(post: &Post) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}",
        post.id,
        post.title,
        post.category,
        post.status.as_ref().map_or(NONE, |status| status.as_str()),
        day(post.date),
        post.updated_date.map_or_else(|| NONE.to_string(), day),
        tag_names(&post.tags),
    )
}

pub fn dashboard(posts: &[&Post]) -> String {
    if posts.is_empty() {
        return "No posts available.\n".to_string();
    }
    let mut out = String::from("ID\tTITLE\tCATEGORY\tSTATUS\tCREATED\tUPDATED\tTAGS\n");
    for post in posts {
        out.push_str(&post_row(post));
        out.push('\n');
    }
    out
}

/// Read-only rendering of a post. The body is sanitized before display.
pub fn post_detail(post: &Post) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Title: {}", post.title);
    let _ = writeln!(out, "Category: {}", post.category);
    let _ = writeln!(out, "Post ID: {}", post.id);
    if let Some(status) = &post.status {
        let _ = writeln!(out, "Status: {status}");
    }
    let _ = writeln!(out, "Created: {}", day(post.date));
    if let Some(updated) = post.updated_date {
        let _ = writeln!(out, "Last updated: {}", day(updated));
    }
    let _ = writeln!(out, "Tags: {}", tag_names(&post.tags));
    if let Some(cover) = &post.cover_image {
        let _ = writeln!(out, "Cover image: {cover}");
    }
    out.push('\n');
    out.push_str(&ammonia::clean(&post.body));
    out.push('\n');
    out
}

pub fn tag_list(tags: &[Tag]) -> String {
    if tags.is_empty() {
        return "No tags available.\n".to_string();
    }
    tags.iter().fold(String::new(), |mut out, tag| {
        let _ = writeln!(out, "{}\t{}", tag.id, tag.tag);
        out
    })
}
