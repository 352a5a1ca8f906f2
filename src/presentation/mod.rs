//! Plain-text rendering of posts and tags for the terminal.

pub mod views;
