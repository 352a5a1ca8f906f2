#![deny(clippy::all, clippy::pedantic)]
//! Administrative client for a headless blog API.
//!
//! The library holds the screen flows (dashboard, post editor, tag
//! management, session gate), their HTTP and identity-provider adapters, and
//! an in-memory reference implementation of the blog API.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
