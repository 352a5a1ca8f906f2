//! Handlers for the blog REST endpoints, one submodule per resource.

mod posts;
mod tags;

pub use posts::*;
pub use tags::*;
