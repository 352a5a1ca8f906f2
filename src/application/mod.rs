//! Admin flows: dashboard, post editor, tag management and the session gate.
//!
//! Each flow keeps the transient client-side state for one screen and talks to
//! the remote API only through the traits in [`repos`] and [`auth`].

pub mod auth;
pub mod confirm;
pub mod dashboard;
pub mod editor;
pub mod error;
pub mod repos;
pub mod session;
pub mod tags;

#[cfg(test)]
pub(crate) mod testing;
