//! Domain rules that hold independently of the remote API.

pub mod error;
pub mod filter;
pub mod tags;
