//! Password sign-in against the identity provider, with the session kept in
//! a local file so separate CLI invocations share it.

mod identity;
mod store;

pub use identity::IdentityProvider;
pub use store::SessionStore;
