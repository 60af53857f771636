//! Authentication types.
//!
//! A long-lived [`ApiKey`] is exchanged for a short-lived [`AccessToken`],
//! which is installed on a fresh [`Session`]. The client remembers the
//! [`AuthMethod`] that produced the current session so it can redo it when the
//! token expires.

mod credentials;
mod method;
mod session;
mod tokens;

pub use credentials::ApiKey;
pub use method::AuthMethod;
pub use session::Session;
pub use tokens::AccessToken;
