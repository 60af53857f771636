//! Validated value types.

mod object;
mod root_url;

pub use object::{ObjectRef, RootType, YetiLinkObject, YetiObject};
pub use root_url::RootUrl;
