//! yeti - client library for the Yeti threat-intelligence platform.
//!
//! All API calls go through a [`YetiClient`]. The client exchanges an API key
//! for a short-lived access token and transparently re-authenticates when the
//! server starts answering 401, so long-running jobs survive token expiry.
//!
//! # Example
//!
//! ```no_run
//! use yeti::{EntityQuery, Pagination, RootUrl, YetiClient};
//!
//! # async fn example() -> Result<(), yeti::Error> {
//! let root = RootUrl::new("https://yeti.example.com")?;
//! let client = YetiClient::connect(root, "my-api-key").await?;
//!
//! let mut pagination = Pagination::first(100);
//! loop {
//!     let page = client
//!         .search_entities(&EntityQuery::default().entity_type("malware"), pagination)
//!         .await?;
//!     for entity in &page.items {
//!         println!("{}", entity["name"]);
//!     }
//!     match page.next_page() {
//!         Some(next) => pagination = next,
//!         None => break,
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod multipart;
pub mod request;
pub mod resources;
pub mod types;

mod transport;

// Re-export primary types at crate root for convenience
pub use auth::{ApiKey, AuthMethod, Session};
pub use client::{ClientBuilder, YetiClient};
pub use error::{ApiError, AuthError, Error, TransportError, UsageError};
pub use request::{DEFAULT_RETRIES, Method, Request};
pub use resources::{
    BloomHit, BulkAddResult, DfiqQuery, Direction, EntityQuery, GraphSearch, IndicatorQuery,
    ObservableQuery, Pagination, ResultPage, YaraBundleRequest,
};
pub use types::{ObjectRef, RootType, RootUrl, YetiLinkObject, YetiObject};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
