//! The transport identity requests are sent with.

use reqwest::header::{AUTHORIZATION, HeaderMap};

use crate::error::Error;

use super::tokens::AccessToken;

/// Default headers plus, once authenticated, the bearer authorization header.
///
/// A `Session` is never modified after construction. Authenticating produces
/// a new `Session` which the client swaps in whole, so a request holding the
/// previous one keeps a consistent set of headers.
#[derive(Clone, Default)]
pub struct Session {
    headers: HeaderMap,
}

impl Session {
    /// A session carrying only the given default headers.
    pub fn new(default_headers: HeaderMap) -> Self {
        Self {
            headers: default_headers,
        }
    }

    /// A session with no headers at all.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Derive an authenticated session that sends `Authorization: Bearer <token>`.
    ///
    /// # Errors
    ///
    /// Returns an integrity error if the server handed back a token that
    /// cannot be carried in an HTTP header.
    pub(crate) fn with_token(&self, token: &AccessToken) -> Result<Self, Error> {
        let mut headers = self.headers.clone();
        headers.insert(AUTHORIZATION, token.bearer_header()?);
        Ok(Self { headers })
    }

    /// Headers sent with every request on this session.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the `Authorization` header value, if authenticated.
    ///
    /// # Security
    ///
    /// The value contains the access token. Do not log it.
    pub fn authorization(&self) -> Option<&str> {
        self.headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
    }

    /// Whether this session carries a bearer token.
    pub fn is_authenticated(&self) -> bool {
        self.headers.contains_key(AUTHORIZATION)
    }
}

// Only header names are shown; values may hold credentials.
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
