//! Access token type.

use std::fmt;

use reqwest::header::HeaderValue;

use crate::endpoints::ApiTokenResponse;
use crate::error::Error;

/// A short-lived bearer token handed out by the token exchange.
///
/// The value never appears in `Debug` output. Expiry is not tracked; the
/// server signals it by answering 401.
#[derive(Clone)]
pub struct AccessToken(String);

impl AccessToken {
    pub(crate) fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Pull the token out of a token exchange response.
    ///
    /// A missing or empty `access_token` is an integrity error.
    pub(crate) fn from_response(response: ApiTokenResponse) -> Result<Self, Error> {
        match response.access_token {
            Some(token) if !token.is_empty() => Ok(Self::new(token)),
            _ => Err(Error::integrity(
                "token exchange response has no access_token",
            )),
        }
    }

    /// `Bearer <token>`, marked sensitive so it is never printed by `http`.
    pub(crate) fn bearer_header(&self) -> Result<HeaderValue, Error> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.0))
            .map_err(|_| Error::integrity("access token is not a valid header value"))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}
