//! Authentication methods a client can replay on refresh.

use std::fmt;

/// The authentication method that last succeeded on a client.
///
/// Refreshing a client re-runs this method with the stored credential. New
/// strategies are added as variants here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthMethod {
    /// API key exchanged for an access token.
    ApiKey,
}

impl AuthMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMethod::ApiKey => "api_key",
        }
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
