//! API key credential type.

use std::fmt;

/// A long-lived Yeti API key.
///
/// The key is exchanged for short-lived access tokens and is only ever sent
/// in the `x-yeti-apikey` header of the token exchange request.
///
/// # Security
///
/// The key is never exposed in Debug output to prevent accidental logging.
///
/// # Example
///
/// ```
/// use yeti::ApiKey;
///
/// let key = ApiKey::new("s3cr3t");
/// assert!(!format!("{:?}", key).contains("s3cr3t"));
/// ```
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap an API key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key value.
    ///
    /// # Security
    ///
    /// Use this only when constructing the token exchange request.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Intentionally hide the key in Debug output
impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&"[REDACTED]").finish()
    }
}

impl From<&str> for ApiKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for ApiKey {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}
