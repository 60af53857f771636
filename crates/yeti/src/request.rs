//! Request descriptors accepted by the pipeline.

use std::fmt;
use std::str::FromStr;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

use crate::error::{Error, UsageError};

/// Number of times a request is retried after a 401 by default.
pub const DEFAULT_RETRIES: u32 = 3;

/// HTTP methods the Yeti API is called with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("GET") {
            Ok(Method::Get)
        } else if s.eq_ignore_ascii_case("POST") {
            Ok(Method::Post)
        } else if s.eq_ignore_ascii_case("PATCH") {
            Ok(Method::Patch)
        } else {
            Err(UsageError::UnsupportedMethod(s.to_string()).into())
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
        }
    }
}

/// Describes one API call: method, absolute URL, body, extra headers, query
/// parameters and the 401 retry budget.
///
/// A request carries at most one body. Setting both a JSON and a binary body
/// is accepted by the builder but rejected before anything is sent.
///
/// Extra headers are laid over the session's headers for this request only;
/// a header with the same name as a session header replaces it.
///
/// # Example
///
/// ```
/// use yeti::{Method, Request};
/// use serde_json::json;
///
/// let request = Request::new(Method::Post, "https://yeti.example.com/api/v2/tags/search")
///     .json(json!({"name": "apt", "count": 0}))
///     .retries(1);
/// assert_eq!(request.retry_budget(), 1);
/// ```
#[derive(Clone)]
pub struct Request {
    method: Method,
    url: String,
    json: Option<Value>,
    binary: Option<Vec<u8>>,
    headers: Vec<(String, String)>,
    query: Vec<(String, String)>,
    retries: u32,
}

impl Request {
    /// Start describing a request.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            json: None,
            binary: None,
            headers: Vec::new(),
            query: Vec::new(),
            retries: DEFAULT_RETRIES,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(Method::Patch, url)
    }

    /// Send `body` as JSON.
    pub fn json(mut self, body: Value) -> Self {
        self.json = Some(body);
        self
    }

    /// Send raw bytes as the body.
    pub fn binary(mut self, body: Vec<u8>) -> Self {
        self.binary = Some(body);
        self
    }

    /// Add an extra header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add a query parameter, percent-encoded onto the URL when sent.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Set how many times the request may be retried after a 401.
    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn retry_budget(&self) -> u32 {
        self.retries
    }

    pub(crate) fn json_body(&self) -> Option<&Value> {
        self.json.as_ref()
    }

    pub(crate) fn binary_body(&self) -> Option<&[u8]> {
        self.binary.as_deref()
    }

    pub(crate) fn query_params(&self) -> &[(String, String)] {
        &self.query
    }

    /// Check the request can be sent and build its extra headers.
    ///
    /// # Errors
    ///
    /// Returns a usage error if both bodies are set or a header is invalid.
    pub(crate) fn validate(&self) -> Result<HeaderMap, Error> {
        if self.json.is_some() && self.binary.is_some() {
            return Err(UsageError::ConflictingBodies.into());
        }

        let mut headers = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let invalid = || UsageError::InvalidHeader { name: name.clone() };
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
            let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
            headers.insert(header_name, header_value);
        }
        Ok(headers)
    }
}

// Header values may carry the API key; only names are shown.
impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("json", &self.json.is_some())
            .field("binary_len", &self.binary.as_ref().map(Vec::len))
            .field(
                "headers",
                &self.headers.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            )
            .field("query", &self.query)
            .field("retries", &self.retries)
            .finish()
    }
}
