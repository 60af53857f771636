//! The Yeti API client and its authenticated request pipeline.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::auth::{AccessToken, ApiKey, AuthMethod, Session};
use crate::endpoints::{API_KEY_HEADER, API_TOKEN, ApiTokenResponse};
use crate::error::{AuthError, Error, UsageError};
use crate::request::Request;
use crate::transport::{Transport, TransportFailure};
use crate::types::RootUrl;

const DEFAULT_USER_AGENT: &str = concat!("yeti-rs/", env!("CARGO_PKG_VERSION"));

/// Client for one Yeti instance.
///
/// Every API call goes through [`YetiClient::dispatch`], which sends the
/// request with the current [`Session`] and, on a 401, re-runs the last
/// successful authentication method before retrying.
///
/// Clones share the same session and credential.
///
/// # Example
///
/// ```no_run
/// use yeti::{IndicatorQuery, Pagination, RootUrl, YetiClient};
///
/// # async fn example() -> Result<(), yeti::Error> {
/// let root = RootUrl::new("https://yeti.example.com")?;
/// let client = YetiClient::connect(root, "my-api-key").await?;
///
/// let page = client
///     .search_indicators(&IndicatorQuery::default().indicator_type("yara"), Pagination::ALL)
///     .await?;
/// for rule in &page.items {
///     println!("{}", rule["name"]);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct YetiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    root: RootUrl,
    transport: Transport,
    /// Default headers only; authenticated sessions are derived from it.
    base_session: Session,
    session: RwLock<Arc<Session>>,
    auth: RwLock<AuthState>,
}

#[derive(Default)]
struct AuthState {
    api_key: Option<ApiKey>,
    method: Option<AuthMethod>,
}

impl YetiClient {
    /// Create an unauthenticated client with default settings.
    pub fn new(root: RootUrl) -> Result<Self, Error> {
        Self::builder(root).build()
    }

    /// Start configuring a client.
    pub fn builder(root: RootUrl) -> ClientBuilder {
        ClientBuilder::new(root)
    }

    /// Create a client and authenticate it with an API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty, the token exchange is rejected or
    /// the server response carries no access token.
    pub async fn connect(root: RootUrl, api_key: impl Into<ApiKey>) -> Result<Self, Error> {
        let client = Self::new(root)?;
        client.authenticate_with_api_key(Some(api_key.into())).await?;
        Ok(client)
    }

    /// Returns the root URL this client talks to.
    pub fn root(&self) -> &RootUrl {
        &self.inner.root
    }

    /// Returns a snapshot of the current session.
    pub async fn session(&self) -> Arc<Session> {
        self.inner.session.read().await.clone()
    }

    /// Returns the authentication method a refresh would re-run.
    pub async fn auth_method(&self) -> Option<AuthMethod> {
        self.inner.auth.read().await.method
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        self.inner.root.endpoint(path)
    }

    // ========================================================================
    // Credential lifecycle
    // ========================================================================

    /// Exchange an API key for an access token and install it.
    ///
    /// A given `key` replaces the stored one; `None` reuses the stored key.
    /// On success the current session is replaced by one carrying
    /// `Authorization: Bearer <token>`, and API key authentication becomes the
    /// method [`refresh`](Self::refresh) re-runs.
    ///
    /// # Errors
    ///
    /// - [`UsageError::MissingApiKey`] if no key was ever provided
    /// - [`Error::Api`] if the token exchange is rejected
    /// - [`Error::Integrity`] if the response has no access token; the
    ///   previous session stays current
    #[instrument(skip(self, key), fields(root = %self.inner.root))]
    pub async fn authenticate_with_api_key(&self, key: Option<ApiKey>) -> Result<(), Error> {
        let key = {
            let mut auth = self.inner.auth.write().await;
            if let Some(key) = key {
                auth.api_key = Some(key);
            }
            match &auth.api_key {
                Some(key) if !key.is_empty() => key.clone(),
                _ => return Err(UsageError::MissingApiKey.into()),
            }
        };

        info!("Exchanging API key for an access token");

        let request = Request::post(self.endpoint(API_TOKEN)).header(API_KEY_HEADER, key.as_str());
        let body = self
            .inner
            .transport
            .execute(&self.inner.base_session, &request)
            .await
            .map_err(TransportFailure::classify)?;

        let response: ApiTokenResponse = serde_json::from_slice(&body)?;
        let token = AccessToken::from_response(response)?;

        let session = self.inner.base_session.with_token(&token)?;
        *self.inner.session.write().await = Arc::new(session);
        self.inner.auth.write().await.method = Some(AuthMethod::ApiKey);

        debug!("Access token installed");
        Ok(())
    }

    /// Re-run the last successful authentication method.
    ///
    /// Without a recorded method this only logs a warning.
    #[instrument(skip(self), fields(root = %self.inner.root))]
    pub async fn refresh(&self) -> Result<(), Error> {
        let method = self.inner.auth.read().await.method;
        match method {
            Some(AuthMethod::ApiKey) => {
                info!(method = %AuthMethod::ApiKey, "Refreshing authentication");
                self.authenticate_with_api_key(None).await
            }
            None => {
                warn!("No authentication method set, cannot refresh authentication");
                Ok(())
            }
        }
    }

    // ========================================================================
    // Request pipeline
    // ========================================================================

    /// Send a request, re-authenticating and retrying on 401.
    ///
    /// A 401 triggers [`refresh`](Self::refresh) followed by another attempt,
    /// at most [`Request::retry_budget`] times, so a request is sent at most
    /// `retries + 1` times. Every attempt uses the session that is current
    /// when it starts. Other failures are returned after a single attempt.
    ///
    /// # Errors
    ///
    /// - [`Error::Usage`] for malformed requests, before anything is sent
    /// - [`Error::Auth`] once the retry budget is spent on 401 responses
    /// - [`Error::Api`] for any other non-2xx response
    /// - [`Error::Transport`] when no response was received
    /// - [`Error::Auth`] if the refresh itself is answered with 401
    /// - other errors from a failed refresh, unchanged
    #[instrument(skip(self, request), fields(method = %request.method(), url = %request.url()))]
    pub async fn dispatch(&self, request: Request) -> Result<Vec<u8>, Error> {
        request.validate()?;

        let mut remaining = request.retry_budget();
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            let session = self.session().await;

            let failure = match self.inner.transport.execute(&session, &request).await {
                Ok(body) => return Ok(body),
                Err(failure) => failure,
            };

            if !failure.is_unauthorized() {
                return Err(failure.classify());
            }

            if remaining == 0 {
                warn!(attempt, "Retry budget spent on 401 responses, giving up");
                return Err(AuthError::new(failure.summary()).into());
            }

            remaining -= 1;
            warn!(attempt, remaining, "Request unauthorized, refreshing authentication");
            // A rejected key is an authentication failure, not an API error.
            self.refresh().await.map_err(|err| match err {
                Error::Api(api) if api.status_code == 401 => {
                    AuthError::new(format!("API key rejected: {}", api)).into()
                }
                err => err,
            })?;
        }
    }

    /// [`dispatch`](Self::dispatch) and decode the JSON response.
    pub async fn dispatch_json<T: DeserializeOwned>(&self, request: Request) -> Result<T, Error> {
        let body = self.dispatch(request).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

// Custom Debug impl that hides sensitive data
impl std::fmt::Debug for YetiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YetiClient")
            .field("root", &self.inner.root)
            .field("credentials", &"[REDACTED]")
            .finish()
    }
}

/// Configures a [`YetiClient`].
#[derive(Debug)]
pub struct ClientBuilder {
    root: RootUrl,
    api_key: Option<ApiKey>,
    user_agent: String,
    default_headers: Vec<(String, String)>,
}

impl ClientBuilder {
    fn new(root: RootUrl) -> Self {
        Self {
            root,
            api_key: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            default_headers: Vec::new(),
        }
    }

    /// Store an API key without authenticating yet.
    ///
    /// [`YetiClient::authenticate_with_api_key`] with `None` will use it.
    pub fn api_key(mut self, key: impl Into<ApiKey>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Override the `User-Agent` sent with every request.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Add a header sent with every request.
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns a usage error for invalid default headers, or a transport
    /// error if the HTTP client cannot be created.
    pub fn build(self) -> Result<YetiClient, Error> {
        let mut headers = HeaderMap::new();
        for (name, value) in &self.default_headers {
            let invalid = || UsageError::InvalidHeader { name: name.clone() };
            headers.insert(
                HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?,
                HeaderValue::from_str(value).map_err(|_| invalid())?,
            );
        }

        let transport = Transport::new(&self.user_agent)?;
        let base_session = Session::new(headers);

        Ok(YetiClient {
            inner: Arc::new(ClientInner {
                root: self.root,
                transport,
                session: RwLock::new(Arc::new(base_session.clone())),
                base_session,
                auth: RwLock::new(AuthState {
                    api_key: self.api_key,
                    method: None,
                }),
            }),
        })
    }
}
