//! Single-shot HTTP execution.

use reqwest::StatusCode;
use tracing::{debug, instrument, trace};

use crate::auth::Session;
use crate::error::{ApiError, Error};
use crate::request::Request;

/// Why a single transport attempt did not produce a body.
#[derive(Debug)]
pub(crate) enum TransportFailure {
    /// The server answered with a non-2xx status.
    Status {
        status: StatusCode,
        url: String,
        body: String,
    },
    /// The request was never answered, or was never sent.
    Error(Error),
}

impl TransportFailure {
    pub(crate) fn is_unauthorized(&self) -> bool {
        matches!(self, TransportFailure::Status { status, .. } if *status == StatusCode::UNAUTHORIZED)
    }

    /// Map the failure onto the public error taxonomy.
    ///
    /// Status failures become [`ApiError`]s carrying the server text
    /// verbatim; everything else passes through unchanged.
    pub(crate) fn classify(self) -> Error {
        match self {
            TransportFailure::Status { status, body, .. } => {
                Error::Api(ApiError::new(status.as_u16(), body))
            }
            TransportFailure::Error(err) => err,
        }
    }

    /// One-line description used when authentication gives up.
    pub(crate) fn summary(&self) -> String {
        match self {
            TransportFailure::Status { status, url, .. } => format!(
                "{} {} for url: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
                url
            ),
            TransportFailure::Error(err) => err.to_string(),
        }
    }
}

impl From<Error> for TransportFailure {
    fn from(err: Error) -> Self {
        TransportFailure::Error(err)
    }
}

impl From<reqwest::Error> for TransportFailure {
    fn from(err: reqwest::Error) -> Self {
        TransportFailure::Error(err.into())
    }
}

/// Sends exactly one HTTP request per call.
#[derive(Debug, Clone)]
pub(crate) struct Transport {
    client: reqwest::Client,
}

impl Transport {
    pub(crate) fn new(user_agent: &str) -> Result<Self, Error> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }

    /// Execute `request` with `session`'s headers.
    ///
    /// The request is validated first, so a malformed request fails without
    /// touching the network.
    #[instrument(skip(self, session, request), fields(method = %request.method(), url = %request.url()))]
    pub(crate) async fn execute(
        &self,
        session: &Session,
        request: &Request,
    ) -> Result<Vec<u8>, TransportFailure> {
        let extra = request.validate()?;

        let mut headers = session.headers().clone();
        headers.extend(extra);

        let mut builder = self
            .client
            .request(request.method().into(), request.url())
            .headers(headers);

        if !request.query_params().is_empty() {
            builder = builder.query(request.query_params());
        }
        if let Some(json) = request.json_body() {
            builder = builder.json(json);
        } else if let Some(bytes) = request.binary_body() {
            builder = builder.body(bytes.to_vec());
        }

        debug!("sending request");
        let response = builder.send().await?;

        let status = response.status();
        trace!(status = %status, "response");

        if status.is_success() {
            let body = response.bytes().await?;
            Ok(body.to_vec())
        } else {
            let url = response.url().to_string();
            let body = response.text().await?;
            Err(TransportFailure::Status { status, url, body })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_failure_classifies_as_api_error() {
        let failure = TransportFailure::Status {
            status: StatusCode::BAD_REQUEST,
            url: "http://yeti/api/v2/indicators/search".to_string(),
            body: "invalid query".to_string(),
        };
        assert!(!failure.is_unauthorized());

        match failure.classify() {
            Error::Api(err) => {
                assert_eq!(err.status_code, 400);
                assert_eq!(err.message, "invalid query");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unauthorized_summary() {
        let failure = TransportFailure::Status {
            status: StatusCode::UNAUTHORIZED,
            url: "http://yeti/api/v2/tags/search".to_string(),
            body: String::new(),
        };
        assert!(failure.is_unauthorized());
        assert_eq!(
            failure.summary(),
            "401 Unauthorized for url: http://yeti/api/v2/tags/search"
        );
    }

    #[tokio::test]
    async fn truncated_error_body_is_a_transport_error() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/api/v2/tags/search", listener.local_addr().unwrap());

        // Promise 100 bytes, send 7, hang up.
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let _ = socket
                .write_all(b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 100\r\n\r\npartial")
                .await;
        });

        let transport = Transport::new("yeti-test").unwrap();
        let failure = transport
            .execute(&Session::anonymous(), &Request::get(url))
            .await
            .unwrap_err();

        assert!(matches!(
            failure,
            TransportFailure::Error(Error::Transport(_))
        ));
    }
}
