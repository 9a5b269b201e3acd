//! Transport seam between the request executor and an HTTP library.
//!
//! The executor only builds [`TransportRequest`]s and reads [`TransportResponse`]s.
//! Connection pooling, TLS and timeouts belong to the [`HttpTransport`]
//! implementation. [`ReqwestTransport`] is the stock implementation.

use crate::request::HttpMethod;

/// Boxed cause of a transport-level failure.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A fully prepared HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl TransportRequest {
    /// First header value matching `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status code and raw body bytes of a completed HTTP exchange.
///
/// 4xx and 5xx statuses are ordinary responses here, never errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Sends a request and returns the raw response.
pub trait HttpTransport: Send + Sync {
    fn send(
        &self,
        request: TransportRequest,
    ) -> impl std::future::Future<Output = Result<TransportResponse, TransportError>> + Send;
}

impl<T: HttpTransport> HttpTransport for std::sync::Arc<T> {
    fn send(
        &self,
        request: TransportRequest,
    ) -> impl std::future::Future<Output = Result<TransportResponse, TransportError>> + Send {
        (**self).send(request)
    }
}

#[cfg(feature = "reqwest")]
pub use self::reqwest_transport::ReqwestTransport;

#[cfg(feature = "reqwest")]
mod reqwest_transport {
    use std::time::Duration;

    use super::{HttpTransport, TransportError, TransportRequest, TransportResponse};
    use crate::constants::DEFAULT_TIMEOUT_SECS;
    use crate::error::B2BinPayError;
    use crate::request::HttpMethod;

    /// [`HttpTransport`] backed by `reqwest::Client`.
    #[derive(Debug, Clone)]
    pub struct ReqwestTransport {
        http: reqwest::Client,
    }

    impl ReqwestTransport {
        /// Build a client with the default timeout and redirects disabled.
        pub fn new() -> Result<Self, B2BinPayError> {
            Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        }

        pub fn with_timeout(timeout: Duration) -> Result<Self, B2BinPayError> {
            let http = reqwest::Client::builder()
                .timeout(timeout)
                .redirect(reqwest::redirect::Policy::none())
                .build()
                .map_err(|e| B2BinPayError::Config(format!("failed to build HTTP client: {e}")))?;
            Ok(Self { http })
        }

        /// Wrap a caller-configured `reqwest::Client`.
        pub fn with_client(http: reqwest::Client) -> Self {
            Self { http }
        }
    }

    fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }

    impl HttpTransport for ReqwestTransport {
        async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
            let mut req = self
                .http
                .request(to_reqwest_method(request.method), &request.url);
            for (name, value) in &request.headers {
                req = req.header(name.as_str(), value.as_str());
            }
            if let Some(body) = request.body {
                req = req.body(body);
            }

            let resp = req.send().await?;
            let status = resp.status().as_u16();
            let body = resp.bytes().await?.to_vec();

            Ok(TransportResponse { status, body })
        }
    }
}
