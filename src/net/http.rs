//! Framework-neutral HTTP request/response values and the transport seam.
//!
//! ARCHITECTURE
//! ============
//! Requests are plain data until the last moment so the authorizer can be a
//! pure `ApiRequest -> ApiRequest` transform and tests can inspect exactly
//! what would have gone on the wire. [`Transport`] is the only piece that
//! touches the network; the browser build uses [`GlooTransport`].

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::fmt;

use futures::future::LocalBoxFuture;
use serde::Serialize;

use crate::error::ApiError;

pub const AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE: &str = "Content-Type";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        })
    }
}

/// An outbound request relative to the API base URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: vec![(CONTENT_TYPE.to_owned(), "application/json".to_owned())],
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Serialization`] if `body` cannot be encoded.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let payload = serde_json::to_string(body)
            .map_err(|e| ApiError::Serialization(format!("failed to encode request: {e}")))?;
        self.body = Some(payload);
        Ok(self)
    }

    /// Set `name` to `value`, replacing any existing header of that name
    /// (compared case-insensitively).
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
        self.headers.push((name.to_owned(), value.into()));
        self
    }

    /// Value of header `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A received response: status plus the raw body text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a fully-built request to the service.
///
/// `url` is the absolute URL; `request.path` is kept for logging and tests.
/// Futures are `!Send` because everything runs on the browser event loop.
pub trait Transport {
    fn send<'a>(&'a self, url: String, request: ApiRequest) -> LocalBoxFuture<'a, Result<ApiResponse, ApiError>>;
}

/// Transport for builds without a browser: every call fails with
/// [`ApiError::Network`].
#[derive(Clone, Copy, Debug, Default)]
pub struct OfflineTransport;

impl Transport for OfflineTransport {
    fn send<'a>(&'a self, url: String, _request: ApiRequest) -> LocalBoxFuture<'a, Result<ApiResponse, ApiError>> {
        use futures::FutureExt as _;
        async move { Err(ApiError::Network(format!("no transport available for {url}"))) }.boxed_local()
    }
}

/// Browser transport over `fetch` with an abort-based timeout.
#[cfg(feature = "csr")]
#[derive(Clone, Copy, Debug)]
pub struct GlooTransport {
    timeout_ms: u32,
}

#[cfg(feature = "csr")]
impl GlooTransport {
    pub fn new(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }
}

#[cfg(feature = "csr")]
impl Transport for GlooTransport {
    fn send<'a>(&'a self, url: String, request: ApiRequest) -> LocalBoxFuture<'a, Result<ApiResponse, ApiError>> {
        use futures::FutureExt as _;
        use gloo_net::http::RequestBuilder;

        async move {
            let controller = web_sys::AbortController::new()
                .map_err(|_| ApiError::Network("failed to initialize request timeout".to_owned()))?;
            let signal = controller.signal();
            let timeout_controller = controller.clone();
            let _timeout = gloo_timers::callback::Timeout::new(self.timeout_ms, move || timeout_controller.abort());

            let method = match request.method {
                Method::Get => gloo_net::http::Method::GET,
                Method::Post => gloo_net::http::Method::POST,
                Method::Put => gloo_net::http::Method::PUT,
                Method::Delete => gloo_net::http::Method::DELETE,
            };
            let mut builder = RequestBuilder::new(&url).method(method).abort_signal(Some(&signal));
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            let built = match request.body {
                Some(body) => builder.body(body),
                None => builder.build(),
            }
            .map_err(|e| ApiError::Serialization(format!("failed to build request: {e}")))?;

            let response = built.send().await.map_err(map_request_error)?;
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Ok(ApiResponse { status, body })
        }
        .boxed_local()
    }
}

#[cfg(feature = "csr")]
fn map_request_error(err: gloo_net::Error) -> ApiError {
    let message = err.to_string();
    let lowered = message.to_lowercase();
    if lowered.contains("timeout") || lowered.contains("abort") {
        ApiError::Timeout
    } else {
        ApiError::Network(format!("unable to reach the server: {message}"))
    }
}
