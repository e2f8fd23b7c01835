//! Typed JSON helpers over a [`Transport`].
//!
//! Every request built here passes through the [`RequestAuthorizer`] right
//! before dispatch, so the token read is always the one stored at send time.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result<_, ApiError>`; non-2xx responses are classified by
//! [`ApiError::from_status`], which keeps the server's message when it sent
//! one.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::http::{ApiRequest, ApiResponse, Transport};
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::session::authorizer::RequestAuthorizer;

#[derive(Clone)]
pub struct ApiClient {
    config: AppConfig,
    transport: Rc<dyn Transport>,
    authorizer: RequestAuthorizer,
}

impl ApiClient {
    pub fn new(config: AppConfig, transport: Rc<dyn Transport>, authorizer: RequestAuthorizer) -> Self {
        Self { config, transport, authorizer }
    }

    /// Authorize and send `request`, returning the raw response on 2xx.
    ///
    /// # Errors
    ///
    /// Transport failures pass through; non-2xx statuses become the matching
    /// [`ApiError`] variant.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let request = self.authorizer.authorize(request);
        let url = self.config.url(&request.path);
        log::debug!("api request: {} {}", request.method, request.path);

        let response = self.transport.send(url, request).await?;
        if response.is_success() {
            Ok(response)
        } else {
            log::debug!("api response: status={}", response.status);
            Err(ApiError::from_status(response.status, &response.body))
        }
    }

    /// `send` and decode the body as JSON.
    ///
    /// # Errors
    ///
    /// As [`ApiClient::send`], plus [`ApiError::Parse`] for an undecodable body.
    pub async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Parse(format!("failed to decode response: {e}")))
    }

    /// # Errors
    ///
    /// See [`ApiClient::send_json`].
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send_json(ApiRequest::get(path)).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send_json`].
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        self.send_json(ApiRequest::post(path).json(body)?).await
    }

    /// `POST` where the response body is irrelevant.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn post_discard<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        self.send(ApiRequest::post(path).json(body)?).await.map(|_| ())
    }

    /// # Errors
    ///
    /// See [`ApiClient::send_json`].
    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        self.send_json(ApiRequest::put(path).json(body)?).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send_json`].
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send_json(ApiRequest::delete(path)).await
    }
}
