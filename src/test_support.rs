//! Shared fixtures for unit tests: a scripted transport and a recording
//! navigator.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use futures::FutureExt as _;
use futures::future::LocalBoxFuture;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::nav::{NavTarget, Navigator};
use crate::net::api::ApiClient;
use crate::net::http::{ApiRequest, ApiResponse, Transport};
use crate::net::types::UserProfile;
use crate::session::authorizer::RequestAuthorizer;
use crate::session::store::{MemoryStore, SessionStore};

pub const BASE_URL: &str = "http://api.test";

/// Transport that answers from a queue and records what was sent.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: RefCell<VecDeque<Result<ApiResponse, ApiError>>>,
    sent: RefCell<Vec<(String, ApiRequest)>>,
}

impl ScriptedTransport {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn respond(&self, status: u16, body: serde_json::Value) {
        self.responses.borrow_mut().push_back(Ok(ApiResponse::new(status, body.to_string())));
    }

    pub fn fail(&self, error: ApiError) {
        self.responses.borrow_mut().push_back(Err(error));
    }

    /// `(url, request)` pairs in dispatch order.
    pub fn sent(&self) -> Vec<(String, ApiRequest)> {
        self.sent.borrow().clone()
    }

    pub fn last(&self) -> ApiRequest {
        self.sent.borrow().last().map(|(_, r)| r.clone()).expect("no request sent")
    }
}

impl Transport for ScriptedTransport {
    fn send<'a>(&'a self, url: String, request: ApiRequest) -> LocalBoxFuture<'a, Result<ApiResponse, ApiError>> {
        self.sent.borrow_mut().push((url, request));
        let next = self
            .responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted response".to_owned())));
        async move { next }.boxed_local()
    }
}

/// Navigator that remembers every href it was asked to visit.
#[derive(Default)]
pub struct RecordingNavigator {
    visited: RefCell<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, target: &NavTarget) {
        self.visited.borrow_mut().push(target.to_href());
    }
}

pub fn test_config() -> AppConfig {
    AppConfig { api_base_url: BASE_URL.to_owned(), ..AppConfig::default() }
}

pub fn api_client(store: &Rc<MemoryStore>, transport: &Rc<ScriptedTransport>) -> ApiClient {
    let store: Rc<dyn SessionStore> = store.clone();
    let transport: Rc<dyn Transport> = transport.clone();
    ApiClient::new(test_config(), transport, RequestAuthorizer::new(store))
}

pub fn ana() -> UserProfile {
    UserProfile {
        id: 1,
        username: "ana".to_owned(),
        email: "a@x.pt".to_owned(),
        created_at: "2024-01-01T00:00:00Z".to_owned(),
    }
}

pub fn ana_json() -> serde_json::Value {
    serde_json::json!({"id": 1, "username": "ana", "email": "a@x.pt", "created_at": "2024-01-01T00:00:00Z"})
}
