//! Attaches the session credential to outbound requests.
//!
//! The decision is made per call from the store: no caching, no retry, and no
//! reaction to 401 responses. Every verb and path goes through here, the auth
//! endpoints included; before login there is simply no token to attach.

#[cfg(test)]
#[path = "authorizer_test.rs"]
mod authorizer_test;

use std::rc::Rc;

use super::store::{self, SessionStore};
use crate::net::http::{AUTHORIZATION, ApiRequest};

#[derive(Clone)]
pub struct RequestAuthorizer {
    store: Rc<dyn SessionStore>,
}

impl RequestAuthorizer {
    pub fn new(store: Rc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Return `request` with `Authorization: Bearer <token>` when a token is
    /// stored, or unchanged otherwise.
    pub fn authorize(&self, request: ApiRequest) -> ApiRequest {
        match store::read_token(self.store.as_ref()) {
            Some(token) => request.with_header(AUTHORIZATION, token.bearer()),
            None => request,
        }
    }
}
