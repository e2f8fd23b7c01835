use std::rc::Rc;

use super::*;
use crate::net::http::Method;
use crate::session::store::{ACCESS_TOKEN_KEY, MemoryStore};

fn authorizer_with(store: &Rc<MemoryStore>) -> RequestAuthorizer {
    let shared: Rc<dyn SessionStore> = store.clone();
    RequestAuthorizer::new(shared)
}

#[test]
fn adds_bearer_header_when_token_stored() {
    let store = Rc::new(MemoryStore::with_entries([(ACCESS_TOKEN_KEY, "mock-token")]));
    let request = authorizer_with(&store).authorize(ApiRequest::get("/test"));
    assert_eq!(request.header(AUTHORIZATION), Some("Bearer mock-token"));
}

#[test]
fn passes_request_through_without_token() {
    let store = Rc::new(MemoryStore::new());
    let original = ApiRequest::get("/test");
    let request = authorizer_with(&store).authorize(original.clone());
    assert_eq!(request, original);
    assert_eq!(request.header(AUTHORIZATION), None);
}

#[test]
fn applies_to_every_verb() {
    let store = Rc::new(MemoryStore::with_entries([(ACCESS_TOKEN_KEY, "mock-token")]));
    let authorizer = authorizer_with(&store);
    for method in [Method::Get, Method::Post, Method::Put, Method::Delete] {
        let request = authorizer.authorize(ApiRequest::new(method, "/test/1"));
        assert_eq!(request.header(AUTHORIZATION), Some("Bearer mock-token"), "{method}");
    }
}

#[test]
fn applies_to_auth_endpoints_too() {
    let store = Rc::new(MemoryStore::with_entries([(ACCESS_TOKEN_KEY, "T")]));
    let request = authorizer_with(&store).authorize(ApiRequest::post("/auth/login"));
    assert_eq!(request.header(AUTHORIZATION), Some("Bearer T"));
}

#[test]
fn reads_store_on_every_call() {
    let store = Rc::new(MemoryStore::new());
    let authorizer = authorizer_with(&store);

    assert_eq!(authorizer.authorize(ApiRequest::get("/tasks")).header(AUTHORIZATION), None);
    store.put(ACCESS_TOKEN_KEY, "fresh");
    assert_eq!(
        authorizer.authorize(ApiRequest::get("/tasks")).header(AUTHORIZATION),
        Some("Bearer fresh")
    );
    store.remove(ACCESS_TOKEN_KEY);
    assert_eq!(authorizer.authorize(ApiRequest::get("/tasks")).header(AUTHORIZATION), None);
}

#[test]
fn replaces_stale_authorization_header() {
    let store = Rc::new(MemoryStore::with_entries([(ACCESS_TOKEN_KEY, "current")]));
    let request = ApiRequest::get("/tasks").with_header("authorization", "Bearer stale");
    let request = authorizer_with(&store).authorize(request);
    assert_eq!(request.header(AUTHORIZATION), Some("Bearer current"));
    assert_eq!(request.headers.iter().filter(|(n, _)| n.eq_ignore_ascii_case(AUTHORIZATION)).count(), 1);
}

#[test]
fn leaves_other_headers_and_body_untouched() {
    let store = Rc::new(MemoryStore::with_entries([(ACCESS_TOKEN_KEY, "T")]));
    let request = ApiRequest::post("/tasks").json(&serde_json::json!({"title": "x"})).unwrap();
    let authorized = authorizer_with(&store).authorize(request.clone());
    assert_eq!(authorized.body, request.body);
    assert_eq!(authorized.header("Content-Type"), Some("application/json"));
}
