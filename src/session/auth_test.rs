use std::cell::RefCell;
use std::rc::Rc;

use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::session::store::{MemoryStore, read_token};
use crate::test_support::{RecordingNavigator, ScriptedTransport, ana, ana_json, api_client};

struct Fixture {
    store: Rc<MemoryStore>,
    transport: Rc<ScriptedTransport>,
    navigator: Rc<RecordingNavigator>,
    broadcaster: SessionBroadcaster,
    auth: AuthService,
}

fn fixture_with(store: MemoryStore) -> Fixture {
    let store = Rc::new(store);
    let transport = ScriptedTransport::new();
    let navigator = RecordingNavigator::new();
    let broadcaster = SessionBroadcaster::from_store(store.as_ref());
    let shared_store: Rc<dyn SessionStore> = store.clone();
    let shared_nav: Rc<dyn Navigator> = navigator.clone();
    let auth = AuthService::new(shared_store, broadcaster.clone(), api_client(&store, &transport), shared_nav);
    Fixture { store, transport, navigator, broadcaster, auth }
}

fn fixture() -> Fixture {
    fixture_with(MemoryStore::new())
}

fn login_ok(token: &str) -> serde_json::Value {
    json!({"access_token": token, "token_type": "bearer", "user": ana_json(), "message": "Login successful"})
}

// =============================================================
// register
// =============================================================

#[test]
fn register_posts_payload_and_leaves_session_alone() {
    let f = fixture();
    f.transport.respond(201, json!({"message": "User created", "user": ana_json()}));

    block_on(f.auth.register("ana", "a@x.pt", "secret1")).unwrap();

    let request = f.transport.last();
    assert_eq!(request.path, "/auth/register");
    let body: serde_json::Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({"username": "ana", "email": "a@x.pt", "password": "secret1"}));
    assert!(f.broadcaster.current_user().is_none());
    assert!(f.store.is_empty());
}

#[test]
fn register_conflict_is_reported() {
    let f = fixture();
    f.transport.respond(409, json!({"message": "Username already exists"}));

    let err = block_on(f.auth.register("ana", "a@x.pt", "secret1")).unwrap_err();

    assert_eq!(err, ApiError::Conflict("Username already exists".to_owned()));
}

#[test]
fn register_validation_error_is_reported() {
    let f = fixture();
    f.transport.respond(400, json!({"message": "Invalid data"}));
    assert!(matches!(block_on(f.auth.register("a", "bad", "x")), Err(ApiError::Validation(_))));
}

// =============================================================
// login
// =============================================================

#[test]
fn login_success_persists_and_broadcasts() {
    let f = fixture();
    f.transport.respond(200, login_ok("T"));

    let (profile, token) = block_on(f.auth.login("ana", "secret1")).unwrap();

    assert_eq!(profile, ana());
    assert_eq!(token.as_str(), "T");
    assert_eq!(f.broadcaster.current_user(), Some(ana()));
    assert_eq!(read_token(f.store.as_ref()), Some(Credential::new("T")));
    let stored: UserProfile = serde_json::from_str(&f.store.get(USER_KEY).unwrap()).unwrap();
    assert_eq!(stored, ana());
    assert!(f.auth.is_authenticated());
}

#[test]
fn login_commits_store_before_notifying_subscribers() {
    let f = fixture();
    let store = f.store.clone();
    let snapshots = Rc::new(RefCell::new(Vec::new()));
    let sink = snapshots.clone();
    let _sub = f.broadcaster.subscribe(move |user| {
        sink.borrow_mut()
            .push((user.is_some(), store.get(ACCESS_TOKEN_KEY), store.get(USER_KEY).is_some()));
    });
    f.transport.respond(200, login_ok("T"));

    block_on(f.auth.login("ana", "secret1")).unwrap();

    assert_eq!(
        *snapshots.borrow(),
        vec![(false, None, false), (true, Some("T".to_owned()), true)]
    );
}

#[test]
fn login_wrong_password_surfaces_message_and_keeps_state() {
    let f = fixture();
    f.transport.respond(401, json!({"message": "Invalid credentials. Attempts left: 4"}));

    let err = block_on(f.auth.login("ana", "wrongpass")).unwrap_err();

    assert_eq!(err, ApiError::InvalidCredentials("Invalid credentials. Attempts left: 4".to_owned()));
    assert_eq!(err.to_string(), "Invalid credentials. Attempts left: 4");
    assert!(f.broadcaster.current_user().is_none());
    assert!(f.store.is_empty());
}

#[test]
fn login_failure_keeps_previous_session() {
    let f = fixture();
    f.transport.respond(200, login_ok("first"));
    block_on(f.auth.login("ana", "secret1")).unwrap();
    f.transport.fail(ApiError::Network("offline".to_owned()));

    let err = block_on(f.auth.login("rui", "secret2")).unwrap_err();

    assert_eq!(err, ApiError::Network("offline".to_owned()));
    assert_eq!(f.broadcaster.current_user(), Some(ana()));
    assert_eq!(f.store.get(ACCESS_TOKEN_KEY).as_deref(), Some("first"));
}

#[test]
fn login_with_malformed_response_does_not_authenticate() {
    let f = fixture();
    f.transport.respond(200, json!({"access_token": "T"}));

    assert!(matches!(block_on(f.auth.login("ana", "secret1")), Err(ApiError::Parse(_))));
    assert!(f.store.is_empty());
    assert!(f.broadcaster.current_user().is_none());
}

#[test]
fn login_with_empty_token_is_rejected_before_any_write() {
    let f = fixture();
    f.transport.respond(200, login_ok(""));

    let result = block_on(f.auth.login("ana", "secret1"));

    assert!(matches!(result, Err(ApiError::Parse(_))));
    assert!(f.store.is_empty());
    assert!(f.broadcaster.current_user().is_none());
    assert!(!f.auth.is_authenticated());
}

#[test]
fn second_login_wins() {
    let f = fixture();
    f.transport.respond(200, login_ok("first"));
    f.transport.respond(
        200,
        json!({"access_token": "second", "token_type": "bearer",
               "user": {"id": 2, "username": "rui", "email": "r@x.pt", "created_at": "2024-02-01T00:00:00Z"}}),
    );

    block_on(f.auth.login("ana", "secret1")).unwrap();
    block_on(f.auth.login("rui", "secret2")).unwrap();

    assert_eq!(f.store.get(ACCESS_TOKEN_KEY).as_deref(), Some("second"));
    assert_eq!(f.broadcaster.current_user().map(|u| u.username), Some("rui".to_owned()));
}

// =============================================================
// register_and_login
// =============================================================

#[test]
fn register_and_login_authenticates_after_both_calls() {
    let f = fixture();
    f.transport.respond(201, json!({"message": "User created"}));
    f.transport.respond(200, login_ok("T"));

    block_on(f.auth.register_and_login("ana", "a@x.pt", "secret1")).unwrap();

    let paths: Vec<_> = f.transport.sent().into_iter().map(|(_, r)| r.path).collect();
    assert_eq!(paths, vec!["/auth/register", "/auth/login"]);
    assert_eq!(f.broadcaster.current_user(), Some(ana()));
}

#[test]
fn register_and_login_stops_after_failed_register() {
    let f = fixture();
    f.transport.respond(409, json!({"message": "Email already exists"}));

    let err = block_on(f.auth.register_and_login("ana", "a@x.pt", "secret1")).unwrap_err();

    assert!(matches!(err, ApiError::Conflict(_)));
    assert_eq!(f.transport.sent().len(), 1);
    assert!(f.broadcaster.current_user().is_none());
}

// =============================================================
// logout
// =============================================================

#[test]
fn logout_clears_everything_and_navigates_to_login() {
    let f = fixture();
    f.transport.respond(200, login_ok("T"));
    block_on(f.auth.login("ana", "secret1")).unwrap();

    f.auth.logout();

    assert!(f.broadcaster.current_user().is_none());
    assert!(f.store.get(ACCESS_TOKEN_KEY).is_none());
    assert!(f.store.get(USER_KEY).is_none());
    assert!(!f.auth.is_authenticated());
    assert_eq!(f.navigator.visited(), vec!["/login".to_owned()]);
}

#[test]
fn logout_is_idempotent() {
    let f = fixture();
    f.transport.respond(200, login_ok("T"));
    block_on(f.auth.login("ana", "secret1")).unwrap();

    f.auth.logout();
    let after_once = (f.broadcaster.current_user(), f.store.len());
    f.auth.logout();
    let after_twice = (f.broadcaster.current_user(), f.store.len());

    assert_eq!(after_once, after_twice);
    assert_eq!(after_twice, (None, 0));
}

#[test]
fn logout_when_signed_out_is_not_an_error() {
    let f = fixture();
    f.auth.logout();
    assert!(f.broadcaster.current_user().is_none());
    assert_eq!(f.navigator.visited(), vec!["/login".to_owned()]);
}

#[test]
fn logout_keeps_unrelated_keys() {
    let f = fixture_with(MemoryStore::with_entries([(ACCESS_TOKEN_KEY, "T"), ("theme_mode", "dark")]));
    f.auth.logout();
    assert_eq!(f.store.get("theme_mode").as_deref(), Some("dark"));
}
