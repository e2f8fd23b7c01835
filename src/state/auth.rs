//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthState` is the Leptos-side mirror of the session broadcaster: the
//! provider subscribes once and copies every emitted principal into a signal,
//! so views re-render on login and logout without polling.
//!
//! The `Session` itself holds `Rc`s and is not `Send`, so it is placed in
//! context behind a local `StoredValue` handle.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::nav::FnNavigator;
use crate::net::types::UserProfile;
use crate::session::Session;

/// Authentication state tracking the current user and in-flight auth calls.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<UserProfile>,
    /// A login or register call is outstanding; forms refuse resubmission.
    pub loading: bool,
}

impl AuthState {
    /// Greeting name for the header, if signed in.
    pub fn display_name(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.username.as_str())
    }
}

/// Context handle to the wired session.
pub type SessionHandle = StoredValue<Session, LocalStorage>;

/// The session provided by [`SessionProvider`].
pub fn use_session() -> SessionHandle {
    expect_context::<SessionHandle>()
}

/// Copy a broadcast principal into the auth signal state.
pub fn apply_broadcast(state: &mut AuthState, user: Option<&UserProfile>) {
    state.user = user.cloned();
}

/// Builds the browser session, bridges it into `RwSignal<AuthState>` and
/// provides both as context. Must render inside the `<Router>`.
#[component]
pub fn SessionProvider(children: Children) -> impl IntoView {
    let navigate = use_navigate();
    let navigator = FnNavigator::new(move |href| navigate(href, NavigateOptions::default()));
    let session = build_session(navigator);

    let auth = RwSignal::new(AuthState::default());
    // Root subscription: lives as long as the page.
    let _subscription = session
        .broadcaster
        .subscribe(move |user| auth.update(|state| apply_broadcast(state, user)));

    provide_context(auth);
    provide_context::<SessionHandle>(StoredValue::new_local(session));

    children()
}

#[cfg(feature = "csr")]
fn build_session(navigator: FnNavigator) -> Session {
    Session::browser(std::rc::Rc::new(navigator))
}

#[cfg(not(feature = "csr"))]
fn build_session(navigator: FnNavigator) -> Session {
    use std::rc::Rc;

    Session::new(
        crate::config::AppConfig::load(),
        Rc::new(crate::session::store::MemoryStore::new()),
        Rc::new(crate::net::http::OfflineTransport),
        Rc::new(navigator),
    )
}
