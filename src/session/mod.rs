//! Client-side session and authorization.
//!
//! ARCHITECTURE
//! ============
//! `store` persists the credential and profile, `broadcaster` holds the
//! in-memory principal and notifies observers, `authorizer` stamps outbound
//! requests, `guard` gates protected routes, and `auth` is the only writer.
//!
//! [`Session`] constructs one instance of each around a shared store and is
//! passed explicitly to consumers (through Leptos context in the app).

pub mod auth;
pub mod authorizer;
pub mod broadcaster;
pub mod guard;
pub mod store;


use std::rc::Rc;

use crate::config::AppConfig;
use crate::nav::Navigator;
use crate::net::api::ApiClient;
use crate::net::http::Transport;
use crate::net::tasks::TaskApi;

use self::auth::AuthService;
use self::authorizer::RequestAuthorizer;
use self::broadcaster::SessionBroadcaster;
use self::guard::RouteGuard;
use self::store::SessionStore;

/// The wired-up session subsystem. Cloning shares every component.
#[derive(Clone)]
pub struct Session {
    pub broadcaster: SessionBroadcaster,
    pub guard: RouteGuard,
    pub auth: AuthService,
    pub tasks: TaskApi,
}

impl Session {
    /// Wire all components around `store`.
    ///
    /// The broadcaster is seeded from whatever the store already holds, so a
    /// reload with a saved session starts signed-in without a network call.
    pub fn new(
        config: AppConfig,
        store: Rc<dyn SessionStore>,
        transport: Rc<dyn Transport>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        let broadcaster = SessionBroadcaster::from_store(store.as_ref());
        let api = ApiClient::new(config, transport, RequestAuthorizer::new(store.clone()));
        Self {
            guard: RouteGuard::new(store.clone()),
            auth: AuthService::new(store, broadcaster.clone(), api.clone(), navigator),
            tasks: TaskApi::new(api),
            broadcaster,
        }
    }

    /// Browser session: `localStorage` plus `fetch`.
    #[cfg(feature = "csr")]
    pub fn browser(navigator: Rc<dyn Navigator>) -> Self {
        let config = AppConfig::load();
        let transport = crate::net::http::GlooTransport::new(config.request_timeout_ms);
        Self::new(config, Rc::new(store::LocalStorageStore), Rc::new(transport), navigator)
    }
}
