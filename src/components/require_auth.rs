//! Wrapper that renders protected views only for signed-in users.
//!
//! SYSTEM CONTEXT
//! ==============
//! Applies the `RouteGuard` decision to the current location. Denied visits
//! are replaced with `/login?returnUrl=<path>` so the login page can send the
//! user back afterwards. The decision is re-evaluated when the location or
//! the auth state changes, so logging out elsewhere also bounces the view.

#[cfg(test)]
#[path = "require_auth_test.rs"]
mod require_auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::state::auth::{AuthState, use_session};

/// Path plus query string of the location being entered.
pub fn requested_path(pathname: &str, search: &str) -> String {
    let search = search.trim_start_matches('?');
    if search.is_empty() {
        pathname.to_owned()
    } else {
        format!("{pathname}?{search}")
    }
}

#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let session = use_session();
    let auth = expect_context::<RwSignal<AuthState>>();
    let location = use_location();
    let navigate = use_navigate();

    let decision = Memo::new(move |_| {
        auth.track();
        let path = requested_path(&location.pathname.get(), &location.search.get());
        session.with_value(|s| s.guard.can_enter(&path))
    });

    Effect::new(move || {
        if let Some(target) = decision.get().redirect() {
            navigate(&target.to_href(), NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    view! {
        <Show when=move || decision.get().is_allowed()>
            {children()}
        </Show>
    }
}
