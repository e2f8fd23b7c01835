//! Route guard for views that need a signed-in user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The guard checks the persistent store directly rather than the
//! broadcaster, so the answer is correct even before any in-memory session
//! state exists for this navigation. It holds no state of its own.
//!
//! This is a UX gate only. The server still rejects unauthorized calls.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::rc::Rc;

use super::store::{self, SessionStore};
use crate::nav::NavTarget;

/// Unauthenticated entry point.
pub const LOGIN_PATH: &str = "/login";
/// Query parameter carrying the originally requested path.
pub const RETURN_URL_PARAM: &str = "returnUrl";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Deny {
        redirect_to: String,
        return_url: String,
    },
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Where the navigation layer should go instead, if denied.
    pub fn redirect(&self) -> Option<NavTarget> {
        match self {
            Self::Allow => None,
            Self::Deny { redirect_to, return_url } => {
                Some(NavTarget::new(redirect_to.clone()).with_query(RETURN_URL_PARAM, return_url.clone()))
            }
        }
    }
}

#[derive(Clone)]
pub struct RouteGuard {
    store: Rc<dyn SessionStore>,
}

impl RouteGuard {
    pub fn new(store: Rc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Allow iff a credential is stored; otherwise deny with a redirect to
    /// the login page carrying `target_path` back.
    pub fn can_enter(&self, target_path: &str) -> GuardDecision {
        if store::read_token(self.store.as_ref()).is_some() {
            GuardDecision::Allow
        } else {
            log::debug!("guard denied: path={target_path}");
            GuardDecision::Deny {
                redirect_to: LOGIN_PATH.to_owned(),
                return_url: target_path.to_owned(),
            }
        }
    }
}

/// Post-login destination taken from a `returnUrl` value.
///
/// Only same-origin absolute paths are honoured; anything else (missing,
/// empty, protocol-relative `//host`, full URLs, or the login page itself)
/// falls back to `default`.
pub fn safe_return_path(return_url: Option<&str>, default: &str) -> String {
    match return_url.map(str::trim) {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.starts_with("/\\")
                && path.split(['?', '#']).next() != Some(LOGIN_PATH) =>
        {
            path.to_owned()
        }
        _ => default.to_owned(),
    }
}
