//! Register, login and logout.
//!
//! SYSTEM CONTEXT
//! ==============
//! These are the only operations that mutate the session. Each write to the
//! store is paired with a broadcaster update in the same call, in this order:
//! token, then profile, then notification, then success to the caller. A
//! caller that sees `Ok` can rely on `current_user()` and on every later
//! request being authorized.
//!
//! Failed calls leave the session untouched.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::rc::Rc;

use super::broadcaster::SessionBroadcaster;
use super::guard::LOGIN_PATH;
use super::store::{ACCESS_TOKEN_KEY, SessionStore, USER_KEY};
use crate::error::ApiError;
use crate::nav::{NavTarget, Navigator};
use crate::net::api::ApiClient;
use crate::net::types::{Credential, LoginRequest, LoginResponse, RegisterRequest, UserProfile};

const REGISTER_ENDPOINT: &str = "/auth/register";
const LOGIN_ENDPOINT: &str = "/auth/login";

#[derive(Clone)]
pub struct AuthService {
    store: Rc<dyn SessionStore>,
    broadcaster: SessionBroadcaster,
    api: ApiClient,
    navigator: Rc<dyn Navigator>,
}

impl AuthService {
    pub fn new(
        store: Rc<dyn SessionStore>,
        broadcaster: SessionBroadcaster,
        api: ApiClient,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        Self { store, broadcaster, api, navigator }
    }

    /// Create an account. Does not sign in.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] for rejected input, [`ApiError::Conflict`]
    /// when the username or email is taken, transport errors otherwise.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<(), ApiError> {
        let body = RegisterRequest {
            username: username.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
        };
        self.api.post_discard(REGISTER_ENDPOINT, &body).await.inspect_err(|e| {
            log::warn!("register failed: {e}");
        })
    }

    /// Exchange credentials for a token and establish the session.
    ///
    /// # Errors
    ///
    /// [`ApiError::InvalidCredentials`] when the server refuses the
    /// credentials, transport or status errors otherwise. The session is not
    /// modified on error.
    pub async fn login(&self, username: &str, password: &str) -> Result<(UserProfile, Credential), ApiError> {
        let body = LoginRequest { username: username.to_owned(), password: password.to_owned() };
        let response: LoginResponse = self
            .api
            .post(LOGIN_ENDPOINT, &body)
            .await
            .map_err(ApiError::into_login_error)
            .inspect_err(|e| log::warn!("login failed: {e}"))?;

        self.establish(&response.user, &response.access_token)?;
        log::info!("signed in: user={}", response.user.username);
        Ok((response.user, response.access_token))
    }

    /// Register, then sign in with the same credentials.
    ///
    /// # Errors
    ///
    /// The first failing step's error. A registration that succeeds followed
    /// by a failed login leaves the account created but the session empty.
    pub async fn register_and_login(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(UserProfile, Credential), ApiError> {
        self.register(username, email, password).await?;
        self.login(username, password).await
    }

    /// Clear the session and go to the login page. Safe to call repeatedly.
    pub fn logout(&self) {
        self.store.remove(ACCESS_TOKEN_KEY);
        self.store.remove(USER_KEY);
        self.broadcaster.clear_authenticated();
        log::info!("signed out");
        self.navigator.navigate(&NavTarget::new(LOGIN_PATH));
    }

    /// Whether a credential is stored. Same rule the route guard applies.
    pub fn is_authenticated(&self) -> bool {
        super::store::read_token(self.store.as_ref()).is_some()
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.broadcaster.current_user()
    }

    fn establish(&self, profile: &UserProfile, token: &Credential) -> Result<(), ApiError> {
        // An empty token would read back as absent and leave the user locked out.
        if token.as_str().trim().is_empty() {
            return Err(ApiError::Parse("login response did not include an access token".to_owned()));
        }
        let serialized = serde_json::to_string(profile)
            .map_err(|e| ApiError::Serialization(format!("failed to encode profile: {e}")))?;
        self.store.put(ACCESS_TOKEN_KEY, token.as_str());
        self.store.put(USER_KEY, &serialized);
        self.broadcaster.set_authenticated(profile.clone());
        Ok(())
    }
}
