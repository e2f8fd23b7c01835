//! Login page: username + password, then back to where the guard stopped us.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::error::{ApiError, MSG_LOGIN_FAILED};
use crate::session::guard::{RETURN_URL_PARAM, safe_return_path};
use crate::state::auth::{AuthState, use_session};

pub(crate) const USERNAME_MIN_LENGTH: usize = 3;
pub(crate) const PASSWORD_MIN_LENGTH: usize = 6;

/// Landing page after a login without a `returnUrl`.
pub const DEFAULT_AFTER_LOGIN: &str = "/tasks";

/// Trim the username and check both fields before any network call.
pub(crate) fn validate_login_input(username: &str, password: &str) -> Result<(String, String), &'static str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err("Enter your username and password.");
    }
    if username.chars().count() < USERNAME_MIN_LENGTH {
        return Err("Username must be at least 3 characters.");
    }
    if password.chars().count() < PASSWORD_MIN_LENGTH {
        return Err("Password must be at least 6 characters.");
    }
    Ok((username.to_owned(), password.to_owned()))
}

/// Message shown under the form for a failed login.
pub(crate) fn login_error_message(err: &ApiError) -> String {
    err.user_message(MSG_LOGIN_FAILED)
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    let query = use_query_map();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if auth.get_untracked().loading {
            return;
        }
        let (username_value, password_value) =
            match validate_login_input(&username.get_untracked(), &password.get_untracked()) {
                Ok(values) => values,
                Err(message) => {
                    error.set(Some(message.to_owned()));
                    return;
                }
            };
        let destination =
            safe_return_path(query.get_untracked().get(RETURN_URL_PARAM).as_deref(), DEFAULT_AFTER_LOGIN);

        error.set(None);
        auth.update(|s| s.loading = true);
        let service = session.with_value(|s| s.auth.clone());
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let result = service.login(&username_value, &password_value).await;
            auth.update(|s| s.loading = false);
            match result {
                Ok(_) => navigate(&destination, NavigateOptions::default()),
                Err(e) => error.set(Some(login_error_message(&e))),
            }
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Task Manager"</h1>
                <p class="auth-card__subtitle">"Sign in"</p>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="text"
                        autocomplete="username"
                        placeholder="Username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        autocomplete="current-password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="auth-button" type="submit" disabled=move || auth.get().loading>
                        {move || if auth.get().loading { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
                <Show when=move || error.get().is_some()>
                    <p class="auth-message auth-message--error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <p class="auth-card__footer">
                    "No account? "
                    <a href="/register">"Register"</a>
                </p>
            </div>
        </div>
    }
}
