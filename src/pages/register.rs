//! Registration page. A successful sign-up signs the user straight in.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use super::login::{DEFAULT_AFTER_LOGIN, PASSWORD_MIN_LENGTH, USERNAME_MIN_LENGTH};
use crate::error::{ApiError, MSG_REGISTER_FAILED};
use crate::state::auth::{AuthState, use_session};

pub(crate) const USERNAME_MAX_LENGTH: usize = 80;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub(crate) fn validate_register_input(
    username: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<RegisterInput, &'static str> {
    let username = username.trim();
    let email = email.trim();
    if username.is_empty() || email.is_empty() || password.is_empty() {
        return Err("All fields are required.");
    }
    let username_len = username.chars().count();
    if username_len < USERNAME_MIN_LENGTH {
        return Err("Username must be at least 3 characters.");
    }
    if username_len > USERNAME_MAX_LENGTH {
        return Err("Username must be at most 80 characters.");
    }
    if !is_plausible_email(email) {
        return Err("Invalid email.");
    }
    if password.chars().count() < PASSWORD_MIN_LENGTH {
        return Err("Password must be at least 6 characters.");
    }
    if password != confirm {
        return Err("Passwords do not match.");
    }
    Ok(RegisterInput {
        username: username.to_owned(),
        email: email.to_owned(),
        password: password.to_owned(),
    })
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.split('.').count() >= 2
                && domain.split('.').all(|part| !part.is_empty())
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

pub(crate) fn register_error_message(err: &ApiError) -> String {
    err.user_message(MSG_REGISTER_FAILED)
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let session = use_session();
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if auth.get_untracked().loading {
            return;
        }
        let input = match validate_register_input(
            &username.get_untracked(),
            &email.get_untracked(),
            &password.get_untracked(),
            &confirm.get_untracked(),
        ) {
            Ok(input) => input,
            Err(message) => {
                error.set(Some(message.to_owned()));
                return;
            }
        };

        error.set(None);
        auth.update(|s| s.loading = true);
        let service = session.with_value(|s| s.auth.clone());
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let result = service
                .register_and_login(&input.username, &input.email, &input.password)
                .await;
            auth.update(|s| s.loading = false);
            match result {
                Ok(_) => navigate(DEFAULT_AFTER_LOGIN, NavigateOptions::default()),
                Err(e) => error.set(Some(register_error_message(&e))),
            }
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Task Manager"</h1>
                <p class="auth-card__subtitle">"Create account"</p>
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
                        type="email"
                        autocomplete="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        autocomplete="new-password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        autocomplete="new-password"
                        placeholder="Confirm password"
                        prop:value=move || confirm.get()
                        on:input=move |ev| confirm.set(event_target_value(&ev))
                    />
                    <button class="auth-button" type="submit" disabled=move || auth.get().loading>
                        {move || if auth.get().loading { "Creating account..." } else { "Create account" }}
                    </button>
                </form>
                <Show when=move || error.get().is_some()>
                    <p class="auth-message auth-message--error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <p class="auth-card__footer">
                    "Already registered? "
                    <a href="/login">"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
