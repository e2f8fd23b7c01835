//! # tasks-client
//!
//! Leptos + WASM frontend for the task manager API.
//!
//! The `session` module is the core: token and profile persistence, the
//! session broadcaster, request authorization, the route guard, and the
//! auth flows. `net` carries wire types and the HTTP client; `pages`,
//! `components`, and `state` are the Leptos glue around them.

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod nav;
pub mod net;
pub mod pages;
pub mod session;
pub mod state;

#[cfg(test)]
mod test_support;

/// Browser entry point: install logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
