//! Build-time client configuration with an optional runtime override.
//!
//! SYSTEM CONTEXT
//! ==============
//! Static deployments bake the API base URL in at build time
//! (`TASKS_API_BASE_URL`) and may override it per host through a
//! `window.TASKS_CONFIG = { api_base_url, request_timeout_ms }` object.
//! Configuration values are public; nothing secret belongs here.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
const DEFAULT_REQUEST_TIMEOUT_MS: u32 = 10_000;

/// Client configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl AppConfig {
    /// Load from build-time environment, then apply runtime overrides.
    pub fn load() -> Self {
        let mut config = Self::default();
        apply_overrides(
            &mut config,
            RuntimeConfig {
                api_base_url: option_env!("TASKS_API_BASE_URL").and_then(normalize_value),
                request_timeout_ms: option_env!("TASKS_REQUEST_TIMEOUT_MS").and_then(parse_timeout),
            },
        );
        if let Some(runtime) = runtime_config() {
            apply_overrides(&mut config, runtime);
        }
        config
    }

    /// Join `path` onto the configured base URL.
    pub fn url(&self, path: &str) -> String {
        join_url(&self.api_base_url, path)
    }
}

#[derive(Debug, Default)]
struct RuntimeConfig {
    api_base_url: Option<String>,
    request_timeout_ms: Option<u32>,
}

fn apply_overrides(config: &mut AppConfig, overrides: RuntimeConfig) {
    if let Some(value) = overrides.api_base_url {
        config.api_base_url = value;
    }
    if let Some(value) = overrides.request_timeout_ms {
        config.request_timeout_ms = value;
    }
}

/// Join a base URL and a path with exactly one `/` between them.
pub fn join_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();
    if base.is_empty() {
        path.to_owned()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_owned()) }
}

fn parse_timeout(value: &str) -> Option<u32> {
    value.trim().parse().ok().filter(|ms| *ms > 0)
}

#[cfg(feature = "csr")]
fn runtime_config() -> Option<RuntimeConfig> {
    use js_sys::Reflect;
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let config = Reflect::get(&window, &JsValue::from_str("TASKS_CONFIG")).ok()?;
    if config.is_null() || config.is_undefined() {
        return None;
    }
    let read = |key: &str| Reflect::get(&config, &JsValue::from_str(key)).ok();

    Some(RuntimeConfig {
        api_base_url: read("api_base_url")
            .and_then(|v| v.as_string())
            .and_then(|v| normalize_value(&v)),
        request_timeout_ms: read("request_timeout_ms").and_then(|v| v.as_f64()).and_then(timeout_from_f64),
    })
}

#[cfg(feature = "csr")]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn timeout_from_f64(ms: f64) -> Option<u32> {
    (ms.is_finite() && ms >= 1.0 && ms <= f64::from(u32::MAX)).then(|| ms as u32)
}

#[cfg(not(feature = "csr"))]
fn runtime_config() -> Option<RuntimeConfig> {
    None
}
