//! Network layer: wire types, request values, transport, and the API client.
//!
//! ARCHITECTURE
//! ============
//! `http` defines framework-neutral request/response values and the
//! `Transport` seam. `api` joins them with config and the request authorizer.
//! `tasks` is the typed task-endpoint wrapper on top of `api`.

pub mod api;
pub mod http;
pub mod tasks;
pub mod types;
