//! Reusable UI components.
//!
//! ARCHITECTURE
//! ============
//! Components read shared state from context. Network calls stay in pages,
//! except `task_delete`, which owns the delete request behind its confirm
//! step.

pub mod require_auth;
pub mod task_delete;
