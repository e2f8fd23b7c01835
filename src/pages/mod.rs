//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns its route-scoped orchestration: form state, validation,
//! and the session calls. Shared auth state comes from context.

pub mod login;
pub mod register;
pub mod task_form;
pub mod tasks;
