//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! Only auth state is shared app-wide; page-local state stays in the pages.

pub mod auth;
