//! Request handler module
//!
//! Routes each request to the health probe or to static file serving.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::{handle_request, is_health_target, HEALTH_PATHS};
