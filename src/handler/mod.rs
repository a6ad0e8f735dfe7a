//! Request handler module
//!
//! Responsible for request routing dispatch and the message operations.

pub mod error;
pub mod messages;
pub mod router;

// Re-export main entry point
pub use error::ApiError;
pub use router::handle_request;
