//! HTTP protocol layer module
//!
//! Response builders shared by the request handlers, kept free of store logic.

pub mod response;

// Re-export commonly used types
pub use response::{
    build_405_response, build_created_response, build_error_response, build_options_response,
    build_response, APPLICATION_JSON, TEXT_PLAIN, TEXT_PLAIN_UTF8,
};
