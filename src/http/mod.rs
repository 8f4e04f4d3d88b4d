//! HTTP protocol layer module
//!
//! Response construction, decoupled from request dispatch.

pub mod response;

// Re-export commonly used builders
pub use response::{
    body_len, build_greeting_response, build_not_found_response, build_text_response,
    json_response,
};
