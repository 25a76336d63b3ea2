//! HTTP protocol layer module
//!
//! Response builders shared by the request handlers.

pub mod response;

// Re-export commonly used helpers
pub use response::{
    build_204_response, build_404_response, build_405_response, build_413_response,
    build_health_response, error_response, json_response,
};
