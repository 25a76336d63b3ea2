//! Request handler module
//!
//! Routes `/books` and `/books/{id}` requests to the collection operations.

pub mod books;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
