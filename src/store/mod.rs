//! Book collection store
//!
//! Holds the in-memory book collection, its error type and the JSON
//! database file it is loaded from and written back to.

mod collection;
mod error;
pub mod persist;

use serde::{Deserialize, Serialize};

pub use collection::BookStore;
pub use error::StoreError;
pub use persist::{load_books, save_books};

/// A single book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
}

/// Request body for create and update.
///
/// Missing `title` or `author` decode as empty strings. A client `id` must
/// still be an integer (or null) but is dropped; ids are owned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct BookPayload {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default, rename = "id")]
    _client_id: Option<i64>,
}

impl BookPayload {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            _client_id: None,
        }
    }

    pub fn into_book(self, id: i64) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
        }
    }
}
