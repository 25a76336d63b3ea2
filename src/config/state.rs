// Application state module
// Owns the book collection shared by all connections

use tokio::sync::RwLock;

use super::types::Config;
use crate::store::{self, BookStore, StoreError};

/// Application state
pub struct AppState {
    pub config: Config,
    /// The book collection; every read and write goes through this lock
    pub store: RwLock<BookStore>,
}

impl AppState {
    pub fn new(config: Config, books: BookStore) -> Self {
        Self {
            config,
            store: RwLock::new(books),
        }
    }

    /// Run `op` against the collection under the write lock, then persist.
    ///
    /// If `op` fails nothing was changed. If the write-back fails the
    /// collection is restored to its state before `op`, so memory and the
    /// database file never disagree.
    pub async fn mutate_store<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut BookStore) -> Result<T, StoreError>,
    {
        let mut books = self.store.write().await;
        if !self.config.storage.persist {
            return op(&mut books);
        }

        let snapshot = books.clone();
        let output = op(&mut books)?;
        if let Err(e) = store::save_books(&self.config.storage.db_path, books.list()).await {
            *books = snapshot;
            return Err(e);
        }

        Ok(output)
    }
}
