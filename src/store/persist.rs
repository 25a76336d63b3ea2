// Database file module
// Loads the book collection at startup and writes it back after mutations

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use super::collection::BookStore;
use super::error::StoreError;
use super::Book;
use crate::logger;

/// On-disk layout: `{ "books": [...] }`
#[derive(Debug, Deserialize)]
struct Database {
    #[serde(default)]
    books: Vec<Book>,
}

#[derive(Debug, Serialize)]
struct DatabaseRef<'a> {
    books: &'a [Book],
}

/// Load the book collection from a JSON database file.
///
/// Called once before the server binds; every failure is fatal to startup.
pub fn load_books(path: &Path) -> Result<BookStore, StoreError> {
    let mut file = File::open(path).map_err(|source| StoreError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let database: Database = serde_json::from_str(&content).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let store = BookStore::from_books(database.books);
    for id in store.duplicate_ids() {
        logger::log_warning(&format!(
            "Duplicate book id {id} in {}; update and delete will only see the first",
            path.display()
        ));
    }
    if store.is_empty() {
        logger::log_warning(&format!("No books found in {}", path.display()));
    } else {
        logger::log_info(&format!(
            "Loaded {} books from {}",
            store.len(),
            path.display()
        ));
        if store.next_id().is_none() {
            logger::log_warning(&format!(
                "Book id {} is in use in {}; new books cannot be created",
                i64::MAX,
                path.display()
            ));
        }
    }
    Ok(store)
}

/// Write the collection back to `path`.
///
/// The JSON goes to a sibling temp file first, which is then renamed over
/// the database so readers never see a half-written file.
pub async fn save_books(path: &Path, books: &[Book]) -> Result<(), StoreError> {
    let content =
        serde_json::to_vec_pretty(&DatabaseRef { books }).map_err(StoreError::Serialize)?;

    let tmp_path = temp_path(path);
    tokio::fs::write(&tmp_path, content)
        .await
        .map_err(|source| StoreError::Write {
            path: tmp_path.clone(),
            source,
        })?;

    if let Err(source) = tokio::fs::rename(&tmp_path, path).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(StoreError::Write {
            path: path.to_path_buf(),
            source,
        });
    }

    logger::log_debug(&format!("Saved {} books to {}", books.len(), path.display()));
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(|| OsString::from("db.json"), ToOwned::to_owned);
    name.push(".tmp");
    path.with_file_name(name)
}
