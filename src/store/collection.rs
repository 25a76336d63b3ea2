// In-memory book collection
// Ordered by insertion; lookups are linear scans by id

use std::collections::HashSet;

use super::error::StoreError;
use super::{Book, BookPayload};

/// Ordered collection of books plus the next id to hand out.
///
/// `next_id` only ever grows, so an id freed by a delete is never reused.
/// It is `None` once `i64::MAX` has been handed out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookStore {
    books: Vec<Book>,
    next_id: Option<i64>,
}

impl BookStore {
    pub fn new() -> Self {
        Self::from_books(Vec::new())
    }

    /// Build a store from loaded records, keeping their order and ids.
    pub fn from_books(books: Vec<Book>) -> Self {
        let max_id = books.iter().map(|b| b.id).max().unwrap_or(0);
        let count = i64::try_from(books.len()).unwrap_or(i64::MAX);
        Self {
            next_id: max_id.max(count).checked_add(1),
            books,
        }
    }

    pub fn list(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub const fn next_id(&self) -> Option<i64> {
        self.next_id
    }

    /// Append a new book at the end and return it with its assigned id.
    pub fn append(&mut self, payload: BookPayload) -> Result<Book, StoreError> {
        let id = self.next_id.ok_or(StoreError::IdsExhausted)?;
        let book = payload.into_book(id);
        self.next_id = id.checked_add(1);
        self.books.push(book.clone());
        Ok(book)
    }

    /// Overwrite title and author of the first book with `id`.
    pub fn replace(&mut self, id: i64, payload: BookPayload) -> Result<Book, StoreError> {
        let slot = self
            .books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(StoreError::NotFound(id))?;
        *slot = payload.into_book(id);
        Ok(slot.clone())
    }

    /// Remove the first book with `id`, keeping the order of the rest.
    pub fn remove(&mut self, id: i64) -> Result<Book, StoreError> {
        let index = self
            .books
            .iter()
            .position(|b| b.id == id)
            .ok_or(StoreError::NotFound(id))?;
        Ok(self.books.remove(index))
    }

    /// Ids that occur more than once, in first-seen order
    pub fn duplicate_ids(&self) -> Vec<i64> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        self.books
            .iter()
            .filter(|b| !seen.insert(b.id) && reported.insert(b.id))
            .map(|b| b.id)
            .collect()
    }
}

impl Default for BookStore {
    fn default() -> Self {
        Self::new()
    }
}
