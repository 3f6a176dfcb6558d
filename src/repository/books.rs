//! Books repository: the process-wide ordered book collection.
//!
//! The collection lives entirely in memory and is discarded at process
//! termination. A single `RwLock` guards it; every operation holds the lock
//! for its full duration, so concurrent handlers never observe a partial
//! mutation. No method suspends while the lock is held.

use std::sync::{Arc, RwLock};

use crate::models::book::Book;

/// Ordered in-memory collection of books, unique by id, insertion order
/// preserved. Cloning shares the same underlying collection.
#[derive(Clone, Default)]
pub struct BooksRepository {
    books: Arc<RwLock<Vec<Book>>>,
}

impl BooksRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to the end of the collection
    pub fn insert(&self, book: Book) {
        self.books.write().expect("book store lock poisoned").push(book);
    }

    /// Snapshot of the full collection in insertion order
    pub fn all(&self) -> Vec<Book> {
        self.books.read().expect("book store lock poisoned").clone()
    }

    /// First record whose id matches, if any
    pub fn get(&self, id: &str) -> Option<Book> {
        self.books
            .read()
            .expect("book store lock poisoned")
            .iter()
            .find(|book| book.id == id)
            .cloned()
    }

    /// Apply `update` to the record with the given id, atomically under the
    /// write lock. Returns `None` when the id is absent, otherwise the
    /// closure's result. The record's position in the collection is
    /// unchanged.
    pub fn update_entry<T>(&self, id: &str, update: impl FnOnce(&mut Book) -> T) -> Option<T> {
        let mut books = self.books.write().expect("book store lock poisoned");
        books.iter_mut().find(|book| book.id == id).map(update)
    }

    /// Remove the record with the given id; subsequent records shift.
    /// Returns whether a record was removed.
    pub fn remove(&self, id: &str) -> bool {
        let mut books = self.books.write().expect("book store lock poisoned");
        match books.iter().position(|book| book.id == id) {
            Some(index) => {
                books.remove(index);
                true
            }
            None => false,
        }
    }

    /// Whether a record with the given id is present
    pub fn contains(&self, id: &str) -> bool {
        self.books
            .read()
            .expect("book store lock poisoned")
            .iter()
            .any(|book| book.id == id)
    }

    /// Number of records in the collection
    pub fn len(&self) -> usize {
        self.books.read().expect("book store lock poisoned").len()
    }

    /// Whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
