//! Bookshelf service: validation, derivation and filtering rules for the
//! book collection.
//!
//! All validation and lookup checks run before any mutation, so no failure
//! path ever commits a partial state change. Identifier generation and the
//! clock are injected capabilities so tests can supply deterministic fakes.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookPayload, BookQuery, BookSummary},
    repository::books::BooksRepository,
};

/// Generates opaque unique identifiers for new records
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Provides the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Production identifier source backed by UUID v4
#[derive(Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Production clock reading the system time
#[derive(Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Clone)]
pub struct BookshelfService {
    repository: BooksRepository,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl BookshelfService {
    /// Create the service with production id and clock capabilities
    pub fn new(repository: BooksRepository) -> Self {
        Self::with_capabilities(repository, Arc::new(UuidGenerator), Arc::new(SystemClock))
    }

    /// Create the service with explicit id and clock capabilities
    pub fn with_capabilities(
        repository: BooksRepository,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            ids,
            clock,
        }
    }

    /// Add a book to the collection and return its new id.
    ///
    /// Validation order: name first, then the page invariant. One clock
    /// reading serves both timestamps.
    pub fn create(&self, payload: BookPayload) -> AppResult<String> {
        let name = match payload.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                return Err(AppError::Validation(
                    "Failed to add book. Please provide a book name".to_string(),
                ))
            }
        };
        if payload.read_page > payload.page_count {
            return Err(AppError::Validation(
                "Failed to add book. readPage must not exceed pageCount".to_string(),
            ));
        }

        let id = self.ids.next_id();
        let now = self.clock.now();
        let book = Book {
            id: id.clone(),
            name,
            year: payload.year,
            author: payload.author,
            summary: payload.summary,
            publisher: payload.publisher,
            page_count: payload.page_count,
            read_page: payload.read_page,
            finished: payload.page_count == payload.read_page,
            reading: payload.reading,
            inserted_at: now,
            updated_at: now,
        };
        self.repository.insert(book);

        tracing::info!(%id, "book added");
        Ok(id)
    }

    /// List projections of the books matching the query, in insertion order.
    ///
    /// The filters are conjunctive: name substring (case-insensitive), then
    /// reading equality, then finished equality. An empty result is valid.
    pub fn list(&self, query: &BookQuery) -> Vec<BookSummary> {
        let needle = query.name.as_deref().map(str::to_lowercase);
        let reading = query.reading_flag();
        let finished = query.finished_flag();

        self.repository
            .all()
            .iter()
            .filter(|book| {
                needle
                    .as_deref()
                    .map_or(true, |needle| book.name.to_lowercase().contains(needle))
            })
            .filter(|book| reading.map_or(true, |reading| book.reading == reading))
            .filter(|book| finished.map_or(true, |finished| book.finished == finished))
            .map(BookSummary::from)
            .collect()
    }

    /// Fetch the full record for the given id
    pub fn get(&self, id: &str) -> AppResult<Book> {
        self.repository
            .get(id)
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    /// Replace the mutable fields of an existing book.
    ///
    /// An unknown id is reported before payload validation, so a bad payload
    /// against a missing record still yields not-found. `id` and
    /// `inserted_at` are preserved; `finished` is recomputed and
    /// `updated_at` refreshed.
    pub fn update(&self, id: &str, payload: BookPayload) -> AppResult<()> {
        let outcome = self.repository.update_entry(id, |book| {
            let name = match payload.name.as_deref() {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => {
                    return Err(AppError::Validation(
                        "Failed to update book. Please provide a book name".to_string(),
                    ))
                }
            };
            if payload.read_page > payload.page_count {
                return Err(AppError::Validation(
                    "Failed to update book. readPage must not exceed pageCount".to_string(),
                ));
            }

            book.name = name;
            book.year = payload.year;
            book.author = payload.author.clone();
            book.summary = payload.summary.clone();
            book.publisher = payload.publisher.clone();
            book.page_count = payload.page_count;
            book.read_page = payload.read_page;
            book.reading = payload.reading;
            book.finished = payload.page_count == payload.read_page;
            book.updated_at = self.clock.now();
            Ok(())
        });

        match outcome {
            Some(result) => {
                result?;
                tracing::info!(%id, "book updated");
                Ok(())
            }
            None => Err(AppError::NotFound(
                "Failed to update book. Id not found".to_string(),
            )),
        }
    }

    /// Remove the book with the given id from the collection
    pub fn delete(&self, id: &str) -> AppResult<()> {
        if self.repository.remove(id) {
            tracing::info!(%id, "book deleted");
            Ok(())
        } else {
            Err(AppError::NotFound(
                "Failed to delete book. Id not found".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    struct SeqIds(AtomicU32);

    impl IdGenerator for SeqIds {
        fn next_id(&self) -> String {
            format!("book-{}", self.0.fetch_add(1, Ordering::Relaxed))
        }
    }

    struct ManualClock(Mutex<DateTime<Utc>>);

    impl ManualClock {
        fn at(instant: &str) -> Arc<Self> {
            Arc::new(Self(Mutex::new(instant.parse().unwrap())))
        }

        fn set(&self, instant: &str) {
            *self.0.lock().unwrap() = instant.parse().unwrap();
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    fn service_with_clock(clock: Arc<ManualClock>) -> BookshelfService {
        BookshelfService::with_capabilities(
            BooksRepository::new(),
            Arc::new(SeqIds(AtomicU32::new(1))),
            clock,
        )
    }

    fn service() -> BookshelfService {
        service_with_clock(ManualClock::at("2024-05-01T10:00:00Z"))
    }

    fn payload(name: &str, page_count: u32, read_page: u32) -> BookPayload {
        BookPayload {
            name: Some(name.to_string()),
            year: 2019,
            author: "An Author".to_string(),
            summary: "A summary".to_string(),
            publisher: "A Publisher".to_string(),
            page_count,
            read_page,
            reading: false,
        }
    }

    #[test]
    fn test_create_resolves_with_derived_finished() {
        let service = service();

        let id = service.create(payload("Dune", 412, 412)).unwrap();
        let book = service.get(&id).unwrap();
        assert_eq!(book.id, id);
        assert!(book.finished);
        assert_eq!(book.inserted_at, book.updated_at);

        let id = service.create(payload("Hyperion", 482, 100)).unwrap();
        assert!(!service.get(&id).unwrap().finished);
    }

    #[test]
    fn test_create_rejects_missing_or_empty_name() {
        let service = service();

        let mut unnamed = payload("x", 100, 0);
        unnamed.name = None;
        assert!(matches!(
            service.create(unnamed).unwrap_err(),
            AppError::Validation(_)
        ));

        assert!(matches!(
            service.create(payload("", 100, 0)).unwrap_err(),
            AppError::Validation(_)
        ));

        assert!(service.repository.is_empty());
    }

    #[test]
    fn test_create_rejects_read_page_beyond_page_count() {
        let service = service();
        let err = service.create(payload("Dune", 100, 101)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(service.repository.len(), 0);
    }

    #[test]
    fn test_list_returns_projections_in_insertion_order() {
        let service = service();
        service.create(payload("First", 10, 0)).unwrap();
        service.create(payload("Second", 10, 0)).unwrap();
        service.create(payload("Third", 10, 0)).unwrap();

        let books = service.list(&BookQuery::default());
        let names: Vec<_> = books.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["First", "Second", "Third"]);
        assert_eq!(books[0].publisher, "A Publisher");
    }

    #[test]
    fn test_list_filters_by_name_substring_case_insensitive() {
        let service = service();
        service.create(payload("The Rust Book", 10, 0)).unwrap();
        service.create(payload("Cooking Basics", 10, 0)).unwrap();

        let query = BookQuery {
            name: Some("rUsT".to_string()),
            ..Default::default()
        };
        let books = service.list(&query);
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].name, "The Rust Book");
    }

    #[test]
    fn test_list_filters_by_reading_flag() {
        let service = service();
        let mut in_progress = payload("Reading now", 10, 2);
        in_progress.reading = true;
        service.create(in_progress).unwrap();
        service.create(payload("On the shelf", 10, 0)).unwrap();

        let query = BookQuery {
            reading: Some("1".to_string()),
            ..Default::default()
        };
        let books = service.list(&query);
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].name, "Reading now");

        // Any value other than "1" selects false
        let query = BookQuery {
            reading: Some("yes".to_string()),
            ..Default::default()
        };
        let books = service.list(&query);
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].name, "On the shelf");
    }

    #[test]
    fn test_list_filters_by_finished_flag() {
        let service = service();
        service.create(payload("A", 100, 100)).unwrap();
        service.create(payload("B", 100, 50)).unwrap();

        let query = BookQuery {
            finished: Some("1".to_string()),
            ..Default::default()
        };
        let books = service.list(&query);
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].name, "A");
    }

    #[test]
    fn test_get_unknown_id_is_not_found() {
        let service = service();
        assert!(matches!(
            service.get("missing").unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[test]
    fn test_update_refreshes_updated_at_and_preserves_identity() {
        let clock = ManualClock::at("2024-05-01T10:00:00Z");
        let service = service_with_clock(clock.clone());

        let id = service.create(payload("Dune", 412, 100)).unwrap();
        let before = service.get(&id).unwrap();

        clock.set("2024-05-02T09:30:00Z");
        service.update(&id, payload("Dune Messiah", 412, 412)).unwrap();

        let after = service.get(&id).unwrap();
        assert_eq!(after.id, before.id);
        assert_eq!(after.inserted_at, before.inserted_at);
        assert_ne!(after.updated_at, before.updated_at);
        assert_eq!(after.name, "Dune Messiah");
        assert!(after.finished);
    }

    #[test]
    fn test_update_unknown_id_wins_over_invalid_payload() {
        let service = service();

        // Even with an invalid payload, an unknown id reports not-found
        let err = service.update("missing", payload("", 10, 20)).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_update_rejects_invalid_payload_without_mutating() {
        let service = service();
        let id = service.create(payload("Dune", 412, 100)).unwrap();
        let before = service.get(&id).unwrap();

        let err = service.update(&id, payload("", 412, 100)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = service.update(&id, payload("Dune", 100, 101)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        assert_eq!(service.get(&id).unwrap(), before);
    }

    #[test]
    fn test_update_keeps_record_position() {
        let service = service();
        service.create(payload("First", 10, 0)).unwrap();
        let id = service.create(payload("Second", 10, 0)).unwrap();
        service.create(payload("Third", 10, 0)).unwrap();

        service.update(&id, payload("Second, revised", 10, 0)).unwrap();

        let names: Vec<_> = service
            .list(&BookQuery::default())
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, ["First", "Second, revised", "Third"]);
    }

    #[test]
    fn test_delete_removes_exactly_one_record() {
        let service = service();
        let keep = service.create(payload("Keep", 10, 0)).unwrap();
        let gone = service.create(payload("Gone", 10, 0)).unwrap();

        service.delete(&gone).unwrap();
        assert_eq!(service.repository.len(), 1);
        assert!(service.get(&keep).is_ok());

        // Deleting again reports not-found
        assert!(matches!(
            service.delete(&gone).unwrap_err(),
            AppError::NotFound(_)
        ));
        assert_eq!(service.repository.len(), 1);
    }
}
