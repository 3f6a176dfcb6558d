//! Book model and related wire types.
//!
//! All request/response field names use camelCase on the wire. `finished`
//! is derived state: it always equals `pageCount == readPage` and is never
//! accepted as input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// A book record as stored in the collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Opaque unique identifier, assigned at creation
    pub id: String,
    pub name: String,
    pub year: i32,
    pub author: String,
    pub summary: String,
    pub publisher: String,
    /// Total number of pages
    pub page_count: u32,
    /// Pages read so far; never exceeds `page_count`
    pub read_page: u32,
    /// Derived: `page_count == read_page`
    pub finished: bool,
    pub reading: bool,
    /// Set once at creation
    pub inserted_at: DateTime<Utc>,
    /// Refreshed on every successful update
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or updating a book.
///
/// Fields absent from the request decode to their type defaults; `name`
/// stays optional so that a missing name and an empty one fail validation
/// the same way.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct BookPayload {
    pub name: Option<String>,
    pub year: i32,
    pub author: String,
    pub summary: String,
    pub publisher: String,
    pub page_count: u32,
    pub read_page: u32,
    pub reading: bool,
}

/// Reduced projection of a book returned by the list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    pub publisher: String,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            name: book.name.clone(),
            publisher: book.publisher.clone(),
        }
    }
}

/// Query parameters for filtered listing.
///
/// Each filter is independent; absent parameters are no-ops. The boolean
/// filters arrive as flag strings and are normalized by [`parse_flag`].
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct BookQuery {
    /// Case-insensitive substring match on the book name
    pub name: Option<String>,
    /// Flag: select books currently being read (or not)
    pub reading: Option<String>,
    /// Flag: select finished (or unfinished) books
    pub finished: Option<String>,
}

impl BookQuery {
    /// Three-valued reading filter: absent, true, or false
    pub fn reading_flag(&self) -> Option<bool> {
        self.reading.as_deref().map(parse_flag)
    }

    /// Three-valued finished filter: absent, true, or false
    pub fn finished_flag(&self) -> Option<bool> {
        self.finished.as_deref().map(parse_flag)
    }
}

/// Normalize a boolean query flag: `"1"` selects true, any other value
/// selects false.
fn parse_flag(raw: &str) -> bool {
    raw == "1"
}
