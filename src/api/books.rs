//! Book endpoints
//!
//! Every response is wrapped in the uniform envelope: `status` plus an
//! optional `message` and/or `data` payload. Failures are produced by
//! [`AppError`](crate::error::AppError) and carry `status: "fail"`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::book::{Book, BookPayload, BookQuery, BookSummary},
};

/// Success envelope for book creation
#[derive(Serialize, ToSchema)]
pub struct BookCreatedResponse {
    pub status: String,
    pub message: String,
    pub data: BookCreatedData,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookCreatedData {
    /// Identifier assigned to the new book
    pub book_id: String,
}

/// Success envelope for the filtered list
#[derive(Serialize, ToSchema)]
pub struct BookListResponse {
    pub status: String,
    pub data: BookListData,
}

#[derive(Serialize, ToSchema)]
pub struct BookListData {
    pub books: Vec<BookSummary>,
}

/// Success envelope for a single book
#[derive(Serialize, ToSchema)]
pub struct BookDetailResponse {
    pub status: String,
    pub data: BookDetailData,
}

#[derive(Serialize, ToSchema)]
pub struct BookDetailData {
    pub book: Book,
}

/// Success envelope carrying only a confirmation message
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub status: String,
    pub message: String,
}

/// Add a new book to the collection
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book added", body = BookCreatedResponse),
        (status = 400, description = "Invalid input", body = crate::error::FailResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(payload): Json<BookPayload>,
) -> AppResult<(StatusCode, Json<BookCreatedResponse>)> {
    let id = state.services.bookshelf.create(payload)?;

    Ok((
        StatusCode::CREATED,
        Json(BookCreatedResponse {
            status: "success".to_string(),
            message: "Book added successfully".to_string(),
            data: BookCreatedData { book_id: id },
        }),
    ))
}

/// List books, optionally filtered
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "Matching book projections", body = BookListResponse)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(query): Query<BookQuery>,
) -> Json<BookListResponse> {
    let books = state.services.bookshelf.list(&query);

    Json(BookListResponse {
        status: "success".to_string(),
        data: BookListData { books },
    })
}

/// Get full book details by id
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = BookDetailResponse),
        (status = 404, description = "Book not found", body = crate::error::FailResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<BookDetailResponse>> {
    let book = state.services.bookshelf.get(&id)?;

    Ok(Json(BookDetailResponse {
        status: "success".to_string(),
        data: BookDetailData { book },
    }))
}

/// Update an existing book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated", body = MessageResponse),
        (status = 400, description = "Invalid input", body = crate::error::FailResponse),
        (status = 404, description = "Book not found", body = crate::error::FailResponse)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    Json(payload): Json<BookPayload>,
) -> AppResult<Json<MessageResponse>> {
    state.services.bookshelf.update(&id, payload)?;

    Ok(Json(MessageResponse {
        status: "success".to_string(),
        message: "Book updated successfully".to_string(),
    }))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 404, description = "Book not found", body = crate::error::FailResponse)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.services.bookshelf.delete(&id)?;

    Ok(Json(MessageResponse {
        status: "success".to_string(),
        message: "Book deleted successfully".to_string(),
    }))
}
