//! Book collection handlers
//!
//! One function per operation; each takes the already-routed request parts
//! and returns the finished response.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use crate::config::AppState;
use crate::http;
use crate::logger;
use crate::store::{BookPayload, StoreError};

/// `GET /books`
pub async fn list_books(state: &AppState) -> Response<Full<Bytes>> {
    let books = state.store.read().await;
    http::json_response(StatusCode::OK, books.list())
}

/// `POST /books`
pub async fn create_book(state: &AppState, body: &[u8]) -> Response<Full<Bytes>> {
    let payload = match parse_payload(body) {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    match state.mutate_store(|books| books.append(payload)).await {
        Ok(book) => {
            logger::log_info(&format!("Created book {}", book.id));
            http::json_response(StatusCode::CREATED, &book)
        }
        Err(e) => store_error_response(&e),
    }
}

/// `PUT /books/{id}`
pub async fn update_book(state: &AppState, id: i64, body: &[u8]) -> Response<Full<Bytes>> {
    let payload = match parse_payload(body) {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    match state.mutate_store(|books| books.replace(id, payload)).await {
        Ok(book) => {
            logger::log_info(&format!("Updated book {id}"));
            http::json_response(StatusCode::OK, &book)
        }
        Err(e) => store_error_response(&e),
    }
}

/// `DELETE /books/{id}`
pub async fn delete_book(state: &AppState, id: i64) -> Response<Full<Bytes>> {
    match state.mutate_store(|books| books.remove(id)).await {
        Ok(_) => {
            logger::log_info(&format!("Deleted book {id}"));
            http::build_204_response()
        }
        Err(e) => store_error_response(&e),
    }
}

/// Parse the `{id}` path segment; signs are accepted, anything else is 400.
pub fn parse_book_id(segment: &str) -> Result<i64, Response<Full<Bytes>>> {
    segment.parse::<i64>().map_err(|_| {
        http::error_response(
            StatusCode::BAD_REQUEST,
            &format!("Invalid book ID: {segment}"),
        )
    })
}

fn parse_payload(body: &[u8]) -> Result<BookPayload, Response<Full<Bytes>>> {
    serde_json::from_slice(body).map_err(|e| {
        logger::log_warning(&format!("Rejected book payload: {e}"));
        http::error_response(StatusCode::BAD_REQUEST, &format!("Invalid JSON body: {e}"))
    })
}

fn store_error_response(err: &StoreError) -> Response<Full<Bytes>> {
    match err {
        StoreError::NotFound(_) => http::error_response(StatusCode::NOT_FOUND, "Book not found"),
        StoreError::IdsExhausted => {
            logger::log_error(&format!("Create refused: {err}"));
            http::error_response(
                StatusCode::INSUFFICIENT_STORAGE,
                "No book ids left to assign",
            )
        }
        _ => {
            logger::log_error(&format!("Book change rolled back: {err}"));
            http::error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to persist books",
            )
        }
    }
}
