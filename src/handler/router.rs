//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: body size check, method/path
//! dispatch to the book handlers, response headers and access logging.

use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderName, HeaderValue, CONTENT_LENGTH, REFERER, SERVER, USER_AGENT};
use hyper::{Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::error::Error as StdError;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::config::AppState;
use crate::handler::books;
use crate::http;
use crate::logger::{self, AccessLogEntry};

const COLLECTION_PATH: &str = "/books";
const ITEM_PREFIX: &str = "/books/";
const COLLECTION_METHODS: &str = "GET, POST";
const ITEM_METHODS: &str = "PUT, DELETE";

/// What a request path resolves to
#[derive(Debug, PartialEq, Eq)]
enum Target<'a> {
    Collection,
    /// Raw text after `/books/`, not yet validated
    Item(&'a str),
    Health,
    Unknown,
}

fn resolve<'a>(path: &'a str, health_path: &str) -> Target<'a> {
    if path == COLLECTION_PATH {
        Target::Collection
    } else if let Some(segment) = path.strip_prefix(ITEM_PREFIX) {
        Target::Item(segment)
    } else if !health_path.is_empty() && path == health_path {
        Target::Health
    } else {
        Target::Unknown
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Into<Box<dyn StdError + Send + Sync>>,
{
    let started = Instant::now();
    let access_log = state.config.logging.access_log;
    let entry = access_log.then(|| start_access_entry(&req, peer_addr));

    let mut response = route_request(req, &state).await;

    match HeaderValue::from_str(&state.config.http.server_name) {
        Ok(value) => {
            response.headers_mut().insert(SERVER, value);
        }
        Err(_) => logger::log_warning("http.server_name is not a valid header value"),
    }

    if let Some(mut entry) = entry {
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, state.config.logging.access_log_format);
    }

    Ok(response)
}

async fn route_request<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<Box<dyn StdError + Send + Sync>>,
{
    if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
        return resp;
    }

    let max_body_size = state.config.http.max_body_size;
    let (parts, body) = req.into_parts();
    let path = parts.uri.path();

    match resolve(path, &state.config.http.health_path) {
        Target::Collection => match parts.method {
            Method::GET => books::list_books(state).await,
            Method::POST => match read_body(body, max_body_size).await {
                Ok(bytes) => books::create_book(state, &bytes).await,
                Err(resp) => resp,
            },
            _ => http::build_405_response(COLLECTION_METHODS),
        },
        Target::Item(segment) => {
            let id = match books::parse_book_id(segment) {
                Ok(id) => id,
                Err(resp) => return resp,
            };
            match parts.method {
                Method::PUT => match read_body(body, max_body_size).await {
                    Ok(bytes) => books::update_book(state, id, &bytes).await,
                    Err(resp) => resp,
                },
                Method::DELETE => books::delete_book(state, id).await,
                _ => http::build_405_response(ITEM_METHODS),
            }
        }
        Target::Health => http::build_health_response(),
        Target::Unknown => http::build_404_response(path),
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let size = req
        .headers()
        .get(CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse::<u64>()
        .ok()?;
    if size > max_body_size {
        logger::log_warning(&format!(
            "Request body too large: {size} bytes (max: {max_body_size})"
        ));
        return Some(http::build_413_response(max_body_size));
    }
    None
}

/// Collect the request body, stopping at `max_body_size` bytes.
///
/// The header check above only catches honest `Content-Length` values;
/// chunked bodies are cut off here.
async fn read_body<B>(body: B, max_body_size: u64) -> Result<Bytes, Response<Full<Bytes>>>
where
    B: Body,
    B::Error: Into<Box<dyn StdError + Send + Sync>>,
{
    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            logger::log_warning(&format!(
                "Request body too large: more than {max_body_size} bytes read"
            ));
            Err(http::build_413_response(max_body_size))
        }
        Err(e) => {
            logger::log_warning(&format!("Failed to read request body: {e}"));
            Err(http::error_response(
                StatusCode::BAD_REQUEST,
                "Failed to read request body",
            ))
        }
    }
}

fn start_access_entry<B>(req: &Request<B>, peer_addr: SocketAddr) -> AccessLogEntry {
    let header = |name: HeaderName| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.protocol = format!("{:?}", req.version());
    entry.referer = header(REFERER);
    entry.user_agent = header(USER_AGENT);
    entry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::{load_books, Book, BookStore};
    use hyper::body::Frame;
    use std::pin::Pin;
    use std::task::{Context, Poll};
    use tempdir::TempDir;

    /// Single-chunk body that advertises no length
    struct Unsized(Option<Bytes>);

    impl Body for Unsized {
        type Data = Bytes;
        type Error = Infallible;

        fn poll_frame(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
        ) -> Poll<Option<Result<Frame<Bytes>, Infallible>>> {
            Poll::Ready(self.get_mut().0.take().map(|chunk| Ok(Frame::data(chunk))))
        }
    }

    fn book(id: i64, title: &str, author: &str) -> Book {
        Book {
            id,
            title: title.to_string(),
            author: author.to_string(),
        }
    }

    fn test_config(dir: &TempDir) -> Config {
        let mut config =
            Config::load_from(dir.path().join("config").to_str().unwrap()).unwrap();
        config.storage.persist = false;
        config.storage.db_path = dir.path().join("db.json");
        config.logging.access_log = false;
        config
    }

    fn test_state(dir: &TempDir, books: Vec<Book>) -> Arc<AppState> {
        Arc::new(AppState::new(test_config(dir), BookStore::from_books(books)))
    }

    fn peer() -> SocketAddr {
        "127.0.0.1:50000".parse().unwrap()
    }

    async fn send(
        state: &Arc<AppState>,
        method: Method,
        uri: &str,
        body: &str,
    ) -> (StatusCode, Bytes) {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .body(Full::new(Bytes::from(body.to_string())))
            .unwrap();
        let response = handle_request(req, Arc::clone(state), peer()).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes)
    }

    async fn list(state: &Arc<AppState>) -> Vec<Book> {
        let (status, bytes) = send(state, Method::GET, "/books", "").await;
        assert_eq!(status, StatusCode::OK);
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_resolve_paths() {
        assert_eq!(resolve("/books", "/healthz"), Target::Collection);
        assert_eq!(resolve("/books/12", "/healthz"), Target::Item("12"));
        assert_eq!(resolve("/books/", "/healthz"), Target::Item(""));
        assert_eq!(resolve("/healthz", "/healthz"), Target::Health);
        assert_eq!(resolve("/healthz", ""), Target::Unknown);
        assert_eq!(resolve("/authors", "/healthz"), Target::Unknown);
    }

    #[tokio::test]
    async fn test_list_returns_loaded_books() {
        let dir = TempDir::new("bookshelf").unwrap();
        let state = test_state(&dir, vec![book(1, "A", "X"), book(5, "B", "Y")]);
        assert_eq!(list(&state).await, vec![book(1, "A", "X"), book(5, "B", "Y")]);
    }

    #[tokio::test]
    async fn test_list_empty_is_json_array() {
        let dir = TempDir::new("bookshelf").unwrap();
        let state = test_state(&dir, Vec::new());
        let (status, bytes) = send(&state, Method::GET, "/books", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(&bytes[..], b"[]");
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let dir = TempDir::new("bookshelf").unwrap();
        let state = test_state(&dir, vec![book(1, "A", "X")]);

        let (status, bytes) =
            send(&state, Method::POST, "/books", r#"{"title":"B","author":"Y"}"#).await;
        assert_eq!(status, StatusCode::CREATED);
        let created: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            created,
            serde_json::json!({"id": 2, "title": "B", "author": "Y"})
        );

        assert_eq!(list(&state).await, vec![book(1, "A", "X"), book(2, "B", "Y")]);
    }

    #[tokio::test]
    async fn test_create_ignores_client_id() {
        let dir = TempDir::new("bookshelf").unwrap();
        let state = test_state(&dir, vec![book(1, "A", "X")]);
        let (status, bytes) = send(
            &state,
            Method::POST,
            "/books",
            r#"{"id":99,"title":"B","author":"Y"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let created: Book = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(created.id, 2);
    }

    #[tokio::test]
    async fn test_create_malformed_body_consumes_no_id() {
        let dir = TempDir::new("bookshelf").unwrap();
        let state = test_state(&dir, vec![book(1, "A", "X")]);

        let (status, _) = send(&state, Method::POST, "/books", "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = send(
            &state,
            Method::POST,
            "/books",
            r#"{"id":"x","title":"B","author":"Y"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(list(&state).await, vec![book(1, "A", "X")]);

        let (_, bytes) =
            send(&state, Method::POST, "/books", r#"{"title":"B","author":"Y"}"#).await;
        let created: Book = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(created.id, 2);
    }

    #[tokio::test]
    async fn test_create_with_missing_fields_uses_empty_strings() {
        let dir = TempDir::new("bookshelf").unwrap();
        let state = test_state(&dir, vec![book(1, "A", "X")]);

        let (status, bytes) = send(&state, Method::POST, "/books", r#"{"title":"B"}"#).await;
        assert_eq!(status, StatusCode::CREATED);
        let created: Book = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(created, book(2, "B", ""));

        let (status, bytes) = send(&state, Method::PUT, "/books/1", r#"{"author":"X2"}"#).await;
        assert_eq!(status, StatusCode::OK);
        let updated: Book = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(updated, book(1, "", "X2"));
    }

    #[tokio::test]
    async fn test_update_with_non_integer_body_id_is_400() {
        let dir = TempDir::new("bookshelf").unwrap();
        let state = test_state(&dir, vec![book(1, "A", "X")]);
        let (status, _) = send(
            &state,
            Method::PUT,
            "/books/1",
            r#"{"id":"one","title":"A2","author":"X2"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(list(&state).await, vec![book(1, "A", "X")]);
    }

    #[tokio::test]
    async fn test_create_when_ids_exhausted_is_507() {
        let dir = TempDir::new("bookshelf").unwrap();
        let state = test_state(&dir, vec![book(i64::MAX, "A", "X")]);

        let (status, bytes) =
            send(&state, Method::POST, "/books", r#"{"title":"B","author":"Y"}"#).await;
        assert_eq!(status, StatusCode::INSUFFICIENT_STORAGE);
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "No book ids left to assign");
        assert_eq!(list(&state).await, vec![book(i64::MAX, "A", "X")]);
    }

    #[tokio::test]
    async fn test_delete_then_create_does_not_reuse_id() {
        let dir = TempDir::new("bookshelf").unwrap();
        let state = test_state(&dir, vec![book(1, "A", "X")]);

        let (status, _) = send(&state, Method::DELETE, "/books/1", "").await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (_, bytes) =
            send(&state, Method::POST, "/books", r#"{"title":"C","author":"Z"}"#).await;
        let created: Book = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(created, book(2, "C", "Z"));
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_keeps_id() {
        let dir = TempDir::new("bookshelf").unwrap();
        let state = test_state(&dir, vec![book(1, "A", "X"), book(2, "B", "Y")]);

        let (status, bytes) = send(
            &state,
            Method::PUT,
            "/books/1",
            r#"{"id":7,"title":"A2","author":"X2"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let updated: Book = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(updated, book(1, "A2", "X2"));
        assert_eq!(list(&state).await, vec![book(1, "A2", "X2"), book(2, "B", "Y")]);
    }

    #[tokio::test]
    async fn test_update_missing_is_404_and_unchanged() {
        let dir = TempDir::new("bookshelf").unwrap();
        let state = test_state(&dir, vec![book(1, "A", "X")]);
        let before = list(&state).await;

        let (status, bytes) = send(
            &state,
            Method::PUT,
            "/books/3",
            r#"{"title":"N","author":"N"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Book not found");
        assert_eq!(list(&state).await, before);
    }

    #[tokio::test]
    async fn test_update_malformed_body_is_400() {
        let dir = TempDir::new("bookshelf").unwrap();
        let state = test_state(&dir, vec![book(1, "A", "X")]);
        let (status, _) = send(&state, Method::PUT, "/books/1", "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(list(&state).await, vec![book(1, "A", "X")]);
    }

    #[tokio::test]
    async fn test_delete_preserves_order() {
        let dir = TempDir::new("bookshelf").unwrap();
        let state = test_state(
            &dir,
            vec![book(1, "A", "X"), book(2, "B", "Y"), book(3, "C", "Z")],
        );

        let (status, bytes) = send(&state, Method::DELETE, "/books/2", "").await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(bytes.is_empty());
        assert_eq!(list(&state).await, vec![book(1, "A", "X"), book(3, "C", "Z")]);
    }

    #[tokio::test]
    async fn test_delete_missing_is_404_and_unchanged() {
        let dir = TempDir::new("bookshelf").unwrap();
        let state = test_state(&dir, vec![book(1, "A", "X")]);
        let (status, _) = send(&state, Method::DELETE, "/books/2", "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(list(&state).await, vec![book(1, "A", "X")]);
    }

    #[tokio::test]
    async fn test_invalid_id_is_400() {
        let dir = TempDir::new("bookshelf").unwrap();
        let state = test_state(&dir, vec![book(1, "A", "X")]);

        let (status, bytes) = send(&state, Method::DELETE, "/books/abc", "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Invalid book ID: abc");

        let (status, _) = send(
            &state,
            Method::PUT,
            "/books/",
            r#"{"title":"N","author":"N"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(list(&state).await, vec![book(1, "A", "X")]);
    }

    #[tokio::test]
    async fn test_other_methods_are_405() {
        let dir = TempDir::new("bookshelf").unwrap();
        let state = test_state(&dir, vec![book(1, "A", "X")]);

        let (status, _) = send(&state, Method::DELETE, "/books", "").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        let (status, _) = send(&state, Method::GET, "/books/1", "").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_unknown_path_and_health() {
        let dir = TempDir::new("bookshelf").unwrap();
        let state = test_state(&dir, Vec::new());

        let (status, _) = send(&state, Method::GET, "/authors", "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, bytes) = send(&state, Method::GET, "/healthz", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn test_oversized_body_is_413() {
        let dir = TempDir::new("bookshelf").unwrap();
        let mut config = test_config(&dir);
        config.http.max_body_size = 8;
        let state = Arc::new(AppState::new(config, BookStore::new()));

        let body = r#"{"title":"Long title","author":"Y"}"#;
        let req = Request::builder()
            .method(Method::POST)
            .uri("/books")
            .header(CONTENT_LENGTH, body.len())
            .body(Full::new(Bytes::from(body)))
            .unwrap();
        let response = handle_request(req, Arc::clone(&state), peer()).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(list(&state).await.is_empty());
    }

    #[tokio::test]
    async fn test_oversized_body_without_length_is_413() {
        let dir = TempDir::new("bookshelf").unwrap();
        let mut config = test_config(&dir);
        config.http.max_body_size = 8;
        let state = Arc::new(AppState::new(config, BookStore::new()));

        let long_title = "t".repeat(10 * 1024);
        let body = format!(r#"{{"title":"{long_title}","author":"Y"}}"#);
        let req = Request::builder()
            .method(Method::POST)
            .uri("/books")
            .body(Unsized(Some(Bytes::from(body))))
            .unwrap();
        assert!(req.headers().get(CONTENT_LENGTH).is_none());

        let response = handle_request(req, Arc::clone(&state), peer()).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(list(&state).await.is_empty());
    }

    #[tokio::test]
    async fn test_small_body_without_length_is_accepted() {
        let dir = TempDir::new("bookshelf").unwrap();
        let state = test_state(&dir, Vec::new());
        let req = Request::builder()
            .method(Method::POST)
            .uri("/books")
            .body(Unsized(Some(Bytes::from_static(br#"{"title":"A","author":"X"}"#))))
            .unwrap();
        let response = handle_request(req, Arc::clone(&state), peer()).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(list(&state).await, vec![book(1, "A", "X")]);
    }

    #[tokio::test]
    async fn test_server_header_set() {
        let dir = TempDir::new("bookshelf").unwrap();
        let state = test_state(&dir, Vec::new());
        let req = Request::builder()
            .uri("/books")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let response = handle_request(req, Arc::clone(&state), peer()).await.unwrap();
        assert_eq!(response.headers()[SERVER], "bookshelf/0.1");
    }

    #[tokio::test]
    async fn test_mutations_written_back_to_database() {
        let dir = TempDir::new("bookshelf").unwrap();
        let mut config = test_config(&dir);
        config.storage.persist = true;
        let db_path = config.storage.db_path.clone();
        let state = Arc::new(AppState::new(
            config,
            BookStore::from_books(vec![book(1, "A", "X")]),
        ));

        send(&state, Method::POST, "/books", r#"{"title":"B","author":"Y"}"#).await;
        send(&state, Method::PUT, "/books/1", r#"{"title":"A2","author":"X2"}"#).await;
        send(&state, Method::DELETE, "/books/2", "").await;

        let on_disk = load_books(&db_path).unwrap();
        assert_eq!(on_disk.list(), list(&state).await.as_slice());
        assert_eq!(on_disk.list(), &[book(1, "A2", "X2")]);
    }

    #[tokio::test]
    async fn test_failed_write_back_rolls_back() {
        let dir = TempDir::new("bookshelf").unwrap();
        let mut config = test_config(&dir);
        config.storage.persist = true;
        config.storage.db_path = dir.path().join("missing").join("db.json");
        let state = Arc::new(AppState::new(
            config,
            BookStore::from_books(vec![book(1, "A", "X")]),
        ));

        let (status, _) =
            send(&state, Method::POST, "/books", r#"{"title":"B","author":"Y"}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let (status, _) = send(&state, Method::DELETE, "/books/1", "").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(list(&state).await, vec![book(1, "A", "X")]);
        assert_eq!(state.store.read().await.next_id(), Some(2));
    }

    #[tokio::test]
    async fn test_without_persistence_database_path_is_untouched() {
        let dir = TempDir::new("bookshelf").unwrap();
        let mut config = test_config(&dir);
        config.storage.db_path = dir.path().join("missing").join("db.json");
        let state = Arc::new(AppState::new(
            config,
            BookStore::from_books(vec![book(1, "A", "X")]),
        ));

        let (status, _) =
            send(&state, Method::POST, "/books", r#"{"title":"B","author":"Y"}"#).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, _) = send(&state, Method::DELETE, "/books/1", "").await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(list(&state).await, vec![book(2, "B", "Y")]);
        assert!(!dir.path().join("missing").exists());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_get_distinct_ids() {
        let dir = TempDir::new("bookshelf").unwrap();
        let mut config = test_config(&dir);
        config.storage.persist = true;
        let db_path = config.storage.db_path.clone();
        let state = Arc::new(AppState::new(
            config,
            BookStore::from_books(vec![book(1, "A", "X")]),
        ));

        let tasks: Vec<_> = (0..50)
            .map(|n| {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    let body = format!(r#"{{"title":"T{n}","author":"W{n}"}}"#);
                    let (status, bytes) = send(&state, Method::POST, "/books", &body).await;
                    assert_eq!(status, StatusCode::CREATED);
                    serde_json::from_slice::<Book>(&bytes).unwrap().id
                })
            })
            .collect();

        let mut ids = Vec::new();
        for task in tasks {
            ids.push(task.await.unwrap());
        }
        ids.sort_unstable();
        assert_eq!(ids, (2..=51).collect::<Vec<i64>>());

        let listed = list(&state).await;
        assert_eq!(listed.len(), 51);
        let on_disk = load_books(&db_path).unwrap();
        assert_eq!(on_disk.list(), listed.as_slice());
    }
}
