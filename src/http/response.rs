//! HTTP response building module
//!
//! Builders for the JSON and status responses the book handlers return.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{ALLOW, CONTENT_TYPE};
use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::logger;

const JSON: &str = "application/json";

/// Serialize `body` as JSON with the given status, or 500 if that fails
pub fn json_response<T: Serialize + ?Sized>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    match serde_json::to_vec(body) {
        Ok(json) => build(status, JSON, Bytes::from(json)),
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to encode response")
        }
    }
}

/// `{"error": message}` with the given status
pub fn error_response(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({ "error": message });
    build(status, JSON, Bytes::from(body.to_string()))
}

/// Build 204 No Content response
pub fn build_204_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error(StatusCode::NO_CONTENT, &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response for paths outside the book routes
pub fn build_404_response(path: &str) -> Response<Full<Bytes>> {
    error_response(StatusCode::NOT_FOUND, &format!("No route for {path}"))
}

/// Build 405 Method Not Allowed response
pub fn build_405_response(allow: &str) -> Response<Full<Bytes>> {
    let mut response = error_response(StatusCode::METHOD_NOT_ALLOWED, "Invalid request method");
    if let Ok(value) = allow.parse() {
        response.headers_mut().insert(ALLOW, value);
    }
    response
}

/// Build 413 Payload Too Large response
pub fn build_413_response(max_body_size: u64) -> Response<Full<Bytes>> {
    error_response(
        StatusCode::PAYLOAD_TOO_LARGE,
        &format!("Request body exceeds {max_body_size} bytes"),
    )
}

/// Build health check response
pub fn build_health_response() -> Response<Full<Bytes>> {
    build(StatusCode::OK, "text/plain", Bytes::from_static(b"ok"))
}

fn build(status: StatusCode, content_type: &str, body: Bytes) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, content_type)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(status, &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: StatusCode, error: &hyper::http::Error) {
    logger::log_error(&format!("Failed to build {status} response: {error}"));
}
