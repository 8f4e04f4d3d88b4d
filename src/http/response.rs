//! HTTP response building module
//!
//! Builders for the plain-text and JSON payloads served by both variants.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

/// Greeting payload served for `GET /` by the region-aware variant
#[derive(Debug, Serialize)]
pub struct Greeting<'a> {
    pub message: &'a str,
    pub region: &'a str,
}

/// Error payload served for unmatched routes
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub error: &'a str,
    pub region: &'a str,
}

/// Build 200 plain-text response
pub fn build_text_response(text: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "text/plain")
        .header("Content-Length", text.len())
        .body(Full::new(Bytes::from_static(text.as_bytes())))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::from_static(text.as_bytes())))
        })
}

/// Build JSON response with the given status
///
/// The body is serialized compactly; a serialization failure degrades to a
/// 500 with a fixed JSON error payload.
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let json = match serde_json::to_string(body) {
        Ok(j) => j,
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            return Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .header("Content-Type", "application/json")
                .body(Full::new(Bytes::from_static(
                    br#"{"error":"Internal server error"}"#,
                )))
                .unwrap_or_else(|_| Response::new(Full::new(Bytes::from_static(b"Error"))));
        }
    };

    let content_length = json.len();
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Content-Length", content_length)
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::from_static(b"Error")))
        })
}

/// Build the 200 greeting response for the region-aware variant
pub fn build_greeting_response(region: &str) -> Response<Full<Bytes>> {
    json_response(
        StatusCode::OK,
        &Greeting {
            message: "Hello World",
            region,
        },
    )
}

/// Build the 404 response for unmatched routes
pub fn build_not_found_response(region: &str) -> Response<Full<Bytes>> {
    json_response(
        StatusCode::NOT_FOUND,
        &ErrorBody {
            error: "Not Found",
            region,
        },
    )
}

/// Exact size of a fully buffered response body
pub fn body_len(response: &Response<Full<Bytes>>) -> usize {
    use hyper::body::Body as _;
    usize::try_from(response.body().size_hint().exact().unwrap_or(0)).unwrap_or(usize::MAX)
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
