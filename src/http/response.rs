//! HTTP response building module
//!
//! Builders for every response shape the message API produces.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{ALLOW, CONTENT_TYPE, LOCATION};
use hyper::{Response, StatusCode};

pub const TEXT_PLAIN: &str = "text/plain";
pub const TEXT_PLAIN_UTF8: &str = "text/plain; charset=utf-8";
pub const APPLICATION_JSON: &str = "application/json";

/// Build a response with a body and content type
pub fn build_response(
    status: StatusCode,
    content_type: &str,
    body: impl Into<Bytes>,
) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, content_type)
        .body(Full::new(body.into()))
        .unwrap_or_else(|e| fallback(status, &e))
}

/// Build plain-text error response
pub fn build_error_response(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    build_response(status, TEXT_PLAIN, message.to_string())
}

/// Build 201 Created response for a newly stored resource
pub fn build_created_response(location: &str, body: String) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::CREATED)
        .header(LOCATION, location)
        .header(CONTENT_TYPE, TEXT_PLAIN_UTF8)
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| fallback(StatusCode::CREATED, &e))
}

/// Build 405 Method Not Allowed response
pub fn build_405_response(allow: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header(ALLOW, allow)
        .header(CONTENT_TYPE, TEXT_PLAIN)
        .body(Full::new(Bytes::from_static(b"Method Not Allowed")))
        .unwrap_or_else(|e| fallback(StatusCode::METHOD_NOT_ALLOWED, &e))
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(enable_cors: bool) -> Response<Full<Bytes>> {
    let mut builder = Response::builder().status(StatusCode::NO_CONTENT);

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "GET, POST, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .header("Access-Control-Expose-Headers", "Location")
            .header("Access-Control-Max-Age", "86400");
    }

    builder
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| fallback(StatusCode::NO_CONTENT, &e))
}

/// Log response build error and return a bare response with the same status
fn fallback(status: StatusCode, error: &hyper::http::Error) -> Response<Full<Bytes>> {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
    let mut response = Response::new(Full::new(Bytes::new()));
    *response.status_mut() = status;
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_response_headers() {
        let resp = build_created_response("/messages/7", "7".to_string());
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(resp.headers()[LOCATION], "/messages/7");
        assert_eq!(resp.headers()[CONTENT_TYPE], TEXT_PLAIN_UTF8);
    }

    #[test]
    fn test_options_response_cors() {
        let plain = build_options_response(false);
        assert_eq!(plain.status(), StatusCode::NO_CONTENT);
        assert!(plain.headers().get("Access-Control-Allow-Origin").is_none());

        let cors = build_options_response(true);
        assert_eq!(cors.headers()["Access-Control-Allow-Origin"], "*");
        assert_eq!(
            cors.headers()["Access-Control-Allow-Methods"],
            "GET, POST, OPTIONS"
        );
    }

    #[test]
    fn test_405_allow_header() {
        let resp = build_405_response("GET, OPTIONS");
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers()[ALLOW], "GET, OPTIONS");
    }
}
