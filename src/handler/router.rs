//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: intercepts OPTIONS, matches the
//! path, checks the method and dispatches to the message handlers.

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use std::sync::Arc;

use super::error::ApiError;
use super::messages;
use crate::config::AppState;
use crate::http;

pub const MESSAGES_PATH: &str = "/messages";
const MESSAGE_PREFIX: &str = "/messages/";

const COLLECTION_ALLOW: &str = "GET, POST, OPTIONS";
const ITEM_ALLOW: &str = "GET, OPTIONS";

/// Route resolved from the request path
#[derive(Debug, PartialEq, Eq)]
enum Route<'a> {
    /// Exactly `/messages`
    Collection,
    /// `/messages/<suffix>`, suffix not yet parsed
    Item(&'a str),
    Unknown,
}

fn match_route(path: &str) -> Route<'_> {
    if path == MESSAGES_PATH {
        Route::Collection
    } else if let Some(suffix) = path.strip_prefix(MESSAGE_PREFIX) {
        Route::Item(suffix)
    } else {
        Route::Unknown
    }
}

/// Method names compare case-insensitively
fn is_method(method: &Method, name: &str) -> bool {
    method.as_str().eq_ignore_ascii_case(name)
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(req: Request<B>, state: Arc<AppState>) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    route_request(req, &state)
        .await
        .unwrap_or_else(ApiError::into_response)
}

async fn route_request<B>(
    req: Request<B>,
    state: &AppState,
) -> Result<Response<Full<Bytes>>, ApiError>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let method = req.method().clone();

    // Preflight answers on every path
    if is_method(&method, "OPTIONS") {
        return Ok(http::build_options_response(state.config.http.enable_cors));
    }

    let path = req.uri().path().to_string();
    match match_route(&path) {
        Route::Collection if is_method(&method, "POST") => messages::create(req, state).await,
        Route::Collection if is_method(&method, "GET") => messages::list(&state.store),
        Route::Collection => Err(ApiError::MethodNotAllowed {
            allow: COLLECTION_ALLOW,
        }),
        Route::Item(raw_id) if is_method(&method, "GET") => messages::fetch(&state.store, raw_id),
        Route::Item(_) => Err(ApiError::MethodNotAllowed { allow: ITEM_ALLOW }),
        Route::Unknown => Err(ApiError::UnknownPath),
    }
}
