//! Message resource handlers
//!
//! Create, list and fetch operations over the shared store.

use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::{CONTENT_LENGTH, CONTENT_TYPE};
use hyper::{Request, Response, StatusCode};
use percent_encoding::percent_decode_str;

use super::error::ApiError;
use super::router::MESSAGES_PATH;
use crate::config::AppState;
use crate::http;
use crate::logger;
use crate::store::MessageStore;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// `POST /messages`: store the body as a new message
pub async fn create<B>(req: Request<B>, state: &AppState) -> Result<Response<Full<Bytes>>, ApiError>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    if !is_text_plain(&req) {
        return Err(ApiError::InvalidContentType);
    }

    let max = state.config.http.max_body_size;
    check_content_length(&req, max)?;

    let limit = usize::try_from(max).unwrap_or(usize::MAX);
    let body = Limited::new(req.into_body(), limit)
        .collect()
        .await
        .map_err(|e| read_error(&e, max))?
        .to_bytes();

    let text = String::from_utf8_lossy(&body).into_owned();
    if is_blank(&text) {
        return Err(ApiError::EmptyBody);
    }

    let id = state.store.allocate_and_insert(text);
    logger::log_debug(&format!("Stored message {id} ({} bytes)", body.len()));

    Ok(http::build_created_response(
        &format!("{MESSAGES_PATH}/{id}"),
        id.to_string(),
    ))
}

/// `GET /messages`: ascending JSON array of every stored id
pub fn list(store: &MessageStore) -> Result<Response<Full<Bytes>>, ApiError> {
    let json = serde_json::to_string(&store.list_ids())
        .map_err(|e| ApiError::Internal(format!("Failed to serialize id list: {e}")))?;
    Ok(http::build_response(StatusCode::OK, http::APPLICATION_JSON, json))
}

/// `GET /messages/{id}`: the stored text, verbatim
///
/// `raw_id` is the path suffix as sent; it is percent-decoded, then
/// stripped of surrounding spaces and control characters.
pub fn fetch(store: &MessageStore, raw_id: &str) -> Result<Response<Full<Bytes>>, ApiError> {
    let decoded = percent_decode_str(raw_id)
        .decode_utf8()
        .map_err(|_| ApiError::InvalidId(raw_id.to_string()))?;
    let trimmed = decoded.trim_matches(|c: char| c <= ' ');
    let id = trimmed
        .parse()
        .map_err(|_| ApiError::InvalidId(trimmed.to_string()))?;

    let text = store.get(id).ok_or(ApiError::MessageNotFound(id))?;
    Ok(http::build_response(StatusCode::OK, http::TEXT_PLAIN_UTF8, text))
}

/// Case-insensitive `text/plain` prefix match on the Content-Type header.
///
/// Compares raw bytes, so opaque (non-ASCII) parameter values do not
/// disqualify an otherwise valid header.
fn is_text_plain<B>(req: &Request<B>) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.as_bytes().get(..http::TEXT_PLAIN.len()))
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(http::TEXT_PLAIN.as_bytes()))
}

/// Blank means only whitespace, where non-breaking spaces and NEL count as
/// content and the ASCII separators U+001C..=U+001F count as whitespace.
fn is_blank(text: &str) -> bool {
    text.chars().all(|c| match c {
        '\u{00A0}' | '\u{2007}' | '\u{202F}' | '\u{0085}' => false,
        '\u{001C}'..='\u{001F}' => true,
        c => c.is_whitespace(),
    })
}

/// Reject a declared Content-Length above the limit before reading anything
fn check_content_length<B>(req: &Request<B>, max_body_size: u64) -> Result<(), ApiError> {
    let Some(value) = req.headers().get(CONTENT_LENGTH) else {
        return Ok(());
    };

    match value.to_str().ok().and_then(|s| s.parse::<u64>().ok()) {
        Some(size) if size > max_body_size => {
            logger::log_warning(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            Err(ApiError::PayloadTooLarge { max: max_body_size })
        }
        Some(_) => Ok(()),
        None => {
            logger::log_warning("Invalid Content-Length value, skipping size check");
            Ok(())
        }
    }
}

fn read_error(err: &BoxError, max_body_size: u64) -> ApiError {
    if err.downcast_ref::<LengthLimitError>().is_some() {
        ApiError::PayloadTooLarge { max: max_body_size }
    } else {
        ApiError::Internal(format!("Failed to read request body: {err}"))
    }
}
