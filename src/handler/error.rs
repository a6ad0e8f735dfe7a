//! Request error module
//!
//! Every way a request can fail, and the status code each maps to.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use thiserror::Error;

use crate::http;
use crate::logger;
use crate::store::MessageId;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Content-Type must be text/plain")]
    InvalidContentType,

    #[error("Body is required (text/plain)")]
    EmptyBody,

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("No message with id {0}")]
    MessageNotFound(MessageId),

    #[error("Method Not Allowed")]
    MethodNotAllowed { allow: &'static str },

    #[error("Unknown path")]
    UnknownPath,

    #[error("Request body too large (max {max} bytes)")]
    PayloadTooLarge { max: u64 },

    /// The cause is logged, never sent to the client
    #[error("Internal error")]
    Internal(String),
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidContentType | Self::EmptyBody | Self::InvalidId(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::MessageNotFound(_) | Self::UnknownPath => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn into_response(self) -> Response<Full<Bytes>> {
        match &self {
            Self::MethodNotAllowed { allow } => http::build_405_response(allow),
            Self::Internal(cause) => {
                logger::log_error(cause);
                http::build_error_response(self.status(), &self.to_string())
            }
            _ => http::build_error_response(self.status(), &self.to_string()),
        }
    }
}
