use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::engine::ImportError;
use crate::i18n::MessageResolver;

/// A failed request, rendered as a JSON error body.
#[derive(Debug, Error)]
#[error("{status}: {message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub path: String
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    status: u16,
    error: String,
    path: String,
    timestamp: NaiveDateTime
}

impl ApiError {
    pub fn new(status: StatusCode, message: String, path: &str) -> Self {
        Self {
            status,
            message,
            path: path.to_string()
        }
    }

    /// Generic server error. The cause is logged, never sent to the client.
    pub fn internal(cause: &dyn std::fmt::Display, messages: &dyn MessageResolver, path: &str) -> Self {
        error!("Request to [{path}] failed: {cause}");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, messages.get("error.internal"), path)
    }

    pub fn from_import(import_error: ImportError, messages: &dyn MessageResolver, path: &str) -> Self {
        if !import_error.is_client_error() {
            return Self::internal(&import_error, messages, path);
        }

        let mut message = messages.get(import_error.message_key());

        if let ImportError::MalformedInput(detail) = &import_error {
            message.push_str(&detail.to_string());
        }

        warn!("Import request to [{path}] rejected: {import_error}");

        Self::new(StatusCode::BAD_REQUEST, message, path)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            status: self.status.as_u16(),
            error: self.message,
            path: self.path,
            timestamp: Local::now().naive_local()
        };

        (self.status, Json(body)).into_response()
    }
}
