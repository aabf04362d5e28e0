use thiserror::Error;

use crate::parser::ParseError;
use crate::storage::StorageError;

/// Failures that reject a whole import request.
///
/// Row-level problems never surface here; they are counted in the
/// [`ImportResult`](crate::models::ImportResult) instead.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("File is empty")]
    EmptyInput,
    #[error("Unsupported upload: content type [{content_type:?}], file name [{file_name:?}]")]
    UnsupportedMediaType {
        content_type: Option<String>,
        file_name: Option<String>
    },
    #[error("Invalid CSV format: {0}")]
    MalformedInput(#[from] ParseError),
    #[error("Storage failure: {0}")]
    Storage(#[from] StorageError)
}

impl ImportError {
    /// Localization key of the user-facing description.
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::EmptyInput => "error.csv.empty",
            Self::UnsupportedMediaType { .. } => "error.csv.only",
            Self::MalformedInput(_) => "error.csv.invalid.form",
            Self::Storage(_) => "error.internal"
        }
    }

    /// True when the request itself was at fault rather than the server.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}
