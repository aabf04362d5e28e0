use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, OriginalUri, State};
use axum::http::StatusCode;
use axum::Json;
use tokio::task::spawn_blocking;
use tracing::info;

use crate::api::{ApiError, AppState, FILE_FIELD};
use crate::engine::Upload;
use crate::models::ImportResult;

/// `POST /api/import`: imports the CSV sent in the `file` multipart field.
pub async fn import_deals(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    multipart: Result<Multipart, MultipartRejection>
) -> Result<Json<ImportResult>, ApiError> {
    let path = uri.path().to_string();
    let messages = state.engine.messages();

    let mut multipart = multipart.map_err(|rejection| {
        let message = format!("{}{}", messages.get("error.upload.unreadable"), rejection.body_text());
        ApiError::new(StatusCode::BAD_REQUEST, message, &path)
    })?;

    let upload = read_upload(&mut multipart)
        .await
        .map_err(|error| {
            let message = format!("{}{}", messages.get("error.upload.unreadable"), error.body_text());
            ApiError::new(error.status(), message, &path)
        })?
        .ok_or_else(|| ApiError::new(StatusCode::BAD_REQUEST, messages.get("error.upload.missing_file"), &path))?;

    info!("Received upload {:?} ({} bytes)", upload.file_name, upload.bytes.len());

    //NOTE: Parsing and storage are synchronous, keep them off the async workers
    let engine = state.engine.clone();
    let outcome = spawn_blocking(move || engine.import(&upload))
        .await
        .map_err(|error| ApiError::internal(&error, messages, &path))?;

    outcome
        .map(Json)
        .map_err(|error| ApiError::from_import(error, messages, &path))
}

/// Reads the first `file` field, skipping any other fields.
async fn read_upload(multipart: &mut Multipart) -> Result<Option<Upload>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await?;

        return Ok(Some(Upload::new(content_type, file_name, bytes.to_vec())));
    }

    Ok(None)
}
