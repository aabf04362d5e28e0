use super::router;

use std::sync::Arc;

use anyhow::Result;
use axum::body::{to_bytes, Body};
use axum::http::header::CONTENT_TYPE;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::config::DEFAULT_MAX_UPLOAD_BYTES;
use crate::engine::ImportEngine;
use crate::i18n::LocaleResolver;
use crate::models::Deal;
use crate::storage::{MemoryStorage, Storage, StorageError};

const BOUNDARY: &str = "deal-warehouse-boundary";
const HEADER: &str = "dealId,fromCurrency,toCurrency,timestamp,amount";

struct FailingStorage;

impl Storage for FailingStorage {
    fn exists(&self, _deal_id: &str) -> Result<bool, StorageError> {
        Err(StorageError::LockPoisoned)
    }

    fn save(&self, _deal: &Deal) -> Result<(), StorageError> {
        Err(StorageError::LockPoisoned)
    }
}

fn create_app(storage: Arc<dyn Storage>) -> Router {
    let engine = ImportEngine::new(storage, Arc::new(LocaleResolver::default()));
    router(Arc::new(engine), DEFAULT_MAX_UPLOAD_BYTES)
}

fn multipart_request(field_name: &str, file_name: &str, content_type: &str, content: &str) -> Result<Request<Body>> {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field_name}\"; filename=\"{file_name}\"\r\n\
         Content-Type: {content_type}\r\n\
         \r\n\
         {content}\r\n\
         --{BOUNDARY}--\r\n"
    );

    Ok(Request::builder()
        .method("POST")
        .uri("/api/import")
        .header(CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))?)
}

async fn read_json(response: Response) -> Result<Value> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn assert_error_body(body: &Value, status: u16, error: &str) {
    assert_eq!(body["status"], status);
    assert_eq!(body["error"], error);
    assert_eq!(body["path"], "/api/import");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_import_endpoint_returns_result_summary() -> Result<()> {
    let storage = Arc::new(MemoryStorage::new());
    let content = format!("{HEADER}\nD001,USD,EUR,2025-05-31T10:15:30,1000.50\nD001,EUR,JPY,2025-05-29T09:45:00,50000\nD002,USD,EUR,2025-05-31T10:15:30,0");
    let request = multipart_request("file", "deals.csv", "text/csv", &content)?;

    let response = create_app(storage.clone()).oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get(CONTENT_TYPE).and_then(|value| value.to_str().ok()), Some("application/json"));
    assert_eq!(read_json(response).await?, json!({
        "saved": 1,
        "duplicates": 1,
        "invalid": 1,
        "errors": [
            "Duplicate deal in file [D001] ignored.",
            "Invalid deal [D002]: Amount must be a positive number"
        ]
    }));
    assert_eq!(storage.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_import_endpoint_rejects_non_csv_upload() -> Result<()> {
    let storage = Arc::new(MemoryStorage::new());
    let content = format!("{HEADER}\nD001,USD,EUR,2025-05-31T10:15:30,1000.50");
    let request = multipart_request("file", "data.txt", "text/plain", &content)?;

    let response = create_app(storage.clone()).oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_error_body(&read_json(response).await?, 400, "Invalid file type. Only CSV files are allowed");
    assert!(storage.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_import_endpoint_rejects_empty_file() -> Result<()> {
    let request = multipart_request("file", "empty.csv", "text/csv", "")?;

    let response = create_app(Arc::new(MemoryStorage::new())).oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_error_body(&read_json(response).await?, 400, "File is empty");

    Ok(())
}

#[tokio::test]
async fn test_import_endpoint_rejects_malformed_csv() -> Result<()> {
    let content = format!("{HEADER}\nD001,USD,EUR,2025-05-31T10:15:30,1000.50, amount");
    let request = multipart_request("file", "mixed.csv", "text/csv", &content)?;

    let response = create_app(Arc::new(MemoryStorage::new())).oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = read_json(response).await?;
    let error = body["error"].as_str().unwrap_or_default();

    assert!(error.starts_with("Invalid CSV format: "), "unexpected error text: {error}");

    Ok(())
}

#[tokio::test]
async fn test_import_endpoint_requires_file_field() -> Result<()> {
    let request = multipart_request("upload", "deals.csv", "text/csv", HEADER)?;

    let response = create_app(Arc::new(MemoryStorage::new())).oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_error_body(&read_json(response).await?, 400, "Required part 'file' is not present");

    Ok(())
}

#[tokio::test]
async fn test_import_endpoint_rejects_non_multipart_body() -> Result<()> {
    let request = Request::builder()
        .method("POST")
        .uri("/api/import")
        .header(CONTENT_TYPE, "text/csv")
        .body(Body::from(HEADER))?;

    let response = create_app(Arc::new(MemoryStorage::new())).oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await?["status"], 400);

    Ok(())
}

#[tokio::test]
async fn test_import_endpoint_hides_storage_failures() -> Result<()> {
    let content = format!("{HEADER}\nD001,USD,EUR,2025-05-31T10:15:30,1000.50");
    let request = multipart_request("file", "deals.csv", "text/csv", &content)?;

    let response = create_app(Arc::new(FailingStorage)).oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_error_body(&read_json(response).await?, 500, "Something went wrong");

    Ok(())
}

#[tokio::test]
async fn test_import_endpoint_only_accepts_post() -> Result<()> {
    let request = Request::builder().uri("/api/import").body(Body::empty())?;

    let response = create_app(Arc::new(MemoryStorage::new())).oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    Ok(())
}
