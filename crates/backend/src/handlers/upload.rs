use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::shared::upload::{UploadResponse, UploadValidationError, UPLOAD_FIELD};

use super::error_response;
use crate::routes::AppState;
use crate::usecases::u501_object_upload::UploadError;

const UPLOAD_FAILED: &str = "Failed to upload file";

struct FilePart {
    name: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

async fn read_file_part(
    mut multipart: Multipart,
) -> Result<Option<FilePart>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;
        return Ok(Some(FilePart {
            name,
            content_type,
            bytes: bytes.to_vec(),
        }));
    }
    Ok(None)
}

/// POST /api/upload
pub async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let multipart = match multipart {
        Ok(m) => m,
        Err(e) => {
            tracing::warn!("Upload rejected: {}", e);
            return error_response(StatusCode::BAD_REQUEST, UploadError::NoFile.to_string());
        }
    };

    let part = match read_file_part(multipart).await {
        Ok(Some(part)) => part,
        Ok(None) => {
            return error_response(StatusCode::BAD_REQUEST, UploadError::NoFile.to_string())
        }
        Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            tracing::warn!("Upload rejected: {}", e.body_text());
            return error_response(
                StatusCode::PAYLOAD_TOO_LARGE,
                UploadValidationError::TooLarge.to_string(),
            );
        }
        Err(e) => {
            tracing::error!("Failed to read upload body: {}", e.body_text());
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, UPLOAD_FAILED);
        }
    };

    match state
        .uploads()
        .store_document(&part.name, part.content_type.as_deref(), part.bytes)
        .await
    {
        Ok(key) => Json(UploadResponse::stored(key)).into_response(),
        Err(e) => {
            tracing::error!("Upload of {} failed: {}", part.name, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, UPLOAD_FAILED)
        }
    }
}
