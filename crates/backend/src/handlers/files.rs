use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::shared::upload::PresignRequest;

use super::error_response;
use crate::routes::AppState;
use crate::usecases::u501_object_upload::UploadError;

/// POST /api/files
pub async fn presign(
    State(state): State<AppState>,
    request: Result<Json<PresignRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match request {
        Ok(r) => r,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.body_text()),
    };

    match state.uploads().presign(request).await {
        Ok(response) => Json(response).into_response(),
        Err(UploadError::MissingFileName) => {
            error_response(StatusCode::BAD_REQUEST, UploadError::MissingFileName.to_string())
        }
        Err(e) => {
            tracing::error!("Failed to generate upload URL: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
