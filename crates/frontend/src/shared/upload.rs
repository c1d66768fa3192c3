//! Client half of the upload bridge.

use contracts::shared::upload::{UploadResponse, UPLOAD_FIELD};
use gloo_net::http::Request;
use web_sys::{File, FormData};

use crate::shared::api_utils::same_origin_url;

const UPLOAD_PATH: &str = "/api/upload";
const UPLOAD_FAILED: &str = "Failed to upload file";

/// Posts `file` as multipart field `file` to the same-origin bridge.
///
/// Never fails: transport errors, non-2xx answers and unreadable bodies all
/// come back as a response without `file_url`.
pub async fn upload_file(file: File) -> UploadResponse {
    match send(&file).await {
        Ok(response) => response,
        Err(message) => {
            log::error!("upload of {} failed: {}", file.name(), message);
            UploadResponse::failed(message)
        }
    }
}

async fn send(file: &File) -> Result<UploadResponse, String> {
    let form = FormData::new().map_err(|e| format!("{e:?}"))?;
    form.append_with_blob_and_filename(UPLOAD_FIELD, file, &file.name())
        .map_err(|e| format!("{e:?}"))?;

    let response = Request::post(&same_origin_url(UPLOAD_PATH))
        .body(form)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let ok = response.ok();
    let parsed = response.json::<UploadResponse>().await;
    match parsed {
        Ok(body) if ok => Ok(body),
        Ok(body) => Ok(UploadResponse::failed(
            body.error.unwrap_or_else(|| UPLOAD_FAILED.to_string()),
        )),
        Err(_) => Err(UPLOAD_FAILED.to_string()),
    }
}
