//! Upload bridge contract: client-side pre-validation and the payloads of the
//! same-origin `/api/upload` and `/api/files` endpoints.

use serde::{Deserialize, Serialize};

pub const ALLOWED_FILE_TYPES: &[&str] = &[".pdf"];

/// 10 MB
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Multipart field carrying the file.
pub const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadValidationError {
    #[error("Please select a file")]
    NoFile,
    #[error("File type not allowed. Please upload one of: {}", ALLOWED_FILE_TYPES.join(", "))]
    FileType,
    #[error("File size too large. Maximum size is {}MB", MAX_FILE_SIZE / (1024 * 1024))]
    TooLarge,
}

/// Lowercased extension including the dot, empty when the name has none.
pub fn file_extension(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((_, ext)) => format!(".{}", ext.to_lowercase()),
        None => String::new(),
    }
}

/// Checks a selected file before any network call is made.
pub fn validate_upload(file_name: &str, size: u64) -> Result<(), UploadValidationError> {
    if file_name.trim().is_empty() {
        return Err(UploadValidationError::NoFile);
    }
    let extension = file_extension(file_name);
    if !ALLOWED_FILE_TYPES.contains(&extension.as_str()) {
        return Err(UploadValidationError::FileType);
    }
    if size > MAX_FILE_SIZE {
        return Err(UploadValidationError::TooLarge);
    }
    Ok(())
}

/// "1.50 MB"
pub fn format_size_mb(size: u64) -> String {
    format!("{:.2} MB", size as f64 / (1024.0 * 1024.0))
}

/// Result of the bridged upload. Exactly one of the fields is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UploadResponse {
    pub fn stored(file_url: impl Into<String>) -> Self {
        Self {
            file_url: Some(file_url.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            file_url: None,
            error: Some(error.into()),
        }
    }

    /// A response without `file_url` is a failure, whatever else it carries.
    pub fn into_result(self) -> Result<String, String> {
        match self.file_url {
            Some(url) if !url.is_empty() => Ok(url),
            _ => Err(self
                .error
                .unwrap_or_else(|| "Failed to upload file".to_string())),
        }
    }
}

/// Body of `POST /api/files`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresignRequest {
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub content_type: Option<String>,
}

/// Answer of `POST /api/files`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresignResponse {
    pub presigned_url: String,
    pub get_presigned_url: String,
    pub key: String,
}

/// Error body of the bridge endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Folder of bridged knowledge-base uploads.
pub const KNOWLEDGE_BASE_FOLDER: &str = "knowledge-base/";

/// Presign folder that bypasses the configured prefix.
pub const PROFILE_PICTURES_FOLDER: &str = "profile-pictures/";
pub const PROFILE_PICTURES_PREFIX: &str = "app-images/profile-pictures/";

/// `knowledge-base/<unix-millis>-<file name>`
pub fn knowledge_base_key(unix_millis: i64, file_name: &str) -> String {
    format!("{}{}-{}", KNOWLEDGE_BASE_FOLDER, unix_millis, file_name)
}

/// Makes a name safe for a storage key: whitespace becomes `_`, as does
/// anything outside `[A-Za-z0-9_.-]`.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Storage key of a presigned upload for an already sanitized name.
pub fn presigned_key(key_prefix: &str, folder: Option<&str>, sanitized_name: &str) -> String {
    match folder {
        Some(PROFILE_PICTURES_FOLDER) => format!("{}{}", PROFILE_PICTURES_PREFIX, sanitized_name),
        other => format!("{}{}{}", key_prefix, other.unwrap_or_default(), sanitized_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_within_limit_passes() {
        assert_eq!(validate_upload("Handbook.PDF", 1024), Ok(()));
        assert_eq!(validate_upload("a.b.pdf", MAX_FILE_SIZE), Ok(()));
    }

    #[test]
    fn test_rejects_other_types() {
        assert_eq!(
            validate_upload("notes.docx", 10),
            Err(UploadValidationError::FileType)
        );
        assert_eq!(
            validate_upload("pdf", 10),
            Err(UploadValidationError::FileType)
        );
        assert_eq!(
            UploadValidationError::FileType.to_string(),
            "File type not allowed. Please upload one of: .pdf"
        );
    }

    #[test]
    fn test_rejects_oversize() {
        let err = validate_upload("big.pdf", MAX_FILE_SIZE + 1).unwrap_err();
        assert_eq!(err, UploadValidationError::TooLarge);
        assert_eq!(err.to_string(), "File size too large. Maximum size is 10MB");
    }

    #[test]
    fn test_requires_a_file() {
        assert_eq!(validate_upload("  ", 0), Err(UploadValidationError::NoFile));
    }

    #[test]
    fn test_extension() {
        assert_eq!(file_extension("report.Final.PdF"), ".pdf");
        assert_eq!(file_extension("README"), "");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size_mb(1572864), "1.50 MB");
        assert_eq!(format_size_mb(0), "0.00 MB");
    }

    #[test]
    fn test_missing_file_url_is_failure() {
        let ok: UploadResponse =
            serde_json::from_str(r#"{"file_url":"knowledge-base/1-a.pdf"}"#).unwrap();
        assert_eq!(ok.into_result(), Ok("knowledge-base/1-a.pdf".to_string()));

        let failed: UploadResponse =
            serde_json::from_str(r#"{"error":"Failed to upload file"}"#).unwrap();
        assert_eq!(failed.into_result(), Err("Failed to upload file".to_string()));

        assert_eq!(
            UploadResponse::default().into_result(),
            Err("Failed to upload file".to_string())
        );
    }

    #[test]
    fn test_presign_wire_is_camel_case() {
        let req: PresignRequest = serde_json::from_str(
            r#"{"folder":"docs/","fileName":"a b.pdf","fileSize":12,"contentType":"application/pdf"}"#,
        )
        .unwrap();
        assert_eq!(req.file_name.as_deref(), Some("a b.pdf"));
        assert_eq!(req.file_size, Some(12));

        let resp = PresignResponse {
            presigned_url: "p".into(),
            get_presigned_url: "g".into(),
            key: "k".into(),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["presignedUrl"], "p");
        assert_eq!(json["getPresignedUrl"], "g");
    }

    #[test]
    fn test_knowledge_base_key() {
        assert_eq!(
            knowledge_base_key(1718000000000, "Student Handbook.pdf"),
            "knowledge-base/1718000000000-Student Handbook.pdf"
        );
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(
            sanitize_file_name("a1b2-my report\u{202f}v2\u{00A0}(final).pdf"),
            "a1b2-my_report_v2__final_.pdf"
        );
        assert_eq!(sanitize_file_name("résumé.pdf"), "r_sum_.pdf");
    }

    #[test]
    fn test_presigned_key_folders() {
        assert_eq!(
            presigned_key("uploads/", Some("profile-pictures/"), "x.png"),
            "app-images/profile-pictures/x.png"
        );
        assert_eq!(
            presigned_key("uploads/", Some("docs/"), "x.pdf"),
            "uploads/docs/x.pdf"
        );
        assert_eq!(presigned_key("", None, "x.pdf"), "x.pdf");
    }
}
