use std::sync::Arc;
use std::time::Duration;

use contracts::shared::upload::{
    knowledge_base_key, presigned_key, sanitize_file_name, PresignRequest, PresignResponse,
};
use thiserror::Error;
use uuid::Uuid;

use crate::shared::storage::{ObjectStore, StorageError};

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Lifetime of a presigned PUT URL.
pub const PRESIGN_EXPIRY: Duration = Duration::from_secs(600);

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No file provided")]
    NoFile,

    #[error("fileName is required")]
    MissingFileName,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Executor for the upload bridge: stores knowledge-base files and hands
/// out presigned upload URLs.
#[derive(Clone)]
pub struct UploadExecutor {
    store: Arc<dyn ObjectStore>,
    key_prefix: String,
}

impl UploadExecutor {
    pub fn new(store: Arc<dyn ObjectStore>, key_prefix: impl Into<String>) -> Self {
        Self {
            store,
            key_prefix: key_prefix.into(),
        }
    }

    /// Writes the file under `knowledge-base/<unix-millis>-<file name>` and
    /// returns the key.
    pub async fn store_document(
        &self,
        file_name: &str,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<String, UploadError> {
        let key = knowledge_base_key(chrono::Utc::now().timestamp_millis(), file_name);
        let content_type = content_type
            .filter(|ct| !ct.is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE);

        tracing::info!("Storing {} ({} bytes, {})", key, bytes.len(), content_type);
        self.store.put_object(&key, bytes, content_type).await?;
        Ok(key)
    }

    pub async fn presign(&self, request: PresignRequest) -> Result<PresignResponse, UploadError> {
        let file_name = request
            .file_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or(UploadError::MissingFileName)?;

        let name = sanitize_file_name(&format!("{}-{}", Uuid::new_v4(), file_name));
        let key = presigned_key(&self.key_prefix, request.folder.as_deref(), &name);
        let content_type = request
            .content_type
            .as_deref()
            .filter(|ct| !ct.is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE);

        tracing::info!(
            "Presigning {} for {} bytes ({})",
            key,
            request.file_size.unwrap_or_default(),
            content_type
        );
        let presigned_url = self
            .store
            .presign_put(&key, content_type, PRESIGN_EXPIRY)
            .await?;

        Ok(PresignResponse {
            presigned_url,
            get_presigned_url: self.store.public_url(&key),
            key: name,
        })
    }
}
