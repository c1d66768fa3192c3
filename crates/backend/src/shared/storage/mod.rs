pub mod s3;

#[cfg(test)]
pub mod memory;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Object storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    Put(String),

    #[error("Presign failed: {0}")]
    Presign(String),
}

/// Bucket the upload bridge writes to. Credentials stay behind this trait
/// and never reach the browser.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Writes `bytes` under `key`.
    async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError>;

    /// Time-limited URL the browser can PUT `key` to.
    async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<String, StorageError>;

    /// Permanent address of `key`.
    fn public_url(&self, key: &str) -> String;
}
