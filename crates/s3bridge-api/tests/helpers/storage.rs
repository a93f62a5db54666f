use async_trait::async_trait;
use bytes::Bytes;
use s3bridge_storage::{ObjectStorage, StorageBackend, StorageError, StorageResult};
use std::time::Duration;

/// Backend error text that must never reach an HTTP response.
pub const BACKEND_ERROR_TEXT: &str = "InvalidAccessKeyId: AKIATESTSECRET123 is not valid";

/// Storage whose every call fails as a remote backend would.
pub struct FailingStorage;

#[async_trait]
impl ObjectStorage for FailingStorage {
    async fn upload_object(&self, _bucket: &str, _key: &str, _content: Bytes) -> StorageResult<()> {
        Err(StorageError::UploadFailed(BACKEND_ERROR_TEXT.to_string()))
    }

    async fn download_object(&self, _bucket: &str, _key: &str) -> StorageResult<Bytes> {
        Err(StorageError::DownloadFailed(BACKEND_ERROR_TEXT.to_string()))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}

/// Storage whose transfers run past their deadline, as a stalled remote would.
pub struct StalledStorage {
    pub timeout: Duration,
}

#[async_trait]
impl ObjectStorage for StalledStorage {
    async fn upload_object(&self, _bucket: &str, _key: &str, _content: Bytes) -> StorageResult<()> {
        tokio::time::sleep(self.timeout).await;
        Err(StorageError::Timeout(self.timeout))
    }

    async fn download_object(&self, _bucket: &str, _key: &str) -> StorageResult<Bytes> {
        tokio::time::sleep(self.timeout).await;
        Err(StorageError::Timeout(self.timeout))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
