//! Storage abstraction trait
//!
//! This module defines the [`ObjectStorage`] trait that every backend implements. HTTP handlers
//! only see this trait, so they can be exercised against an in-memory or failing backend.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Object storage adapter
///
/// Implementations must be safe to share between concurrent requests. There is no retry: a
/// failed backend call is returned as-is.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Write `content` to `bucket/key`, replacing any existing object.
    ///
    /// Succeeds only once the backend has acknowledged the write.
    async fn upload_object(&self, bucket: &str, key: &str, content: Bytes) -> StorageResult<()>;

    /// Fetch the whole object at `bucket/key` into memory.
    ///
    /// Returns [`StorageError::NotFound`] when the object (or its bucket) does not exist.
    async fn download_object(&self, bucket: &str, key: &str) -> StorageResult<Bytes>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
