use crate::traits::{ObjectStorage, StorageError, StorageResult};
use crate::transfer::{get_object, put_object};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use object_store::memory::InMemory;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// In-process storage backed by one `InMemory` store per bucket.
///
/// Buckets are created on first upload. Contents live as long as the value; this backend is
/// meant for local development and tests.
pub struct MemoryStorage {
    buckets: Mutex<HashMap<String, Arc<InMemory>>>,
    timeout: Duration,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            buckets: Mutex::new(HashMap::new()),
            timeout,
        }
    }

    fn bucket(&self, name: &str) -> Option<Arc<InMemory>> {
        self.buckets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    fn bucket_or_create(&self, name: &str) -> Arc<InMemory> {
        self.buckets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(InMemory::new()))
            .clone()
    }

    /// Whether a bucket has received at least one upload
    pub fn has_bucket(&self, name: &str) -> bool {
        self.bucket(name).is_some()
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn upload_object(&self, bucket: &str, key: &str, content: Bytes) -> StorageResult<()> {
        let store = self.bucket_or_create(bucket);
        put_object(store.as_ref(), bucket, key, content, self.timeout).await
    }

    async fn download_object(&self, bucket: &str, key: &str) -> StorageResult<Bytes> {
        let store = self
            .bucket(bucket)
            .ok_or_else(|| StorageError::NotFound(format!("{}/{}", bucket, key)))?;
        get_object(store.as_ref(), bucket, key, self.timeout).await
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_and_download() {
        let storage = MemoryStorage::new();
        storage
            .upload_object("b1", "folder/report.pdf", Bytes::from_static(b"%PDF-1.7"))
            .await
            .unwrap();

        let content = storage
            .download_object("b1", "folder/report.pdf")
            .await
            .unwrap();
        assert_eq!(content.as_ref(), b"%PDF-1.7");
        assert!(storage.has_bucket("b1"));
    }

    #[tokio::test]
    async fn test_buckets_are_isolated() {
        let storage = MemoryStorage::new();
        storage
            .upload_object("b1", "k1", Bytes::from_static(b"hello"))
            .await
            .unwrap();
        storage
            .upload_object("b2", "other", Bytes::from_static(b"x"))
            .await
            .unwrap();

        let err = storage.download_object("b2", "k1").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_missing_bucket_is_not_found() {
        let storage = MemoryStorage::new();
        let err = storage.download_object("nope", "k1").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(ref path) if path == "nope/k1"));
        assert!(!storage.has_bucket("nope"));
    }

    #[tokio::test]
    async fn test_repeated_upload_overwrites() {
        let storage = MemoryStorage::new();
        for content in [&b"first"[..], &b"second"[..]] {
            storage
                .upload_object("b1", "k1", Bytes::copy_from_slice(content))
                .await
                .unwrap();
        }

        let content = storage.download_object("b1", "k1").await.unwrap();
        assert_eq!(content.as_ref(), b"second");
    }
}
