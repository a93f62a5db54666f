//! Whole-object transfers against any `object_store` backend.
//!
//! Both helpers buffer the full object in memory and are bounded by the configured storage
//! timeout. Nothing is retried here; the store's own client settings apply underneath.

use crate::traits::{StorageError, StorageResult};
use bytes::Bytes;
use object_store::path::Path;
use object_store::Error as ObjectStoreError;
use object_store::{ObjectStore, ObjectStoreExt, PutPayload};
use std::time::{Duration, Instant};

/// Object location for a caller-supplied key, kept byte-for-byte.
///
/// Keys with empty, `.` or `..` segments or control characters are rejected rather than
/// rewritten, so a key never resolves to a different object.
pub(crate) fn object_path(key: &str) -> StorageResult<Path> {
    if key.trim_matches('/').is_empty() {
        return Err(StorageError::InvalidKey(format!("'{}' names no object", key)));
    }
    Path::parse(key).map_err(|e| StorageError::InvalidKey(e.to_string()))
}

pub(crate) async fn put_object<S: ObjectStore>(
    store: &S,
    bucket: &str,
    key: &str,
    content: Bytes,
    timeout: Duration,
) -> StorageResult<()> {
    let location = object_path(key)?;
    let size = content.len() as u64;

    tracing::info!(bucket = %bucket, key = %key, size_bytes = size, "Uploading object");
    let start = Instant::now();

    let result = tokio::time::timeout(timeout, store.put(&location, PutPayload::from(content)))
        .await
        .map_err(|_| {
            tracing::error!(
                bucket = %bucket,
                key = %key,
                timeout_secs = timeout.as_secs(),
                "Object upload timed out"
            );
            StorageError::Timeout(timeout)
        })?;

    result.map_err(|e| {
        tracing::error!(
            error = %e,
            bucket = %bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Object upload failed"
        );
        StorageError::UploadFailed(e.to_string())
    })?;

    tracing::info!(
        bucket = %bucket,
        key = %key,
        size_bytes = size,
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Object upload successful"
    );

    Ok(())
}

pub(crate) async fn get_object<S: ObjectStore>(
    store: &S,
    bucket: &str,
    key: &str,
    timeout: Duration,
) -> StorageResult<Bytes> {
    let location = object_path(key)?;

    tracing::info!(bucket = %bucket, key = %key, "Downloading object");
    let start = Instant::now();

    let fetch = async { store.get(&location).await?.bytes().await };

    let bytes = match tokio::time::timeout(timeout, fetch).await {
        Ok(Ok(bytes)) => bytes,
        Ok(Err(ObjectStoreError::NotFound { .. })) => {
            tracing::warn!(bucket = %bucket, key = %key, "Object not found");
            return Err(StorageError::NotFound(format!("{}/{}", bucket, key)));
        }
        Ok(Err(e)) => {
            tracing::error!(
                error = %e,
                bucket = %bucket,
                key = %key,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Object download failed"
            );
            return Err(StorageError::DownloadFailed(e.to_string()));
        }
        Err(_) => {
            tracing::error!(
                bucket = %bucket,
                key = %key,
                timeout_secs = timeout.as_secs(),
                "Object download timed out"
            );
            return Err(StorageError::Timeout(timeout));
        }
    };

    tracing::info!(
        bucket = %bucket,
        key = %key,
        size_bytes = bytes.len() as u64,
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Object download successful"
    );

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::memory::InMemory;
    use object_store::throttle::{ThrottleConfig, ThrottledStore};

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[test]
    fn test_object_path_rejects_empty_keys() {
        assert!(matches!(object_path("/"), Err(StorageError::InvalidKey(_))));
        assert!(matches!(object_path(""), Err(StorageError::InvalidKey(_))));
        assert_eq!(object_path("a/b.txt").unwrap().as_ref(), "a/b.txt");
    }

    #[test]
    fn test_object_path_keeps_key_verbatim() {
        for key in [
            "reports/q1 [final].pdf",
            "100%.txt",
            "notes~1.md",
            "a/{b}|c^d#e\"f.txt",
        ] {
            assert_eq!(object_path(key).unwrap().as_ref(), key);
        }
    }

    #[test]
    fn test_object_path_rejects_ambiguous_segments() {
        for key in ["a//b.txt", "x/../y.txt", "./y.txt", "a/\u{7}.txt"] {
            assert!(
                matches!(object_path(key), Err(StorageError::InvalidKey(_))),
                "{:?}",
                key
            );
        }
    }

    #[tokio::test]
    async fn test_special_characters_round_trip() {
        let store = InMemory::new();
        let key = "folder/q1 [final].pdf";
        put_object(&store, "b1", key, Bytes::from_static(b"%PDF"), TIMEOUT)
            .await
            .unwrap();

        let raw = Path::parse(key).unwrap();
        let bytes = store.get(&raw).await.unwrap().bytes().await.unwrap();
        assert_eq!(bytes.as_ref(), b"%PDF");
        assert!(matches!(
            store.get(&Path::from(key)).await,
            Err(ObjectStoreError::NotFound { .. })
        ));
    }

    fn slow_store(config: ThrottleConfig) -> ThrottledStore<InMemory> {
        ThrottledStore::new(InMemory::new(), config)
    }

    #[tokio::test(start_paused = true)]
    async fn test_put_times_out() {
        let store = slow_store(ThrottleConfig {
            wait_put_per_call: Duration::from_secs(60),
            ..Default::default()
        });

        let err = put_object(&store, "b1", "k1", Bytes::from_static(b"x"), TIMEOUT)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Timeout(d) if d == TIMEOUT));
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_times_out() {
        let store = slow_store(ThrottleConfig {
            wait_get_per_call: Duration::from_secs(60),
            ..Default::default()
        });
        store
            .put(&Path::from("k1"), PutPayload::from(Bytes::from_static(b"x")))
            .await
            .unwrap();

        let err = get_object(&store, "b1", "k1", TIMEOUT).await.unwrap_err();
        assert!(matches!(err, StorageError::Timeout(d) if d == TIMEOUT));
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let store = InMemory::new();
        put_object(&store, "b1", "k1", Bytes::from_static(b"hello"), TIMEOUT)
            .await
            .unwrap();

        let bytes = get_object(&store, "b1", "k1", TIMEOUT).await.unwrap();
        assert_eq!(bytes.as_ref(), b"hello");
    }

    #[tokio::test]
    async fn test_get_missing_object_is_not_found() {
        let store = InMemory::new();
        let err = get_object(&store, "b1", "missing", TIMEOUT)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound(ref path) if path == "b1/missing"));
    }

    #[tokio::test]
    async fn test_put_overwrites_existing_object() {
        let store = InMemory::new();
        put_object(&store, "b1", "k1", Bytes::from_static(b"v1"), TIMEOUT)
            .await
            .unwrap();
        put_object(&store, "b1", "k1", Bytes::from_static(b"v2"), TIMEOUT)
            .await
            .unwrap();

        let bytes = get_object(&store, "b1", "k1", TIMEOUT).await.unwrap();
        assert_eq!(bytes.as_ref(), b"v2");
    }
}
