use crate::traits::{ObjectStorage, StorageError, StorageResult};
use crate::transfer::{get_object, put_object};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use s3bridge_core::AwsConfig;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Bucket used to validate the client settings when no default bucket is configured.
const PROBE_BUCKET: &str = "s3bridge-probe";

/// S3 storage implementation
///
/// Holds a credential/region template and builds an `AmazonS3` store the first time a bucket
/// is named. Stores are kept per bucket so their HTTP connections are reused across requests.
#[derive(Debug)]
pub struct S3Storage {
    builder: AmazonS3Builder,
    stores: Mutex<HashMap<String, Arc<AmazonS3>>>,
    region: String,
    endpoint_url: Option<String>, // Custom endpoint for S3-compatible providers
    timeout: Duration,
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// Fails when the credentials are incomplete or the region/endpoint cannot be used to build
    /// a client. Callers treat this as fatal at startup.
    ///
    /// # Arguments
    /// * `aws` - Access key, secret, region and optional endpoint
    ///   (e.g., "http://localhost:9000" for MinIO)
    /// * `timeout` - Upper bound for a single upload or download
    pub fn new(aws: &AwsConfig, timeout: Duration) -> StorageResult<Self> {
        aws.validate()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        if !is_valid_region(&aws.region) {
            return Err(StorageError::ConfigError(format!(
                "invalid region '{}'",
                aws.region
            )));
        }

        let mut builder = AmazonS3Builder::new()
            .with_access_key_id(aws.key.clone())
            .with_secret_access_key(aws.secret.clone())
            .with_region(aws.region.clone());

        if let Some(ref endpoint) = aws.endpoint {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let storage = S3Storage {
            builder,
            stores: Mutex::new(HashMap::new()),
            region: aws.region.clone(),
            endpoint_url: aws.endpoint.clone(),
            timeout,
        };

        storage.store_for(aws.bucket.as_deref().unwrap_or(PROBE_BUCKET))?;

        tracing::info!(
            region = %storage.region,
            endpoint = ?storage.endpoint_url,
            timeout_secs = timeout.as_secs(),
            "S3 storage client initialized"
        );

        Ok(storage)
    }

    fn store_for(&self, bucket: &str) -> StorageResult<Arc<AmazonS3>> {
        let mut stores = self.stores.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(store) = stores.get(bucket) {
            return Ok(store.clone());
        }

        let store = self
            .builder
            .clone()
            .with_bucket_name(bucket)
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;
        let store = Arc::new(store);
        stores.insert(bucket.to_string(), store.clone());

        tracing::debug!(bucket = %bucket, "S3 store created for bucket");
        Ok(store)
    }

    pub fn region(&self) -> &str {
        &self.region
    }
}

fn is_valid_region(region: &str) -> bool {
    !region.is_empty()
        && region
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn upload_object(&self, bucket: &str, key: &str, content: Bytes) -> StorageResult<()> {
        let store = self.store_for(bucket)?;
        put_object(store.as_ref(), bucket, key, content, self.timeout).await
    }

    async fn download_object(&self, bucket: &str, key: &str) -> StorageResult<Bytes> {
        let store = self.store_for(bucket)?;
        get_object(store.as_ref(), bucket, key, self.timeout).await
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
