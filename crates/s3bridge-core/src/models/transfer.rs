use std::path::{Path, PathBuf};

use bytes::Bytes;

use crate::keys::{base_name, join_key};

/// Bucket and key naming one object. Both are required and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub bucket: String,
    pub key: String,
}

impl TransferRequest {
    /// Build a request from raw parameters. Returns `None` if either is absent or empty;
    /// there is no fallback bucket or key.
    pub fn from_fields(bucket: Option<&str>, key: Option<&str>) -> Option<Self> {
        match (bucket, key) {
            (Some(bucket), Some(key)) if !bucket.is_empty() && !key.is_empty() => Some(Self {
                bucket: bucket.to_string(),
                key: key.to_string(),
            }),
            _ => None,
        }
    }
}

/// A multipart upload ready to be sent to storage.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub target: TransferRequest,
    /// File name from the `file` part, already stripped of client directories
    pub original_filename: String,
    pub content: Bytes,
}

impl UploadRequest {
    /// Storage key actually written: the caller's key is a prefix and the original file name
    /// is always the last segment.
    pub fn effective_key(&self) -> String {
        join_key(&self.target.key, &self.original_filename)
    }

    /// `bucket/effective_key`, as reported back to the caller
    pub fn storage_path(&self) -> String {
        format!("{}/{}", self.target.bucket, self.effective_key())
    }
}

/// A download into an existing local directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub source: TransferRequest,
    pub local_dir: PathBuf,
}

impl DownloadRequest {
    pub fn new(source: TransferRequest, local_dir: impl AsRef<Path>) -> Self {
        Self {
            source,
            local_dir: local_dir.as_ref().to_path_buf(),
        }
    }

    /// `s3://bucket/key` form of the source object
    pub fn source_uri(&self) -> String {
        format!("s3://{}/{}", self.source.bucket, self.source.key)
    }

    /// Local file the object is written to: the directory joined with the key's base name.
    ///
    /// `None` when the key has no usable final segment.
    pub fn destination(&self) -> Option<PathBuf> {
        base_name(&self.source.key).map(|name| self.local_dir.join(name))
    }
}
