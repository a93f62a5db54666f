//! s3bridge Core Library
//!
//! This crate provides the configuration, error types, request models and key helpers shared
//! by the storage adapter and the HTTP API.

pub mod config;
pub mod error;
pub mod keys;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{AwsConfig, BaseConfig, Config, ConfigError, FileConfig, LogFormat};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{DownloadRequest, TransferRequest, UploadRequest};
pub use storage_types::StorageBackend;
