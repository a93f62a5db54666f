//! s3bridge Storage Library
//!
//! This crate provides the [`ObjectStorage`] adapter trait and its implementations: S3 (and
//! S3-compatible providers) through `object_store`, and an in-memory backend for development
//! and tests.
//!
//! Both operations move whole objects: uploads send a single buffer and downloads collect the
//! object into memory before returning.

pub mod factory;
#[cfg(feature = "storage-memory")]
pub mod memory;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;
#[cfg(any(feature = "storage-s3", feature = "storage-memory"))]
mod transfer;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-memory")]
pub use memory::MemoryStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use s3bridge_core::StorageBackend;
pub use traits::{ObjectStorage, StorageError, StorageResult};
