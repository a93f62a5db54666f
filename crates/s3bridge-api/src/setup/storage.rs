//! Storage setup and initialization

use anyhow::{Context, Result};
use s3bridge_core::Config;
use s3bridge_storage::{create_storage, ObjectStorage};
use std::sync::Arc;

/// Build the storage client. Failure here is fatal: the server never starts without one.
pub fn setup_storage(config: &Config) -> Result<Arc<dyn ObjectStorage>> {
    tracing::info!(backend = %config.storage_backend(), "Initializing storage client...");

    let storage = create_storage(config).context("Failed to initialize storage client")?;

    tracing::info!(
        backend = %storage.backend_type(),
        region = %config.aws().region,
        default_bucket = ?config.aws().bucket,
        timeout_secs = config.storage_timeout().as_secs(),
        "Storage client initialized successfully"
    );

    Ok(storage)
}
