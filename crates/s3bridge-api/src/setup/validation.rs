//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use s3bridge_core::{Config, StorageBackend};

/// Re-check the loaded configuration and warn about settings that work but are unusual for
/// the environment.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.is_production() {
        if config.storage_backend() == StorageBackend::Memory {
            tracing::warn!(
                "In-memory storage backend selected in production - objects are lost on restart"
            );
        }

        if let Some(endpoint) = config.aws().endpoint.as_deref() {
            if endpoint.starts_with("http://") {
                tracing::warn!(
                    endpoint = %endpoint,
                    "S3 endpoint uses plain HTTP in production"
                );
            }
        }
    }

    if config.aws().bucket.is_none() {
        tracing::debug!("No default bucket configured; every request must name its bucket");
    }

    Ok(())
}
