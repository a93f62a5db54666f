//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from main.rs
//! for better organization and testability.

pub mod routes;
pub mod server;
pub mod storage;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use s3bridge_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub fn initialize_app(config: &Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Initialize telemetry first
    s3bridge_infra::init_telemetry(config.log_format(), config.environment())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    validation::validate_config(config).context("Configuration validation failed")?;

    tracing::info!("Configuration loaded and validated successfully");

    // Setup storage
    let storage = storage::setup_storage(config)?;

    let state = AppState::new(storage);

    // Setup routes
    let router = routes::setup_routes(state.clone());

    Ok((state, router))
}
