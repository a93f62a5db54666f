//! s3bridge API Library
//!
//! This crate provides the HTTP handlers, router and server setup for the upload/download
//! gateway in front of object storage.

mod handlers;
mod utils;

pub mod error;
pub mod setup;
pub mod state;

pub use error::HttpAppError;
pub use state::AppState;
