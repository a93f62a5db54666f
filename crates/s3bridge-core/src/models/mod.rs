//! Per-request data models
//!
//! Every model here is built from one HTTP request and dropped when the response is written.

mod transfer;

pub use transfer::{DownloadRequest, TransferRequest, UploadRequest};
