use crate::error::HttpAppError;
use crate::state::AppState;
use axum::extract::{rejection::QueryRejection, Query, State};
use s3bridge_core::{AppError, DownloadRequest, TransferRequest};
use serde::Deserialize;
use std::io;
use std::sync::Arc;

const MISSING_SOURCE_ERROR: &str = "Missing 'bucket' or 'key' query parameter";
const MISSING_PATH_ERROR: &str = "Missing 'path' query parameter";
const DOWNLOAD_FAILED_ERROR: &str = "Failed to download the file";
const SAVE_FAILED_ERROR: &str = "Failed to save the file to the local path";

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    bucket: Option<String>,
    key: Option<String>,
    path: Option<String>,
}

/// `GET /downloadToFile?bucket=&key=&path=`
///
/// Fetches `bucket/key` and writes it to `path/<base name of key>`. The directory must
/// already exist; an existing file is overwritten.
pub async fn download_to_file(
    State(state): State<Arc<AppState>>,
    query: Result<Query<DownloadQuery>, QueryRejection>,
) -> Result<String, HttpAppError> {
    let Query(query) = query.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Unparseable download query");
        AppError::BadRequest(MISSING_SOURCE_ERROR.to_string())
    })?;

    let source = TransferRequest::from_fields(query.bucket.as_deref(), query.key.as_deref())
        .ok_or_else(|| AppError::BadRequest(MISSING_SOURCE_ERROR.to_string()))?;

    let local_dir = query
        .path
        .filter(|path| !path.is_empty())
        .ok_or_else(|| AppError::BadRequest(MISSING_PATH_ERROR.to_string()))?;

    let request = DownloadRequest::new(source, local_dir);

    let content = state
        .storage
        .download_object(&request.source.bucket, &request.source.key)
        .await
        .map_err(|e| AppError::storage(DOWNLOAD_FAILED_ERROR, e))?;

    let destination = request.destination().ok_or_else(|| {
        AppError::local_io(
            SAVE_FAILED_ERROR,
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("key '{}' has no file name", request.source.key),
            ),
        )
    })?;

    // Not atomic: a failed write can leave a partial file behind.
    tokio::fs::write(&destination, &content)
        .await
        .map_err(|e| AppError::local_io(SAVE_FAILED_ERROR, e))?;

    tracing::info!(
        source = %request.source_uri(),
        destination = %destination.display(),
        size_bytes = content.len() as u64,
        "Object saved to local file"
    );

    Ok(format!(
        "File successfully downloaded from S3: \n{} \nand saved to: \n{}",
        request.source_uri(),
        destination.display()
    ))
}
