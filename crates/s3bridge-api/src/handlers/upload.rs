use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::upload::{UploadForm, READ_FILE_ERROR};
use axum::extract::{multipart::MultipartRejection, Multipart, State};
use s3bridge_core::AppError;
use std::sync::Arc;

pub const METHOD_NOT_ALLOWED_ERROR: &str = "Invalid method, only POST is allowed";
const UPLOAD_FAILED_ERROR: &str = "Failed to upload the file";

/// `POST /upload`
///
/// Multipart fields: `file` (binary), `bucket`, `key`. The object is written to
/// `bucket/key/<file name>`, replacing any existing object.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<String, HttpAppError> {
    let multipart = multipart.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Upload request is not multipart");
        AppError::BadRequest(READ_FILE_ERROR.to_string())
    })?;

    let upload = UploadForm::read(multipart).await?.into_upload_request()?;
    let key = upload.effective_key();

    tracing::debug!(
        bucket = %upload.target.bucket,
        key = %key,
        file_name = %upload.original_filename,
        size_bytes = upload.content.len() as u64,
        "Upload request parsed"
    );

    state
        .storage
        .upload_object(&upload.target.bucket, &key, upload.content.clone())
        .await
        .map_err(|e| AppError::storage(UPLOAD_FAILED_ERROR, e))?;

    Ok(format!(
        "File uploaded successfully to S3: {}",
        upload.storage_path()
    ))
}

/// Any method other than POST on `/upload`
pub async fn method_not_allowed() -> HttpAppError {
    AppError::MethodNotAllowed(METHOD_NOT_ALLOWED_ERROR.to_string()).into()
}
