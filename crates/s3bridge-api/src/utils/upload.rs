//! Multipart parsing for the upload handler

use axum::extract::Multipart;
use bytes::Bytes;
use s3bridge_core::keys::upload_file_name;
use s3bridge_core::{AppError, TransferRequest, UploadRequest};
use std::collections::HashMap;
use std::io;

pub const READ_FILE_ERROR: &str = "Failed to read the file from request";
pub const READ_CONTENT_ERROR: &str = "Failed to read the file content";
pub const MISSING_PARAMETERS_ERROR: &str = "missing required parameters";

const FILE_FIELD: &str = "file";
const TEXT_FIELDS: [&str; 2] = ["bucket", "key"];

/// The `file` part of an upload form.
#[derive(Debug)]
pub struct FilePart {
    pub file_name: Option<String>,
    pub content: Bytes,
}

/// Fields collected from a multipart upload body.
///
/// Only `file`, `bucket` and `key` are kept. For text fields the first value wins.
#[derive(Debug, Default)]
pub struct UploadForm {
    file: Option<FilePart>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    /// Read the whole multipart body.
    ///
    /// Only one field named "file" is accepted; multiple file fields are rejected.
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            tracing::debug!(error = %e, "Malformed multipart body");
            AppError::BadRequest(READ_FILE_ERROR.to_string())
        })? {
            let name = field.name().unwrap_or_default().to_string();

            if name == FILE_FIELD {
                if form.file.is_some() {
                    return Err(AppError::BadRequest(
                        "Multiple file fields are not allowed; send exactly one field named 'file'"
                            .to_string(),
                    ));
                }
                let file_name = field.file_name().map(|s| s.to_string());
                let content = field.bytes().await.map_err(|e| {
                    AppError::local_io(READ_CONTENT_ERROR, io::Error::other(e.to_string()))
                })?;
                form.file = Some(FilePart { file_name, content });
            } else if TEXT_FIELDS.contains(&name.as_str()) {
                let value = field.text().await.map_err(|e| {
                    tracing::debug!(error = %e, field = %name, "Unreadable form field");
                    AppError::BadRequest(READ_FILE_ERROR.to_string())
                })?;
                form.fields.entry(name).or_insert(value);
            } else {
                tracing::debug!(field = %name, "Ignoring unexpected form field");
            }
        }

        Ok(form)
    }

    fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Bucket and key from the form. Both must be present and non-empty.
    pub fn transfer_request(&self) -> Result<TransferRequest, AppError> {
        TransferRequest::from_fields(self.field("bucket"), self.field("key"))
            .ok_or_else(|| AppError::BadRequest(MISSING_PARAMETERS_ERROR.to_string()))
    }

    /// Validate the form in request order: the file part first, then the target fields.
    pub fn into_upload_request(self) -> Result<UploadRequest, AppError> {
        let original_filename = self
            .file
            .as_ref()
            .and_then(|file| file.file_name.as_deref())
            .and_then(upload_file_name)
            .map(str::to_string)
            .ok_or_else(|| AppError::BadRequest(READ_FILE_ERROR.to_string()))?;

        let target = self.transfer_request()?;

        let content = self.file.map(|file| file.content).unwrap_or_default();

        Ok(UploadRequest {
            target,
            original_filename,
            content,
        })
    }
}
