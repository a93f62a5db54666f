//! Error types module
//!
//! All request-level failures are unified under [`AppError`]. Each variant describes how it is
//! presented to HTTP callers through [`ErrorMetadata`]: validation failures carry their specific
//! message, while storage and filesystem failures are reported with a generic message and the
//! underlying cause is only logged.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for caller mistakes worth noticing
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "STORAGE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// A storage transfer failed. `message` is what the caller sees.
    #[error("{message}: {cause}")]
    Storage {
        message: &'static str,
        cause: String,
    },

    /// Reading the upload or writing the downloaded file failed.
    #[error("{message}: {source}")]
    LocalIo {
        message: &'static str,
        #[source]
        source: io::Error,
    },
}

impl AppError {
    pub fn storage(message: &'static str, cause: impl ToString) -> Self {
        AppError::Storage {
            message,
            cause: cause.to_string(),
        }
    }

    pub fn local_io(message: &'static str, source: io::Error) -> Self {
        AppError::LocalIo { message, source }
    }

    /// Variant name, used as a structured log field
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "BadRequest",
            AppError::MethodNotAllowed(_) => "MethodNotAllowed",
            AppError::NotFound(_) => "NotFound",
            AppError::Storage { .. } => "Storage",
            AppError::LocalIo { .. } => "LocalIo",
        }
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        match self {
            AppError::BadRequest(_) => 400,
            AppError::NotFound(_) => 404,
            AppError::MethodNotAllowed(_) => 405,
            AppError::Storage { .. } | AppError::LocalIo { .. } => 500,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::MethodNotAllowed(_) => "METHOD_NOT_ALLOWED",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Storage { .. } => "STORAGE_ERROR",
            AppError::LocalIo { .. } => "LOCAL_IO_ERROR",
        }
    }

    fn client_message(&self) -> String {
        match self {
            AppError::BadRequest(msg)
            | AppError::MethodNotAllowed(msg)
            | AppError::NotFound(msg) => msg.clone(),
            AppError::Storage { message, .. } | AppError::LocalIo { message, .. } => {
                (*message).to_string()
            }
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            AppError::BadRequest(_) | AppError::NotFound(_) => LogLevel::Debug,
            AppError::MethodNotAllowed(_) => LogLevel::Warn,
            AppError::Storage { .. } | AppError::LocalIo { .. } => LogLevel::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_keep_their_message() {
        let err = AppError::BadRequest("missing required parameters".to_string());
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.client_message(), "missing required parameters");
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_storage_error_hides_cause() {
        let err = AppError::storage("Failed to download the file", "NoSuchBucket: b1");
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.client_message(), "Failed to download the file");
        assert!(!err.client_message().contains("NoSuchBucket"));
        assert!(err.to_string().contains("NoSuchBucket"));
        assert_eq!(err.error_code(), "STORAGE_ERROR");
    }

    #[test]
    fn test_local_io_error_keeps_source() {
        let source = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = AppError::local_io("Failed to save the file to the local path", source);
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(
            err.client_message(),
            "Failed to save the file to the local path"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_method_not_allowed() {
        let err = AppError::MethodNotAllowed("Invalid method, only POST is allowed".to_string());
        assert_eq!(err.http_status_code(), 405);
        assert_eq!(err.error_type(), "MethodNotAllowed");
    }
}
