//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`. Any `AppError` converts with `?`
//! and renders as a plain-text body with the status from [`ErrorMetadata`]. Storage and local
//! I/O causes are logged here and never written to the response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use s3bridge_core::{AppError, ErrorMetadata, LogLevel};

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from s3bridge-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    let error_code = error.error_code();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type, error_code, "Request rejected");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type, error_code, "Request rejected");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type, error_code, "Request failed");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        (status, app_error.client_message()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use std::io;

    async fn render(error: AppError) -> (StatusCode, String) {
        let response = HttpAppError::from(error).into_response();
        let status = response.status();
        let content_type = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("text/plain"));
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_bad_request_shows_message() {
        let (status, body) =
            render(AppError::BadRequest("missing required parameters".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "missing required parameters");
    }

    #[tokio::test]
    async fn test_storage_error_hides_cause() {
        let (status, body) = render(AppError::storage(
            "Failed to download the file",
            "AccessDenied: signature mismatch for AKIA123",
        ))
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Failed to download the file");
    }

    #[tokio::test]
    async fn test_local_io_error_hides_cause() {
        let (status, body) = render(AppError::local_io(
            "Failed to save the file to the local path",
            io::Error::new(io::ErrorKind::NotFound, "/srv/private/out: no such directory"),
        ))
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.contains("/srv/private"));
    }

    #[tokio::test]
    async fn test_method_not_allowed_status() {
        let (status, _) = render(AppError::MethodNotAllowed(
            "Invalid method, only POST is allowed".to_string(),
        ))
        .await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }
}
