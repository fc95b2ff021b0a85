use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// A persisted JSON collection failed to decode. Propagated as-is so a
    /// corrupt file surfaces instead of being read back as empty.
    #[error("Storage decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Review ledger error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidState(_) => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Csv(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let error_type = match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InvalidState(_) => "INVALID_STATE",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Decode(_) => "STORAGE_CORRUPTION",
            AppError::Csv(_) => "STORAGE_CORRUPTION",
            AppError::Io(_) => "STORAGE_IO_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        };

        if status_code.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let details = match self {
            AppError::Decode(e) => Some(e.to_string()),
            AppError::Csv(e) => Some(e.to_string()),
            AppError::Io(e) => Some(e.to_string()),
            _ => None,
        };

        HttpResponse::build(status_code).json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
            details,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_4xx() {
        assert_eq!(
            AppError::NotFound("Report not found".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::InvalidState("Report already decided".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Validation("Invalid status value".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn storage_errors_map_to_500() {
        let decode_err = serde_json::from_str::<Vec<i64>>("{not json").unwrap_err();
        assert_eq!(
            AppError::Decode(decode_err).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
