use axum::http::StatusCode;
use thiserror::Error;

/// Failures a user can trigger from the form. All of them leave the form usable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("Cannot find container for section: {0}")]
    MissingSection(String),

    #[error("Invalid input: {raw}")]
    InvalidInput { raw: String },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Stored record for {key} is unreadable: {reason}")]
    CorruptRecord { key: String, reason: String },

    #[error("Could not save record for {key}: {reason}")]
    SaveFailed { key: String, reason: String },
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl From<TrackerError> for AppError {
    fn from(err: TrackerError) -> Self {
        match err {
            TrackerError::SaveFailed { .. } => Self::internal(err),
            _ => Self::bad_request(err.to_string()),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
