use axum::http::StatusCode;
use thiserror::Error;

/// Failures of the durable key/value backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage payload is malformed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage payload has the wrong shape: {0}")]
    Malformed(String),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum HabitError {
    #[error("{0}")]
    Validation(String),

    #[error("habit not found: {id}")]
    NotFound { id: String },

    #[error("failed to read habits: {0}")]
    PersistenceRead(#[source] StorageError),

    #[error("failed to write habits: {0}")]
    PersistenceWrite(#[source] StorageError),
}

impl HabitError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
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

impl From<HabitError> for AppError {
    fn from(err: HabitError) -> Self {
        match err {
            HabitError::Validation(message) => Self::bad_request(message),
            HabitError::NotFound { .. } => Self::not_found(err.to_string()),
            HabitError::PersistenceRead(_) | HabitError::PersistenceWrite(_) => Self::internal(err),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
