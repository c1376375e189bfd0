use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use sp_engine::QuizError;
use thiserror::Error;

/// API-level error type. Every handler returns `Result<_, ApiError>`; the
/// `IntoResponse` impl maps each kind to a status code and a JSON body.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Referenced entity absent from the catalog or user store.
    #[error("{0} not found")]
    NotFound(&'static str),
    /// Malformed identifier shape (not a UUID).
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Auth(String),
    #[error("{0}")]
    Forbidden(String),
    /// Progress or submission operation referencing entities the catalog
    /// does not know about.
    #[error("unknown reference: {0}")]
    UnknownReference(String),
    /// Domain errors from the quiz engine.
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error("database error")]
    Database(#[from] sqlx::Error),
    #[error("token error")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("password hashing error")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidIdentifier(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Auth(_) | Self::Jwt(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::UnknownReference(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Quiz(QuizError::AlreadyCompleted) => StatusCode::CONFLICT,
            Self::Quiz(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Database(_) | Self::Bcrypt(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal failures get logged with detail but answered generically;
        // everything else is safe to echo to the caller.
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::NotFound("topic").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::InvalidIdentifier("abc".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Auth("no token".to_string()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Quiz(QuizError::AlreadyCompleted).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Quiz(QuizError::EmptyQuiz).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::Quiz(QuizError::InvalidOption {
                index: 7,
                available: 4
            })
            .status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::UnknownReference("subject".to_string()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_database_detail_is_not_leaked() {
        let err = ApiError::Database(sqlx::Error::PoolClosed);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        // The Display impl stays generic.
        assert_eq!(err.to_string(), "database error");
    }
}
