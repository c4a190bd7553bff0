use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use smallurl_core::ShortenerError;
use thiserror::Error;
use tracing::error;

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Shortener(#[from] ShortenerError),
    #[error("{0}")]
    BadRequest(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Shortener(err) => match err {
                ShortenerError::Validation(_) | ShortenerError::ShortIdInUse { .. } => {
                    StatusCode::BAD_REQUEST
                }
                ShortenerError::NotFound(_) => StatusCode::NOT_FOUND,
                ShortenerError::FailedToSave { .. } | ShortenerError::Storage(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "request.invalid",
            AppError::Shortener(err) => err.kind(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, code = self.code(), "request failed");
        }

        let body = ErrorResponse {
            code: self.code().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallurl_core::StorageError;

    #[test]
    fn maps_shortener_errors_to_status_codes() {
        let cases = [
            (
                ShortenerError::Validation("bad".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ShortenerError::ShortIdInUse {
                    short_id: "abc".into(),
                    source: StorageError::UniqueViolation("abc".into()),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                ShortenerError::NotFound("No URL for abc".into()),
                StatusCode::NOT_FOUND,
            ),
            (
                ShortenerError::FailedToSave {
                    attempts: 4,
                    source: StorageError::UniqueViolation("abc".into()),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ShortenerError::Storage(StorageError::Timeout("slow".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(AppError::from(err).status(), expected);
        }
    }

    #[test]
    fn bad_request_has_its_own_code() {
        let err = AppError::BadRequest("missing".into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "request.invalid");
    }
}
