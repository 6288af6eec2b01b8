use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;

use crate::models::{Envelope, PublicUser};
use crate::validate::ValidationFailure;

/// Mongo server error code for a unique-index violation
const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Debug, Error)]
pub enum UserError {
    /// Missing or wrong content type on a write, or an unreadable body
    #[error("format mismatch")]
    Malformed,

    /// A supplied field violated its constraint
    #[error("{0}")]
    Validation(#[from] ValidationFailure),

    /// Unique constraint violated on account or email
    #[error("account or email already in use")]
    Duplicate,

    /// Identifier does not resolve to an existing record, or is malformed
    #[error("account not found")]
    NotFound,

    /// Any other store failure; the cause is logged, never echoed
    #[error("server error")]
    Database(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    fn status(&self) -> StatusCode {
        match self {
            UserError::Malformed | UserError::Validation(_) | UserError::Duplicate => {
                StatusCode::BAD_REQUEST
            }
            UserError::NotFound => StatusCode::NOT_FOUND,
            UserError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        if let UserError::Database(ref cause) = self {
            tracing::error!(error = %cause, "store operation failed");
        }
        let body = Envelope::<PublicUser>::fail(self.to_string());
        (self.status(), Json(body)).into_response()
    }
}

impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        if is_duplicate_key(&err) {
            UserError::Duplicate
        } else {
            UserError::Database(err.to_string())
        }
    }
}

/// A missing JSON content type (and any other unreadable write body) is the
/// caller's problem, not the server's
impl From<JsonRejection> for UserError {
    fn from(_: JsonRejection) -> Self {
        UserError::Malformed
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match *err.kind {
        ErrorKind::Write(WriteFailure::WriteError(ref write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        ErrorKind::Command(ref command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(UserError::Malformed.status(), StatusCode::BAD_REQUEST);
        assert_eq!(UserError::Duplicate.status(), StatusCode::BAD_REQUEST);
        assert_eq!(UserError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            UserError::Database("boom".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        let failure = ValidationFailure {
            field: "age",
            message: "age must be at most 110",
        };
        assert_eq!(
            UserError::Validation(failure).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_messages_are_user_facing() {
        assert_eq!(UserError::Malformed.to_string(), "format mismatch");
        assert_eq!(
            UserError::Duplicate.to_string(),
            "account or email already in use"
        );
        assert_eq!(UserError::NotFound.to_string(), "account not found");
        // the underlying cause is never echoed to the caller
        assert_eq!(
            UserError::Database("connection reset".to_string()).to_string(),
            "server error"
        );
    }

    #[test]
    fn test_into_response_status() {
        let response = UserError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
