//! HTTP error mapping

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use linkboard_db::StoreError;
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

pub type ApiResult<T> = Result<T, ApiError>;

/// An error response: status code plus JSON body
#[derive(Error, Debug)]
#[error("{status}: {}", .body.error)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, code: &str) -> Self {
        Self {
            status,
            body: ErrorResponse {
                error: error.into(),
                code: Some(code.to_string()),
            },
        }
    }

    pub fn not_found(entity: &str, id: i32) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            format!("{} {} not found", entity, id),
            "NOT_FOUND",
        )
    }

    pub fn bad_credentials() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "Bad credentials",
            "BAD_CREDENTIALS",
        )
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation(_) | StoreError::ForeignKeyViolation(_) => {
                Self::new(StatusCode::CONFLICT, err.to_string(), "CONSTRAINT_VIOLATION")
            }
            StoreError::Credential(_) | StoreError::Storage(_) => {
                error!("Store failure: {}", err);
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    "STORAGE_ERROR",
                )
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text(), "INVALID_BODY")
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text(), "INVALID_PATH")
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text(), "INVALID_QUERY")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DbErr;

    #[test]
    fn test_constraint_violation_is_conflict() {
        let err = ApiError::from(StoreError::UniqueViolation("teams.name".to_string()));
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.body.code.as_deref(), Some("CONSTRAINT_VIOLATION"));

        let err = ApiError::from(StoreError::ForeignKeyViolation("users.main_board_id".into()));
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_storage_fault_hides_details() {
        let err = ApiError::from(StoreError::Storage(DbErr::Custom("disk on fire".into())));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body.error, "Internal server error");
    }

    #[test]
    fn test_not_found_message() {
        let err = ApiError::not_found("Board", 7);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "404 Not Found: Board 7 not found");
    }
}
