use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde_json::json;
use thiserror::Error;

use admin::ApiError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(DbErr),

    #[error("template error: {0}")]
    Template(#[from] tera::Error),
}

impl AppError {
    /// Short machine-readable name used in JSON error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "bad_request",
            AppError::Validation(_) => "validation",
            AppError::NotFound(_) => "not_found",
            AppError::Conflict(_) => "conflict",
            AppError::Database(_) => "database",
            AppError::Template(_) => "template",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// A foreign key failing on delete means the row is still referenced.
    pub fn on_delete(self) -> Self {
        match self {
            AppError::Validation(message) => AppError::Conflict(message),
            other => other,
        }
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        if let DbErr::RecordNotUpdated = err {
            return AppError::NotFound("record not found".into());
        }
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(message)) => AppError::Conflict(message),
            Some(SqlErr::ForeignKeyConstraintViolation(message)) => AppError::Validation(message),
            _ => AppError::Database(err),
        }
    }
}

/// Bodies that parse but do not fit the record are validation failures;
/// anything else the extractor refuses is a bad request.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => AppError::Validation(err.body_text()),
            other => AppError::BadRequest(other.body_text()),
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        let status = err.status().as_u16();
        match err {
            AppError::BadRequest(message) | AppError::Validation(message) => {
                ApiError::Validation(message)
            }
            AppError::NotFound(message) => ApiError::NotFound(message),
            AppError::Conflict(message) => ApiError::Conflict(message),
            other => ApiError::Unexpected {
                status,
                message: other.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Database(err) => {
                log::error!("storage failure: {err}");
                "Internal server error".to_string()
            }
            AppError::Template(err) => {
                log::error!("template failure: {err:?}");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        let body = Json(json!({ "error": self.kind(), "message": message }));
        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_not_updated_is_not_found() {
        let err = AppError::from(DbErr::RecordNotUpdated);
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn other_database_errors_are_internal() {
        let err = AppError::from(DbErr::Custom("disk full".into()));
        assert_eq!(err.kind(), "database");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn foreign_key_failure_on_delete_becomes_conflict() {
        let err = AppError::Validation("still referenced".into()).on_delete();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn maps_onto_client_taxonomy() {
        assert_eq!(
            ApiError::from(AppError::Conflict("dup".into())),
            ApiError::Conflict("dup".into())
        );
        assert_eq!(
            ApiError::from(AppError::Validation("bad".into())),
            ApiError::Validation("bad".into())
        );
        assert!(matches!(
            ApiError::from(AppError::Database(DbErr::Custom("x".into()))),
            ApiError::Unexpected { status: 500, .. }
        ));
    }
}
