use async_trait::async_trait;

use crate::form::Record;

/// Failure of a single API call.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected response {status}: {message}")]
    Unexpected { status: u16, message: String },
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Row-level access to one entity family plus the lookups its form needs.
#[async_trait]
pub trait Api<R: Record>: Send + Sync {
    async fn list(&self) -> ApiResult<Vec<R>>;

    async fn references(&self) -> ApiResult<R::References>;

    async fn create(&self, record: &R) -> ApiResult<()>;

    async fn update(&self, record: &R) -> ApiResult<()>;

    async fn delete(&self, id: &str) -> ApiResult<()>;
}
