use crate::error::AppError;
use crate::infrastructure::repositories::NewsStoreError;

#[derive(Debug, thiserror::Error)]
pub enum NewsServiceError {
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
    #[error("storage error: {0}")]
    Storage(#[from] NewsStoreError),
}

impl From<NewsServiceError> for AppError {
    fn from(err: NewsServiceError) -> Self {
        match err {
            NewsServiceError::InvalidPayload(msg) => AppError::InvalidPayload(msg),
            NewsServiceError::Storage(e) => AppError::Internal(e.to_string()),
        }
    }
}
