use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid or missing secret")]
    Unauthorized,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::InvalidPayload(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// One-line plain-text body shown to the caller. Internal details stay
    /// in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::Unauthorized => "Unauthorized - Invalid or missing secret",
            Self::MethodNotAllowed => "Method not allowed",
            Self::InvalidPayload(_) | Self::Internal(_) => "Internal error",
        }
    }
}

/// Implement IntoResponse for automatic conversion in handlers
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(
                error = %self,
                status = %status.as_u16(),
                "Request failed"
            );
        }

        (status, self.public_message()).into_response()
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
