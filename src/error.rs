use crate::store::StoreError;
use crate::types::ApiResponse;

/// Application-specific error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Storage read failed: {0}")]
    Storage(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Translate into the `success:false` envelope the HTTP layer returns.
    pub fn into_envelope<T>(self) -> ApiResponse<T> {
        ApiResponse::error(self.message())
    }
}

/// Result type for application operations
pub type AppResult<T> = Result<T, AppError>;

impl From<String> for AppError {
    fn from(err: String) -> Self {
        AppError::Internal(err)
    }
}

impl From<&str> for AppError {
    fn from(err: &str) -> Self {
        AppError::Internal(err.to_string())
    }
}
