//! Error type for the request boundary.

use fitplan_core::FitplanError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] FitplanError),

    #[error("upload of {size} bytes exceeds the {limit} byte limit")]
    UploadTooLarge { size: u64, limit: u64 },

    #[error("missing fitness data or preferences")]
    MissingPrerequisites,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    /// Message safe to show to the end user.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Core(FitplanError::NoValidData(_)) => {
                "Could not find valid step count data in the CSV file".to_string()
            }
            AppError::Core(FitplanError::MalformedInput(_)) => {
                "The uploaded file could not be read as CSV".to_string()
            }
            AppError::Core(FitplanError::PlanGeneration(_)) => {
                "Failed to generate fitness plan. Please try again later.".to_string()
            }
            AppError::Core(FitplanError::Validation(msg)) => format!("Invalid data: {msg}"),
            AppError::Core(FitplanError::Config(msg)) => format!("Service not configured: {msg}"),
            AppError::UploadTooLarge { limit, .. } => {
                format!("File is too large; the limit is {} MiB", limit / (1024 * 1024))
            }
            AppError::MissingPrerequisites => {
                "Missing fitness data or preferences. Please complete steps 1 and 2 first."
                    .to_string()
            }
            AppError::Io(e) => format!("Could not read input: {e}"),
            AppError::InvalidInput(msg) => msg.clone(),
        }
    }
}

/// Result type alias for service operations.
pub type AppResult<T> = Result<T, AppError>;
