//! QR Seal - Error Types

use qrseal_core::SealError;
use thiserror::Error;

/// Result type for app operations
pub type AppResult<T> = Result<T, AppError>;

/// App error types
#[derive(Error, Debug)]
pub enum AppError {
    // ═══════════════════════════════════════════════════════════════
    // SEAL ERRORS
    // ═══════════════════════════════════════════════════════════════

    #[error(transparent)]
    Seal(#[from] SealError),

    // ═══════════════════════════════════════════════════════════════
    // INPUT ERRORS
    // ═══════════════════════════════════════════════════════════════

    #[error("Missing input: {0}")]
    MissingInput(&'static str),

    // ═══════════════════════════════════════════════════════════════
    // IMAGE ERRORS
    // ═══════════════════════════════════════════════════════════════

    #[error("Image processing error: {0}")]
    ImageError(String),

    // ═══════════════════════════════════════════════════════════════
    // CONFIG / FILE ERRORS
    // ═══════════════════════════════════════════════════════════════

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AppError {
    /// The user can fix this by changing input and retrying
    pub fn is_recoverable(&self) -> bool {
        match self {
            AppError::Seal(e) => e.is_recoverable(),
            AppError::MissingInput(_) | AppError::ImageError(_) => true,
            AppError::ConfigError(_) | AppError::IoError(_) => false,
        }
    }

    /// Message safe to show in the UI
    pub fn user_message(&self) -> String {
        match self {
            AppError::Seal(e) => e.user_message().to_string(),
            AppError::MissingInput(what) => format!("Please enter {}.", what),
            AppError::ImageError(_) => "The image could not be read.".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<image::ImageError> for AppError {
    fn from(e: image::ImageError) -> Self {
        AppError::ImageError(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::ConfigError(e.to_string())
    }
}
