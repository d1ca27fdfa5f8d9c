//! Error types for QR Seal core

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SealError {
    /// Structurally invalid blob: bad base64, too short, truncated ciphertext,
    /// unknown suite tag or a plaintext that is not UTF-8.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Authentication failed - wrong passphrase or corrupted code")]
    AuthenticationFailure,

    #[error("No barcode detected in image")]
    NoSymbolDetected,

    #[error("Message too large for symbol: {size} characters (max: {max})")]
    CapacityExceeded { size: usize, max: usize },

    #[error("Symbol rendering failed: {0}")]
    RenderFailure(String),

    #[error("Entropy source failed: {0}")]
    Entropy(String),

    #[error("Encryption failed")]
    EncryptionFailed,

    #[error("Background worker failed: {0}")]
    Worker(String),
}

pub type Result<T> = std::result::Result<T, SealError>;

impl SealError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedInput(reason.into())
    }

    /// The caller can retry with different input (new scan, passphrase,
    /// image or a shorter message).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::MalformedInput(_)
                | Self::AuthenticationFailure
                | Self::NoSymbolDetected
                | Self::CapacityExceeded { .. }
        )
    }

    /// Message safe to show an end user. Never includes primitive internals.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MalformedInput(_) => "The code is corrupt or not a valid sealed message.",
            Self::AuthenticationFailure => {
                "The code could not be decrypted. Is the passphrase correct?"
            }
            Self::NoSymbolDetected => "No valid QR code was detected in the image.",
            Self::CapacityExceeded { .. } => "The message is too long for a QR code. Shorten it.",
            Self::RenderFailure(_) => "The QR code could not be generated.",
            Self::Entropy(_) | Self::EncryptionFailed | Self::Worker(_) => {
                "Error processing the message."
            }
        }
    }
}
