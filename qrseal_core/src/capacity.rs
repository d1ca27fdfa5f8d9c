//! Barcode symbol capacity.
//!
//! Blob text is base64, which a QR encoder stores in byte mode. The limits
//! below are the version-40 byte-mode maxima for each error correction level.

use serde::{Deserialize, Serialize};

use crate::blob::BlobLayout;
use crate::error::{Result, SealError};

/// QR error correction level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCorrection {
    /// ~7% recovery
    Low,
    /// ~15% recovery
    #[default]
    Medium,
    /// ~25% recovery
    Quartile,
    /// ~30% recovery
    High,
}

impl ErrorCorrection {
    /// Largest byte-mode payload of a version-40 symbol
    pub const fn max_bytes(self) -> usize {
        match self {
            Self::Low => 2953,
            Self::Medium => 2331,
            Self::Quartile => 1663,
            Self::High => 1273,
        }
    }
}

/// Upper bound on blob text a symbol can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolCapacity {
    max_text_len: usize,
}

impl Default for SymbolCapacity {
    fn default() -> Self {
        Self::qr(ErrorCorrection::default())
    }
}

impl SymbolCapacity {
    pub const fn new(max_text_len: usize) -> Self {
        Self { max_text_len }
    }

    pub const fn qr(level: ErrorCorrection) -> Self {
        Self::new(level.max_bytes())
    }

    pub const fn max_text_len(&self) -> usize {
        self.max_text_len
    }

    pub fn check(&self, text_len: usize) -> Result<()> {
        if text_len > self.max_text_len {
            return Err(SealError::CapacityExceeded {
                size: text_len,
                max: self.max_text_len,
            });
        }
        Ok(())
    }

    /// Check the blob text that a plaintext of `plaintext_len` bytes produces
    pub fn check_message(&self, plaintext_len: usize, layout: BlobLayout) -> Result<()> {
        self.check(text_len(layout.blob_len(plaintext_len)))
    }

    /// Largest plaintext (in bytes) whose blob text still fits; `None` when
    /// not even an empty message fits
    pub fn max_message_len(&self, layout: BlobLayout) -> Option<usize> {
        let max_blob = self.max_text_len / 4 * 3;
        max_blob.checked_sub(layout.blob_len(0))
    }
}

/// Padded base64 length of `byte_len` bytes
pub const fn text_len(byte_len: usize) -> usize {
    byte_len.div_ceil(3) * 4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_len() {
        assert_eq!(text_len(0), 0);
        assert_eq!(text_len(1), 4);
        assert_eq!(text_len(3), 4);
        assert_eq!(text_len(4), 8);
        assert_eq!(text_len(49), 68);
    }

    #[test]
    fn test_max_message_len() {
        let low = SymbolCapacity::qr(ErrorCorrection::Low);
        assert_eq!(low.max_message_len(BlobLayout::Legacy), Some(2170));
        assert_eq!(low.max_message_len(BlobLayout::Versioned), Some(2169));

        let medium = SymbolCapacity::qr(ErrorCorrection::Medium);
        assert_eq!(medium.max_message_len(BlobLayout::Legacy), Some(1702));

        let high = SymbolCapacity::qr(ErrorCorrection::High);
        assert_eq!(high.max_message_len(BlobLayout::Legacy), Some(910));
    }

    #[test]
    fn test_check_message_boundary() {
        for level in [
            ErrorCorrection::Low,
            ErrorCorrection::Medium,
            ErrorCorrection::Quartile,
            ErrorCorrection::High,
        ] {
            let capacity = SymbolCapacity::qr(level);
            for layout in [BlobLayout::Legacy, BlobLayout::Versioned] {
                let max = capacity.max_message_len(layout).unwrap();
                assert!(capacity.check_message(max, layout).is_ok());
                assert!(matches!(
                    capacity.check_message(max + 1, layout),
                    Err(SealError::CapacityExceeded { .. })
                ));
            }
        }
    }

    #[test]
    fn test_tiny_capacity() {
        let capacity = SymbolCapacity::new(10);
        assert_eq!(capacity.max_message_len(BlobLayout::Legacy), None);
        assert!(capacity.check_message(0, BlobLayout::Legacy).is_err());

        // 60 characters carry 45 bytes: one legacy byte, an empty versioned blob
        let small = SymbolCapacity::new(60);
        assert_eq!(small.max_message_len(BlobLayout::Legacy), Some(1));
        assert!(small.check_message(1, BlobLayout::Legacy).is_ok());
        assert!(small.check_message(2, BlobLayout::Legacy).is_err());

        assert_eq!(small.max_message_len(BlobLayout::Versioned), Some(0));
        assert!(small.check_message(0, BlobLayout::Versioned).is_ok());
        assert!(small.check_message(1, BlobLayout::Versioned).is_err());

        let none = SymbolCapacity::new(59);
        assert_eq!(none.max_message_len(BlobLayout::Versioned), None);
    }
}
