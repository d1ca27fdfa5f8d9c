//! # QR Seal core
//!
//! Passphrase-sealed short messages packed into text that survives a round
//! trip through a QR code.
//!
//! ```text
//! message + passphrase
//!      │
//!      ├── salt (16B random) ──► PBKDF2-HMAC-SHA256 (100k) ──► key (32B)
//!      ├── nonce (12B random)                                   │
//!      │                                                        ▼
//!      └──────────────────────────────────────────────► AES-256-GCM
//!                                                               │
//!                     base64( salt ‖ nonce ‖ ciphertext ‖ tag ) ◄┘
//! ```
//!
//! ## Security Model
//!
//! - Passphrase possession is the only trust anchor
//! - Fresh salt and nonce per message, so a fresh key per message
//! - Tampering or a wrong passphrase fails tag verification
//! - Keys zeroized after use, never logged

pub mod blob;
pub mod capacity;
pub mod crypto;
pub mod envelope;
pub mod error;
#[cfg(feature = "async")]
pub mod task;

pub use blob::{inspect, pack, unpack, Blob, BlobInfo, BlobLayout};
pub use capacity::{ErrorCorrection, SymbolCapacity};
pub use envelope::{
    decrypt_message, decrypt_message_with, encrypt_message, encrypt_message_with, SealOptions,
};
pub use error::{Result, SealError};
#[cfg(feature = "async")]
pub use task::{decrypt_message_async, encrypt_message_async};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, "1.0.0");
    }
}
