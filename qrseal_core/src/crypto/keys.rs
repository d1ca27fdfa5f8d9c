//! Key material and per-message randomness

use secrecy::{ExposeSecret, SecretBox};

use super::suite::{KEY_LEN, NONCE_LEN, SALT_LEN};
use crate::error::{Result, SealError};

/// Per-message KDF salt
pub type Salt = [u8; SALT_LEN];

/// Per-message AES-GCM nonce
pub type Nonce = [u8; NONCE_LEN];

/// 256-bit key derived from a passphrase.
///
/// Lives only for one seal/open call. Zeroized on drop, redacted in `Debug`.
pub struct DerivedKey {
    inner: SecretBox<[u8; KEY_LEN]>,
}

impl DerivedKey {
    pub(crate) fn from_boxed(bytes: Box<[u8; KEY_LEN]>) -> Self {
        Self {
            inner: SecretBox::new(bytes),
        }
    }

    #[cfg(test)]
    pub(crate) fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self::from_boxed(Box::new(bytes))
    }

    /// Expose the key bytes (use with caution)
    pub fn expose(&self) -> &[u8; KEY_LEN] {
        self.inner.expose_secret()
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Generate a fresh random salt
pub fn generate_salt() -> Result<Salt> {
    let mut salt = [0u8; SALT_LEN];
    getrandom::getrandom(&mut salt).map_err(|e| SealError::Entropy(e.to_string()))?;
    Ok(salt)
}

/// Generate a fresh random nonce
pub fn generate_nonce() -> Result<Nonce> {
    let mut nonce = [0u8; NONCE_LEN];
    getrandom::getrandom(&mut nonce).map_err(|e| SealError::Entropy(e.to_string()))?;
    Ok(nonce)
}
