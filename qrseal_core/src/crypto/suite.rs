//! Cipher suite descriptor

use serde::{Deserialize, Serialize};

/// Salt length in bytes
pub const SALT_LEN: usize = 16;

/// Nonce length for AES-GCM (96 bits)
pub const NONCE_LEN: usize = 12;

/// Key length for AES-256
pub const KEY_LEN: usize = 32;

/// GCM authentication tag length
pub const TAG_LEN: usize = 16;

/// PBKDF2 rounds, fixed by the wire format
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// KDF + AEAD combination a blob was sealed with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CipherSuite {
    /// PBKDF2-HMAC-SHA256 (100k rounds) + AES-256-GCM
    #[serde(rename = "pbkdf2-sha256-aes-256-gcm")]
    Pbkdf2Sha256Aes256Gcm,
}

impl Default for CipherSuite {
    fn default() -> Self {
        Self::Pbkdf2Sha256Aes256Gcm
    }
}

impl CipherSuite {
    /// Tag byte used by the versioned blob layout
    pub const fn id(self) -> u8 {
        match self {
            Self::Pbkdf2Sha256Aes256Gcm => 0x01,
        }
    }

    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            0x01 => Some(Self::Pbkdf2Sha256Aes256Gcm),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Pbkdf2Sha256Aes256Gcm => "PBKDF2-SHA256/100000 + AES-256-GCM",
        }
    }

    pub const fn kdf_iterations(self) -> u32 {
        match self {
            Self::Pbkdf2Sha256Aes256Gcm => PBKDF2_ITERATIONS,
        }
    }

    pub const fn salt_len(self) -> usize {
        SALT_LEN
    }

    pub const fn nonce_len(self) -> usize {
        NONCE_LEN
    }

    pub const fn tag_len(self) -> usize {
        TAG_LEN
    }

    /// Bytes in front of the ciphertext: salt + nonce
    pub const fn header_len(self) -> usize {
        self.salt_len() + self.nonce_len()
    }

    /// Total blob overhead over the plaintext length
    pub const fn overhead(self) -> usize {
        self.header_len() + self.tag_len()
    }
}
