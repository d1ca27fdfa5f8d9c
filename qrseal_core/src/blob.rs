//! Blob wire format.
//!
//! Legacy layout (byte-compatible with the browser client):
//! ```text
//! [SALT 16B][random]
//! [NONCE 12B][random]
//! [CIPHERTEXT variable][AES-256-GCM encrypted]
//! [TAG 16B][GCM auth tag]
//! ```
//!
//! Versioned layout prefixes the same fields with one suite id byte:
//! ```text
//! [SUITE 1B][0x01]
//! [SALT 16B][NONCE 12B][CIPHERTEXT variable][TAG 16B]
//! ```
//!
//! The whole byte string travels as standard padded base64 text. No length
//! prefix is stored; the ciphertext is everything after the header.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::crypto::{CipherSuite, Nonce, Salt, NONCE_LEN, SALT_LEN, TAG_LEN};
use crate::error::{Result, SealError};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Header size of the legacy layout: SALT(16) + NONCE(12)
pub const HEADER_LEN: usize = SALT_LEN + NONCE_LEN;

/// Smallest structurally valid legacy blob: header + empty ciphertext tag
pub const MIN_BLOB_LEN: usize = HEADER_LEN + TAG_LEN;

/// Size of the suite tag in the versioned layout
const SUITE_TAG_LEN: usize = 1;

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// How the blob fields are laid out on the wire.
///
/// The two layouts cannot be told apart from the bytes alone (a legacy blob
/// starts with random salt), so both ends must agree on one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlobLayout {
    /// `salt || nonce || ciphertext`, no version tag
    #[default]
    Legacy,
    /// `suite || salt || nonce || ciphertext`
    Versioned,
}

impl BlobLayout {
    /// Bytes in front of the ciphertext
    pub const fn header_len(self) -> usize {
        match self {
            Self::Legacy => HEADER_LEN,
            Self::Versioned => SUITE_TAG_LEN + HEADER_LEN,
        }
    }

    /// Decoded blob size for a plaintext of `plaintext_len` bytes
    pub const fn blob_len(self, plaintext_len: usize) -> usize {
        self.header_len() + plaintext_len + TAG_LEN
    }
}

// ---------------------------------------------------------------------------
// Blob
// ---------------------------------------------------------------------------

/// Salt, nonce and tagged ciphertext of one sealed message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    suite: CipherSuite,
    salt: Salt,
    nonce: Nonce,
    ciphertext: Vec<u8>,
}

impl Blob {
    /// Fails with `MalformedInput` when `ciphertext` cannot hold the tag
    pub fn new(salt: Salt, nonce: Nonce, ciphertext: Vec<u8>) -> Result<Self> {
        let suite = CipherSuite::default();
        check_ciphertext_len(suite, ciphertext.len())?;
        Ok(Self {
            suite,
            salt,
            nonce,
            ciphertext,
        })
    }

    pub fn suite(&self) -> CipherSuite {
        self.suite
    }

    pub fn salt(&self) -> &Salt {
        &self.salt
    }

    pub fn nonce(&self) -> &Nonce {
        &self.nonce
    }

    /// Ciphertext with the trailing tag
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    pub fn into_parts(self) -> (Salt, Nonce, Vec<u8>) {
        (self.salt, self.nonce, self.ciphertext)
    }

    /// Serialize to bytes in the given layout
    pub fn to_bytes(&self, layout: BlobLayout) -> Vec<u8> {
        let mut output = Vec::with_capacity(layout.header_len() + self.ciphertext.len());
        if layout == BlobLayout::Versioned {
            output.push(self.suite.id());
        }
        output.extend_from_slice(&self.salt);
        output.extend_from_slice(&self.nonce);
        output.extend_from_slice(&self.ciphertext);
        output
    }

    /// Parse bytes in the given layout
    pub fn from_bytes(data: &[u8], layout: BlobLayout) -> Result<Self> {
        let (suite, body) = match layout {
            BlobLayout::Legacy => (CipherSuite::default(), data),
            BlobLayout::Versioned => {
                let (&tag, rest) = data
                    .split_first()
                    .ok_or_else(|| SealError::malformed("blob is empty"))?;
                let suite = CipherSuite::from_id(tag).ok_or_else(|| {
                    SealError::malformed(format!("unknown suite tag 0x{:02x}", tag))
                })?;
                (suite, rest)
            }
        };

        let header_len = suite.header_len();
        if body.len() < header_len {
            return Err(SealError::malformed(format!(
                "decoded length {} is below the {}-byte salt and nonce header",
                body.len(),
                header_len
            )));
        }

        let ciphertext = &body[header_len..];
        check_ciphertext_len(suite, ciphertext.len())?;

        let salt: Salt = body[..SALT_LEN]
            .try_into()
            .map_err(|_| SealError::malformed("invalid salt"))?;
        let nonce: Nonce = body[SALT_LEN..header_len]
            .try_into()
            .map_err(|_| SealError::malformed("invalid nonce"))?;

        Ok(Self {
            suite,
            salt,
            nonce,
            ciphertext: ciphertext.to_vec(),
        })
    }

    /// Base64 text form, safe to embed in a barcode
    pub fn to_text(&self, layout: BlobLayout) -> String {
        STANDARD.encode(self.to_bytes(layout))
    }

    /// Parse the base64 text form. Surrounding ASCII whitespace is ignored.
    pub fn from_text(text: &str, layout: BlobLayout) -> Result<Self> {
        let data = decode_text(text)?;
        Self::from_bytes(&data, layout)
    }

    /// Length of the plaintext this blob decrypts to
    pub fn plaintext_len(&self) -> usize {
        self.ciphertext.len().saturating_sub(self.suite.tag_len())
    }
}

fn check_ciphertext_len(suite: CipherSuite, len: usize) -> Result<()> {
    if len < suite.tag_len() {
        return Err(SealError::malformed(format!(
            "ciphertext is {} bytes, shorter than the {}-byte tag",
            len,
            suite.tag_len()
        )));
    }
    Ok(())
}

fn decode_text(text: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(text.trim_matches(|c: char| c.is_ascii_whitespace()))
        .map_err(|e| SealError::malformed(format!("invalid base64: {}", e)))
}

// ---------------------------------------------------------------------------
// Legacy pack / unpack
// ---------------------------------------------------------------------------

/// Pack salt, nonce and tagged ciphertext into legacy blob text.
///
/// Rejects a ciphertext shorter than the tag, which `unpack` could not read.
pub fn pack(salt: &Salt, nonce: &Nonce, ciphertext: &[u8]) -> Result<String> {
    Ok(Blob::new(*salt, *nonce, ciphertext.to_vec())?.to_text(BlobLayout::Legacy))
}

/// Unpack legacy blob text into salt, nonce and tagged ciphertext
pub fn unpack(text: &str) -> Result<(Salt, Nonce, Vec<u8>)> {
    Blob::from_text(text, BlobLayout::Legacy).map(Blob::into_parts)
}

// ---------------------------------------------------------------------------
// Inspection
// ---------------------------------------------------------------------------

/// Structure of a blob, readable without the passphrase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobInfo {
    pub layout: BlobLayout,
    pub suite: CipherSuite,
    /// Decoded blob length in bytes
    pub total_len: usize,
    /// Ciphertext length including the tag
    pub ciphertext_len: usize,
    pub plaintext_len: usize,
}

/// Describe a blob text without decrypting it
pub fn inspect(text: &str, layout: BlobLayout) -> Result<BlobInfo> {
    let data = decode_text(text)?;
    let blob = Blob::from_bytes(&data, layout)?;

    Ok(BlobInfo {
        layout,
        suite: blob.suite(),
        total_len: data.len(),
        ciphertext_len: blob.ciphertext().len(),
        plaintext_len: blob.plaintext_len(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
