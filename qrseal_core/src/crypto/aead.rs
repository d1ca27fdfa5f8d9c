//! AES-256-GCM sealing without associated data

use aes_gcm::{
    aead::{generic_array::GenericArray, Aead, KeyInit},
    Aes256Gcm, Nonce as AesNonce,
};
use zeroize::Zeroizing;

use super::keys::{DerivedKey, Nonce};
use super::suite::TAG_LEN;
use crate::error::{Result, SealError};

/// Encrypt `plaintext` under `key` and `nonce`.
///
/// Output is `plaintext.len() + 16` bytes: ciphertext followed by the GCM tag.
/// A (key, nonce) pair must never be reused.
pub fn seal(plaintext: &[u8], key: &DerivedKey, nonce: &Nonce) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new(GenericArray::from_slice(key.expose()));
    let nonce = AesNonce::from_slice(nonce);

    cipher
        .encrypt(nonce, plaintext)
        .map_err(|_| SealError::EncryptionFailed)
}

/// Verify the tag and decrypt.
///
/// Tag verification happens before any plaintext is released; on failure
/// nothing is returned.
pub fn open(ciphertext: &[u8], key: &DerivedKey, nonce: &Nonce) -> Result<Zeroizing<Vec<u8>>> {
    if ciphertext.len() < TAG_LEN {
        return Err(SealError::malformed(format!(
            "ciphertext is {} bytes, shorter than the {}-byte tag",
            ciphertext.len(),
            TAG_LEN
        )));
    }

    let cipher = Aes256Gcm::new(GenericArray::from_slice(key.expose()));
    let nonce = AesNonce::from_slice(nonce);

    cipher
        .decrypt(nonce, ciphertext)
        .map(Zeroizing::new)
        .map_err(|_| SealError::AuthenticationFailure)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gcm_known_answer() {
        // McGrew-Viega GCM test cases 13 and 14: zero key, zero IV
        let key = DerivedKey::from_bytes([0u8; 32]);
        let nonce = [0u8; 12];

        let empty = seal(b"", &key, &nonce).unwrap();
        assert_eq!(hex::encode(&empty), "530f8afbc74536b9a963b4f1c4cb738b");

        let block = seal(&[0u8; 16], &key, &nonce).unwrap();
        assert_eq!(
            hex::encode(&block),
            "cea7403d4d606b6e074ec5d3baf39d18d0d1c8a799996bf0265b98b5d48ab919"
        );
    }

    #[test]
    fn test_aes_gcm_roundtrip() {
        let key = DerivedKey::from_bytes([42u8; 32]);
        let nonce = [9u8; 12];
        let plaintext = b"QR Seal - top secret message";

        let ct = seal(plaintext, &key, &nonce).unwrap();
        assert_eq!(ct.len(), plaintext.len() + TAG_LEN);

        let pt = open(&ct, &key, &nonce).unwrap();
        assert_eq!(pt.as_slice(), plaintext);
    }

    #[test]
    fn test_wrong_key_fails() {
        let key1 = DerivedKey::from_bytes([1u8; 32]);
        let key2 = DerivedKey::from_bytes([2u8; 32]);
        let nonce = [0u8; 12];

        let ct = seal(b"Secret data", &key1, &nonce).unwrap();
        let result = open(&ct, &key2, &nonce);

        assert!(matches!(result, Err(SealError::AuthenticationFailure)));
    }

    #[test]
    fn test_wrong_nonce_fails() {
        let key = DerivedKey::from_bytes([1u8; 32]);

        let ct = seal(b"Secret data", &key, &[0u8; 12]).unwrap();
        let result = open(&ct, &key, &[1u8; 12]);

        assert!(matches!(result, Err(SealError::AuthenticationFailure)));
    }

    #[test]
    fn test_tampered_tag_fails() {
        let key = DerivedKey::from_bytes([1u8; 32]);
        let nonce = [0u8; 12];

        let mut ct = seal(b"Secret data", &key, &nonce).unwrap();
        let last = ct.len() - 1;
        ct[last] ^= 0x01;

        assert!(matches!(
            open(&ct, &key, &nonce),
            Err(SealError::AuthenticationFailure)
        ));
    }

    #[test]
    fn test_short_ciphertext_is_malformed() {
        let key = DerivedKey::from_bytes([1u8; 32]);
        let result = open(&[0u8; TAG_LEN - 1], &key, &[0u8; 12]);
        assert!(matches!(result, Err(SealError::MalformedInput(_))));
    }
}
