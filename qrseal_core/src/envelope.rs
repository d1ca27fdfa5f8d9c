//! End-to-end sealing: message + passphrase -> blob text and back.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::blob::{Blob, BlobLayout};
use crate::capacity::SymbolCapacity;
use crate::crypto::{self, derive_key, generate_nonce, generate_salt};
use crate::error::{Result, SealError};

/// Options shared by both directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealOptions {
    /// Wire layout of produced and accepted blobs
    #[serde(default)]
    pub layout: BlobLayout,
    /// Reject messages whose blob text would not fit the target symbol.
    /// `None` disables the check.
    #[serde(default = "default_capacity")]
    pub capacity: Option<SymbolCapacity>,
}

fn default_capacity() -> Option<SymbolCapacity> {
    Some(SymbolCapacity::default())
}

impl Default for SealOptions {
    fn default() -> Self {
        Self {
            layout: BlobLayout::default(),
            capacity: default_capacity(),
        }
    }
}

/// Seal a message with default options
pub fn encrypt_message(plaintext: &str, passphrase: &SecretString) -> Result<String> {
    encrypt_message_with(plaintext, passphrase, &SealOptions::default())
}

/// Open blob text with default options
pub fn decrypt_message(text: &str, passphrase: &SecretString) -> Result<String> {
    decrypt_message_with(text, passphrase, &SealOptions::default())
}

/// Fresh salt + nonce, derive, seal, pack.
///
/// The capacity check runs before key derivation so an oversized message
/// fails fast.
pub fn encrypt_message_with(
    plaintext: &str,
    passphrase: &SecretString,
    options: &SealOptions,
) -> Result<String> {
    if let Some(capacity) = &options.capacity {
        capacity.check_message(plaintext.len(), options.layout)?;
    }

    let salt = generate_salt()?;
    let nonce = generate_nonce()?;
    let key = derive_key(passphrase.expose_secret().as_bytes(), &salt);

    let ciphertext = crypto::seal(plaintext.as_bytes(), &key, &nonce)?;
    let text = Blob::new(salt, nonce, ciphertext)?.to_text(options.layout);

    tracing::debug!(
        plaintext_len = plaintext.len(),
        text_len = text.len(),
        layout = ?options.layout,
        "message sealed"
    );

    Ok(text)
}

/// Unpack, re-derive the key from the embedded salt, open.
pub fn decrypt_message_with(
    text: &str,
    passphrase: &SecretString,
    options: &SealOptions,
) -> Result<String> {
    let blob = Blob::from_text(text, options.layout)?;
    let key = derive_key(passphrase.expose_secret().as_bytes(), blob.salt());

    let plaintext = crypto::open(blob.ciphertext(), &key, blob.nonce()).inspect_err(|e| {
        tracing::debug!(error = %e, "blob rejected");
    })?;

    let message = std::str::from_utf8(&plaintext)
        .map_err(|_| SealError::malformed("decrypted message is not valid UTF-8"))?
        .to_owned();

    tracing::debug!(plaintext_len = message.len(), "message opened");
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::{unpack, HEADER_LEN};
    use crate::capacity::ErrorCorrection;
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use rand::{distributions::Alphanumeric, Rng};

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_string())
    }

    fn decoded(text: &str) -> Vec<u8> {
        STANDARD.decode(text).unwrap()
    }

    #[test]
    fn test_concrete_vector_hello() {
        let pass = secret("correct horse battery staple");

        let text = encrypt_message("hello", &pass).unwrap();
        assert_eq!(decoded(&text).len(), 28 + 5 + 16);

        assert_eq!(decrypt_message(&text, &pass).unwrap(), "hello");
    }

    #[test]
    fn test_roundtrip_messages_and_passphrases() {
        let long_pass = "ß∂ƒ©".repeat(64);
        let passphrases = ["", "p", "correct horse battery staple", long_pass.as_str()];
        let messages = [
            String::new(),
            "hello".to_string(),
            "Zażółć gęślą jaźń 🔐 こんにちは".to_string(),
            "x".repeat(1500),
        ];

        for (pass, msg) in passphrases.iter().zip(messages.iter()) {
            let pass = secret(pass);
            let text = encrypt_message(msg, &pass).unwrap();
            assert_eq!(&decrypt_message(&text, &pass).unwrap(), msg);
        }
    }

    #[test]
    fn test_random_messages_roundtrip() {
        let mut rng = rand::thread_rng();
        let pass = secret("random-roundtrip");

        for _ in 0..3 {
            let len = rng.gen_range(0..600);
            let msg: String = (&mut rng)
                .sample_iter(&Alphanumeric)
                .take(len)
                .map(char::from)
                .collect();

            let text = encrypt_message(&msg, &pass).unwrap();
            assert_eq!(decrypt_message(&text, &pass).unwrap(), msg);
        }
    }

    #[test]
    fn test_wrong_passphrase_rejected() {
        let text = encrypt_message("meet at noon", &secret("alpha-bravo")).unwrap();
        let result = decrypt_message(&text, &secret("alpha-bravO"));
        assert!(matches!(result, Err(SealError::AuthenticationFailure)));

        let result = decrypt_message(&text, &secret(""));
        assert!(matches!(result, Err(SealError::AuthenticationFailure)));
    }

    #[test]
    fn test_every_ciphertext_bit_flip_detected() {
        let pass = secret("tamper-check");
        let text = encrypt_message("abc", &pass).unwrap();
        let (salt, nonce, ciphertext) = unpack(&text).unwrap();
        let key = derive_key(pass.expose_secret().as_bytes(), &salt);

        // Derive once and flip every bit of ciphertext + tag
        for byte in 0..ciphertext.len() {
            for bit in 0..8 {
                let mut tampered = ciphertext.clone();
                tampered[byte] ^= 1 << bit;
                assert!(matches!(
                    crypto::open(&tampered, &key, &nonce),
                    Err(SealError::AuthenticationFailure)
                ));
            }
        }
    }

    #[test]
    fn test_tampered_blob_text_rejected() {
        let pass = secret("tamper-check");
        let text = encrypt_message("abc", &pass).unwrap();

        let mut bytes = decoded(&text);
        bytes[HEADER_LEN] ^= 0x80;
        let tampered = STANDARD.encode(&bytes);

        assert!(matches!(
            decrypt_message(&tampered, &pass),
            Err(SealError::AuthenticationFailure)
        ));
    }

    #[test]
    fn test_truncated_blob_is_malformed() {
        let pass = secret("truncate");
        let text = encrypt_message("hello", &pass).unwrap();
        let bytes = decoded(&text);

        for len in [0, 10, 27] {
            let truncated = STANDARD.encode(&bytes[..len]);
            assert!(matches!(
                decrypt_message(&truncated, &pass),
                Err(SealError::MalformedInput(_))
            ));
        }
    }

    #[test]
    fn test_garbage_text_is_malformed() {
        let result = decrypt_message("this is not a sealed message", &secret("x"));
        assert!(matches!(result, Err(SealError::MalformedInput(_))));
    }

    #[test]
    fn test_sealing_is_randomized() {
        let pass = secret("same input");
        let a = encrypt_message("same message", &pass).unwrap();
        let b = encrypt_message("same message", &pass).unwrap();

        assert_ne!(a, b);
        assert_ne!(decoded(&a)[..HEADER_LEN], decoded(&b)[..HEADER_LEN]);
        assert_eq!(decrypt_message(&a, &pass).unwrap(), "same message");
        assert_eq!(decrypt_message(&b, &pass).unwrap(), "same message");
    }

    #[test]
    fn test_capacity_boundary() {
        let options = SealOptions {
            layout: BlobLayout::Legacy,
            capacity: Some(SymbolCapacity::qr(ErrorCorrection::Low)),
        };
        let pass = secret("capacity");

        let fits = "a".repeat(2170);
        let text = encrypt_message_with(&fits, &pass, &options).unwrap();
        assert_eq!(text.len(), 2952);
        assert_eq!(decrypt_message_with(&text, &pass, &options).unwrap(), fits);

        let too_long = "a".repeat(2171);
        let result = encrypt_message_with(&too_long, &pass, &options);
        assert!(matches!(
            result,
            Err(SealError::CapacityExceeded { size: 2956, max: 2953 })
        ));
    }

    #[test]
    fn test_capacity_counts_bytes_not_chars() {
        let options = SealOptions {
            layout: BlobLayout::Legacy,
            capacity: Some(SymbolCapacity::new(100)),
        };
        // 20 chars, 40 bytes -> 84-byte blob -> 112 chars of base64
        let msg = "ł".repeat(20);
        let result = encrypt_message_with(&msg, &secret("p"), &options);
        assert!(matches!(result, Err(SealError::CapacityExceeded { .. })));
    }

    #[test]
    fn test_no_capacity_limit() {
        let options = SealOptions {
            layout: BlobLayout::Legacy,
            capacity: None,
        };
        let pass = secret("unbounded");
        let msg = "b".repeat(5000);

        let text = encrypt_message_with(&msg, &pass, &options).unwrap();
        assert_eq!(decrypt_message_with(&text, &pass, &options).unwrap(), msg);
    }

    #[test]
    fn test_versioned_layout_roundtrip() {
        let options = SealOptions {
            layout: BlobLayout::Versioned,
            ..Default::default()
        };
        let pass = secret("versioned");

        let text = encrypt_message_with("hello", &pass, &options).unwrap();
        let bytes = decoded(&text);
        assert_eq!(bytes.len(), 1 + 28 + 5 + 16);
        assert_eq!(bytes[0], 0x01);

        assert_eq!(decrypt_message_with(&text, &pass, &options).unwrap(), "hello");
    }

    #[test]
    fn test_options_serde_defaults() {
        let options: SealOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, SealOptions::default());

        let options: SealOptions =
            serde_json::from_str(r#"{"layout":"versioned","capacity":null}"#).unwrap();
        assert_eq!(options.layout, BlobLayout::Versioned);
        assert_eq!(options.capacity, None);
    }
}
