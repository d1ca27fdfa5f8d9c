//! Cryptographic primitives - PBKDF2-SHA256 key derivation, AES-256-GCM

mod aead;
mod keys;
mod passphrase;
mod pbkdf2_kdf;
mod suite;

pub use aead::{open, seal};
pub use keys::{generate_nonce, generate_salt, DerivedKey, Nonce, Salt};
pub use passphrase::{assess_passphrase, PassphraseStrength, MIN_PASSPHRASE_CHARS};
pub use pbkdf2_kdf::derive_key;
pub use suite::{CipherSuite, KEY_LEN, NONCE_LEN, PBKDF2_ITERATIONS, SALT_LEN, TAG_LEN};
