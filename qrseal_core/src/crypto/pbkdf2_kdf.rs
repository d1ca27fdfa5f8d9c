//! PBKDF2-HMAC-SHA256 derivation of the message key from a passphrase

use sha2::Sha256;

use super::keys::{DerivedKey, Salt};
use super::suite::{KEY_LEN, PBKDF2_ITERATIONS};

/// Derive the message key from a passphrase and the blob's salt.
///
/// Deterministic: the receiver rebuilds the same key from the salt embedded
/// in the blob. An empty passphrase is accepted here; callers decide whether
/// to warn (see [`super::assess_passphrase`]).
pub fn derive_key(passphrase: &[u8], salt: &Salt) -> DerivedKey {
    derive_key_with_rounds(passphrase, salt, PBKDF2_ITERATIONS)
}

pub(crate) fn derive_key_with_rounds(passphrase: &[u8], salt: &[u8], rounds: u32) -> DerivedKey {
    let mut output = Box::new([0u8; KEY_LEN]);
    pbkdf2::pbkdf2_hmac::<Sha256>(passphrase, salt, rounds, output.as_mut_slice());
    DerivedKey::from_boxed(output)
}
