//! Async wrappers.
//!
//! Key derivation costs tens of milliseconds. These run the synchronous
//! operations on tokio's blocking pool so an executor thread is never held.

use secrecy::SecretString;

use crate::envelope::{decrypt_message_with, encrypt_message_with, SealOptions};
use crate::error::{Result, SealError};

pub async fn encrypt_message_async(
    plaintext: String,
    passphrase: SecretString,
    options: SealOptions,
) -> Result<String> {
    tokio::task::spawn_blocking(move || encrypt_message_with(&plaintext, &passphrase, &options))
        .await
        .map_err(|e| SealError::Worker(e.to_string()))?
}

pub async fn decrypt_message_async(
    text: String,
    passphrase: SecretString,
    options: SealOptions,
) -> Result<String> {
    tokio::task::spawn_blocking(move || decrypt_message_with(&text, &passphrase, &options))
        .await
        .map_err(|e| SealError::Worker(e.to_string()))?
}
