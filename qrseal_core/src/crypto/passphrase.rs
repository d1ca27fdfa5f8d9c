//! Passphrase strength assessment.
//!
//! Derivation accepts any passphrase, including an empty one. This module
//! only classifies it so the caller can warn.

use serde::{Deserialize, Serialize};

/// Passphrases shorter than this (in characters) are reported as weak.
pub const MIN_PASSPHRASE_CHARS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PassphraseStrength {
    Empty,
    Weak,
    Acceptable,
}

impl PassphraseStrength {
    pub fn should_warn(self) -> bool {
        !matches!(self, Self::Acceptable)
    }
}

pub fn assess_passphrase(passphrase: &str) -> PassphraseStrength {
    if passphrase.trim().is_empty() {
        PassphraseStrength::Empty
    } else if passphrase.chars().count() < MIN_PASSPHRASE_CHARS {
        PassphraseStrength::Weak
    } else {
        PassphraseStrength::Acceptable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assess_passphrase() {
        assert_eq!(assess_passphrase(""), PassphraseStrength::Empty);
        assert_eq!(assess_passphrase(" \t\n"), PassphraseStrength::Empty);
        assert_eq!(assess_passphrase("short"), PassphraseStrength::Weak);
        assert_eq!(
            assess_passphrase("correct horse battery staple"),
            PassphraseStrength::Acceptable
        );
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        // 4 characters, 8 bytes
        assert_eq!(assess_passphrase("żółw"), PassphraseStrength::Weak);
        assert!(assess_passphrase("żółw").should_warn());
    }
}
