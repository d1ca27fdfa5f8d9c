//! QR Seal - Conversation Session
//!
//! Thin adapter between a UI and the sealing core. Owns the symbol
//! collaborators and the session-only message log, never key material.

use chrono::{DateTime, Utc};
use image::{DynamicImage, GrayImage};
use parking_lot::RwLock;
use qrseal_core::crypto::assess_passphrase;
use qrseal_core::{decrypt_message_with, encrypt_message_with, SealError};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::symbol::{QrRenderer, QrScanner, SymbolRenderer, SymbolScanner};

/// Who produced a displayed message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Sent,
    Received,
}

/// One entry of the on-screen message log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayedMessage {
    pub id: Uuid,
    pub direction: Direction,
    /// Blob text for sent entries, plaintext for received ones
    pub text: String,
    pub encrypted: bool,
    pub at: DateTime<Utc>,
}

impl DisplayedMessage {
    /// Text as shown in the message list
    pub fn display_text(&self) -> String {
        if self.encrypted {
            format!("[Encrypted: {}]", self.text)
        } else {
            self.text.clone()
        }
    }
}

/// Result of sending: the blob text and its rendered symbol
#[derive(Debug, Clone)]
pub struct SealedCode {
    pub text: String,
    pub image: GrayImage,
}

/// Session-scoped conversation
pub struct Conversation {
    config: AppConfig,
    renderer: Box<dyn SymbolRenderer>,
    scanner: Box<dyn SymbolScanner>,
    history: RwLock<Vec<DisplayedMessage>>,
}

impl Conversation {
    /// Conversation with the QR collaborators built from `config`
    pub fn new(config: AppConfig) -> Self {
        let renderer = QrRenderer::new(&config.symbol);
        Self::with_collaborators(config, Box::new(renderer), Box::new(QrScanner))
    }

    pub fn with_collaborators(
        config: AppConfig,
        renderer: Box<dyn SymbolRenderer>,
        scanner: Box<dyn SymbolScanner>,
    ) -> Self {
        Self {
            config,
            renderer,
            scanner,
            history: RwLock::new(Vec::new()),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    // ═══════════════════════════════════════════════════════════════════════
    // SEND / RECEIVE
    // ═══════════════════════════════════════════════════════════════════════

    /// Seal a message and render it as a symbol.
    ///
    /// Message and passphrase are trimmed; empty values are rejected.
    pub fn send(&self, message: &str, passphrase: &SecretString) -> AppResult<SealedCode> {
        let message = message.trim();
        let passphrase = self.normalize_passphrase(passphrase);
        if message.is_empty() || passphrase.expose_secret().is_empty() {
            return Err(AppError::MissingInput("a message and passphrase"));
        }

        let text = encrypt_message_with(message, &passphrase, &self.config.seal_options())?;
        let image = self.renderer.render(&text)?;

        self.push(Direction::Sent, text.clone(), true);
        Ok(SealedCode { text, image })
    }

    /// Scan an uploaded image and open the symbol it carries
    pub fn receive_image(&self, image: &DynamicImage, passphrase: &SecretString) -> AppResult<String> {
        if passphrase.expose_secret().trim().is_empty() {
            return Err(AppError::MissingInput("a QR image and passphrase"));
        }

        let text = self
            .scanner
            .scan(image)?
            .ok_or(SealError::NoSymbolDetected)?;

        self.receive_text(&text, passphrase)
    }

    /// Open blob text obtained some other way (pasted, scanned elsewhere)
    pub fn receive_text(&self, text: &str, passphrase: &SecretString) -> AppResult<String> {
        let passphrase = self.normalize_passphrase(passphrase);
        if text.trim().is_empty() || passphrase.expose_secret().is_empty() {
            return Err(AppError::MissingInput("a sealed code and passphrase"));
        }

        let message = decrypt_message_with(text, &passphrase, &self.config.seal_options())
            .inspect_err(|e| tracing::warn!(error = %e, "could not open sealed code"))?;

        self.push(Direction::Received, message.clone(), false);
        Ok(message)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // HISTORY
    // ═══════════════════════════════════════════════════════════════════════

    /// Messages shown during this session, oldest first
    pub fn history(&self) -> Vec<DisplayedMessage> {
        self.history.read().clone()
    }

    pub fn clear(&self) {
        self.history.write().clear();
    }

    fn push(&self, direction: Direction, text: String, encrypted: bool) {
        self.history.write().push(DisplayedMessage {
            id: Uuid::new_v4(),
            direction,
            text,
            encrypted,
            at: Utc::now(),
        });
    }

    fn normalize_passphrase(&self, passphrase: &SecretString) -> SecretString {
        let trimmed = passphrase.expose_secret().trim();
        if self.config.warn_weak_passphrase {
            let strength = assess_passphrase(trimmed);
            if strength.should_warn() {
                tracing::warn!(?strength, "weak passphrase");
            }
        }
        SecretString::from(trimmed.to_owned())
    }
}
