//! # QR Seal
//!
//! Passphrase-encrypted short messages carried as QR codes.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                        QR SEAL                           │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────┐  │
//! │  │  CLI / UI   │  │ CONVERSATION│  │  SYMBOL ENGINE  │  │
//! │  │  (clap)     │──│  session log│──│  qrcode / rqrr  │  │
//! │  └─────────────┘  └──────┬──────┘  └─────────────────┘  │
//! │                          │                               │
//! │  ┌───────────────────────┴─────────────────────────────┐ │
//! │  │                    QRSEAL CORE                       │ │
//! │  │   PBKDF2-SHA256 → AES-256-GCM → salt‖nonce‖ct base64 │ │
//! │  └─────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Security Model
//!
//! - The session never holds key material; each send/receive derives and
//!   drops its own key inside the core
//! - Nothing is persisted; the message log lives for the session only

pub mod config;
pub mod error;
pub mod session;
pub mod symbol;

pub use config::{AppConfig, SymbolConfig};
pub use error::{AppError, AppResult};
pub use session::{Conversation, DisplayedMessage, Direction, SealedCode};
pub use symbol::{QrRenderer, QrScanner, SymbolRenderer, SymbolScanner};

/// QR Seal version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
