//! QR Seal - Configuration
//!
//! JSON file under the user config dir; every field is optional.

use std::fs;
use std::path::{Path, PathBuf};

use qrseal_core::{BlobLayout, ErrorCorrection, SealOptions, SymbolCapacity};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Config file name inside the app config directory
pub const CONFIG_FILE: &str = "config.json";

/// QR symbol rendering settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolConfig {
    /// Error correction level (also fixes the capacity limit)
    pub error_correction: ErrorCorrection,
    /// Pixels per module
    pub module_px: u32,
    /// Light border in modules
    pub quiet_zone: u32,
    /// Minimum image width in pixels
    pub min_width: u32,
}

impl Default for SymbolConfig {
    fn default() -> Self {
        Self {
            error_correction: ErrorCorrection::Medium,
            module_px: 4,
            quiet_zone: 4,
            min_width: 200,
        }
    }
}

/// App configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// QR rendering
    pub symbol: SymbolConfig,
    /// Blob wire layout
    pub layout: BlobLayout,
    /// Log a warning for empty or short passphrases
    pub warn_weak_passphrase: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            symbol: SymbolConfig::default(),
            layout: BlobLayout::Legacy,
            warn_weak_passphrase: true,
        }
    }
}

impl AppConfig {
    /// `<config dir>/qrseal/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("qrseal").join(CONFIG_FILE))
    }

    /// Load config from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let data = fs::read_to_string(path.as_ref())?;
        serde_json::from_str(&data).map_err(|e| {
            AppError::ConfigError(format!("{}: {}", path.as_ref().display(), e))
        })
    }

    /// Load from `path` (or the default location); defaults when the file
    /// does not exist.
    pub fn load_or_default(path: Option<&Path>) -> AppResult<Self> {
        let path = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(p) => p,
            None => return Ok(Self::default()),
        };

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        Self::load(&path)
    }

    /// Save config as pretty JSON, creating parent directories
    pub fn save<P: AsRef<Path>>(&self, path: P) -> AppResult<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// Options for the core sealing operations
    pub fn seal_options(&self) -> SealOptions {
        SealOptions {
            layout: self.layout,
            capacity: Some(SymbolCapacity::qr(self.symbol.error_correction)),
        }
    }
}
