//! QR Seal - Symbol Engine
//!
//! Renders blob text into QR rasters and scans rasters back to text.
//! The session only sees the [`SymbolRenderer`] / [`SymbolScanner`] traits.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use qrcode::types::QrError;
use qrcode::{Color, EcLevel, QrCode};
use qrseal_core::{ErrorCorrection, SealError, SymbolCapacity};

use crate::config::SymbolConfig;
use crate::error::AppResult;

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// Draws text as a 2D symbol
pub trait SymbolRenderer: Send + Sync {
    /// Fails with `CapacityExceeded` when `text` does not fit the symbol
    fn render(&self, text: &str) -> AppResult<GrayImage>;
}

/// Finds a 2D symbol in a raster
pub trait SymbolScanner: Send + Sync {
    /// `None` when no symbol is detected
    fn scan(&self, image: &DynamicImage) -> AppResult<Option<String>>;
}

// ═══════════════════════════════════════════════════════════════════════════
// RENDERER
// ═══════════════════════════════════════════════════════════════════════════

/// QR renderer
#[derive(Debug, Clone)]
pub struct QrRenderer {
    error_correction: ErrorCorrection,
    module_px: u32,
    quiet_zone: u32,
    min_width: u32,
}

impl QrRenderer {
    pub fn new(config: &SymbolConfig) -> Self {
        Self {
            error_correction: config.error_correction,
            module_px: config.module_px.max(1),
            quiet_zone: config.quiet_zone,
            min_width: config.min_width,
        }
    }

    fn ec_level(&self) -> EcLevel {
        match self.error_correction {
            ErrorCorrection::Low => EcLevel::L,
            ErrorCorrection::Medium => EcLevel::M,
            ErrorCorrection::Quartile => EcLevel::Q,
            ErrorCorrection::High => EcLevel::H,
        }
    }

    /// Pixels per module so the image reaches `min_width`
    fn scale(&self, modules: u32) -> u32 {
        self.module_px.max(self.min_width.div_ceil(modules))
    }
}

impl SymbolRenderer for QrRenderer {
    fn render(&self, text: &str) -> AppResult<GrayImage> {
        let capacity = SymbolCapacity::qr(self.error_correction);
        capacity.check(text.len())?;

        let code = QrCode::with_error_correction_level(text.as_bytes(), self.ec_level())
            .map_err(|e| match e {
                QrError::DataTooLong => SealError::CapacityExceeded {
                    size: text.len(),
                    max: capacity.max_text_len(),
                },
                other => SealError::RenderFailure(other.to_string()),
            })?;

        let width = code.width() as u32;
        let colors = code.to_colors();
        let qz = self.quiet_zone;
        let modules = width + 2 * qz;
        let scale = self.scale(modules);
        let size = modules * scale;

        let image = GrayImage::from_fn(size, size, |x, y| {
            let (mx, my) = (x / scale, y / scale);
            if mx < qz || my < qz || mx >= qz + width || my >= qz + width {
                return LIGHT;
            }
            match colors[((my - qz) * width + (mx - qz)) as usize] {
                Color::Dark => DARK,
                Color::Light => LIGHT,
            }
        });

        tracing::debug!(text_len = text.len(), modules = width, size, "symbol rendered");
        Ok(image)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// SCANNER
// ═══════════════════════════════════════════════════════════════════════════

/// QR scanner; returns the first symbol that decodes
#[derive(Debug, Clone, Copy, Default)]
pub struct QrScanner;

impl SymbolScanner for QrScanner {
    fn scan(&self, image: &DynamicImage) -> AppResult<Option<String>> {
        let luma = image.to_luma8();
        let (width, height) = luma.dimensions();

        let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
            width as usize,
            height as usize,
            |x, y| luma.get_pixel(x as u32, y as u32).0[0],
        );

        for grid in prepared.detect_grids() {
            match grid.decode() {
                Ok((_, content)) => return Ok(Some(content)),
                Err(e) => tracing::debug!(error = ?e, "grid failed to decode"),
            }
        }

        Ok(None)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// FILE HELPERS
// ═══════════════════════════════════════════════════════════════════════════

/// Encode a symbol raster as PNG
pub fn encode_png(image: &GrayImage) -> AppResult<Vec<u8>> {
    let mut output = Vec::new();
    image.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}

/// Write a symbol raster to a PNG file
pub fn save_png<P: AsRef<Path>>(image: &GrayImage, path: P) -> AppResult<()> {
    let data = encode_png(image)?;
    std::fs::write(path.as_ref(), data)?;
    Ok(())
}

/// Decode an uploaded image
pub fn load_image_bytes(data: &[u8]) -> AppResult<DynamicImage> {
    Ok(image::load_from_memory(data)?)
}

/// Read an image file
pub fn load_image<P: AsRef<Path>>(path: P) -> AppResult<DynamicImage> {
    let data = std::fs::read(path.as_ref())?;
    load_image_bytes(&data)
}
