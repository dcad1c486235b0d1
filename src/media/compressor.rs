//! Quality-ladder JPEG compression
//!
//! Downscales an image to bounded dimensions, then walks encoding
//! quality down a fixed linear ladder until the result fits under the
//! target byte ceiling. The first encoding under the ceiling wins, so
//! the search is biased toward the highest quality that fits; the floor
//! encoding is accepted regardless of size, which bounds the attempt
//! count. The linear step is deliberate — a binary search over quality
//! would change the output size distribution.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;

use crate::domain::{CompressionResult, ImageAsset};
use crate::infra::{MinterError, Result};

/// Target encoded size ceiling: 700 KiB.
pub const DEFAULT_TARGET_BYTES: usize = 700 * 1024;

/// Maximum pixel dimension on either axis.
pub const DEFAULT_MAX_DIMENSION: u32 = 1920;

/// Compression search parameters.
#[derive(Debug, Clone)]
pub struct CompressorConfig {
    /// Encoded size ceiling in bytes
    pub target_bytes: usize,
    /// Maximum width; larger sources are downscaled proportionally
    pub max_width: u32,
    /// Maximum height; larger sources are downscaled proportionally
    pub max_height: u32,
    /// Starting JPEG quality (1-100)
    pub initial_quality: u8,
    /// Quality floor; the floor encoding is accepted even if oversize
    pub quality_floor: u8,
    /// Ladder step between attempts
    pub quality_step: u8,
}

impl Default for CompressorConfig {
    fn default() -> Self {
        Self {
            target_bytes: DEFAULT_TARGET_BYTES,
            max_width: DEFAULT_MAX_DIMENSION,
            max_height: DEFAULT_MAX_DIMENSION,
            initial_quality: 90,
            quality_floor: 30,
            quality_step: 10,
        }
    }
}

impl CompressorConfig {
    /// Upper bound on encoding attempts for this configuration.
    pub fn max_attempts(&self) -> u32 {
        let span = self.initial_quality.saturating_sub(self.quality_floor) as u32;
        span.div_ceil(self.quality_step.max(1) as u32) + 1
    }
}

/// Compress an image to fit under the configured byte ceiling.
///
/// A source already under the ceiling at the initial quality returns
/// after exactly one encoding attempt.
pub fn compress(asset: &ImageAsset, config: &CompressorConfig) -> Result<CompressionResult> {
    let decoded = image::load_from_memory(&asset.bytes)
        .map_err(|e| MinterError::ImageDecode(e.to_string()))?;

    let (width, height) = (decoded.width(), decoded.height());
    let resized = if width > config.max_width || height > config.max_height {
        // resize preserves aspect ratio, scaling by the binding dimension
        decoded.resize(config.max_width, config.max_height, FilterType::Lanczos3)
    } else {
        decoded
    };

    // JPEG has no alpha channel; flatten once before the ladder.
    let frame = resized.to_rgb8();

    let mut quality = config.initial_quality;
    let mut attempts = 0u32;
    loop {
        attempts += 1;
        let mut buf = Vec::new();
        JpegEncoder::new_with_quality(&mut buf, quality)
            .encode_image(&frame)
            .map_err(|e| MinterError::ImageEncode(e.to_string()))?;

        tracing::debug!(
            quality,
            size_kb = buf.len() / 1024,
            attempts,
            "compression attempt"
        );

        if buf.len() <= config.target_bytes || quality <= config.quality_floor {
            return Ok(CompressionResult {
                bytes: buf,
                mime_type: "image/jpeg",
                width: frame.width(),
                height: frame.height(),
                quality,
                attempts,
            });
        }

        quality = quality
            .saturating_sub(config.quality_step)
            .max(config.quality_floor);
    }
}
