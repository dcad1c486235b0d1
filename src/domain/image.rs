//! Image types flowing through the capture/compression stages

use std::io::Cursor;

use crate::infra::{MinterError, Result};

/// A raw captured or selected image: encoded bytes plus declared media
/// type and pixel dimensions.
///
/// Transient by design: superseded by the next capture/selection and
/// dropped once an upload record exists.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    /// Encoded image bytes as captured or read from disk
    pub bytes: Vec<u8>,
    /// Declared media type, e.g. `image/jpeg`
    pub mime_type: String,
    /// Pixel width
    pub width: u32,
    /// Pixel height
    pub height: u32,
}

impl ImageAsset {
    /// Build an asset from encoded bytes, reading dimensions from the
    /// container header without a full decode.
    pub fn from_encoded(bytes: Vec<u8>, mime_type: impl Into<String>) -> Result<Self> {
        let reader = image::ImageReader::new(Cursor::new(&bytes))
            .with_guessed_format()
            .map_err(|e| MinterError::ImageDecode(e.to_string()))?;
        let (width, height) = reader
            .into_dimensions()
            .map_err(|e| MinterError::ImageDecode(e.to_string()))?;

        Ok(Self {
            bytes,
            mime_type: mime_type.into(),
            width,
            height,
        })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Output of the compression search: a JPEG buffer together with the
/// quality factor that produced it.
///
/// Invariant: `size() <= target` for the configured ceiling, or
/// `quality` equals the configured floor (the search accepts the floor
/// encoding regardless of size).
#[derive(Debug, Clone)]
pub struct CompressionResult {
    /// Encoded JPEG bytes
    pub bytes: Vec<u8>,
    /// Media type of the encoded buffer (always `image/jpeg`)
    pub mime_type: &'static str,
    /// Width after any downscale
    pub width: u32,
    /// Height after any downscale
    pub height: u32,
    /// JPEG quality factor (1-100) that produced the accepted encoding
    pub quality: u8,
    /// Number of encoding attempts the search performed
    pub attempts: u32,
}

impl CompressionResult {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}
