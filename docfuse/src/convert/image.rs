//! Raster image normalization and page placement.
//!
//! Every image is decoded, capped to the quality tier's maximum dimension
//! and re-encoded as baseline RGB JPEG so it can be embedded with the
//! `DCTDecode` filter regardless of its source format.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;

use crate::config::{ImageProfile, QualityTier};
use crate::error::{DocFuseError, Result};

/// Largest page an image is fitted into (US Letter).
pub const MAX_PAGE_WIDTH: f32 = 612.0;
/// See [`MAX_PAGE_WIDTH`].
pub const MAX_PAGE_HEIGHT: f32 = 792.0;
/// Lower bound of either page dimension.
pub const MIN_PAGE_SIDE: f32 = 100.0;

/// A re-encoded image ready for embedding.
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    /// Baseline JPEG data.
    pub jpeg: Vec<u8>,
    /// Pixel width.
    pub width: u32,
    /// Pixel height.
    pub height: u32,
}

/// Page size for an image, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlacement {
    /// Page width; the image is drawn across all of it.
    pub page_width: f32,
    /// Page height; the image is drawn across all of it.
    pub page_height: f32,
    /// Factor applied to the pixel size, never above 1.
    pub scale: f32,
}

impl ImagePlacement {
    /// Fit a `width` x `height` pixel image onto a page.
    ///
    /// Pixels map to points 1:1 unless the image is larger than a Letter
    /// page, in which case it is scaled down uniformly. Each page side is
    /// floored at [`MIN_PAGE_SIDE`].
    pub fn fit(width: u32, height: u32) -> Self {
        let (w, h) = (width.max(1) as f32, height.max(1) as f32);
        let scale = (MAX_PAGE_WIDTH / w).min(MAX_PAGE_HEIGHT / h).min(1.0);
        Self {
            page_width: (w * scale).max(MIN_PAGE_SIDE),
            page_height: (h * scale).max(MIN_PAGE_SIDE),
            scale,
        }
    }
}

/// Decodes, downscales and recompresses images for one quality tier.
#[derive(Debug, Clone, Copy)]
pub struct ImageNormalizer {
    profile: ImageProfile,
}

impl ImageNormalizer {
    /// Create a normalizer bound to a quality tier.
    pub fn new(tier: QualityTier) -> Self {
        Self {
            profile: tier.profile(),
        }
    }

    /// Normalize the image `bytes` of the file called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`DocFuseError::Conversion`] naming the file when the data
    /// cannot be decoded or encoded.
    pub fn normalize(&self, name: &str, bytes: &[u8]) -> Result<NormalizedImage> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| DocFuseError::conversion(name, format!("cannot decode image: {e}")))?;

        if decoded.width() == 0 || decoded.height() == 0 {
            return Err(DocFuseError::conversion(name, "image has no pixels"));
        }

        let cap = self.profile.max_dimension_px;
        let resized = if decoded.width() > cap || decoded.height() > cap {
            decoded.resize(cap, cap, FilterType::Lanczos3)
        } else {
            decoded
        };

        let rgb = resized.to_rgb8();
        let (width, height) = rgb.dimensions();

        let mut jpeg = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut jpeg, self.profile.jpeg_quality);
        rgb.write_with_encoder(encoder)
            .map_err(|e| DocFuseError::conversion(name, format!("cannot encode image: {e}")))?;

        tracing::debug!(name, width, height, bytes = jpeg.len(), "normalized image");

        Ok(NormalizedImage {
            jpeg,
            width,
            height,
        })
    }
}
