//! Configuration for the merge pipeline.
//!
//! [`MergeConfig`] bundles everything a merge needs besides the files
//! themselves: the image quality tier, the text page geometry, the extension
//! table and the policy for files nobody can convert. All values are
//! immutable once a [`crate::merge::Merger`] is built from them.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::classify::CategoryTable;
use crate::error::{DocFuseError, Result};

/// Image recompression preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    /// Small output, aggressive downscaling.
    Low,
    /// Balanced size and fidelity.
    #[default]
    Medium,
    /// Near-original fidelity.
    High,
}

/// JPEG quality and dimension cap bound to a [`QualityTier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageProfile {
    /// JPEG quality factor, 0-100.
    pub jpeg_quality: u8,
    /// Largest allowed width or height in pixels.
    pub max_dimension_px: u32,
}

impl QualityTier {
    /// The fixed recompression settings of this tier.
    pub fn profile(&self) -> ImageProfile {
        match self {
            Self::Low => ImageProfile {
                jpeg_quality: 50,
                max_dimension_px: 1024,
            },
            Self::Medium => ImageProfile {
                jpeg_quality: 75,
                max_dimension_px: 2048,
            },
            Self::High => ImageProfile {
                jpeg_quality: 92,
                max_dimension_px: 4096,
            },
        }
    }

    /// Lowercase name of the tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parse a tier, falling back to [`QualityTier::Medium`] for absent or
    /// invalid input.
    pub fn parse_lenient(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for QualityTier {
    type Err = DocFuseError;

    /// Parse a tier from "low", "medium" or "high" (case-insensitive).
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(DocFuseError::invalid_config(format!(
                "Invalid quality: {s}. Must be one of: low, medium, high"
            ))),
        }
    }
}

/// Page geometry and monospace font metric for text pages.
///
/// All lengths are PDF points (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextLayout {
    /// Page width.
    pub page_width: f32,
    /// Page height.
    pub page_height: f32,
    /// Margin on every side.
    pub margin: f32,
    /// Body font size.
    pub font_size: f32,
    /// Line height as a multiple of the body font size.
    pub line_height_factor: f32,
    /// Title banner font size.
    pub title_font_size: f32,
    /// Horizontal advance of one glyph, in em. Courier is 0.6.
    pub char_width_em: f32,
    /// Number of spaces a tab expands to.
    pub tab_width: usize,
}

impl Default for TextLayout {
    fn default() -> Self {
        Self {
            page_width: 612.0,
            page_height: 792.0,
            margin: 50.0,
            font_size: 10.0,
            line_height_factor: 1.4,
            title_font_size: 14.0,
            char_width_em: 0.6,
            tab_width: 4,
        }
    }
}

impl TextLayout {
    /// Distance between two baselines.
    pub fn line_height(&self) -> f32 {
        self.font_size * self.line_height_factor
    }

    /// Vertical space taken by the title banner on the first page.
    pub fn title_reserved(&self) -> f32 {
        self.title_font_size * 2.0
    }

    /// Width available to a line of text.
    pub fn column_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// Rendered width of `chars` glyphs of body text.
    pub fn text_width(&self, chars: usize) -> f32 {
        chars as f32 * self.char_width_em * self.font_size
    }

    /// Number of body lines that fit on a page.
    ///
    /// Always at least one, so a pathological layout cannot stall pagination.
    pub fn lines_per_page(&self, with_title: bool) -> usize {
        let reserved = if with_title { self.title_reserved() } else { 0.0 };
        let usable = self.page_height - 2.0 * self.margin - reserved;
        ((usable / self.line_height()).floor() as usize).max(1)
    }

    fn validate(&self) -> Result<()> {
        if self.page_width <= 0.0 || self.page_height <= 0.0 {
            return Err(DocFuseError::invalid_config("Page size must be positive"));
        }
        if self.column_width() <= 0.0 {
            return Err(DocFuseError::invalid_config(
                "Margins leave no room for text",
            ));
        }
        if self.font_size <= 0.0 || self.line_height_factor <= 0.0 || self.char_width_em <= 0.0 {
            return Err(DocFuseError::invalid_config(
                "Font metrics must be positive",
            ));
        }
        Ok(())
    }
}

/// What to do with a file whose extension is not in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnrecognizedPolicy {
    /// Produce no page, log a warning.
    #[default]
    Skip,
    /// Produce an error notice page in the file's position.
    ErrorPage,
}

impl FromStr for UnrecognizedPolicy {
    type Err = DocFuseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "error-page" | "error_page" => Ok(Self::ErrorPage),
            _ => Err(DocFuseError::invalid_config(format!(
                "Invalid unrecognized-file policy: {s}. Must be one of: skip, error-page"
            ))),
        }
    }
}

/// Complete configuration for a merge.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Image recompression tier.
    pub quality: QualityTier,

    /// Geometry of generated text pages.
    pub layout: TextLayout,

    /// Extension to category mapping.
    pub categories: CategoryTable,

    /// Handling of unmapped extensions.
    pub unrecognized: UnrecognizedPolicy,

    /// Draw the file name as a title on plain-text conversions too.
    pub title_plain_text: bool,

    /// Flate-compress content streams in the output.
    pub compress: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            quality: QualityTier::default(),
            layout: TextLayout::default(),
            categories: CategoryTable::default(),
            unrecognized: UnrecognizedPolicy::default(),
            title_plain_text: true,
            compress: true,
        }
    }
}

impl MergeConfig {
    /// Set the image quality tier.
    pub fn with_quality(mut self, quality: QualityTier) -> Self {
        self.quality = quality;
        self
    }

    /// Set the text page layout.
    pub fn with_layout(mut self, layout: TextLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Set the extension table.
    pub fn with_categories(mut self, categories: CategoryTable) -> Self {
        self.categories = categories;
        self
    }

    /// Set the unrecognized-file policy.
    pub fn with_unrecognized(mut self, policy: UnrecognizedPolicy) -> Self {
        self.unrecognized = policy;
        self
    }

    /// Toggle title banners on plain-text files.
    pub fn with_title_plain_text(mut self, enabled: bool) -> Self {
        self.title_plain_text = enabled;
        self
    }

    /// Toggle output stream compression.
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DocFuseError::InvalidConfig`] when the text layout cannot
    /// hold any text or the category table is empty.
    pub fn validate(&self) -> Result<()> {
        self.layout.validate()?;
        if self.categories.is_empty() {
            return Err(DocFuseError::invalid_config(
                "Category table maps no extensions",
            ));
        }
        Ok(())
    }
}
