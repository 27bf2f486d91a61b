//! Per-format converters.
//!
//! - [`image`]: raster decode, downscale and JPEG re-encode
//! - [`text`]: word wrap and pagination
//! - [`extract`]: document formats reduced to plain text

pub mod extract;
pub mod image;
pub mod text;

pub use extract::{Extractor, extractor_for};
pub use image::{ImageNormalizer, ImagePlacement, NormalizedImage};
pub use text::{TextPage, TextPaginator};
