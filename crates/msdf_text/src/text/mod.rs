//! Text layout system
//!
//! Glyph metrics lookup, line wrapping and alignment for distance-field
//! fonts. Everything here is pure CPU work; drawing lives in
//! [`crate::render`].

pub mod glyph;
pub mod font_metrics;
pub mod glyph_table;
pub mod text_line;
pub mod wrap;
pub mod alignment;
pub mod field_font;

#[cfg(test)]
pub(crate) mod fixtures;

pub use glyph::Glyph;
pub use font_metrics::FontMetrics;
pub use glyph_table::{GlyphSpan, GlyphSpans, GlyphTable, DEFAULT_FALLBACK};
pub use text_line::TextLine;
pub use wrap::{wrap_text, WrapMode, LINE_BREAK};
pub use alignment::{HorizontalAnchor, TextAlignment, VerticalAnchor};
pub use field_font::FieldFont;

use crate::assets::AssetError;
use crate::render::BackendError;

/// Result type for font operations
pub type FontResult<T> = Result<T, FontError>;

/// Errors that can occur during font operations
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    /// Loading the metrics document or atlas image failed
    #[error("Failed to load font: {0}")]
    Asset(#[from] AssetError),

    /// Reading or writing a baked font file failed
    #[error("Baked font error: {0}")]
    Baked(String),

    /// Creating the atlas texture failed
    #[error("Failed to create atlas texture: {0}")]
    Texture(#[from] BackendError),
}

impl From<std::io::Error> for FontError {
    fn from(err: std::io::Error) -> Self {
        Self::Asset(AssetError::Io(err))
    }
}
