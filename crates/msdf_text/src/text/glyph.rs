//! Per-character glyph metrics
//!
//! All horizontal quantities are stored already multiplied by the font size,
//! so a glyph measured at the font's native size needs no further scaling.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::assets::{DocumentGlyph, DocumentKerning};
use crate::foundation::math::RectF;

/// Metrics for a single character in a distance-field atlas
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Glyph {
    character: char,
    advance: f32,
    kerning: BTreeMap<char, f32>,
    atlas_source: RectF,
    cursor_bounds: RectF,
}

impl Glyph {
    /// The all-zero glyph returned for unmapped characters
    pub const EMPTY: Self = Self {
        character: '\0',
        advance: 0.0,
        kerning: BTreeMap::new(),
        atlas_source: RectF::new(0.0, 0.0, 0.0, 0.0),
        cursor_bounds: RectF::new(0.0, 0.0, 0.0, 0.0),
    };

    /// Build a glyph from a generator record
    ///
    /// Kerning pairs whose first code point is this glyph are kept. The atlas
    /// rectangle is flipped from the generator's bottom-left origin to a
    /// top-left one, and the cursor bounds are measured down from the
    /// ascender line. Returns `None` for code points that are not valid
    /// characters.
    pub fn from_document(
        record: &DocumentGlyph,
        kerning: &[DocumentKerning],
        font_size: f32,
        ascender: f32,
        atlas_height: f32,
    ) -> Option<Self> {
        let character = char::from_u32(record.unicode)?;

        let kerning = kerning
            .iter()
            .filter(|pair| pair.unicode1 == record.unicode)
            .filter_map(|pair| char::from_u32(pair.unicode2).map(|next| (next, pair.advance * font_size)))
            .collect();

        let atlas = record.atlas_bounds;
        let atlas_source = RectF::new(
            atlas.left,
            atlas_height - atlas.top,
            atlas.right - atlas.left,
            atlas.top - atlas.bottom,
        );

        let plane = record.plane_bounds;
        let cursor_bounds = RectF::new(
            plane.left * font_size,
            (ascender - plane.top) * font_size,
            (plane.right - plane.left) * font_size,
            (plane.top - plane.bottom) * font_size,
        );

        Some(Self {
            character,
            advance: record.advance * font_size,
            kerning,
            atlas_source,
            cursor_bounds,
        })
    }

    /// Character this glyph renders
    pub fn character(&self) -> char {
        self.character
    }

    /// Pen advance before kerning
    pub fn advance(&self) -> f32 {
        self.advance
    }

    /// Kerning correction when followed by `next`, zero if no pair exists
    pub fn kerning(&self, next: char) -> f32 {
        self.kerning.get(&next).copied().unwrap_or(0.0)
    }

    /// Number of kerning pairs starting with this glyph
    pub fn kerning_pair_count(&self) -> usize {
        self.kerning.len()
    }

    /// Pen advance including the kerning correction towards `next`
    pub fn advance_to(&self, next: Option<char>) -> f32 {
        match next {
            Some(next) => self.advance + self.kerning(next),
            None => self.advance,
        }
    }

    /// Source rectangle in atlas pixels, top-left origin
    pub fn atlas_source(&self) -> RectF {
        self.atlas_source
    }

    /// Quad offset and size relative to the pen position on the ascender line
    pub fn cursor_bounds(&self) -> RectF {
        self.cursor_bounds
    }

    /// Horizontal space the glyph visibly occupies from the pen position
    ///
    /// Used in place of the advance for the last glyph of a line.
    pub fn extent(&self) -> f32 {
        self.cursor_bounds.right()
    }

    /// Whether the glyph has no visible quad
    pub fn is_empty(&self) -> bool {
        self.cursor_bounds.width <= 0.0 || self.cursor_bounds.height <= 0.0
    }
}
