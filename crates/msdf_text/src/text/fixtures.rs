//! Shared test font
//!
//! 32 px per em, ascender 0.75, descender -0.25, line height 1.25. Lower and
//! upper case letters and `?` advance 16 px with a 16 px extent, except `A`
//! which advances 10 px. Space advances 8 px and has no quad. One kerning
//! pair: `A` followed by `B` adds 2 px.

use crate::assets::{AtlasDocument, AtlasParams, DocumentBounds, DocumentGlyph, DocumentKerning, DocumentMetrics};
use crate::render::TextureHandle;

use super::{FieldFont, GlyphTable};

const CELL: f32 = 20.0;

fn glyph_record(index: usize, character: char, advance: f32) -> DocumentGlyph {
    let column = (index % 16) as f32;
    let row = (index / 16) as f32;
    DocumentGlyph {
        unicode: character as u32,
        advance,
        plane_bounds: DocumentBounds { left: 0.0, bottom: 0.0, right: advance, top: 0.75 },
        atlas_bounds: DocumentBounds {
            left: column * CELL,
            bottom: row * 30.0,
            right: column * CELL + advance * 32.0,
            top: row * 30.0 + 24.0,
        },
    }
}

/// Metrics document for the test font
pub(crate) fn sample_document() -> AtlasDocument {
    let mut glyphs: Vec<DocumentGlyph> = ('a'..='z')
        .chain('B'..='Z')
        .chain(std::iter::once('?'))
        .enumerate()
        .map(|(index, character)| glyph_record(index, character, 0.5))
        .collect();
    glyphs.push(glyph_record(glyphs.len(), 'A', 0.3125));
    glyphs.push(DocumentGlyph {
        unicode: ' ' as u32,
        advance: 0.25,
        ..Default::default()
    });

    AtlasDocument {
        atlas: AtlasParams {
            distance_range: 2.0,
            size: 32.0,
            width: 512,
            height: 256,
        },
        metrics: DocumentMetrics {
            line_height: 1.25,
            ascender: 0.75,
            descender: -0.25,
            underline_y: -0.125,
            underline_thickness: 0.0625,
        },
        glyphs,
        kerning: vec![DocumentKerning {
            unicode1: 'A' as u32,
            unicode2: 'B' as u32,
            advance: 0.0625,
        }],
    }
}

/// Test font without a texture
pub(crate) fn sample_font() -> FieldFont {
    FieldFont::from_document("Sample", &sample_document(), Vec::new(), false)
}

/// Test font bound to an already-created texture
pub(crate) fn sample_font_with_texture(texture: TextureHandle) -> FieldFont {
    let mut font = sample_font();
    font.set_texture(texture);
    font
}

/// Glyph table of the test font
pub(crate) fn sample_table() -> GlyphTable {
    sample_font().glyphs().clone()
}
