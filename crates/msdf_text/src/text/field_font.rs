//! Distance-field font resource
//!
//! A [`FieldFont`] bundles the glyph table and vertical metrics built from an
//! atlas metrics document with the encoded atlas image. The atlas texture is
//! created lazily through a [`GraphicsBackend`] and only referenced by
//! handle afterwards.
//!
//! Fonts can be cached as a RON file holding the layout data plus a sibling
//! PNG with the atlas, which is what `font_baker` writes.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{wrap_text, FontError, FontMetrics, FontResult, Glyph, GlyphTable, TextAlignment, TextLine, WrapMode};
use crate::assets::{AtlasDocument, BakeOutput, ImageData};
use crate::foundation::math::{RectF, Vec2};
use crate::render::{GraphicsBackend, TextureHandle};

/// A font rendered from a multi-channel signed distance field atlas
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldFont {
    name: String,
    metrics: FontMetrics,
    glyphs: GlyphTable,
    atlas_width: u32,
    atlas_height: u32,
    distance_range: f32,
    #[serde(skip)]
    atlas_bitmap: Vec<u8>,
    #[serde(skip)]
    texture: Option<TextureHandle>,
}

impl FieldFont {
    /// Build a font from a parsed metrics document and the encoded atlas image
    pub fn from_document(
        name: impl Into<String>,
        document: &AtlasDocument,
        atlas_bitmap: Vec<u8>,
        ignore_kerning: bool,
    ) -> Self {
        let name = name.into();
        let font_size = document.atlas.size;
        let atlas_height = document.atlas.height as f32;
        let kerning = if ignore_kerning { &[][..] } else { &document.kerning[..] };

        let glyphs = GlyphTable::new(document.glyphs.iter().filter_map(|record| {
            let glyph = Glyph::from_document(record, kerning, font_size, document.metrics.ascender, atlas_height);
            if glyph.is_none() {
                log::warn!("Font '{}': skipping invalid code point {:#x}", name, record.unicode);
            }
            glyph
        }));

        log::debug!(
            "Font '{}': {} glyphs at {}px, atlas {}x{}",
            name,
            glyphs.len(),
            font_size,
            document.atlas.width,
            document.atlas.height
        );

        Self {
            metrics: FontMetrics::new(font_size, &document.metrics),
            glyphs,
            atlas_width: document.atlas.width,
            atlas_height: document.atlas.height,
            distance_range: document.atlas.distance_range,
            atlas_bitmap,
            texture: None,
            name,
        }
    }

    /// Load a font from the generator's metrics JSON and atlas image
    ///
    /// The font is named after the JSON file stem.
    pub fn load(json_path: impl AsRef<Path>, image_path: impl AsRef<Path>, ignore_kerning: bool) -> FontResult<Self> {
        let json_path = json_path.as_ref();
        let document = AtlasDocument::from_file(json_path)?;
        let atlas_bitmap = std::fs::read(image_path.as_ref())?;

        let name = json_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        let font = Self::from_document(name, &document, atlas_bitmap, ignore_kerning);
        log::info!("Loaded font '{}' from {:?}", font.name, json_path);
        Ok(font)
    }

    /// Build a font from the result of an atlas bake
    pub fn from_bake(output: BakeOutput) -> Self {
        let font = Self::from_document(output.name, &output.document, output.atlas_bitmap, output.ignore_kerning);
        log::info!("Built font '{}' from bake", font.name);
        font
    }

    /// Load a baked font: RON layout data plus the sibling `.png` atlas
    pub fn load_baked(path: impl AsRef<Path>) -> FontResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut font: Self = ron::from_str(&contents).map_err(|e| FontError::Baked(format!("{}: {}", path.display(), e)))?;
        font.atlas_bitmap = std::fs::read(path.with_extension("png"))?;

        log::info!("Loaded baked font '{}' from {:?}", font.name, path);
        Ok(font)
    }

    /// Write the font as RON layout data plus a sibling `.png` atlas
    pub fn save_baked(&self, path: impl AsRef<Path>) -> FontResult<()> {
        let path = path.as_ref();
        let contents = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| FontError::Baked(format!("{}: {}", path.display(), e)))?;

        std::fs::write(path, contents)?;
        std::fs::write(path.with_extension("png"), &self.atlas_bitmap)?;

        log::info!("Saved baked font '{}' to {:?}", self.name, path);
        Ok(())
    }

    /// Replace the fallback character used for unmapped characters
    pub fn with_fallback(mut self, fallback: Option<char>) -> Self {
        self.glyphs = self.glyphs.with_fallback(fallback);
        self
    }

    /// Create the atlas texture if it does not exist yet
    pub fn initialize<B: GraphicsBackend + ?Sized>(&mut self, backend: &mut B) -> FontResult<TextureHandle> {
        if let Some(texture) = self.texture {
            return Ok(texture);
        }

        let image = ImageData::from_bytes(&self.atlas_bitmap)?;
        let texture = backend.create_texture(&image)?;
        log::info!("Created atlas texture {:?} for font '{}'", texture, self.name);

        self.texture = Some(texture);
        Ok(texture)
    }

    /// Bind an already-created atlas texture
    pub fn set_texture(&mut self, texture: TextureHandle) {
        self.texture = Some(texture);
    }

    /// Atlas texture, once created
    pub fn texture(&self) -> Option<TextureHandle> {
        self.texture
    }

    /// Font name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Vertical metrics
    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    /// Glyph table
    pub fn glyphs(&self) -> &GlyphTable {
        &self.glyphs
    }

    /// Glyph for `character`, falling back like [`GlyphTable::lookup`]
    pub fn glyph(&self, character: char) -> &Glyph {
        self.glyphs.lookup(character)
    }

    /// Whether `character` has its own glyph
    pub fn has_glyph(&self, character: char) -> bool {
        self.glyphs.contains(character)
    }

    /// Encoded atlas image
    pub fn atlas_bitmap(&self) -> &[u8] {
        &self.atlas_bitmap
    }

    /// Atlas dimensions in pixels
    pub fn atlas_size(&self) -> Vec2 {
        Vec2::new(self.atlas_width as f32, self.atlas_height as f32)
    }

    /// Distance field range in atlas pixels
    pub fn distance_range(&self) -> f32 {
        self.distance_range
    }

    /// Scale mapping font-size units to `height` pixels
    pub fn scale_for(&self, height: f32) -> f32 {
        self.metrics.scale_for(height)
    }

    /// Line advance when drawing at `height` pixels
    pub fn scaled_line_height(&self, height: f32) -> f32 {
        self.metrics.scaled_line_height(height)
    }

    /// Split `text` into lines at the given scale
    pub fn wrap_text(&self, text: &str, scale: f32, mode: WrapMode, max_width: f32) -> Vec<TextLine> {
        wrap_text(&self.glyphs, text, scale, mode, max_width)
    }

    /// Size of the wrapped text block drawn at `height` pixels
    ///
    /// Width is the widest line, height is the line count times the scaled
    /// line height.
    pub fn measure(&self, text: &str, height: f32, mode: WrapMode, max_width: f32) -> Vec2 {
        let scale = self.scale_for(height);
        let lines = self.wrap_text(text, scale, mode, max_width);
        let width = lines.iter().map(TextLine::width).fold(0.0, f32::max);
        Vec2::new(width, lines.len() as f32 * self.scaled_line_height(height))
    }

    /// Rectangle covered by the text block anchored at `position`
    pub fn measure_bounds(
        &self,
        position: Vec2,
        text: &str,
        height: f32,
        alignment: TextAlignment,
        mode: WrapMode,
        max_width: f32,
    ) -> RectF {
        let size = self.measure(text, height, mode, max_width);
        let baseline = self.metrics.actual_baseline() * self.scale_for(height);
        let offset = alignment.block_offset(size, baseline);
        RectF::from_position_size(position + offset, size)
    }
}
