//! Atlas metrics document
//!
//! Typed view of the JSON file produced by `msdf-atlas-gen -json`. Plane
//! bounds are em-relative, atlas bounds are in pixels with a bottom-left
//! origin. Whitespace glyphs come without bounds and read as all-zero.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::AssetResult;

/// Root of the metrics document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtlasDocument {
    /// Atlas image parameters
    pub atlas: AtlasParams,
    /// Font-wide metrics
    pub metrics: DocumentMetrics,
    /// One record per rasterized glyph
    #[serde(default)]
    pub glyphs: Vec<DocumentGlyph>,
    /// Kerning pairs, possibly empty
    #[serde(default)]
    pub kerning: Vec<DocumentKerning>,
}

impl AtlasDocument {
    /// Parse a document from its JSON text
    pub fn from_json(json: &str) -> AssetResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a document from disk
    pub fn from_file(path: impl AsRef<Path>) -> AssetResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let document = Self::from_json(&json)?;
        log::debug!(
            "Parsed atlas metrics {:?}: {} glyphs, {} kerning pairs",
            path,
            document.glyphs.len(),
            document.kerning.len()
        );
        Ok(document)
    }
}

/// `atlas` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtlasParams {
    /// Signed distance range in pixels
    pub distance_range: f32,
    /// Em size in pixels
    pub size: f32,
    /// Atlas width in pixels
    pub width: u32,
    /// Atlas height in pixels
    pub height: u32,
}

/// `metrics` section, all values em-relative
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetrics {
    /// Distance between baselines
    pub line_height: f32,
    /// Height above the baseline
    pub ascender: f32,
    /// Depth below the baseline, usually negative
    pub descender: f32,
    /// Underline offset from the baseline
    #[serde(rename = "underlineY")]
    pub underline_y: f32,
    /// Underline stroke thickness
    pub underline_thickness: f32,
}

/// One glyph record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentGlyph {
    /// Unicode scalar value
    pub unicode: u32,
    /// Pen advance in em
    pub advance: f32,
    /// Quad bounds relative to the pen, in em
    #[serde(default)]
    pub plane_bounds: DocumentBounds,
    /// Source rectangle in the atlas, in pixels
    #[serde(default)]
    pub atlas_bounds: DocumentBounds,
}

/// Edge coordinates of a bounds record
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentBounds {
    /// Left edge
    pub left: f32,
    /// Bottom edge
    pub bottom: f32,
    /// Right edge
    pub right: f32,
    /// Top edge
    pub top: f32,
}

/// One kerning pair
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentKerning {
    /// First code point of the pair
    pub unicode1: u32,
    /// Second code point of the pair
    pub unicode2: u32,
    /// Additional advance in em
    pub advance: f32,
}
