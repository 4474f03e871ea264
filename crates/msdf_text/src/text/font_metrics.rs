//! Font-wide vertical metrics
//!
//! Raw values are em-relative as reported by the generator; the `actual_*`
//! values are multiplied by the font size once at construction.

use serde::{Deserialize, Serialize};

use crate::assets::DocumentMetrics;

/// Vertical metrics of a distance-field font
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FontMetrics {
    font_size: f32,
    ascender: f32,
    descender: f32,
    line_height: f32,
    underline_y: f32,
    underline_thickness: f32,
    actual_height: f32,
    actual_baseline: f32,
    actual_line_height: f32,
}

impl FontMetrics {
    /// Derive metrics for a font rasterized at `font_size` pixels per em
    pub fn new(font_size: f32, metrics: &DocumentMetrics) -> Self {
        let height = metrics.ascender.abs() + metrics.descender.abs();
        Self {
            font_size,
            ascender: metrics.ascender,
            descender: metrics.descender,
            line_height: metrics.line_height,
            underline_y: metrics.underline_y,
            underline_thickness: metrics.underline_thickness,
            actual_height: font_size * height,
            actual_baseline: font_size * metrics.ascender,
            actual_line_height: font_size * metrics.line_height,
        }
    }

    /// Pixels per em used for all scaled quantities
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Ascender in em
    pub fn ascender(&self) -> f32 {
        self.ascender
    }

    /// Descender in em, usually negative
    pub fn descender(&self) -> f32 {
        self.descender
    }

    /// `|ascender| + |descender|` in em
    pub fn height(&self) -> f32 {
        self.ascender.abs() + self.descender.abs()
    }

    /// Baseline-to-baseline distance in em
    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Underline offset in em
    pub fn underline_y(&self) -> f32 {
        self.underline_y
    }

    /// Underline thickness in em
    pub fn underline_thickness(&self) -> f32 {
        self.underline_thickness
    }

    /// Full glyph height at the font size
    pub fn actual_height(&self) -> f32 {
        self.actual_height
    }

    /// Distance from the top of a line to its baseline at the font size
    pub fn actual_baseline(&self) -> f32 {
        self.actual_baseline
    }

    /// Line advance at the font size
    pub fn actual_line_height(&self) -> f32 {
        self.actual_line_height
    }

    /// Factor that maps font-size units to `target_height` pixels
    ///
    /// Zero for a degenerate font with no size.
    pub fn scale_for(&self, target_height: f32) -> f32 {
        if self.font_size > 0.0 {
            target_height / self.font_size
        } else {
            0.0
        }
    }

    /// Line advance when drawing at `target_height` pixels
    pub fn scaled_line_height(&self, target_height: f32) -> f32 {
        self.scale_for(target_height) * self.actual_line_height
    }
}
