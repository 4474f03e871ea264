//! Text block alignment
//!
//! Alignment combines a vertical anchor (baseline, top, middle, bottom) with
//! a horizontal one (left, center, right). The vertical offset is applied
//! once to the whole block; the horizontal offset is computed per line.

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec2;

/// Vertical reference point of a text block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerticalAnchor {
    /// Baseline of the first line
    Base,
    /// Top edge of the block
    Top,
    /// Vertical center of the block
    Middle,
    /// Bottom edge of the block
    Bottom,
}

/// Horizontal reference point of a text line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HorizontalAnchor {
    /// Left edge
    Left,
    /// Horizontal center
    Center,
    /// Right edge
    Right,
}

/// Where the draw position sits relative to the text block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum TextAlignment {
    #[default]
    BaseLeft,
    BaseCenter,
    BaseRight,
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    MiddleCenter,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl TextAlignment {
    /// Every alignment value
    pub const ALL: [Self; 12] = [
        Self::BaseLeft,
        Self::BaseCenter,
        Self::BaseRight,
        Self::TopLeft,
        Self::TopCenter,
        Self::TopRight,
        Self::MiddleLeft,
        Self::MiddleCenter,
        Self::MiddleRight,
        Self::BottomLeft,
        Self::BottomCenter,
        Self::BottomRight,
    ];

    /// Vertical component
    pub fn vertical(self) -> VerticalAnchor {
        match self {
            Self::BaseLeft | Self::BaseCenter | Self::BaseRight => VerticalAnchor::Base,
            Self::TopLeft | Self::TopCenter | Self::TopRight => VerticalAnchor::Top,
            Self::MiddleLeft | Self::MiddleCenter | Self::MiddleRight => VerticalAnchor::Middle,
            Self::BottomLeft | Self::BottomCenter | Self::BottomRight => VerticalAnchor::Bottom,
        }
    }

    /// Horizontal component
    pub fn horizontal(self) -> HorizontalAnchor {
        match self {
            Self::BaseLeft | Self::TopLeft | Self::MiddleLeft | Self::BottomLeft => HorizontalAnchor::Left,
            Self::BaseCenter | Self::TopCenter | Self::MiddleCenter | Self::BottomCenter => HorizontalAnchor::Center,
            Self::BaseRight | Self::TopRight | Self::MiddleRight | Self::BottomRight => HorizontalAnchor::Right,
        }
    }

    /// Horizontal offset for a line of `line_width`
    pub fn line_offset(self, line_width: f32) -> f32 {
        match self.horizontal() {
            HorizontalAnchor::Left => 0.0,
            HorizontalAnchor::Center => -line_width / 2.0,
            HorizontalAnchor::Right => -line_width,
        }
    }

    /// Vertical offset applied once to the block anchor
    ///
    /// `scaled_baseline` is the distance from the top of a line to its
    /// baseline at the drawn height.
    pub fn vertical_offset(self, block_height: f32, scaled_baseline: f32) -> f32 {
        match self.vertical() {
            VerticalAnchor::Top => 0.0,
            VerticalAnchor::Middle => -block_height / 2.0,
            VerticalAnchor::Base => -scaled_baseline,
            VerticalAnchor::Bottom => -block_height,
        }
    }

    /// Offset of the block's top-left corner from the anchor
    ///
    /// The horizontal part treats the block as one line of its full width.
    pub fn block_offset(self, block_size: Vec2, scaled_baseline: f32) -> Vec2 {
        Vec2::new(
            self.line_offset(block_size.x),
            self.vertical_offset(block_size.y, scaled_baseline),
        )
    }
}
