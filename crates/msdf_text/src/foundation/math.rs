//! Math utilities and types
//!
//! Vector and matrix aliases plus the plain rectangle and color carriers used
//! by glyph metrics and vertices.

use serde::{Deserialize, Serialize};

pub use nalgebra::{Matrix4, Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Axis-aligned rectangle stored as origin plus size
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RectF {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Horizontal extent
    pub width: f32,
    /// Vertical extent
    pub height: f32,
}

impl RectF {
    /// Create a rectangle from origin and size
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle from a position and a size vector
    pub fn from_position_size(position: Vec2, size: Vec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    /// Right edge (`x + width`)
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`)
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Size as a vector
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// 8-bit RGBA color, packed the way the vertex stream expects it
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(bytemuck::Pod, bytemuck::Zeroable)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

impl Color {
    /// Opaque black
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    /// Opaque white
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);

    /// Create a color from channel values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Create a color from normalized channels, clamped to `0.0..=1.0`
    pub fn from_normalized(r: f32, g: f32, b: f32, a: f32) -> Self {
        let to_byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::rgba(to_byte(r), to_byte(g), to_byte(b), to_byte(a))
    }
}
