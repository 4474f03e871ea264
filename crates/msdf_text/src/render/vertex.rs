//! Distance-field glyph vertex

use bytemuck::{Pod, Zeroable};

use crate::foundation::math::Color;

/// Index pattern for one quad: two triangles over corners
/// top-left (0), top-right (1), bottom-left (2), bottom-right (3)
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 1, 3, 2];

/// Vertex consumed by the distance-field text shader
///
/// # Memory Layout
/// `#[repr(C)]` with no padding, 40 bytes per vertex. See
/// [`super::FIELD_VERTEX_DECLARATION`] for the attribute table.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct FieldVertex {
    /// Screen-space position; z carries the layer depth
    pub position: [f32; 3],

    /// Vertex color
    pub color: Color,

    /// Normalized atlas coordinate
    pub tex_coord: [f32; 2],

    /// Atlas size in pixels, used to derive the screen-space distance range
    pub texture_size: [f32; 2],

    /// Distance field range in atlas pixels
    pub px_range: f32,

    /// 1.0 to soften edges, 0.0 for sharp edges
    pub smoothing: f32,
}

impl FieldVertex {
    /// Create a new vertex
    pub fn new(
        position: [f32; 3],
        color: Color,
        tex_coord: [f32; 2],
        texture_size: [f32; 2],
        px_range: f32,
        smoothing: f32,
    ) -> Self {
        Self {
            position,
            color,
            tex_coord,
            texture_size,
            px_range,
            smoothing,
        }
    }
}
