//! Backend abstraction for the batch renderer
//!
//! The renderer needs very little from a graphics API: one texture per font
//! atlas, a transform, a pipeline state, and indexed triangle draws over a
//! single uploaded vertex/index stream. Textures are referenced by opaque
//! handle and stay owned by the backend.

use serde::{Deserialize, Serialize};

use super::FieldVertex;
use crate::assets::ImageData;
use crate::foundation::math::Mat4;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Errors reported by a graphics backend
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Texture creation failed
    #[error("Texture creation failed: {0}")]
    TextureCreation(String),

    /// Vertex or index upload failed
    #[error("Geometry upload failed: {0}")]
    GeometryUpload(String),

    /// A draw call failed
    #[error("Draw failed: {0}")]
    Draw(String),
}

/// Backend-owned texture reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TextureHandle(pub u32);

/// Color blending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BlendState {
    /// No blending
    Opaque,
    /// Premultiplied alpha
    #[default]
    AlphaBlend,
    /// Additive
    Additive,
    /// Straight alpha
    NonPremultiplied,
}

/// Texture filtering and addressing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum SamplerState {
    PointClamp,
    PointWrap,
    LinearClamp,
    LinearWrap,
    #[default]
    AnisotropicClamp,
    AnisotropicWrap,
}

/// Depth buffer usage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DepthStencilState {
    /// Depth test and write disabled
    #[default]
    None,
    /// Depth test and write enabled
    Default,
    /// Depth test only
    DepthRead,
}

/// Triangle culling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum CullMode {
    CullNone,
    CullClockwise,
    #[default]
    CullCounterClockwise,
}

/// Pipeline state applied before drawing a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderState {
    /// Color blending
    pub blend: BlendState,
    /// Atlas sampler
    pub sampler: SamplerState,
    /// Depth buffer usage
    pub depth_stencil: DepthStencilState,
    /// Triangle culling
    pub cull: CullMode,
}

/// Graphics backend trait
///
/// Implemented by whatever owns the device. The batch renderer calls these in
/// a fixed order per flush: `apply_state`, `upload_geometry`, then one
/// `draw_indexed` per texture run.
pub trait GraphicsBackend {
    /// Render target size in pixels (width, height)
    fn viewport_size(&self) -> (u32, u32);

    /// Create a texture from decoded RGBA pixels
    fn create_texture(&mut self, image: &ImageData) -> BackendResult<TextureHandle>;

    /// Bind blend, sampler, depth and rasterizer state
    fn apply_state(&mut self, state: &RenderState) -> BackendResult<()>;

    /// Set the world-view-projection matrix for subsequent draws
    fn set_transform(&mut self, transform: &Mat4);

    /// Replace the vertex and index streams
    fn upload_geometry(&mut self, vertices: &[FieldVertex], indices: &[u32]) -> BackendResult<()>;

    /// Draw `primitive_count` triangles starting at `first_index`
    fn draw_indexed(&mut self, texture: TextureHandle, first_index: u32, primitive_count: u32) -> BackendResult<()>;
}
