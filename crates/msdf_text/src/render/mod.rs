//! Batched quad rendering
//!
//! Turns laid-out glyphs into textured quads and hands them to a
//! [`GraphicsBackend`] in as few draw calls as possible.

pub mod vertex;
pub mod vertex_layout;
pub mod backend;
pub mod batch_buffer;
pub mod batch_renderer;

#[cfg(test)]
pub(crate) use backend::testing;

pub use vertex::{FieldVertex, QUAD_INDICES};
pub use vertex_layout::{
    VertexDeclaration, VertexElement, VertexElementFormat, VertexElementUsage, FIELD_VERTEX_DECLARATION,
};
pub use backend::{
    BackendError, BackendResult, BlendState, CullMode, DepthStencilState, GraphicsBackend, RenderState,
    SamplerState, TextureHandle,
};
pub use batch_buffer::{BatchBuffer, BatchItem, TextureRun};
pub use batch_renderer::{BatchError, BatchRenderer, BatchResult, BatchStats, BeginParams, SortMode, TextStyle};

/// Quads reserved by a renderer created with the default configuration
pub const INITIAL_BATCH_CAPACITY: usize = 256;

/// Largest batch in quads; `6 * MAX_BATCH_CAPACITY` indices stay below `u16::MAX`
pub const MAX_BATCH_CAPACITY: usize = 5461;

/// Batch storage grows in multiples of this many quads
pub const BATCH_CHUNK: usize = 64;
