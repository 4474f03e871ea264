//! # MSDF Text
//!
//! Crisp, arbitrarily scaled text from multi-channel signed distance field
//! atlases.
//!
//! ## Features
//!
//! - **Atlas baking**: drives `msdf-atlas-gen` and reads its metrics JSON
//! - **Text layout**: kerning, fallback glyphs, four wrapping strategies and
//!   twelve alignments
//! - **Batched rendering**: one upload per flush and one draw call per
//!   texture run, with optional depth or texture sorting
//! - **Backend agnostic**: rendering goes through the small
//!   [`render::GraphicsBackend`] trait
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use msdf_text::prelude::*;
//!
//! fn draw_title<B: GraphicsBackend>(backend: B) -> Result<(), Box<dyn std::error::Error>> {
//!     let mut font = FieldFont::load_baked("assets/fonts/Sans.ron")?;
//!     let mut renderer = BatchRenderer::new(backend, &BatchConfig::default());
//!     font.initialize(renderer.backend_mut())?;
//!
//!     renderer.begin(BeginParams::new())?;
//!     let style = TextStyle::with_height(24.0).aligned(TextAlignment::TopCenter);
//!     renderer.draw_string(&font, "Hello", Vec2::new(320.0, 16.0), Color::WHITE, &style)?;
//!     renderer.end()?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod assets;
pub mod text;
pub mod render;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        assets::{AssetError, AtlasDocument, AtlasGenerator, ImageData},
        config::{BatchConfig, Config, FontBakeConfig},
        foundation::math::{Color, RectF, Vec2},
        render::{
            BatchError, BatchRenderer, BeginParams, FieldVertex, GraphicsBackend, RenderState, SortMode,
            TextStyle, TextureHandle,
        },
        text::{FieldFont, FontError, TextAlignment, TextLine, WrapMode},
    };
}
