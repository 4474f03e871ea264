//! # Batch Renderer
//!
//! Collects glyph quads between `begin` and `end` and submits them with as
//! few draw calls as possible: one geometry upload per flush, then one
//! indexed draw per maximal run of quads sharing a texture.
//!
//! ## Lifecycle
//!
//! - **Idle**: only `begin` is allowed
//! - **Recording**: `draw_string`, `draw_quad` and `flush` queue or submit
//!   work; `end` flushes whatever is left and returns to idle
//!
//! Misusing the lifecycle is reported as an error, never ignored.

use serde::{Deserialize, Serialize};

use super::{BackendError, BatchBuffer, BatchItem, FieldVertex, GraphicsBackend, RenderState, TextureHandle};
use crate::config::BatchConfig;
use crate::foundation::math::{Color, Mat4, RectF, Vec2, Vec3};
use crate::text::{FieldFont, TextAlignment, TextLine, WrapMode};

/// Result type for batch rendering operations
pub type BatchResult<T> = Result<T, BatchError>;

/// Errors that can occur during batch rendering
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// `begin` called while a batch is already recording
    #[error("Begin cannot be called again until End has been successfully called")]
    AlreadyRecording,

    /// `end` or a draw call made outside `begin`/`end`
    #[error("Begin must be called before drawing or calling End")]
    NotRecording,

    /// Too many quads for a single batch
    #[error("Batch size limit exceeded: {current} > {max}")]
    BatchSizeExceeded {
        /// Requested number of quads
        current: usize,
        /// Maximum allowed quads
        max: usize,
    },

    /// The font's atlas texture has not been created
    #[error("Font '{0}' has no texture; call FieldFont::initialize first")]
    TextureNotInitialized(String),

    /// Backend failure while flushing
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

/// When queued quads are reordered and submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortMode {
    /// Submission order, drawn at `end`
    #[default]
    Deferred,
    /// Flushed after every draw call
    Immediate,
    /// Grouped by texture, drawn at `end`
    Texture,
    /// Largest depth first, drawn at `end`
    BackToFront,
    /// Smallest depth first, drawn at `end`
    FrontToBack,
}

/// Options for [`BatchRenderer::begin`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BeginParams {
    /// Sort mode for this batch
    pub sort_mode: SortMode,
    /// Device state; the renderer's configured default when `None`
    pub render_state: Option<RenderState>,
    /// Transform applied before the screen projection
    pub transform: Option<Mat4>,
}

impl BeginParams {
    /// Deferred batch with the default state and no transform
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sort mode
    pub fn with_sort_mode(mut self, sort_mode: SortMode) -> Self {
        self.sort_mode = sort_mode;
        self
    }

    /// Override the device state
    pub fn with_render_state(mut self, render_state: RenderState) -> Self {
        self.render_state = Some(render_state);
        self
    }

    /// Pre-multiply the projection with a transform
    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.transform = Some(transform);
        self
    }
}

/// How a string is laid out and shaded
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    /// Target glyph height in pixels
    pub height: f32,
    /// Anchor of the draw position
    pub alignment: TextAlignment,
    /// Wrapping strategy
    pub wrap: WrapMode,
    /// Maximum line width for width-based wrapping
    pub wrap_width: f32,
    /// Soften glyph edges
    pub smoothing: bool,
    /// Layer depth, also the sort key
    pub depth: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            height: 10.0,
            alignment: TextAlignment::BaseLeft,
            wrap: WrapMode::Default,
            wrap_width: 0.0,
            smoothing: false,
            depth: 0.0,
        }
    }
}

impl TextStyle {
    /// Default style at `height` pixels
    pub fn with_height(height: f32) -> Self {
        Self {
            height,
            ..Self::default()
        }
    }

    /// Set the alignment
    pub fn aligned(mut self, alignment: TextAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Set the wrapping strategy and width
    pub fn wrapped(mut self, wrap: WrapMode, wrap_width: f32) -> Self {
        self.wrap = wrap;
        self.wrap_width = wrap_width;
        self
    }

    /// Enable or disable edge smoothing
    pub fn smoothed(mut self, smoothing: bool) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Set the layer depth
    pub fn at_depth(mut self, depth: f32) -> Self {
        self.depth = depth;
        self
    }
}

/// Statistics for batch rendering performance monitoring
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Quads queued
    pub items_submitted: usize,
    /// Flushes that uploaded geometry
    pub flushes: usize,
    /// Indexed draw calls issued
    pub draw_calls: usize,
    /// Largest buffer capacity reached, in quads
    pub peak_capacity: usize,
}

impl BatchStats {
    /// Average quads per draw call
    pub fn avg_items_per_draw(&self) -> f32 {
        if self.draw_calls == 0 {
            0.0
        } else {
            self.items_submitted as f32 / self.draw_calls as f32
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Recording {
    sort_mode: SortMode,
    render_state: RenderState,
}

/// Batched quad renderer for distance-field text
pub struct BatchRenderer<B: GraphicsBackend> {
    backend: B,
    buffer: BatchBuffer,
    default_state: RenderState,
    recording: Option<Recording>,
    stats: BatchStats,
}

impl<B: GraphicsBackend> BatchRenderer<B> {
    /// Create a renderer drawing through `backend`
    pub fn new(backend: B, config: &BatchConfig) -> Self {
        let buffer = BatchBuffer::new(config.initial_capacity);
        log::info!("Batch renderer created with capacity for {} quads", buffer.capacity());

        Self {
            stats: BatchStats {
                peak_capacity: buffer.capacity(),
                ..Default::default()
            },
            backend,
            buffer,
            default_state: config.render_state,
            recording: None,
        }
    }

    /// Start recording a batch
    ///
    /// Sets the backend transform to a top-left-origin orthographic
    /// projection over the viewport, shifted by half a pixel.
    pub fn begin(&mut self, params: BeginParams) -> BatchResult<()> {
        if self.recording.is_some() {
            return Err(BatchError::AlreadyRecording);
        }

        let render_state = params.render_state.unwrap_or(self.default_state);
        let (width, height) = self.backend.viewport_size();
        let projection = screen_projection(width, height);
        let transform = match params.transform {
            Some(transform) => projection * transform,
            None => projection,
        };
        self.backend.set_transform(&transform);

        if params.sort_mode == SortMode::Immediate {
            self.backend.apply_state(&render_state)?;
        }

        self.recording = Some(Recording {
            sort_mode: params.sort_mode,
            render_state,
        });
        Ok(())
    }

    /// Finish the batch, submitting everything still queued
    pub fn end(&mut self) -> BatchResult<()> {
        let recording = self.recording.take().ok_or(BatchError::NotRecording)?;

        if recording.sort_mode != SortMode::Immediate && !self.buffer.is_empty() {
            self.backend.apply_state(&recording.render_state)?;
            self.flush_batch(recording.sort_mode)?;
        }
        Ok(())
    }

    /// Submit queued quads now without ending the batch
    pub fn flush(&mut self) -> BatchResult<()> {
        let recording = self.recording.ok_or(BatchError::NotRecording)?;
        if recording.sort_mode != SortMode::Immediate {
            self.backend.apply_state(&recording.render_state)?;
        }
        self.flush_batch(recording.sort_mode)
    }

    /// Queue a single pre-built quad
    pub fn draw_quad(&mut self, item: BatchItem) -> BatchResult<()> {
        let recording = self.recording.ok_or(BatchError::NotRecording)?;
        self.buffer.push(item)?;
        self.record_growth(1);
        self.after_draw(recording.sort_mode)
    }

    /// Lay out `text` and queue one quad per visible glyph
    ///
    /// `position` is the anchor selected by `style.alignment`. Blank text is
    /// a no-op. The whole string is rejected if it would overflow the batch.
    pub fn draw_string(
        &mut self,
        font: &FieldFont,
        text: &str,
        position: Vec2,
        color: Color,
        style: &TextStyle,
    ) -> BatchResult<()> {
        let recording = self.recording.ok_or(BatchError::NotRecording)?;
        if text.trim().is_empty() {
            return Ok(());
        }
        let texture = font
            .texture()
            .ok_or_else(|| BatchError::TextureNotInitialized(font.name().to_string()))?;

        let scale = font.scale_for(style.height);
        let lines = font.wrap_text(text, scale, style.wrap, style.wrap_width);
        let line_height = font.scaled_line_height(style.height);

        let visible: usize = lines
            .iter()
            .map(|line| line.text().chars().filter(|c| !c.is_whitespace()).count())
            .sum();
        self.buffer.ensure_capacity(self.buffer.len() + visible)?;

        let block_width = lines.iter().map(TextLine::width).fold(0.0, f32::max);
        let block = Vec2::new(block_width, lines.len() as f32 * line_height);
        let baseline = font.metrics().actual_baseline() * scale;
        let quad = QuadStyle {
            texture,
            color,
            atlas_size: font.atlas_size(),
            px_range: font.distance_range(),
            smoothing: if style.smoothing { 1.0 } else { 0.0 },
            depth: style.depth,
        };

        let mut pen_y = position.y + style.alignment.block_offset(block, baseline).y;
        for line in &lines {
            let mut pen_x = position.x + style.alignment.line_offset(line.width());
            for span in font.glyphs().spans(line.text()) {
                if !span.character.is_whitespace() {
                    let bounds = span.glyph.cursor_bounds();
                    let origin = Vec2::new(pen_x + bounds.x * scale, pen_y + bounds.y * scale);
                    let item = quad.item(origin, bounds.size() * scale, span.glyph.atlas_source());
                    self.buffer.push(item)?;
                }
                pen_x += span.advance * scale;
            }
            pen_y += line_height;
        }

        self.record_growth(visible);
        self.after_draw(recording.sort_mode)
    }

    fn record_growth(&mut self, items: usize) {
        self.stats.items_submitted += items;
        self.stats.peak_capacity = self.stats.peak_capacity.max(self.buffer.capacity());
    }

    fn after_draw(&mut self, sort_mode: SortMode) -> BatchResult<()> {
        if sort_mode == SortMode::Immediate {
            self.flush_batch(sort_mode)?;
        }
        Ok(())
    }

    fn flush_batch(&mut self, sort_mode: SortMode) -> BatchResult<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        let result = self.submit(sort_mode);
        self.buffer.clear();
        result
    }

    fn submit(&mut self, sort_mode: SortMode) -> BatchResult<()> {
        self.buffer.sort(sort_mode);
        let runs = self.buffer.texture_runs();

        let (vertices, indices) = self.buffer.geometry();
        self.backend.upload_geometry(vertices, indices)?;

        for run in &runs {
            self.backend.draw_indexed(run.texture, run.first_index(), run.primitive_count())?;
        }

        self.stats.flushes += 1;
        self.stats.draw_calls += runs.len();
        log::trace!("Flushed {} quads in {} draw calls", self.buffer.len(), runs.len());
        Ok(())
    }

    /// Whether a batch is recording
    pub fn is_recording(&self) -> bool {
        self.recording.is_some()
    }

    /// Quads that fit without growing
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Quads queued and not yet flushed
    pub fn queued(&self) -> usize {
        self.buffer.len()
    }

    /// Get current batch rendering statistics
    pub fn stats(&self) -> &BatchStats {
        &self.stats
    }

    /// Reset statistics
    pub fn reset_stats(&mut self) {
        self.stats = BatchStats {
            peak_capacity: self.buffer.capacity(),
            ..Default::default()
        };
    }

    /// Backend in use
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the backend, e.g. to create font textures
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Give the backend back
    pub fn into_backend(self) -> B {
        self.backend
    }
}

/// Per-string values shared by every quad
struct QuadStyle {
    texture: TextureHandle,
    color: Color,
    atlas_size: Vec2,
    px_range: f32,
    smoothing: f32,
    depth: f32,
}

impl QuadStyle {
    fn item(&self, origin: Vec2, size: Vec2, source: RectF) -> BatchItem {
        let left = source.x / self.atlas_size.x;
        let top = source.y / self.atlas_size.y;
        let right = source.right() / self.atlas_size.x;
        let bottom = source.bottom() / self.atlas_size.y;

        let corner = |x: f32, y: f32, u: f32, v: f32| FieldVertex {
            position: [x, y, self.depth],
            color: self.color,
            tex_coord: [u, v],
            texture_size: [self.atlas_size.x, self.atlas_size.y],
            px_range: self.px_range,
            smoothing: self.smoothing,
        };
        let (x0, y0) = (origin.x, origin.y);
        let (x1, y1) = (origin.x + size.x, origin.y + size.y);

        BatchItem {
            vertices: [
                corner(x0, y0, left, top),
                corner(x1, y0, right, top),
                corner(x0, y1, left, bottom),
                corner(x1, y1, right, bottom),
            ],
            texture: self.texture,
            sort_key: self.depth,
        }
    }
}

/// Orthographic projection with a top-left origin and a half-pixel offset
fn screen_projection(width: u32, height: u32) -> Mat4 {
    let width = width.max(1) as f32;
    let height = height.max(1) as f32;
    let projection = Mat4::new_orthographic(0.0, width, height, 0.0, 0.0, 1.0);
    projection * Mat4::new_translation(&Vec3::new(-0.5, -0.5, 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::{BackendCall, RecordingBackend};
    use crate::render::{CullMode, MAX_BATCH_CAPACITY};
    use crate::text::fixtures;
    use approx::assert_relative_eq;
    use nalgebra::Vector4;

    fn renderer() -> BatchRenderer<RecordingBackend> {
        BatchRenderer::new(RecordingBackend::new(640, 480), &BatchConfig::default())
    }

    fn quad(texture: u32, depth: f32) -> BatchItem {
        let vertex = FieldVertex {
            position: [texture as f32, 0.0, depth],
            ..Default::default()
        };
        BatchItem {
            vertices: [vertex; 4],
            texture: TextureHandle(texture),
            sort_key: depth,
        }
    }

    fn top_left(height: f32) -> TextStyle {
        TextStyle::with_height(height).aligned(TextAlignment::TopLeft)
    }

    #[test]
    fn test_lifecycle_misuse_is_reported() {
        let mut renderer = renderer();
        let font = fixtures::sample_font_with_texture(TextureHandle(1));

        assert!(matches!(renderer.end(), Err(BatchError::NotRecording)));
        assert!(matches!(renderer.flush(), Err(BatchError::NotRecording)));
        assert!(matches!(
            renderer.draw_string(&font, "ab", Vec2::zeros(), Color::WHITE, &TextStyle::default()),
            Err(BatchError::NotRecording)
        ));

        renderer.begin(BeginParams::new()).unwrap();
        assert!(matches!(renderer.begin(BeginParams::new()), Err(BatchError::AlreadyRecording)));
        assert!(renderer.is_recording());

        renderer.end().unwrap();
        assert!(!renderer.is_recording());
        assert!(matches!(renderer.end(), Err(BatchError::NotRecording)));
    }

    #[test]
    fn test_font_without_texture_is_rejected() {
        let mut renderer = renderer();
        let font = fixtures::sample_font();

        renderer.begin(BeginParams::new()).unwrap();
        match renderer.draw_string(&font, "ab", Vec2::zeros(), Color::WHITE, &TextStyle::default()) {
            Err(BatchError::TextureNotInitialized(name)) => assert_eq!(name, "Sample"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_blank_text_is_a_no_op() {
        let mut renderer = renderer();
        let font = fixtures::sample_font();

        renderer.begin(BeginParams::new()).unwrap();
        renderer.draw_string(&font, " \n\t", Vec2::zeros(), Color::WHITE, &TextStyle::default()).unwrap();
        renderer.end().unwrap();

        assert_eq!(renderer.queued(), 0);
        assert!(renderer.backend().uploads().is_empty());
        assert!(renderer.backend().draws().is_empty());
    }

    #[test]
    fn test_alternating_textures_coalesce_into_runs() {
        let mut renderer = renderer();
        renderer.begin(BeginParams::new()).unwrap();
        for i in 0..12 {
            renderer.draw_quad(quad(1 + (i / 3) % 2, 0.0)).unwrap();
        }
        renderer.end().unwrap();

        let draws = renderer.backend().draws();
        assert_eq!(
            draws,
            [
                (TextureHandle(1), 0, 6),
                (TextureHandle(2), 18, 6),
                (TextureHandle(1), 36, 6),
                (TextureHandle(2), 54, 6),
            ]
        );
        assert_eq!(renderer.backend().uploads().len(), 1);
        assert_eq!(renderer.stats().draw_calls, 4);
        assert_relative_eq!(renderer.stats().avg_items_per_draw(), 3.0);
    }

    #[test]
    fn test_texture_sort_merges_fonts() {
        let first = fixtures::sample_font_with_texture(TextureHandle(1));
        let second = fixtures::sample_font_with_texture(TextureHandle(2));
        let style = TextStyle::with_height(32.0);

        for (mode, expected) in [
            (
                SortMode::Deferred,
                vec![(TextureHandle(1), 0, 4), (TextureHandle(2), 12, 4), (TextureHandle(1), 24, 4)],
            ),
            (SortMode::Texture, vec![(TextureHandle(1), 0, 8), (TextureHandle(2), 24, 4)]),
        ] {
            let mut renderer = renderer();
            renderer.begin(BeginParams::new().with_sort_mode(mode)).unwrap();
            renderer.draw_string(&first, "ab", Vec2::zeros(), Color::WHITE, &style).unwrap();
            renderer.draw_string(&second, "cd", Vec2::zeros(), Color::WHITE, &style).unwrap();
            renderer.draw_string(&first, "ef", Vec2::zeros(), Color::WHITE, &style).unwrap();
            renderer.end().unwrap();

            assert_eq!(renderer.backend().draws(), expected, "{mode:?}");
        }
    }

    #[test]
    fn test_depth_sorts_order_uploaded_geometry() {
        for (mode, expected) in [
            (SortMode::BackToFront, [0.9, 0.5, 0.1]),
            (SortMode::FrontToBack, [0.1, 0.5, 0.9]),
            (SortMode::Deferred, [0.1, 0.9, 0.5]),
        ] {
            let mut renderer = renderer();
            renderer.begin(BeginParams::new().with_sort_mode(mode)).unwrap();
            for depth in [0.1, 0.9, 0.5] {
                renderer.draw_quad(quad(1, depth)).unwrap();
            }
            renderer.end().unwrap();

            let uploads = renderer.backend().uploads();
            let depths: Vec<f32> = uploads[0].chunks(4).map(|quad| quad[0].position[2]).collect();
            assert_eq!(depths, expected, "{mode:?}");
        }
    }

    #[test]
    fn test_immediate_mode_flushes_every_draw() {
        let mut renderer = renderer();
        let font = fixtures::sample_font_with_texture(TextureHandle(1));
        let style = TextStyle::with_height(32.0);

        renderer.begin(BeginParams::new().with_sort_mode(SortMode::Immediate)).unwrap();
        renderer.draw_string(&font, "ab", Vec2::zeros(), Color::WHITE, &style).unwrap();
        assert_eq!(renderer.queued(), 0);
        renderer.draw_string(&font, "abc", Vec2::zeros(), Color::WHITE, &style).unwrap();
        let calls_before_end = renderer.backend().calls.len();
        renderer.end().unwrap();

        let backend = renderer.backend();
        assert_eq!(backend.calls.len(), calls_before_end);
        assert_eq!(backend.draws(), [(TextureHandle(1), 0, 4), (TextureHandle(1), 0, 6)]);
        assert_eq!(backend.count(|call| matches!(call, BackendCall::ApplyState(_))), 1);
        assert!(matches!(backend.calls[1], BackendCall::ApplyState(_)));
    }

    #[test]
    fn test_deferred_applies_state_at_end() {
        let mut renderer = renderer();
        let font = fixtures::sample_font_with_texture(TextureHandle(1));
        let state = RenderState {
            cull: CullMode::CullNone,
            ..Default::default()
        };

        renderer.begin(BeginParams::new().with_render_state(state)).unwrap();
        renderer.draw_string(&font, "ab", Vec2::zeros(), Color::WHITE, &TextStyle::default()).unwrap();
        assert_eq!(renderer.backend().count(|call| matches!(call, BackendCall::ApplyState(_))), 0);
        renderer.end().unwrap();

        let calls = &renderer.backend().calls;
        assert!(matches!(calls[0], BackendCall::SetTransform(_)));
        assert_eq!(calls[1], BackendCall::ApplyState(state));
        assert!(matches!(calls[2], BackendCall::Upload { .. }));
        assert!(matches!(calls[3], BackendCall::Draw { .. }));
    }

    #[test]
    fn test_projection_maps_pixel_centers() {
        let mut renderer = renderer();
        renderer.begin(BeginParams::new()).unwrap();
        let transform = *renderer.backend().last_transform().unwrap();

        let top_left = transform * Vector4::new(0.5, 0.5, 0.0, 1.0);
        assert_relative_eq!(top_left.x, -1.0, epsilon = 1e-6);
        assert_relative_eq!(top_left.y, 1.0, epsilon = 1e-6);

        let bottom_right = transform * Vector4::new(640.5, 480.5, 0.0, 1.0);
        assert_relative_eq!(bottom_right.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(bottom_right.y, -1.0, epsilon = 1e-6);
        renderer.end().unwrap();

        let offset = Mat4::new_translation(&Vec3::new(10.0, 0.0, 0.0));
        renderer.begin(BeginParams::new().with_transform(offset)).unwrap();
        let transform = *renderer.backend().last_transform().unwrap();
        let shifted = transform * Vector4::new(-9.5, 0.5, 0.0, 1.0);
        assert_relative_eq!(shifted.x, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_glyph_quads_are_placed_and_mapped() {
        let mut renderer = renderer();
        let font = fixtures::sample_font_with_texture(TextureHandle(1));
        let style = top_left(32.0).smoothed(true).at_depth(0.25);

        renderer.begin(BeginParams::new()).unwrap();
        renderer.draw_string(&font, "AB", Vec2::new(100.0, 50.0), Color::BLACK, &style).unwrap();
        renderer.end().unwrap();

        let uploads = renderer.backend().uploads();
        let vertices = uploads[0];
        assert_eq!(vertices.len(), 8);

        assert_eq!(vertices[0].position, [100.0, 50.0, 0.25]);
        assert_eq!(vertices[3].position, [110.0, 74.0, 0.25]);
        assert_eq!(vertices[4].position, [112.0, 50.0, 0.25]);

        assert_relative_eq!(vertices[0].tex_coord[0], 80.0 / 512.0);
        assert_relative_eq!(vertices[0].tex_coord[1], 142.0 / 256.0);
        assert_relative_eq!(vertices[3].tex_coord[0], 90.0 / 512.0);
        assert_relative_eq!(vertices[3].tex_coord[1], 166.0 / 256.0);

        assert_eq!(vertices[0].texture_size, [512.0, 256.0]);
        assert_eq!(vertices[0].px_range, 2.0);
        assert_eq!(vertices[0].smoothing, 1.0);
        assert_eq!(vertices[0].color, Color::BLACK);
    }

    #[test]
    fn test_scaled_kerned_placement() {
        let mut renderer = renderer();
        let font = fixtures::sample_font_with_texture(TextureHandle(1));

        renderer.begin(BeginParams::new()).unwrap();
        renderer.draw_string(&font, "AB", Vec2::new(100.0, 50.0), Color::WHITE, &top_left(16.0)).unwrap();
        renderer.end().unwrap();

        let vertices = renderer.backend().uploads()[0].to_vec();
        assert_relative_eq!(vertices[4].position[0], 106.0);
        assert_relative_eq!(vertices[3].position[0], 105.0);
        assert_relative_eq!(vertices[3].position[1], 62.0);
    }

    #[test]
    fn test_alignment_and_line_advance() {
        let mut renderer = renderer();
        let font = fixtures::sample_font_with_texture(TextureHandle(1));

        renderer.begin(BeginParams::new()).unwrap();
        let style = TextStyle::with_height(32.0).aligned(TextAlignment::MiddleCenter);
        renderer.draw_string(&font, "ab\nabc", Vec2::zeros(), Color::WHITE, &style).unwrap();
        let style = TextStyle::with_height(32.0);
        renderer.draw_string(&font, "a", Vec2::new(0.0, 100.0), Color::WHITE, &style).unwrap();
        renderer.end().unwrap();

        let vertices = renderer.backend().uploads()[0].to_vec();
        assert_eq!(vertices.len(), 6 * 4);
        assert_eq!(vertices[0].position, [-16.0, -40.0, 0.0]);
        assert_eq!(vertices[8].position, [-24.0, 0.0, 0.0]);
        assert_eq!(vertices[20].position, [0.0, 76.0, 0.0]);
    }

    #[test]
    fn test_wrapped_string_skips_whitespace_quads() {
        let mut renderer = renderer();
        let font = fixtures::sample_font_with_texture(TextureHandle(1));
        let style = top_left(32.0).wrapped(WrapMode::Word, 60.0);

        renderer.begin(BeginParams::new()).unwrap();
        renderer.draw_string(&font, "aa bb", Vec2::zeros(), Color::WHITE, &style).unwrap();
        assert_eq!(renderer.queued(), 4);
        renderer.end().unwrap();

        let vertices = renderer.backend().uploads()[0].to_vec();
        assert_eq!(vertices[8].position, [0.0, 40.0, 0.0]);
        assert_eq!(vertices[12].position, [16.0, 40.0, 0.0]);
    }

    #[test]
    fn test_buffer_grows_across_chunk_boundary() {
        let config = BatchConfig {
            initial_capacity: 64,
            ..Default::default()
        };
        let mut renderer = BatchRenderer::new(RecordingBackend::new(640, 480), &config);
        let font = fixtures::sample_font_with_texture(TextureHandle(1));

        renderer.begin(BeginParams::new()).unwrap();
        renderer.draw_string(&font, &"a".repeat(60), Vec2::zeros(), Color::WHITE, &top_left(32.0)).unwrap();
        assert_eq!(renderer.capacity(), 64);
        renderer.draw_string(&font, &"b".repeat(10), Vec2::zeros(), Color::WHITE, &top_left(32.0)).unwrap();
        assert_eq!(renderer.capacity(), 128);
        renderer.end().unwrap();

        let vertices = renderer.backend().uploads()[0].to_vec();
        assert_eq!(vertices.len(), 70 * 4);
        assert_eq!(vertices[59 * 4].position, [59.0 * 16.0, 0.0, 0.0]);
        assert_eq!(vertices[60 * 4].position, [0.0, 0.0, 0.0]);
        assert_eq!(renderer.stats().peak_capacity, 128);
        assert_eq!(renderer.stats().items_submitted, 70);
    }

    #[test]
    fn test_oversized_string_is_rejected_whole() {
        let mut renderer = renderer();
        let font = fixtures::sample_font_with_texture(TextureHandle(1));

        renderer.begin(BeginParams::new()).unwrap();
        renderer.draw_string(&font, "ab", Vec2::zeros(), Color::WHITE, &top_left(32.0)).unwrap();

        let text = "a".repeat(MAX_BATCH_CAPACITY);
        match renderer.draw_string(&font, &text, Vec2::zeros(), Color::WHITE, &top_left(32.0)) {
            Err(BatchError::BatchSizeExceeded { current, max }) => {
                assert_eq!(current, MAX_BATCH_CAPACITY + 2);
                assert_eq!(max, MAX_BATCH_CAPACITY);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(renderer.queued(), 2);
        renderer.end().unwrap();
    }

    #[test]
    fn test_backend_failure_leaves_renderer_idle() {
        let mut backend = RecordingBackend::new(640, 480);
        backend.fail_draws = true;
        let mut renderer = BatchRenderer::new(backend, &BatchConfig::default());

        renderer.begin(BeginParams::new()).unwrap();
        renderer.draw_quad(quad(1, 0.0)).unwrap();
        assert!(matches!(renderer.end(), Err(BatchError::Backend(_))));
        assert!(!renderer.is_recording());
        assert_eq!(renderer.queued(), 0);

        renderer.backend_mut().fail_draws = false;
        renderer.begin(BeginParams::new()).unwrap();
        renderer.end().unwrap();
        assert!(renderer.into_backend().draws().is_empty());
    }

    #[test]
    fn test_explicit_flush_keeps_recording() {
        let mut renderer = renderer();
        renderer.begin(BeginParams::new()).unwrap();
        renderer.draw_quad(quad(1, 0.0)).unwrap();
        renderer.flush().unwrap();
        assert!(renderer.is_recording());
        renderer.draw_quad(quad(2, 0.0)).unwrap();
        renderer.end().unwrap();

        assert_eq!(renderer.stats().flushes, 2);
        assert_eq!(renderer.backend().draws(), [(TextureHandle(1), 0, 2), (TextureHandle(2), 0, 2)]);

        renderer.reset_stats();
        assert_eq!(renderer.stats().flushes, 0);
        assert_eq!(renderer.stats().peak_capacity, 256);
    }
}
