//! Growable quad storage for the batch renderer
//!
//! Items own their four vertices until flush, when they are copied into the
//! vertex stream in (possibly sorted) order. The index stream never changes
//! for a given capacity, so it is built once per growth.

use std::cmp::Ordering;

use super::{BatchError, BatchResult, FieldVertex, SortMode, TextureHandle, BATCH_CHUNK, MAX_BATCH_CAPACITY, QUAD_INDICES};

/// One queued quad
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchItem {
    /// Corners in order top-left, top-right, bottom-left, bottom-right
    pub vertices: [FieldVertex; 4],
    /// Atlas texture, borrowed from the font
    pub texture: TextureHandle,
    /// Depth used by the ordered sort modes
    pub sort_key: f32,
}

/// Maximal run of consecutive items sharing a texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureRun {
    /// Texture bound for the run
    pub texture: TextureHandle,
    /// Index of the first quad
    pub start: usize,
    /// Number of quads
    pub count: usize,
}

impl TextureRun {
    /// First index in the index stream
    pub fn first_index(&self) -> u32 {
        (self.start * QUAD_INDICES.len()) as u32
    }

    /// Number of triangles
    pub fn primitive_count(&self) -> u32 {
        (self.count * 2) as u32
    }
}

/// Vertex, index and item storage sized in whole quads
#[derive(Debug, Default)]
pub struct BatchBuffer {
    items: Vec<BatchItem>,
    vertices: Vec<FieldVertex>,
    indices: Vec<u32>,
    capacity: usize,
}

impl BatchBuffer {
    /// Create a buffer holding `initial_capacity` quads, rounded up to a chunk
    pub fn new(initial_capacity: usize) -> Self {
        let mut buffer = Self::default();
        buffer.resize(round_to_chunk(initial_capacity).min(MAX_BATCH_CAPACITY));
        buffer
    }

    /// Make room for `required` quads in total
    ///
    /// Grows to the next multiple of the chunk size. Recorded items are kept
    /// unchanged. Requests beyond [`MAX_BATCH_CAPACITY`] are rejected and
    /// leave the buffer untouched.
    pub fn ensure_capacity(&mut self, required: usize) -> BatchResult<()> {
        if required <= self.capacity {
            return Ok(());
        }
        if required > MAX_BATCH_CAPACITY {
            log::warn!("Batch of {} quads exceeds the maximum of {}", required, MAX_BATCH_CAPACITY);
            return Err(BatchError::BatchSizeExceeded {
                current: required,
                max: MAX_BATCH_CAPACITY,
            });
        }

        let capacity = round_to_chunk(required).min(MAX_BATCH_CAPACITY);
        log::debug!("Growing batch buffer from {} to {} quads", self.capacity, capacity);
        self.resize(capacity);
        Ok(())
    }

    fn resize(&mut self, capacity: usize) {
        self.vertices.resize(capacity * 4, FieldVertex::default());
        self.indices = (0..capacity as u32)
            .flat_map(|quad| QUAD_INDICES.map(|index| quad * 4 + index))
            .collect();
        self.items.reserve(capacity.saturating_sub(self.items.len()));
        self.capacity = capacity;
    }

    /// Queue a quad, growing if needed
    pub fn push(&mut self, item: BatchItem) -> BatchResult<()> {
        self.ensure_capacity(self.items.len() + 1)?;
        self.items.push(item);
        Ok(())
    }

    /// Reorder items for the given mode; every sort is stable
    pub fn sort(&mut self, mode: SortMode) {
        match mode {
            SortMode::Deferred | SortMode::Immediate => {}
            SortMode::Texture => self.items.sort_by_key(|item| item.texture),
            SortMode::BackToFront => self.items.sort_by(|a, b| compare_keys(b, a)),
            SortMode::FrontToBack => self.items.sort_by(compare_keys),
        }
    }

    /// Write queued items into the vertex stream
    ///
    /// Returns the used prefixes of the vertex and index streams.
    pub fn geometry(&mut self) -> (&[FieldVertex], &[u32]) {
        for (quad, item) in self.vertices.chunks_exact_mut(4).zip(&self.items) {
            quad.copy_from_slice(&item.vertices);
        }
        let count = self.items.len();
        (&self.vertices[..count * 4], &self.indices[..count * QUAD_INDICES.len()])
    }

    /// Group queued items into maximal same-texture runs, in order
    pub fn texture_runs(&self) -> Vec<TextureRun> {
        let mut runs: Vec<TextureRun> = Vec::new();
        for (index, item) in self.items.iter().enumerate() {
            match runs.last_mut() {
                Some(run) if run.texture == item.texture => run.count += 1,
                _ => runs.push(TextureRun {
                    texture: item.texture,
                    start: index,
                    count: 1,
                }),
            }
        }
        runs
    }

    /// Drop queued items, keeping storage
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Queued items in draw order
    pub fn items(&self) -> &[BatchItem] {
        &self.items
    }

    /// Number of queued items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Quads that fit without growing
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

fn compare_keys(a: &BatchItem, b: &BatchItem) -> Ordering {
    a.sort_key.total_cmp(&b.sort_key)
}

fn round_to_chunk(quads: usize) -> usize {
    quads.div_ceil(BATCH_CHUNK) * BATCH_CHUNK
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Color;

    fn item(texture: u32, sort_key: f32) -> BatchItem {
        let vertex = FieldVertex {
            position: [texture as f32, sort_key, sort_key],
            color: Color::WHITE,
            ..Default::default()
        };
        BatchItem {
            vertices: [vertex; 4],
            texture: TextureHandle(texture),
            sort_key,
        }
    }

    #[test]
    fn test_initial_capacity_rounds_to_chunk() {
        assert_eq!(BatchBuffer::new(256).capacity(), 256);
        assert_eq!(BatchBuffer::new(100).capacity(), 128);
        assert_eq!(BatchBuffer::new(0).capacity(), 0);
        assert_eq!(BatchBuffer::new(MAX_BATCH_CAPACITY + 10).capacity(), MAX_BATCH_CAPACITY);
    }

    #[test]
    fn test_growth_preserves_items() {
        let mut buffer = BatchBuffer::new(64);
        for i in 0..64 {
            buffer.push(item(i % 3, i as f32)).unwrap();
        }
        let before = buffer.items().to_vec();
        assert_eq!(buffer.capacity(), 64);

        buffer.push(item(7, 64.0)).unwrap();
        assert_eq!(buffer.capacity(), 128);
        assert_eq!(&buffer.items()[..64], before.as_slice());

        buffer.ensure_capacity(129).unwrap();
        assert_eq!(buffer.capacity(), 192);
        assert_eq!(buffer.len(), 65);
    }

    #[test]
    fn test_capacity_clamps_at_maximum() {
        let mut buffer = BatchBuffer::new(64);
        buffer.ensure_capacity(MAX_BATCH_CAPACITY).unwrap();
        assert_eq!(buffer.capacity(), MAX_BATCH_CAPACITY);
    }

    #[test]
    fn test_exceeding_maximum_is_rejected() {
        let mut buffer = BatchBuffer::new(64);
        buffer.push(item(1, 0.0)).unwrap();

        match buffer.ensure_capacity(MAX_BATCH_CAPACITY + 1) {
            Err(BatchError::BatchSizeExceeded { current, max }) => {
                assert_eq!(current, MAX_BATCH_CAPACITY + 1);
                assert_eq!(max, MAX_BATCH_CAPACITY);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(buffer.capacity(), 64);
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn test_index_stream_pattern() {
        let mut buffer = BatchBuffer::new(64);
        buffer.push(item(1, 0.0)).unwrap();
        buffer.push(item(1, 0.0)).unwrap();

        let (vertices, indices) = buffer.geometry();
        assert_eq!(vertices.len(), 8);
        assert_eq!(indices, &[0, 1, 2, 1, 3, 2, 4, 5, 6, 5, 7, 6]);
    }

    #[test]
    fn test_texture_runs_are_maximal() {
        let mut buffer = BatchBuffer::new(64);
        for texture in [1, 1, 2, 2, 2, 1, 3] {
            buffer.push(item(texture, 0.0)).unwrap();
        }

        let runs = buffer.texture_runs();
        let summary: Vec<(u32, usize, usize)> = runs.iter().map(|run| (run.texture.0, run.start, run.count)).collect();
        assert_eq!(summary, [(1, 0, 2), (2, 2, 3), (1, 5, 1), (3, 6, 1)]);
        assert_eq!(runs[1].first_index(), 12);
        assert_eq!(runs[1].primitive_count(), 6);
    }

    #[test]
    fn test_sorts_are_stable() {
        let mut buffer = BatchBuffer::new(64);
        for (texture, key) in [(3, 0.5), (1, 0.2), (2, 0.5), (1, 0.9), (2, 0.2)] {
            buffer.push(item(texture, key)).unwrap();
        }
        let order = |buffer: &BatchBuffer| -> Vec<(u32, f32)> {
            buffer.items().iter().map(|item| (item.texture.0, item.sort_key)).collect()
        };

        buffer.sort(SortMode::Deferred);
        assert_eq!(order(&buffer), [(3, 0.5), (1, 0.2), (2, 0.5), (1, 0.9), (2, 0.2)]);

        buffer.sort(SortMode::FrontToBack);
        assert_eq!(order(&buffer), [(1, 0.2), (2, 0.2), (3, 0.5), (2, 0.5), (1, 0.9)]);

        buffer.sort(SortMode::BackToFront);
        assert_eq!(order(&buffer), [(1, 0.9), (3, 0.5), (2, 0.5), (1, 0.2), (2, 0.2)]);

        buffer.sort(SortMode::Texture);
        assert_eq!(order(&buffer), [(1, 0.9), (1, 0.2), (2, 0.5), (2, 0.2), (3, 0.5)]);
    }

    #[test]
    fn test_clear_keeps_storage() {
        let mut buffer = BatchBuffer::new(64);
        buffer.ensure_capacity(100).unwrap();
        buffer.push(item(1, 0.0)).unwrap();
        buffer.clear();

        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 128);
        let (vertices, indices) = buffer.geometry();
        assert!(vertices.is_empty() && indices.is_empty());
    }
}
