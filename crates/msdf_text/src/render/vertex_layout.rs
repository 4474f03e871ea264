//! Backend-neutral vertex layout description
//!
//! Backends translate a [`VertexDeclaration`] into their own input-layout
//! objects. Offsets are derived from a constant format size table, so the
//! declaration for [`FieldVertex`](super::FieldVertex) is built at compile time.

/// Attribute storage format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexElementFormat {
    /// One `f32`
    Single,
    /// Two `f32`
    Vector2,
    /// Three `f32`
    Vector3,
    /// Four `f32`
    Vector4,
    /// Four normalized `u8`
    Color,
}

impl VertexElementFormat {
    /// Size of one attribute in bytes
    pub const fn size(self) -> u32 {
        match self {
            Self::Single | Self::Color => 4,
            Self::Vector2 => 8,
            Self::Vector3 => 12,
            Self::Vector4 => 16,
        }
    }
}

/// What the shader reads an attribute as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexElementUsage {
    /// Vertex position
    Position,
    /// Vertex color
    Color,
    /// Texture coordinate channel
    TextureCoordinate,
}

/// One attribute in a vertex declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexElement {
    /// Byte offset from the start of the vertex
    pub offset: u32,
    /// Storage format
    pub format: VertexElementFormat,
    /// Shader semantic
    pub usage: VertexElementUsage,
    /// Semantic index, e.g. the texture coordinate channel
    pub usage_index: u32,
}

/// Complete vertex layout with `N` attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexDeclaration<const N: usize> {
    elements: [VertexElement; N],
    stride: u32,
}

impl<const N: usize> VertexDeclaration<N> {
    /// Lay out attributes back to back in the given order
    pub const fn packed(attributes: [(VertexElementFormat, VertexElementUsage, u32); N]) -> Self {
        let placeholder = VertexElement {
            offset: 0,
            format: VertexElementFormat::Single,
            usage: VertexElementUsage::Position,
            usage_index: 0,
        };
        let mut elements = [placeholder; N];
        let mut offset = 0;
        let mut i = 0;
        while i < N {
            let (format, usage, usage_index) = attributes[i];
            elements[i] = VertexElement {
                offset,
                format,
                usage,
                usage_index,
            };
            offset += format.size();
            i += 1;
        }
        Self { elements, stride: offset }
    }

    /// Attributes in declaration order
    pub fn elements(&self) -> &[VertexElement] {
        &self.elements
    }

    /// Bytes per vertex
    pub const fn stride(&self) -> u32 {
        self.stride
    }
}

/// Layout of [`FieldVertex`](super::FieldVertex)
pub const FIELD_VERTEX_DECLARATION: VertexDeclaration<6> = VertexDeclaration::packed([
    (VertexElementFormat::Vector3, VertexElementUsage::Position, 0),
    (VertexElementFormat::Color, VertexElementUsage::Color, 0),
    (VertexElementFormat::Vector2, VertexElementUsage::TextureCoordinate, 0),
    (VertexElementFormat::Vector2, VertexElementUsage::TextureCoordinate, 1),
    (VertexElementFormat::Single, VertexElementUsage::TextureCoordinate, 2),
    (VertexElementFormat::Single, VertexElementUsage::TextureCoordinate, 3),
]);
