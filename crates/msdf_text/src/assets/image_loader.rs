//! Image loading utilities for atlas texture data
//!
//! Decodes the generator's PNG output into RGBA pixels for texture upload.

use super::AssetResult;

/// Loaded image data ready for GPU upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Raw RGBA pixel data
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Number of color channels (always 4 for RGBA)
    pub channels: u8,
}

impl ImageData {
    /// Decode an encoded image held in memory
    pub fn from_bytes(bytes: &[u8]) -> AssetResult<Self> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();

        log::debug!("Decoded atlas image {}x{} from memory", width, height);

        Ok(Self {
            data: rgba.into_raw(),
            width,
            height,
            channels: 4,
        })
    }

    /// Create a solid color image (useful for testing and defaults)
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = (width * height) as usize;
        let data = color.iter().copied().cycle().take(pixel_count * 4).collect();

        Self {
            data,
            width,
            height,
            channels: 4,
        }
    }

    /// Encode as PNG bytes
    pub fn to_png_bytes(&self) -> AssetResult<Vec<u8>> {
        let mut bytes = Vec::new();
        image::write_buffer_with_format(
            &mut std::io::Cursor::new(&mut bytes),
            &self.data,
            self.width,
            self.height,
            image::ExtendedColorType::Rgba8,
            image::ImageFormat::Png,
        )?;
        Ok(bytes)
    }
}
