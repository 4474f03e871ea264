//! Configuration system
//!
//! File-backed settings for the font bake step and the batch renderer. Every
//! configuration type implements [`Config`], which picks TOML or RON by file
//! extension.

pub use serde::{Deserialize, Serialize};

use std::path::{Path, PathBuf};

use crate::render::RenderState;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        match extension(path) {
            Some("toml") => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Some("ron") => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match extension(path) {
            Some("toml") => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?,
            Some("ron") => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Characters rasterized when no charset is configured
///
/// Charsets are written verbatim between double quotes, so `"` and `\` appear
/// here in their escaped form.
pub const DEFAULT_CHARSET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZÄÖÜabcdefghijklmnopqrstuvwxyzäöü1234567890/*-+,.!?ß´`'°^_:;²³{[]}§$%&()©€@=<>|#~ \\\"\\\\µ";

/// # Font Bake Configuration
///
/// Parameters handed to the external distance-field atlas generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontBakeConfig {
    /// Path to the `msdf-atlas-gen` executable
    pub generator_path: PathBuf,
    /// Glyph resolution in pixels per em
    pub resolution: u32,
    /// Distance field range in pixels
    pub distance_range: u32,
    /// Characters to rasterize (escaped like [`DEFAULT_CHARSET`]); the default when `None` or empty
    pub charset: Option<String>,
    /// Discard kerning pairs reported by the generator
    pub ignore_kerning: bool,
    /// Keep the generator's intermediate files
    pub keep_temp: bool,
    /// Scratch directory for charset, metrics and atlas files
    pub temp_dir: PathBuf,
}

impl FontBakeConfig {
    /// Charset that will actually be written for the generator
    pub fn effective_charset(&self) -> &str {
        match self.charset.as_deref() {
            Some(charset) if !charset.is_empty() => charset,
            _ => DEFAULT_CHARSET,
        }
    }

    /// Set the glyph resolution
    pub fn with_resolution(mut self, resolution: u32) -> Self {
        self.resolution = resolution;
        self
    }

    /// Set the distance range
    pub fn with_distance_range(mut self, distance_range: u32) -> Self {
        self.distance_range = distance_range;
        self
    }

    /// Set a custom charset
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.resolution == 0 {
            return Err("Resolution must be at least 1 pixel".to_string());
        }
        if self.distance_range == 0 {
            return Err("Distance range must be at least 1 pixel".to_string());
        }
        if self.generator_path.as_os_str().is_empty() {
            return Err("Generator path cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for FontBakeConfig {
    fn default() -> Self {
        Self {
            generator_path: PathBuf::from("msdf-atlas-gen"),
            resolution: 128,
            distance_range: 2,
            charset: None,
            ignore_kerning: false,
            keep_temp: false,
            temp_dir: std::env::temp_dir().join("msdf_text_bake"),
        }
    }
}

impl Config for FontBakeConfig {}

/// # Batch Configuration
///
/// Initial sizing and device state for a [`crate::render::BatchRenderer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Quads reserved up front; rounded up to a multiple of 64
    pub initial_capacity: usize,
    /// Device state used when `begin` is not given one
    pub render_state: RenderState,
}

impl BatchConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        let max = crate::render::MAX_BATCH_CAPACITY;
        if self.initial_capacity > max {
            return Err(format!("Initial capacity {} exceeds the maximum of {max}", self.initial_capacity));
        }
        Ok(())
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            initial_capacity: crate::render::INITIAL_BATCH_CAPACITY,
            render_state: RenderState::default(),
        }
    }
}

impl Config for BatchConfig {}
