//! Asset loading for distance-field fonts
//!
//! - [`AtlasDocument`]: the metrics JSON written by the atlas generator
//! - [`AtlasGenerator`]: drives the external generator at bake time
//! - [`ImageData`]: decoded atlas bitmap ready for texture upload

pub mod atlas_document;
pub mod atlas_generator;
pub mod image_loader;

pub use atlas_document::{AtlasDocument, AtlasParams, DocumentBounds, DocumentGlyph, DocumentKerning, DocumentMetrics};
pub use atlas_generator::{AtlasGenerator, BakeOutput, BakePaths};
pub use image_loader::ImageData;

use std::path::PathBuf;
use thiserror::Error;

/// Result type for asset operations
pub type AssetResult<T> = Result<T, AssetError>;

/// Errors raised while baking or loading font assets
#[derive(Error, Debug)]
pub enum AssetError {
    /// The generator executable does not exist
    #[error("Atlas generator not found: {}", .0.display())]
    GeneratorNotFound(PathBuf),

    /// The source font file does not exist
    #[error("Font file not found: {}", .0.display())]
    FontNotFound(PathBuf),

    /// The generator process could not be started
    #[error("Could not start atlas generator {}: {source}", path.display())]
    GeneratorLaunch {
        /// Executable that failed to start
        path: PathBuf,
        /// Underlying spawn error
        source: std::io::Error,
    },

    /// The generator ran but reported failure
    #[error("Atlas generator exited with {0}")]
    GeneratorFailed(std::process::ExitStatus),

    /// An expected output file is missing
    #[error("Expected output not found: {}", .0.display())]
    MissingOutput(PathBuf),

    /// The metrics document could not be deserialized
    #[error("Malformed atlas metrics: {0}")]
    Json(#[from] serde_json::Error),

    /// The atlas bitmap could not be decoded
    #[error("Failed to decode atlas image: {0}")]
    Image(#[from] image::ImageError),

    /// IO error during asset loading
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
