//! Atlas generator driver
//!
//! Runs `msdf-atlas-gen` once per font at asset-build time and collects its
//! two outputs: the atlas PNG and the metrics JSON. Every failure here is a
//! build-time error that names the offending path.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::{AssetError, AssetResult, AtlasDocument};
use crate::config::FontBakeConfig;

/// Result of a successful bake
#[derive(Debug, Clone)]
pub struct BakeOutput {
    /// Font name, taken from the font file stem
    pub name: String,
    /// Parsed metrics document
    pub document: AtlasDocument,
    /// Encoded atlas image exactly as the generator wrote it
    pub atlas_bitmap: Vec<u8>,
    /// Whether kerning pairs were discarded
    pub ignore_kerning: bool,
}

/// Scratch file locations for one bake
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BakePaths {
    /// Folder holding all intermediate files
    pub temp_folder: PathBuf,
    /// Quoted charset literal handed to the generator
    pub charset: PathBuf,
    /// Metrics document written by the generator
    pub json: PathBuf,
    /// Atlas image written by the generator
    pub atlas_image: PathBuf,
}

impl BakePaths {
    /// Scratch paths for the font `name` under `temp_root`
    pub fn new(temp_root: &Path, name: &str) -> Self {
        let temp_folder = temp_root.join(format!("{name}-bake"));
        Self {
            charset: temp_folder.join("charset.txt"),
            json: temp_folder.join("output.json"),
            atlas_image: temp_folder.join("atlas.png"),
            temp_folder,
        }
    }
}

/// Drives the external distance-field atlas generator
#[derive(Debug, Clone)]
pub struct AtlasGenerator {
    config: FontBakeConfig,
}

impl AtlasGenerator {
    /// Create a generator driver from bake settings
    pub fn new(config: FontBakeConfig) -> Self {
        Self { config }
    }

    /// Bake settings in use
    pub fn config(&self) -> &FontBakeConfig {
        &self.config
    }

    /// Command-line arguments for one generator run
    pub fn arguments(&self, font_file: &Path, paths: &BakePaths) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::with_capacity(16);
        args.push("-font".into());
        args.push(font_file.into());
        args.push("-scanline".into());
        args.push("-type".into());
        args.push("mtsdf".into());
        args.push("-size".into());
        args.push(self.config.resolution.to_string().into());
        args.push("-pxrange".into());
        args.push(self.config.distance_range.to_string().into());
        args.push("-imageout".into());
        args.push(paths.atlas_image.clone().into());
        args.push("-json".into());
        args.push(paths.json.clone().into());
        args.push("-charset".into());
        args.push(paths.charset.clone().into());
        args
    }

    /// Rasterize `font_file` into an atlas and read back the results
    pub fn bake(&self, font_file: impl AsRef<Path>) -> AssetResult<BakeOutput> {
        let font_file = font_file.as_ref();
        let generator = resolve_executable(&self.config.generator_path)
            .ok_or_else(|| AssetError::GeneratorNotFound(self.config.generator_path.clone()))?;

        if !font_file.is_file() {
            return Err(AssetError::FontNotFound(font_file.to_path_buf()));
        }

        let name = font_file
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "font".to_string());
        let paths = BakePaths::new(&self.config.temp_dir, &name);

        std::fs::create_dir_all(&paths.temp_folder)?;
        std::fs::write(&paths.charset, format!("\"{}\"", self.config.effective_charset()))?;

        log::info!(
            "Baking {:?} at {}px, pxrange {} with {:?}",
            font_file,
            self.config.resolution,
            self.config.distance_range,
            generator
        );

        let result = self.run_generator(&generator, font_file, &paths, name);

        if self.config.keep_temp {
            log::debug!("Keeping bake intermediates in {:?}", paths.temp_folder);
        } else if let Err(e) = std::fs::remove_dir_all(&paths.temp_folder) {
            log::warn!("Failed to remove {:?}: {}", paths.temp_folder, e);
        }

        result
    }

    fn run_generator(
        &self,
        generator: &Path,
        font_file: &Path,
        paths: &BakePaths,
        name: String,
    ) -> AssetResult<BakeOutput> {
        let status = Command::new(generator)
            .args(self.arguments(font_file, paths))
            .stdout(Stdio::null())
            .status()
            .map_err(|source| AssetError::GeneratorLaunch {
                path: generator.to_path_buf(),
                source,
            })?;

        if !status.success() {
            return Err(AssetError::GeneratorFailed(status));
        }
        if !paths.json.is_file() {
            return Err(AssetError::MissingOutput(paths.json.clone()));
        }
        if !paths.atlas_image.is_file() {
            return Err(AssetError::MissingOutput(paths.atlas_image.clone()));
        }

        let mut document = AtlasDocument::from_file(&paths.json)?;
        if self.config.ignore_kerning {
            document.kerning.clear();
        }
        let atlas_bitmap = std::fs::read(&paths.atlas_image)?;

        log::info!(
            "Baked '{}': {}x{} atlas, {} glyphs, {} kerning pairs",
            name,
            document.atlas.width,
            document.atlas.height,
            document.glyphs.len(),
            document.kerning.len()
        );

        Ok(BakeOutput {
            name,
            document,
            atlas_bitmap,
            ignore_kerning: self.config.ignore_kerning,
        })
    }
}

/// Find the generator either at the given path or, for a bare name, on `PATH`
fn resolve_executable(path: &Path) -> Option<PathBuf> {
    if path.is_file() {
        return Some(path.to_path_buf());
    }
    if path.components().count() != 1 {
        return None;
    }

    let search = std::env::var_os("PATH")?;
    std::env::split_paths(&search).find_map(|dir| {
        let candidate = dir.join(path);
        if candidate.is_file() {
            return Some(candidate);
        }
        let candidate = candidate.with_extension(std::env::consts::EXE_EXTENSION);
        candidate.is_file().then_some(candidate)
    })
}
