use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use msdf_text::assets::AtlasGenerator;
use msdf_text::config::{Config, FontBakeConfig};
use msdf_text::foundation::logging;
use msdf_text::text::FieldFont;
use std::path::{Path, PathBuf};

fn cli() -> Command {
    Command::new("font_baker")
        .about("Bakes a TTF/OTF font into a distance-field atlas and a RON layout file")
        .arg(
            Arg::new("font")
                .value_name("FONT")
                .help("Source font file")
                .required(true),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("PATH")
                .help("Output path without extension; writes <PATH>.ron and <PATH>.png (default: font name)"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Bake settings in TOML or RON"),
        )
        .arg(
            Arg::new("generator")
                .short('g')
                .long("generator")
                .value_name("PATH")
                .help("Path to the msdf-atlas-gen executable"),
        )
        .arg(
            Arg::new("resolution")
                .short('r')
                .long("resolution")
                .value_name("PIXELS")
                .help("Glyph resolution in pixels per em")
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new("pxrange")
                .long("pxrange")
                .value_name("PIXELS")
                .help("Distance field range in pixels")
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new("charset")
                .long("charset")
                .value_name("CHARS")
                .help("Characters to rasterize, escaped for a quoted string literal"),
        )
        .arg(
            Arg::new("ignore-kerning")
                .long("ignore-kerning")
                .help("Discard kerning pairs")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("keep-temp")
                .long("keep-temp")
                .help("Keep the generator's intermediate files")
                .action(clap::ArgAction::SetTrue),
        )
}

fn bake_config(matches: &ArgMatches) -> Result<FontBakeConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => FontBakeConfig::load_from_file(path).with_context(|| format!("Failed to load config {path}"))?,
        None => FontBakeConfig::default(),
    };

    if let Some(generator) = matches.get_one::<String>("generator") {
        config.generator_path = PathBuf::from(generator);
    }
    if let Some(&resolution) = matches.get_one::<u32>("resolution") {
        config.resolution = resolution;
    }
    if let Some(&distance_range) = matches.get_one::<u32>("pxrange") {
        config.distance_range = distance_range;
    }
    if let Some(charset) = matches.get_one::<String>("charset") {
        config.charset = Some(charset.clone());
    }
    config.ignore_kerning |= matches.get_flag("ignore-kerning");
    config.keep_temp |= matches.get_flag("keep-temp");

    config.validate().map_err(|e| anyhow::anyhow!("Invalid bake settings: {e}"))?;
    Ok(config)
}

fn output_path(matches: &ArgMatches, font_file: &Path) -> Result<PathBuf> {
    let base = match matches.get_one::<String>("output") {
        Some(output) => PathBuf::from(output),
        None => PathBuf::from(font_file.file_stem().context("Font path has no file name")?),
    };
    Ok(base.with_extension("ron"))
}

fn main() -> Result<()> {
    logging::init_with_default("info");

    let matches = cli().get_matches();
    let font_file = PathBuf::from(matches.get_one::<String>("font").context("Missing font argument")?);
    let config = bake_config(&matches)?;
    let output = output_path(&matches, &font_file)?;

    if let Some(parent) = output.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let baked = AtlasGenerator::new(config)
        .bake(&font_file)
        .with_context(|| format!("Failed to bake {}", font_file.display()))?;
    let font = FieldFont::from_bake(baked);
    font.save_baked(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    let metrics = font.metrics();
    log::info!(
        "'{}': {} glyphs, {}x{} atlas, line height {:.1}px, baseline {:.1}px",
        font.name(),
        font.glyphs().len(),
        font.atlas_size().x,
        font.atlas_size().y,
        metrics.actual_line_height(),
        metrics.actual_baseline()
    );
    log::info!("Wrote {} and {}", output.display(), output.with_extension("png").display());
    Ok(())
}
