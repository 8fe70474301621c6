//! CLI logic for the Molviz diagram tool.
//!
//! The input is either formula text or a preset file. The molecule is laid
//! out, rendered in the requested notation and written as SVG.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, LayoutArg};

use std::{fs, path::Path};

use log::{debug, info};

use molviz::{
    MolvizError, ParseMode, StructureBuilder,
    layout::LayoutStrategy,
    preset::{Preset, PresetStore},
};

/// Run the Molviz CLI application
///
/// Builds the molecule from the input, applies the requested layout and
/// writes the rendered SVG to the output file.
///
/// # Errors
///
/// Returns `MolvizError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Formula errors in strict mode
/// - Missing presets
/// - Layouts that need more atoms than the molecule has
pub fn run(args: &Args) -> Result<(), MolvizError> {
    info!(
        input = args.input,
        output_path = args.output;
        "Processing molecule"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let mode = args
        .mode
        .unwrap_or_else(|| app_config.style().display_mode());

    let parse_mode = if args.strict {
        ParseMode::Strict
    } else {
        ParseMode::Lenient
    };
    let mut builder = StructureBuilder::new(app_config).with_parse_mode(parse_mode);

    if is_preset_file(&args.input) {
        let preset = select_preset(&args.input, args.preset.as_deref())?;
        let skipped = builder.load_preset(&preset);
        debug!(preset = preset.name, skipped; "Preset loaded");
    } else {
        builder.parse_formula(&args.input)?;
    }

    if let Some(layout) = args.layout {
        builder.apply_layout(LayoutStrategy::from(layout))?;
    }

    if let Some(path) = &args.save_preset {
        let name = args.preset.clone().unwrap_or_else(|| builder.formula());
        PresetStore::new(path).upsert(builder.to_preset(name))?;
        info!(path; "Preset saved");
    }

    let svg = builder.render_svg(mode);
    fs::write(&args.output, svg)?;

    info!(output_file = args.output, mode:%; "SVG exported successfully");

    Ok(())
}

fn is_preset_file(input: &str) -> bool {
    Path::new(input)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Picks `name` from the preset file, or its first preset when no name is
/// given.
fn select_preset(path: &str, name: Option<&str>) -> Result<Preset, MolvizError> {
    if !Path::new(path).exists() {
        return Err(MolvizError::Persistence(format!(
            "preset file `{path}` does not exist"
        )));
    }
    let store = PresetStore::new(path);
    let found = match name {
        Some(name) => store.find(name),
        None => store.load().into_iter().next(),
    };
    found.ok_or_else(|| match name {
        Some(name) => MolvizError::Persistence(format!("no preset named `{name}` in `{path}`")),
        None => MolvizError::Persistence(format!("`{path}` contains no presets")),
    })
}
