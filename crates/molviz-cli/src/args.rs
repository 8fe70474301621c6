//! Command-line argument definitions for the Molviz CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the molecule source, the layout and
//! notation, output and configuration paths, and logging verbosity.

use clap::{Parser, ValueEnum};

use molviz::{
    config::DisplayMode,
    layout::{ForceVariant, LayoutStrategy},
};

/// Layout applied after the molecule is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    Manual,
    Linear,
    Grid,
    Ring,
    Branched,
    /// Short force-directed run
    Force,
    /// Longer force-directed run that stops once settled
    Optimize,
}

impl From<LayoutArg> for LayoutStrategy {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Manual => LayoutStrategy::Manual,
            LayoutArg::Linear => LayoutStrategy::Linear,
            LayoutArg::Grid => LayoutStrategy::Grid,
            LayoutArg::Ring => LayoutStrategy::Ring,
            LayoutArg::Branched => LayoutStrategy::Branched,
            LayoutArg::Force => LayoutStrategy::Optimize(ForceVariant::Interactive),
            LayoutArg::Optimize => LayoutStrategy::Optimize(ForceVariant::Declarative),
        }
    }
}

/// Command-line arguments for the Molviz diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Formula text such as `C2H6O`, or a path to a preset file (`.json`)
    #[arg(help = "Formula text or preset file")]
    pub input: String,

    /// Name of the preset to load when the input is a preset file
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Layout to apply before rendering
    #[arg(short, long, value_enum)]
    pub layout: Option<LayoutArg>,

    /// Notation to render; defaults to the configured display mode
    #[arg(short, long)]
    pub mode: Option<DisplayMode>,

    /// Reject formula text with characters outside the grammar
    #[arg(long)]
    pub strict: bool,

    /// Save the molecule into this preset file after layout
    #[arg(long)]
    pub save_preset: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
