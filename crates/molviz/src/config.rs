//! Configuration types for molecule layout and rendering.
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Bond length, ring size, spacing and the reactive auto layout.
//! - [`StyleConfig`] - Colors, sizes, fonts, flags and the default notation.
//!
//! Every field has a default, so partial TOML files are accepted:
//!
//! ```
//! # use molviz::config::{AppConfig, DisplayMode};
//! let config = AppConfig::default();
//! assert_eq!(config.style().display_mode(), DisplayMode::Structural);
//! assert_eq!(config.layout().bond_length(), 80.0);
//! assert!(config.validate().is_ok());
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use molviz_core::color::Color;

/// Minimum ideal bond length.
pub const MIN_BOND_LENGTH: f32 = 10.0;
/// Minimum ring radius.
pub const MIN_RING_SIZE: f32 = 20.0;
/// Minimum spacing multiplier.
pub const MIN_SPACING_MULTIPLIER: f32 = 0.1;
/// Minimum stroke width for bonds.
pub const MIN_BOND_THICKNESS: f32 = 0.1;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    layout: LayoutConfig,

    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn layout_mut(&mut self) -> &mut LayoutConfig {
        &mut self.layout
    }

    pub fn style_mut(&mut self) -> &mut StyleConfig {
        &mut self.style
    }

    /// Rejects non-positive sizes and unparseable colors.
    pub fn validate(&self) -> Result<(), String> {
        self.layout.validate()?;
        self.style.validate()
    }
}

/// Reactive layout applied whenever the setting changes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoLayout {
    #[default]
    None,
    Linear,
    Branched,
    Optimized,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    bond_length: f32,
    ring_size: f32,
    spacing_multiplier: f32,
    auto_layout: AutoLayout,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            bond_length: 80.0,
            ring_size: 80.0,
            spacing_multiplier: 1.0,
            auto_layout: AutoLayout::None,
        }
    }
}

impl LayoutConfig {
    /// Ideal bond length used by springs and evenly spaced layouts.
    pub fn bond_length(&self) -> f32 {
        self.bond_length
    }

    pub fn ring_size(&self) -> f32 {
        self.ring_size
    }

    pub fn spacing_multiplier(&self) -> f32 {
        self.spacing_multiplier
    }

    /// Distance between neighbors in linear, grid and branched layouts.
    pub fn spacing(&self) -> f32 {
        self.bond_length * self.spacing_multiplier
    }

    pub fn auto_layout(&self) -> AutoLayout {
        self.auto_layout
    }

    pub fn set_bond_length(&mut self, length: f32) {
        self.bond_length = length.max(MIN_BOND_LENGTH);
    }

    pub fn set_ring_size(&mut self, size: f32) {
        self.ring_size = size.max(MIN_RING_SIZE);
    }

    pub fn set_spacing_multiplier(&mut self, multiplier: f32) {
        self.spacing_multiplier = multiplier.max(MIN_SPACING_MULTIPLIER);
    }

    pub fn set_auto_layout(&mut self, auto_layout: AutoLayout) {
        self.auto_layout = auto_layout;
    }

    fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("bond_length", self.bond_length),
            ("ring_size", self.ring_size),
            ("spacing_multiplier", self.spacing_multiplier),
        ] {
            if !(value > 0.0) {
                return Err(format!("layout.{name} must be positive, got {value}"));
            }
        }
        Ok(())
    }
}

/// Uniform multiplier for stroke widths, font sizes and coordinates.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderingQuality {
    Low,
    #[default]
    Normal,
    High,
    Ultra,
}

impl RenderingQuality {
    pub fn factor(self) -> f32 {
        match self {
            Self::Low => 0.5,
            Self::Normal => 1.0,
            Self::High => 1.5,
            Self::Ultra => 2.0,
        }
    }
}

/// Diagram-wide notation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    #[default]
    Structural,
    Skeletal,
    Linear,
    Molecular,
    Constitutional,
    Electronic,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 6] = [
        Self::Structural,
        Self::Skeletal,
        Self::Linear,
        Self::Molecular,
        Self::Constitutional,
        Self::Electronic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Structural => "structural",
            Self::Skeletal => "skeletal",
            Self::Linear => "linear",
            Self::Molecular => "molecular",
            Self::Constitutional => "constitutional",
            Self::Electronic => "electronic",
        }
    }
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| {
                format!(
                    "invalid display mode `{s}`, valid values: structural, skeletal, linear, \
                     molecular, constitutional, electronic"
                )
            })
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    display_mode: DisplayMode,
    scale: f32,
    quality: RenderingQuality,
    bond_color: String,
    text_color: String,
    atom_fill_color: String,
    background_color: Option<String>,
    bond_thickness: f32,
    atom_size: f32,
    font_family: String,
    font_size: f32,
    outline_thickness: f32,
    show_hydrogen: bool,
    show_charges: bool,
    show_lone_pairs: bool,
    anti_aliasing: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            display_mode: DisplayMode::Structural,
            scale: 1.0,
            quality: RenderingQuality::Normal,
            bond_color: "black".to_string(),
            text_color: "black".to_string(),
            atom_fill_color: "white".to_string(),
            background_color: None,
            bond_thickness: 2.0,
            atom_size: 20.0,
            font_family: "Arial".to_string(),
            font_size: 24.0,
            outline_thickness: 0.0,
            show_hydrogen: true,
            show_charges: true,
            show_lone_pairs: false,
            anti_aliasing: true,
        }
    }
}

impl StyleConfig {
    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn quality(&self) -> RenderingQuality {
        self.quality
    }

    pub fn bond_color(&self) -> Result<Color, String> {
        Color::new(&self.bond_color).map_err(|err| format!("Invalid bond color in config: {err}"))
    }

    pub fn text_color(&self) -> Result<Color, String> {
        Color::new(&self.text_color).map_err(|err| format!("Invalid text color in config: {err}"))
    }

    pub fn atom_fill_color(&self) -> Result<Color, String> {
        Color::new(&self.atom_fill_color)
            .map_err(|err| format!("Invalid atom fill color in config: {err}"))
    }

    /// Background fill; `None` means transparent.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    pub fn bond_thickness(&self) -> f32 {
        self.bond_thickness
    }

    pub fn atom_size(&self) -> f32 {
        self.atom_size
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn outline_thickness(&self) -> f32 {
        self.outline_thickness
    }

    pub fn show_hydrogen(&self) -> bool {
        self.show_hydrogen
    }

    pub fn show_charges(&self) -> bool {
        self.show_charges
    }

    pub fn show_lone_pairs(&self) -> bool {
        self.show_lone_pairs
    }

    pub fn anti_aliasing(&self) -> bool {
        self.anti_aliasing
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.display_mode = mode;
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale.clamp(0.1, 10.0);
    }

    pub fn set_quality(&mut self, quality: RenderingQuality) {
        self.quality = quality;
    }

    pub fn set_bond_color(&mut self, color: &str) {
        self.bond_color = color.to_string();
    }

    pub fn set_text_color(&mut self, color: &str) {
        self.text_color = color.to_string();
    }

    pub fn set_background_color(&mut self, color: Option<&str>) {
        self.background_color = color.map(str::to_string);
    }

    pub fn set_bond_thickness(&mut self, thickness: f32) {
        self.bond_thickness = thickness.max(MIN_BOND_THICKNESS);
    }

    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = size.max(molviz_core::draw::MIN_FONT_SIZE);
    }

    pub fn set_outline_thickness(&mut self, thickness: f32) {
        self.outline_thickness = thickness.max(0.0);
    }

    pub fn set_show_hydrogen(&mut self, show: bool) {
        self.show_hydrogen = show;
    }

    pub fn set_show_charges(&mut self, show: bool) {
        self.show_charges = show;
    }

    pub fn set_show_lone_pairs(&mut self, show: bool) {
        self.show_lone_pairs = show;
    }

    pub fn set_anti_aliasing(&mut self, enabled: bool) {
        self.anti_aliasing = enabled;
    }

    fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("scale", self.scale),
            ("bond_thickness", self.bond_thickness),
            ("atom_size", self.atom_size),
            ("font_size", self.font_size),
        ] {
            if !(value > 0.0) {
                return Err(format!("style.{name} must be positive, got {value}"));
            }
        }
        if self.outline_thickness < 0.0 {
            return Err(format!(
                "style.outline_thickness must not be negative, got {}",
                self.outline_thickness
            ));
        }
        self.bond_color()?;
        self.text_color()?;
        self.atom_fill_color()?;
        self.background_color()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_quality_factors() {
        assert_approx_eq!(f32, RenderingQuality::Low.factor(), 0.5);
        assert_approx_eq!(f32, RenderingQuality::Normal.factor(), 1.0);
        assert_approx_eq!(f32, RenderingQuality::High.factor(), 1.5);
        assert_approx_eq!(f32, RenderingQuality::Ultra.factor(), 2.0);
    }

    #[test]
    fn test_display_mode_from_str() {
        for mode in DisplayMode::ALL {
            assert_eq!(mode.name().parse::<DisplayMode>(), Ok(mode));
        }
        assert!("lewis".parse::<DisplayMode>().is_err());
    }

    #[test]
    fn test_layout_setters_clamp() {
        let mut layout = LayoutConfig::default();
        layout.set_bond_length(2.0);
        layout.set_ring_size(5.0);
        layout.set_spacing_multiplier(0.0);
        assert_approx_eq!(f32, layout.bond_length(), MIN_BOND_LENGTH);
        assert_approx_eq!(f32, layout.ring_size(), MIN_RING_SIZE);
        assert_approx_eq!(f32, layout.spacing_multiplier(), MIN_SPACING_MULTIPLIER);
        assert_approx_eq!(f32, layout.spacing(), 1.0);
    }

    #[test]
    fn test_style_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.style_mut().set_bond_color("not-a-color");
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.style_mut().font_size = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_style_defaults() {
        let style = StyleConfig::default();
        assert_eq!(style.font_family(), "Arial");
        assert!(style.show_hydrogen());
        assert!(style.show_charges());
        assert!(!style.show_lone_pairs());
        assert_eq!(style.background_color(), Ok(None));
        assert_eq!(style.bond_color().unwrap().to_hex(), "#000000");
    }
}
