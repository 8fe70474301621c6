//! Color handling for Molviz diagrams
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Atom fills, label colors and bond strokes all go
//! through it, and presets persist it as `#RRGGBB` strings.

use std::{
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{AlphaColor, DynamicColor, Srgb};

/// Wrapper around the `DynamicColor` type from the color crate.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a CSS color string such as `"#ff0000"`,
    /// `"rgb(255, 0, 0)"` or `"red"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use molviz_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Create an opaque color from 8-bit sRGB channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        let components = [
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            1.0,
        ];
        Self {
            color: DynamicColor::from_alpha_color(AlphaColor::<Srgb>::new(components)),
        }
    }

    pub fn white() -> Self {
        Self::from_rgb8(255, 255, 255)
    }

    /// Fully transparent black, the default diagram background.
    pub fn transparent() -> Self {
        Self::default().with_alpha(0.0)
    }

    /// Creates a new color with the specified alpha value, typically between
    /// 0.0 (fully transparent) and 1.0 (fully opaque).
    ///
    /// ```
    /// use molviz_core::color::Color;
    ///
    /// let red = Color::new("red").unwrap();
    /// let semi_transparent_red = red.with_alpha(0.5);
    /// assert_eq!(semi_transparent_red.alpha(), 0.5);
    /// ```
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha.clamp(0.0, 1.0)),
        }
    }

    /// Multiplies the current alpha by `opacity`.
    pub fn with_opacity(self, opacity: f32) -> Self {
        self.with_alpha(self.alpha() * opacity.clamp(0.0, 1.0))
    }

    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// 8-bit sRGB channels, ignoring alpha.
    pub fn to_rgb8(self) -> [u8; 3] {
        let srgb = self.color.to_alpha_color::<Srgb>();
        let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        [
            channel(srgb.components[0]),
            channel(srgb.components[1]),
            channel(srgb.components[2]),
        ]
    }

    /// Upper-case `#RRGGBB` form, used in SVG output and preset files.
    ///
    /// ```
    /// use molviz_core::color::Color;
    ///
    /// assert_eq!(Color::from_rgb8(255, 13, 13).to_hex(), "#FF0D0D");
    /// ```
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02X}{g:02X}{b:02X}")
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_hex())
    }
}
