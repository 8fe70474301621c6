//! Export of rendered scenes.
//!
//! ```text
//! MoleculeGraph
//!     ↓ layout
//! Positioned atoms
//!     ↓ render (display mode)
//! Scene
//!     ↓ export (this module)
//! Output document
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] - SVG documents via [`svg::SvgBuilder`] and [`svg::Svg`]

pub mod svg;

use molviz_core::draw::Scene;

use crate::error::MolvizError;

/// A destination for rendered scenes.
pub trait Exporter {
    /// Writes `scene` in the backend's format.
    ///
    /// # Errors
    ///
    /// Returns [`MolvizError::Io`] when the output cannot be written.
    fn export_scene(&mut self, scene: &Scene) -> Result<(), MolvizError>;
}
