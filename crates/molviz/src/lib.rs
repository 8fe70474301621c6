//! Molviz - Molecule graphs, 2D layout and chemical diagram rendering
//!
//! This library holds a molecule as a graph of atoms and bonds, generates
//! atoms from formula text, arranges them with a set of layout strategies and
//! renders the result in several chemical notations.

pub mod config;
pub mod export;
pub mod layout;
pub mod model;
pub mod notation;
pub mod preset;
pub mod render;

mod error;

pub use molviz_core::{animation, color, draw, element, geometry, identifier};
pub use molviz_formula::ParseMode;

pub use error::{MolvizError, ValidationError};

use log::{debug, info, trace, warn};

use config::{AppConfig, AutoLayout, DisplayMode};
use draw::Scene;
use layout::{BondStyle, LayoutEngine, LayoutStrategy};
use model::MoleculeGraph;
use preset::Preset;
use render::Renderer;

/// Builder for creating, arranging and rendering molecules.
///
/// This owns one [`MoleculeGraph`] together with the layout engine and
/// renderer configured from an [`AppConfig`].
///
/// # Examples
///
/// ```rust,no_run
/// use molviz::{StructureBuilder, config::{AppConfig, DisplayMode}};
///
/// let mut builder = StructureBuilder::new(AppConfig::default());
///
/// // Generate atoms from a formula
/// builder.parse_formula("C2H6O").expect("Failed to parse");
///
/// // Render the molecule to SVG
/// let svg = builder.render_svg(DisplayMode::Structural);
/// println!("{svg}");
///
/// // Or use default config
/// let builder = StructureBuilder::default();
/// ```
#[derive(Debug)]
pub struct StructureBuilder {
    config: AppConfig,
    parse_mode: ParseMode,
    graph: MoleculeGraph,
    engine: LayoutEngine,
    renderer: Renderer,
}

impl Default for StructureBuilder {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl StructureBuilder {
    /// Create a new builder with an empty molecule.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including layout and style settings
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use molviz::{StructureBuilder, config::AppConfig};
    ///
    /// let config = AppConfig::default();
    /// let builder = StructureBuilder::new(config);
    /// ```
    pub fn new(config: AppConfig) -> Self {
        let engine = Self::engine_for(&config);
        let renderer = Renderer::new(config.style().clone());
        Self {
            config,
            parse_mode: ParseMode::default(),
            graph: MoleculeGraph::new(),
            engine,
            renderer,
        }
    }

    /// Set how formula text outside the grammar is treated.
    pub fn with_parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = mode;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn graph(&self) -> &MoleculeGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut MoleculeGraph {
        &mut self.graph
    }

    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    /// Replace the molecule with atoms generated from formula text.
    ///
    /// Atoms are created in formula order and colored by element. The
    /// configured auto layout runs afterwards.
    ///
    /// # Arguments
    ///
    /// * `text` - Formula text such as `C2H6O`
    ///
    /// # Errors
    ///
    /// Returns [`MolvizError::Parse`] when the builder is in strict mode and
    /// the text has characters outside the formula grammar, or
    /// [`MolvizError::Validation`] when the auto layout cannot arrange the
    /// generated atoms. The graph is left unchanged in both cases.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use molviz::StructureBuilder;
    ///
    /// let mut builder = StructureBuilder::default();
    /// let atoms = builder.parse_formula("H2O").expect("Failed to parse formula");
    /// assert_eq!(atoms, 3);
    /// ```
    pub fn parse_formula(&mut self, text: &str) -> Result<usize, MolvizError> {
        info!(formula = text, mode:? = self.parse_mode; "Generating molecule from formula");
        let mode = self.parse_mode;
        let engine = &self.engine;
        let strategy = LayoutStrategy::from_auto_layout(self.config.layout().auto_layout());
        let count = self.graph.edit("generate from formula", |graph| {
            let ids = graph.generate_from_formula(text, mode, engine.spacing())?;
            if let Some(strategy) = strategy.filter(|_| !ids.is_empty()) {
                engine.apply(graph, strategy)?;
            }
            Ok::<_, MolvizError>(ids.len())
        })?;
        debug!(atoms = count; "Formula atoms generated");
        Ok(count)
    }

    /// Arrange the molecule with `strategy`.
    ///
    /// # Errors
    ///
    /// Returns [`MolvizError::Validation`] when the strategy needs more atoms
    /// than the molecule has.
    pub fn apply_layout(&mut self, strategy: LayoutStrategy) -> Result<(), MolvizError> {
        self.engine.apply(&mut self.graph, strategy)?;
        Ok(())
    }

    /// Change the reactive auto layout, running it right away when the value
    /// changes.
    ///
    /// # Errors
    ///
    /// Returns [`MolvizError::Validation`] when the new layout cannot be
    /// applied to the current molecule. Neither the setting nor the graph
    /// changes in that case.
    pub fn set_auto_layout(&mut self, auto_layout: AutoLayout) -> Result<(), MolvizError> {
        if self.config.layout().auto_layout() == auto_layout {
            trace!(auto_layout:?; "Auto layout unchanged");
            return Ok(());
        }
        if let Some(strategy) = LayoutStrategy::from_auto_layout(auto_layout) {
            let engine = &self.engine;
            self.graph.edit("auto layout", |graph| engine.apply(graph, strategy))?;
        }
        info!(auto_layout:?; "Auto layout changed");
        self.config.layout_mut().set_auto_layout(auto_layout);
        Ok(())
    }

    /// Render the molecule in `mode`.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use molviz::{StructureBuilder, config::DisplayMode};
    ///
    /// let mut builder = StructureBuilder::default();
    /// builder.parse_formula("CO2").expect("Failed to parse");
    /// let scene = builder.render_scene(DisplayMode::Skeletal);
    /// println!("{} primitives", scene.len());
    /// ```
    pub fn render_scene(&mut self, mode: DisplayMode) -> Scene {
        info!(mode:%, atoms = self.graph.atom_count(); "Rendering molecule");
        self.renderer.render(&self.graph, mode)
    }

    /// Render the molecule in `mode` to an SVG string.
    ///
    /// The configured background color and anti-aliasing setting are applied
    /// to the document. An invalid background color is logged and dropped.
    pub fn render_svg(&mut self, mode: DisplayMode) -> String {
        let scene = self.render_scene(mode);
        let style = self.config.style();
        let background = style.background_color().unwrap_or_else(|err| {
            warn!(err:%; "Ignoring invalid background color");
            None
        });
        let svg = export::svg::render_document(&scene, background, style.anti_aliasing());
        info!(bytes = svg.len(); "SVG rendered successfully");
        svg
    }

    /// Molecular formula of the current molecule.
    pub fn formula(&self) -> String {
        self.graph.formula()
    }

    /// Linear formula of the current molecule, ordered left to right.
    pub fn linear_formula(&self) -> String {
        self.graph.linear_formula()
    }

    /// Replace the molecule with `preset`, returning the number of bonds that
    /// were skipped as invalid.
    pub fn load_preset(&mut self, preset: &Preset) -> usize {
        info!(preset = preset.name; "Loading preset");
        preset.load_into(&mut self.graph)
    }

    /// Capture the current molecule as a preset named `name`.
    pub fn to_preset(&self, name: impl Into<String>) -> Preset {
        Preset::from_graph(name, &self.graph)
    }

    fn engine_for(config: &AppConfig) -> LayoutEngine {
        let style = config.style();
        let mut engine = LayoutEngine::from_config(config.layout());
        let color = style.bond_color().unwrap_or_default();
        engine.set_bond_style(BondStyle::new(color, style.bond_thickness()));
        engine
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::{
        draw::RenderLayer,
        model::{Atom, BondType},
    };

    #[test]
    fn test_parse_formula_generates_atoms() {
        let mut builder = StructureBuilder::default();
        assert_eq!(builder.parse_formula("C2H6O").unwrap(), 9);
        assert_eq!(builder.graph().atom_count(), 9);
        assert_eq!(builder.graph().bond_count(), 0);
        assert_eq!(builder.formula(), "C2H6O");
    }

    #[test]
    fn test_strict_mode_rejects_unknown_text() {
        let mut builder = StructureBuilder::default().with_parse_mode(ParseMode::Strict);
        builder.parse_formula("H2O").unwrap();
        assert!(matches!(
            builder.parse_formula("H2O!"),
            Err(MolvizError::Parse { .. })
        ));
        assert_eq!(builder.graph().atom_count(), 3);
    }

    #[test]
    fn test_lenient_mode_skips_unknown_text() {
        let mut builder = StructureBuilder::default();
        assert_eq!(builder.parse_formula("H2O!").unwrap(), 3);
    }

    #[test]
    fn test_apply_layout_errors() {
        let mut builder = StructureBuilder::default();
        builder.parse_formula("HO").unwrap();
        assert!(matches!(
            builder.apply_layout(LayoutStrategy::Ring),
            Err(MolvizError::Validation(ValidationError::TooFewAtoms { .. }))
        ));
        assert_eq!(builder.graph().bond_count(), 0);
    }

    #[test]
    fn test_set_auto_layout_applies_on_change() {
        let mut builder = StructureBuilder::default();
        let graph = builder.graph_mut();
        let a = graph.add_atom(Atom::new("C"));
        let b = graph.add_atom(Atom::new("C").with_position(geometry::Point::new(5.0, 30.0)));
        graph.add_bond(a, b).unwrap();

        builder.set_auto_layout(AutoLayout::Linear).unwrap();
        let positions = builder.graph().positions_at(0.0);
        assert_approx_eq!(f32, positions[0].1.x(), -40.0);
        assert_approx_eq!(f32, positions[1].1.x(), 40.0);
        assert_approx_eq!(f32, positions[1].1.y(), 0.0);

        // Setting the same value again leaves manual edits alone.
        let moved = geometry::Point::new(7.0, 7.0);
        builder.graph_mut().atom_mut(a).unwrap().set_position(moved);
        builder.set_auto_layout(AutoLayout::Linear).unwrap();
        assert_eq!(builder.graph().atom(a).unwrap().position(), moved);
    }

    #[test]
    fn test_failed_auto_layout_keeps_previous_molecule() {
        let mut config = AppConfig::default();
        config.layout_mut().set_auto_layout(AutoLayout::Optimized);
        let mut builder = StructureBuilder::new(config);
        assert_eq!(builder.parse_formula("H2O").unwrap(), 3);
        let before = builder.graph().positions_at(0.0);

        assert!(matches!(
            builder.parse_formula("O"),
            Err(MolvizError::Validation(ValidationError::TooFewAtoms { .. }))
        ));
        assert_eq!(builder.graph().atom_count(), 3);
        assert_eq!(builder.formula(), "H2O");
        assert_eq!(builder.graph().positions_at(0.0), before);
    }

    #[test]
    fn test_failed_set_auto_layout_keeps_setting_and_graph() {
        let mut builder = StructureBuilder::default();
        let position = geometry::Point::new(12.0, 34.0);
        let id = builder
            .graph_mut()
            .add_atom(Atom::new("C").with_position(position));

        assert!(matches!(
            builder.set_auto_layout(AutoLayout::Optimized),
            Err(MolvizError::Validation(ValidationError::TooFewAtoms { .. }))
        ));
        assert_eq!(builder.config().layout().auto_layout(), AutoLayout::None);
        assert_eq!(builder.graph().atom(id).unwrap().position(), position);
        assert!(builder.graph().edit_log().is_empty());
    }

    #[test]
    fn test_render_svg_uses_style() {
        let mut config = AppConfig::default();
        config.style_mut().set_background_color(Some("white"));
        let mut builder = StructureBuilder::new(config);
        builder.parse_formula("H2O").unwrap();

        let svg = builder.render_svg(DisplayMode::Structural);
        assert!(svg.contains("<svg"));
        assert!(svg.contains("<rect"));
        assert!(svg.contains("geometricPrecision"));
    }

    #[test]
    fn test_text_notations() {
        let mut builder = StructureBuilder::default();
        builder.parse_formula("OH2").unwrap();
        assert_eq!(builder.linear_formula(), "O-H-H");

        let scene = builder.render_scene(DisplayMode::Molecular);
        assert_eq!(scene.primitives_in(RenderLayer::Text).count(), 1);
    }

    #[test]
    fn test_preset_round_trip() {
        let mut builder = StructureBuilder::default();
        builder.parse_formula("CO2").unwrap();
        let ids: Vec<_> = builder.graph().atom_ids().collect();
        builder.graph_mut().add_bond(ids[0], ids[1]).unwrap();
        let double = builder.graph_mut().add_bond(ids[0], ids[2]).unwrap();
        builder
            .graph_mut()
            .bond_mut(double)
            .unwrap()
            .set_bond_type(BondType::Double);

        let preset = builder.to_preset("carbon dioxide");
        assert_eq!(preset.formula, "CO2");

        let mut other = StructureBuilder::default();
        assert_eq!(other.load_preset(&preset), 0);
        assert_eq!(other.graph().atom_count(), 3);
        assert_eq!(other.graph().bond_count(), 2);
        assert_eq!(other.formula(), "CO2");
    }
}
