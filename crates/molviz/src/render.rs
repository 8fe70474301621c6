//! Diagram rendering.
//!
//! A [`Renderer`] turns a [`MoleculeGraph`] into a layered [`Scene`] of draw
//! primitives. Coordinates are multiplied by the diagram scale and the
//! rendering-quality factor; stroke widths, dot radii and fonts by the
//! quality factor only.
//!
//! Which atoms and overlays appear depends on the [`DisplayMode`]; the
//! composition per notation lives in [`crate::notation`]. The renderer keeps
//! a cache of strokes, fills and text styles that is dropped whenever the
//! colors or fonts it was built from change.
//!
//! ```
//! use molviz::{
//!     config::{DisplayMode, StyleConfig},
//!     model::{Atom, MoleculeGraph},
//!     render::Renderer,
//! };
//! use molviz_core::geometry::Point;
//!
//! let mut graph = MoleculeGraph::new();
//! let o = graph.add_atom(Atom::new("O"));
//! let h = graph.add_atom(Atom::new("H").with_position(Point::new(80.0, 0.0)));
//! graph.add_bond(o, h).unwrap();
//!
//! let mut renderer = Renderer::new(StyleConfig::default());
//! let scene = renderer.render(&graph, DisplayMode::Structural);
//! assert!(!scene.is_empty());
//! ```

pub mod bond;

mod atom;
mod overlay;

use std::collections::HashMap;

use log::{debug, error, trace};

use molviz_core::{
    animation::{Animated, ValueRange},
    color::Color,
    draw::{Primitive, RenderLayer, Scene, StrokeDefinition, TextRun, TextStyle, measure},
    geometry::{Bounds, Point, Size},
};

use crate::{
    config::{DisplayMode, StyleConfig},
    model::MoleculeGraph,
    notation,
};

/// Range of the animated diagram scale.
pub const SCALE_RANGE: ValueRange = ValueRange::new(0.1, 10.0);

/// Width and height of the box text notations are fitted into, before the
/// quality factor is applied.
const TEXT_BLOCK_WIDTH: f32 = 400.0;
const TEXT_BLOCK_HEIGHT: f32 = 100.0;

/// Number of cached rendering resources, by kind.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub strokes: usize,
    pub fills: usize,
    pub text_styles: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct StrokeKey {
    color: Color,
    opacity: u32,
    width: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct FillKey {
    color: Color,
    opacity: u32,
}

/// Strokes, fills and text styles created during rendering, keyed by the
/// values they were built from.
#[derive(Debug, Default)]
struct ResourceCache {
    strokes: HashMap<StrokeKey, StrokeDefinition>,
    fills: HashMap<FillKey, Color>,
    text_styles: HashMap<String, TextStyle>,
}

impl ResourceCache {
    fn stroke(&mut self, color: Color, opacity: f32, width: f32) -> StrokeDefinition {
        let key = StrokeKey {
            color,
            opacity: opacity.to_bits(),
            width: width.to_bits(),
        };
        self.strokes
            .entry(key)
            .or_insert_with(|| StrokeDefinition::solid(color.with_opacity(opacity), width))
            .clone()
    }

    fn fill(&mut self, color: Color, opacity: f32) -> Color {
        let key = FillKey {
            color,
            opacity: opacity.to_bits(),
        };
        *self
            .fills
            .entry(key)
            .or_insert_with(|| color.with_opacity(opacity))
    }

    fn text_style(&mut self, family: &str, size: f32) -> TextStyle {
        let style = TextStyle::new(family, size);
        self.text_styles
            .entry(style.cache_key())
            .or_insert(style)
            .clone()
    }

    fn clear(&mut self) {
        self.strokes.clear();
        self.fills.clear();
        self.text_styles.clear();
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            strokes: self.strokes.len(),
            fills: self.fills.len(),
            text_styles: self.text_styles.len(),
        }
    }
}

/// Colors from the style configuration, parsed once per pass.
#[derive(Debug, Clone)]
struct Palette {
    outline: Color,
    text: Color,
}

impl Palette {
    fn resolve(style: &StyleConfig) -> Result<Self, String> {
        Ok(Self {
            outline: style.bond_color()?,
            text: style.text_color()?,
        })
    }
}

/// State of a single render pass.
pub(crate) struct Painter<'a> {
    style: &'a StyleConfig,
    palette: Palette,
    cache: &'a mut ResourceCache,
    quality: f32,
    coordinate_scale: f32,
    time: f32,
    scene: Scene,
}

impl Painter<'_> {
    pub(crate) fn style(&self) -> &StyleConfig {
        self.style
    }

    pub(crate) fn time(&self) -> f32 {
        self.time
    }

    /// Maps a model position into diagram coordinates.
    pub(crate) fn project(&self, position: Point) -> Point {
        position.scale(self.coordinate_scale)
    }

    /// Draws `content` as a single text block centered in the text box
    /// around the origin, used by the formula notations. Text wider or taller
    /// than the box is drawn with a smaller font so that it fits.
    pub(crate) fn draw_text_block(&mut self, content: &str) {
        if content.is_empty() {
            return;
        }
        let frame = Bounds::new_from_center(
            Point::default(),
            Size::new(TEXT_BLOCK_WIDTH, TEXT_BLOCK_HEIGHT).scale(self.quality),
        );
        let mut size = self.style.font_size() * self.quality;
        let measured = measure(content, &TextStyle::new(self.style.font_family(), size));
        let fit = (frame.width() / measured.width()).min(frame.height() / measured.height());
        if fit < 1.0 {
            trace!(fit; "Shrinking text block to its box");
            size *= fit;
        }

        let style = self.cache.text_style(self.style.font_family(), size);
        let color = self.cache.fill(self.palette.text, 1.0);
        self.scene.push(
            RenderLayer::Text,
            Primitive::text(TextRun::new(content, frame.center(), style, color)),
        );
    }

    fn finish(self) -> Scene {
        self.scene
    }
}

/// Renders molecule graphs into scenes.
#[derive(Debug)]
pub struct Renderer {
    style: StyleConfig,
    scale: Animated,
    cache: ResourceCache,
    last_scene: Option<Scene>,
}

impl Renderer {
    pub fn new(style: StyleConfig) -> Self {
        let scale = Animated::new(style.scale(), SCALE_RANGE);
        Self {
            style,
            scale,
            cache: ResourceCache::default(),
            last_scene: None,
        }
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Replaces the style. Cached resources are dropped when any color, the
    /// font family or the font size changes.
    pub fn set_style(&mut self, style: StyleConfig) {
        let invalidate = style.font_family() != self.style.font_family()
            || style.font_size() != self.style.font_size()
            || style.bond_color() != self.style.bond_color()
            || style.text_color() != self.style.text_color()
            || style.quality() != self.style.quality();
        if invalidate {
            debug!(cached:? = self.cache.stats(); "Invalidating rendering resources");
            self.cache.clear();
        }
        if style.scale() != self.style.scale() {
            self.scale.set(style.scale());
        }
        self.style = style;
    }

    /// The diagram scale channel, for attaching keyframes.
    pub fn scale_channel_mut(&mut self) -> &mut Animated {
        &mut self.scale
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drops all cached resources.
    pub fn release(&mut self) {
        self.cache.clear();
    }

    /// The scene produced by the last successful pass.
    pub fn last_scene(&self) -> Option<&Scene> {
        self.last_scene.as_ref()
    }

    /// Renders `graph` at time zero.
    pub fn render(&mut self, graph: &MoleculeGraph, mode: DisplayMode) -> Scene {
        self.render_at(graph, mode, 0.0)
    }

    /// Renders `graph` with every animated channel sampled at `time`.
    ///
    /// If the configured colors cannot be resolved the pass is skipped and
    /// the previous scene, or an empty one, is returned.
    pub fn render_at(&mut self, graph: &MoleculeGraph, mode: DisplayMode, time: f32) -> Scene {
        let palette = match Palette::resolve(&self.style) {
            Ok(palette) => palette,
            Err(err) => {
                error!(err:%; "Failed to create rendering resources, skipping pass");
                return self.last_scene.clone().unwrap_or_default();
            }
        };

        let quality = self.style.quality().factor();
        let coordinate_scale = self.scale.sample(time) * quality;
        let mut painter = Painter {
            style: &self.style,
            palette,
            cache: &mut self.cache,
            quality,
            coordinate_scale,
            time,
            scene: Scene::new(),
        };
        notation::compose(&mut painter, graph, mode);
        let scene = painter.finish();

        debug!(
            mode:%,
            atoms = graph.atom_count(),
            primitives = scene.len();
            "Rendered scene"
        );
        trace!(cache:? = self.cache.stats(); "Resource cache");
        self.last_scene = Some(scene.clone());
        scene
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::{
        config::RenderingQuality,
        model::{Atom, BondType},
    };

    fn water() -> MoleculeGraph {
        let mut graph = MoleculeGraph::new();
        let o = graph.add_atom(Atom::new("O"));
        let h1 = graph.add_atom(Atom::new("H").with_position(Point::new(80.0, 0.0)));
        let h2 = graph.add_atom(Atom::new("H").with_position(Point::new(-40.0, 60.0)));
        graph.add_bond(o, h1).unwrap();
        graph.add_bond(o, h2).unwrap();
        graph
    }

    fn first_line(scene: &Scene) -> (Point, Point, f32) {
        scene
            .primitives_in(RenderLayer::Bonds)
            .find_map(|primitive| match primitive {
                Primitive::Line { from, to, stroke } => Some((*from, *to, stroke.width())),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn test_empty_graph_renders_nothing() {
        let mut renderer = Renderer::new(StyleConfig::default());
        for mode in DisplayMode::ALL {
            assert!(renderer.render(&MoleculeGraph::new(), mode).is_empty());
        }
    }

    #[test]
    fn test_structural_layers() {
        let mut renderer = Renderer::new(StyleConfig::default());
        let scene = renderer.render(&water(), DisplayMode::Structural);
        assert_eq!(scene.primitives_in(RenderLayer::Bonds).count(), 2);
        assert_eq!(scene.primitives_in(RenderLayer::Atoms).count(), 3);
        assert_eq!(scene.primitives_in(RenderLayer::Text).count(), 3);
    }

    #[test]
    fn test_quality_scales_coordinates_and_widths() {
        let mut style = StyleConfig::default();
        style.set_quality(RenderingQuality::Ultra);
        style.set_scale(1.5);
        let mut renderer = Renderer::new(style);
        let scene = renderer.render(&water(), DisplayMode::Structural);

        let (_, to, width) = first_line(&scene);
        assert_approx_eq!(f32, to.x(), 80.0 * 1.5 * 2.0);
        assert_approx_eq!(f32, width, 4.0);
    }

    #[test]
    fn test_scale_channel_is_sampled() {
        let mut renderer = Renderer::new(StyleConfig::default());
        renderer
            .scale_channel_mut()
            .set_keyframes(vec![
                molviz_core::animation::Keyframe::new(0.0, 1.0),
                molviz_core::animation::Keyframe::new(1.0, 3.0),
            ])
            .unwrap();
        let scene = renderer.render_at(&water(), DisplayMode::Structural, 0.5);
        let (_, to, _) = first_line(&scene);
        assert_approx_eq!(f32, to.x(), 160.0);
    }

    #[test]
    fn test_hidden_bonds_are_skipped() {
        let mut graph = water();
        let ids: Vec<_> = graph.bonds().map(|(id, _)| id).collect();
        for id in ids {
            graph.bond_mut(id).unwrap().set_bond_type(BondType::Hidden);
        }
        let mut renderer = Renderer::new(StyleConfig::default());
        let scene = renderer.render(&graph, DisplayMode::Structural);
        assert_eq!(scene.primitives_in(RenderLayer::Bonds).count(), 0);
    }

    #[test]
    fn test_cache_reused_and_invalidated() {
        let mut renderer = Renderer::new(StyleConfig::default());
        renderer.render(&water(), DisplayMode::Structural);
        let first = renderer.cache_stats();
        assert!(first.strokes > 0);
        assert!(first.text_styles > 0);

        renderer.render(&water(), DisplayMode::Structural);
        assert_eq!(renderer.cache_stats(), first);

        let mut style = renderer.style().clone();
        style.set_show_lone_pairs(true);
        renderer.set_style(style);
        assert_eq!(renderer.cache_stats(), first);

        let mut style = renderer.style().clone();
        style.set_font_size(30.0);
        renderer.set_style(style);
        assert_eq!(renderer.cache_stats(), CacheStats::default());
    }

    #[test]
    fn test_bad_color_keeps_previous_scene() {
        let mut renderer = Renderer::new(StyleConfig::default());
        let good = renderer.render(&water(), DisplayMode::Structural);

        let mut style = renderer.style().clone();
        style.set_text_color("not-a-color");
        renderer.set_style(style);
        let scene = renderer.render(&water(), DisplayMode::Skeletal);
        assert_eq!(scene, good);
    }

    #[test]
    fn test_bad_color_without_previous_scene_is_empty() {
        let mut style = StyleConfig::default();
        style.set_bond_color("#nope");
        let mut renderer = Renderer::new(style);
        assert!(renderer.render(&water(), DisplayMode::Structural).is_empty());
        assert!(renderer.last_scene().is_none());
    }

    #[test]
    fn test_text_notations_emit_single_block() {
        let mut renderer = Renderer::new(StyleConfig::default());
        for mode in [DisplayMode::Linear, DisplayMode::Molecular] {
            let scene = renderer.render(&water(), mode);
            assert_eq!(scene.len(), 1);
            let Some(Primitive::Text(run)) = scene.primitives_in(RenderLayer::Text).next() else {
                panic!("expected a text block");
            };
            assert_eq!(run.position(), Point::default());
        }
    }

    #[test]
    fn test_long_text_block_fits_its_box() {
        let mut graph = MoleculeGraph::new();
        for i in 0..60 {
            graph.add_atom(Atom::new("C").with_position(Point::new(i as f32 * 80.0, 0.0)));
        }
        let mut style = StyleConfig::default();
        style.set_quality(RenderingQuality::High);
        let mut renderer = Renderer::new(style);

        let scene = renderer.render(&graph, DisplayMode::Linear);
        let Some(Primitive::Text(run)) = scene.primitives_in(RenderLayer::Text).next() else {
            panic!("expected a text block");
        };
        assert!(run.style().font_size() < 24.0 * 1.5);
        let size = run.size();
        assert!(size.width() <= 600.0 * 1.01, "width {}", size.width());
        assert!(size.height() <= 150.0);
        assert_eq!(run.position(), Point::default());
    }
}
