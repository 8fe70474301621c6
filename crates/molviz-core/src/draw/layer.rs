//! Layered scenes.
//!
//! The renderer emits primitives tagged with a [`RenderLayer`]; a [`Scene`]
//! keeps them in emission order and groups them by layer when converted to
//! SVG, so atoms always cover the bonds that meet them.
//!
//! ```
//! # use molviz_core::draw::{Primitive, RenderLayer, Scene, StrokeDefinition};
//! # use molviz_core::geometry::Point;
//! let mut scene = Scene::new();
//! scene.push(
//!     RenderLayer::Bonds,
//!     Primitive::line(Point::new(0.0, 0.0), Point::new(80.0, 0.0), StrokeDefinition::default()),
//! );
//! assert_eq!(scene.len(), 1);
//! let svg_nodes = scene.to_svg_nodes();
//! assert_eq!(svg_nodes.len(), 1);
//! ```

use svg::node::element as svg_element;

use crate::{draw::Primitive, geometry::Bounds};

pub type SvgNode = Box<dyn svg::Node>;

/// Z-order of scene content, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    Background,
    Bonds,
    Atoms,
    Overlay,
    Text,
}

impl RenderLayer {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Bonds => "bonds",
            Self::Atoms => "atoms",
            Self::Overlay => "overlay",
            Self::Text => "text",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    items: Vec<(RenderLayer, Primitive)>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, layer: RenderLayer, primitive: Primitive) {
        self.items.push((layer, primitive));
    }

    pub fn extend(&mut self, layer: RenderLayer, primitives: impl IntoIterator<Item = Primitive>) {
        self.items
            .extend(primitives.into_iter().map(|primitive| (layer, primitive)));
    }

    pub fn merge(&mut self, other: Scene) {
        self.items.extend(other.items);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Primitives in emission order.
    pub fn iter(&self) -> impl Iterator<Item = &(RenderLayer, Primitive)> {
        self.items.iter()
    }

    pub fn primitives_in(&self, layer: RenderLayer) -> impl Iterator<Item = &Primitive> {
        self.items
            .iter()
            .filter(move |(item_layer, _)| *item_layer == layer)
            .map(|(_, primitive)| primitive)
    }

    /// Union of all primitive bounds; `None` for an empty scene.
    pub fn bounds(&self) -> Option<Bounds> {
        self.items
            .iter()
            .filter_map(|(_, primitive)| primitive.bounds())
            .reduce(|acc, bounds| acc.merge(&bounds))
    }

    /// One SVG group per layer, back to front, stable within a layer.
    pub fn to_svg_nodes(&self) -> Vec<SvgNode> {
        let mut sorted: Vec<&(RenderLayer, Primitive)> = self.items.iter().collect();
        sorted.sort_by_key(|(layer, _)| *layer);

        let mut result = Vec::new();
        let mut current: Option<(RenderLayer, svg_element::Group)> = None;

        for (layer, primitive) in sorted {
            let group = match current.take() {
                Some((current_layer, group)) if current_layer == *layer => group,
                Some((_, finished)) => {
                    result.push(Box::new(finished) as SvgNode);
                    svg_element::Group::new().set("data-layer", layer.name())
                }
                None => svg_element::Group::new().set("data-layer", layer.name()),
            };
            current = Some((*layer, group.add(primitive.to_svg_node())));
        }

        if let Some((_, group)) = current {
            result.push(Box::new(group) as SvgNode);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        color::Color,
        draw::StrokeDefinition,
        geometry::Point,
    };

    fn dot(x: f32) -> Primitive {
        Primitive::circle(Point::new(x, 0.0), 1.0, Some(Color::default()), None)
    }

    #[test]
    fn test_scene_new() {
        let scene = Scene::new();
        assert!(scene.is_empty());
        assert!(scene.bounds().is_none());
        assert!(scene.to_svg_nodes().is_empty());
    }

    #[test]
    fn test_scene_groups_by_layer() {
        let mut scene = Scene::new();
        scene.push(RenderLayer::Atoms, dot(0.0));
        scene.push(
            RenderLayer::Bonds,
            Primitive::line(Point::default(), Point::new(1.0, 1.0), StrokeDefinition::default()),
        );
        scene.push(RenderLayer::Atoms, dot(5.0));

        let nodes = scene.to_svg_nodes();
        assert_eq!(nodes.len(), 2);
        assert!(nodes[0].to_string().contains("data-layer=\"bonds\""));
        assert!(nodes[1].to_string().contains("data-layer=\"atoms\""));
    }

    #[test]
    fn test_scene_merge_and_filter() {
        let mut first = Scene::new();
        first.push(RenderLayer::Atoms, dot(0.0));

        let mut second = Scene::new();
        second.extend(RenderLayer::Overlay, [dot(1.0), dot(2.0)]);

        first.merge(second);
        assert_eq!(first.len(), 3);
        assert_eq!(first.primitives_in(RenderLayer::Overlay).count(), 2);
    }

    #[test]
    fn test_scene_bounds() {
        let mut scene = Scene::new();
        scene.extend(RenderLayer::Atoms, [dot(-10.0), dot(10.0)]);
        let bounds = scene.bounds().unwrap();
        assert_eq!(bounds.min_x(), -11.0);
        assert_eq!(bounds.max_x(), 11.0);
    }

    #[test]
    fn test_layer_order() {
        assert!(RenderLayer::Background < RenderLayer::Bonds);
        assert!(RenderLayer::Bonds < RenderLayer::Atoms);
        assert!(RenderLayer::Atoms < RenderLayer::Overlay);
        assert!(RenderLayer::Overlay < RenderLayer::Text);
    }
}
