//! Bond geometry.
//!
//! [`geometry`] and [`end_cap`] are pure functions from resolved endpoints
//! to primitives, so each bond type can be checked without a graph.

use std::f32::consts::{FRAC_PI_6, PI};

use molviz_core::{
    draw::{Primitive, RenderLayer, StrokeDefinition, StrokeStyle},
    geometry::{Bounds, Point, Size},
};

use super::Painter;
use crate::model::{Bond, BondType, EndStyle};

/// Moves both endpoints `offset` along the bond normal and scales the
/// segment by `length_multiplier` around its midpoint. Returns `None` for
/// coincident endpoints.
pub fn adjust_endpoints(
    p1: Point,
    p2: Point,
    length_multiplier: f32,
    offset: f32,
) -> Option<(Point, Point)> {
    if p1 == p2 {
        return None;
    }
    let dir = p2.sub_point(p1).normalize();
    let normal = dir.perpendicular();
    let center = p1.midpoint(p2);
    let half = dir.scale(p1.distance(p2) * length_multiplier / 2.0);
    let shift = normal.scale(offset);
    Some((
        center.sub_point(half).add_point(shift),
        center.add_point(half).add_point(shift),
    ))
}

/// Primitives for a bond of `bond_type` from `p1` to `p2`.
///
/// `thickness` and `quality` are already in diagram units; `stroke` is the
/// solid base stroke, from which dashed and thinner variants are derived.
pub fn geometry(
    bond_type: BondType,
    p1: Point,
    p2: Point,
    thickness: f32,
    quality: f32,
    stroke: &StrokeDefinition,
) -> Vec<Primitive> {
    let dir = p2.sub_point(p1).normalize();
    let normal = dir.perpendicular();
    let shifted = |distance: f32| {
        let shift = normal.scale(distance);
        Primitive::line(p1.add_point(shift), p2.add_point(shift), stroke.clone())
    };
    let patterned = |style: StrokeStyle, width: f32| {
        let mut stroke = stroke.clone().with_style(style).with_dash_scale(quality);
        stroke.set_width(width);
        stroke
    };

    match bond_type {
        BondType::Single => vec![Primitive::line(p1, p2, stroke.clone())],
        BondType::Double => {
            let spacing = thickness + 2.0 * quality;
            vec![shifted(spacing / 2.0), shifted(-spacing / 2.0)]
        }
        BondType::Triple => {
            let spacing = thickness + quality;
            vec![shifted(0.0), shifted(spacing), shifted(-spacing)]
        }
        BondType::Wedge => {
            let half_base = normal.scale(1.5 * thickness);
            vec![Primitive::Polygon {
                points: vec![p1, p2.add_point(half_base), p2.sub_point(half_base)],
                fill: stroke.color(),
            }]
        }
        BondType::Dash => vec![Primitive::line(
            p1,
            p2,
            patterned(StrokeStyle::Dashed, thickness),
        )],
        BondType::Wavy => {
            let length = p1.distance(p2);
            let segments = ((length / (10.0 * quality)).round() as usize).max(1);
            let mut points = Vec::with_capacity(segments + 1);
            points.push(p1);
            for i in 1..=segments {
                let t = i as f32 / segments as f32;
                let wave = (4.0 * PI * t).sin() * thickness;
                points.push(p1.lerp(p2, t).add_point(normal.scale(wave)));
            }
            vec![Primitive::Polyline {
                points,
                stroke: stroke.clone(),
            }]
        }
        BondType::Partial => vec![Primitive::line(
            p1,
            p2,
            patterned(StrokeStyle::Dotted, thickness),
        )],
        BondType::Coordinate => {
            let arm = dir.scale(3.0 * thickness);
            vec![
                Primitive::line(p1, p2, stroke.clone()),
                Primitive::line(p2, p2.sub_point(arm.rotate(FRAC_PI_6)), stroke.clone()),
                Primitive::line(p2, p2.sub_point(arm.rotate(-FRAC_PI_6)), stroke.clone()),
            ]
        }
        BondType::Aromatic => {
            let shift = normal.scale(thickness + 3.0 * quality);
            let (a, b) = (p1.add_point(shift), p2.add_point(shift));
            vec![
                Primitive::line(p1, p2, stroke.clone()),
                Primitive::line(
                    a.lerp(b, 0.15),
                    a.lerp(b, 0.85),
                    patterned(StrokeStyle::Dashed, thickness * 0.7),
                ),
            ]
        }
        BondType::Hydrogen => vec![Primitive::line(
            p1,
            p2,
            patterned(StrokeStyle::Dotted, thickness * 0.5),
        )],
        BondType::Ionic => {
            let tick = normal.scale(2.0 * thickness);
            vec![
                Primitive::line(p1, p2, stroke.clone()),
                Primitive::line(p1.add_point(tick), p1.sub_point(tick), stroke.clone()),
                Primitive::line(p2.add_point(tick), p2.sub_point(tick), stroke.clone()),
            ]
        }
        BondType::Hidden => Vec::new(),
    }
}

/// Terminal decoration at `p2`, sized `2 · thickness`.
pub fn end_cap(
    end_style: EndStyle,
    p1: Point,
    p2: Point,
    thickness: f32,
    stroke: &StrokeDefinition,
) -> Vec<Primitive> {
    let size = 2.0 * thickness;
    match end_style {
        EndStyle::Normal => Vec::new(),
        EndStyle::Arrow => {
            let arm = p2.sub_point(p1).normalize().scale(size);
            vec![
                Primitive::line(p2, p2.sub_point(arm.rotate(FRAC_PI_6)), stroke.clone()),
                Primitive::line(p2, p2.sub_point(arm.rotate(-FRAC_PI_6)), stroke.clone()),
            ]
        }
        EndStyle::Circle => vec![Primitive::circle(p2, size, None, Some(stroke.clone()))],
        EndStyle::Square => vec![Primitive::Rect {
            bounds: Bounds::new_from_center(p2, Size::new(size * 2.0, size * 2.0)),
            fill: None,
            stroke: Some(stroke.clone()),
        }],
    }
}

impl Painter<'_> {
    /// Draws `bond` between the diagram-space positions of its atoms.
    pub(crate) fn draw_bond(&mut self, bond: &Bond, from: Point, to: Point) {
        if bond.bond_type() == BondType::Hidden {
            return;
        }
        let time = self.time();
        let length_multiplier = bond.length_multiplier().sample(time).max(0.1);
        let offset = bond.offset().sample(time) * self.coordinate_scale;
        let Some((p1, p2)) = adjust_endpoints(from, to, length_multiplier, offset) else {
            return;
        };

        let thickness = bond.thickness().max(0.1) * self.quality;
        let stroke = self.cache.stroke(bond.color(), bond.opacity(), thickness);
        let quality = self.quality;
        self.scene.extend(
            RenderLayer::Bonds,
            geometry(bond.bond_type(), p1, p2, thickness, quality, &stroke),
        );
        self.scene.extend(
            RenderLayer::Bonds,
            end_cap(bond.end_style(), p1, p2, thickness, &stroke),
        );
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use molviz_core::color::Color;

    use super::*;

    fn stroke() -> StrokeDefinition {
        StrokeDefinition::solid(Color::default(), 2.0)
    }

    fn lines(primitives: &[Primitive]) -> Vec<(Point, Point, &StrokeDefinition)> {
        primitives
            .iter()
            .filter_map(|primitive| match primitive {
                Primitive::Line { from, to, stroke } => Some((*from, *to, stroke)),
                _ => None,
            })
            .collect()
    }

    const P1: Point = Point::new(0.0, 0.0);
    const P2: Point = Point::new(100.0, 0.0);

    #[test]
    fn test_adjust_endpoints() {
        let (a, b) = adjust_endpoints(P1, P2, 0.5, 10.0).unwrap();
        assert_approx_eq!(f32, a.x(), 25.0);
        assert_approx_eq!(f32, b.x(), 75.0);
        assert_approx_eq!(f32, a.y(), 10.0);
        assert_approx_eq!(f32, b.y(), 10.0);
        assert!(adjust_endpoints(P1, P1, 1.0, 0.0).is_none());
    }

    #[test]
    fn test_primitive_counts_per_type() {
        let expected = [
            (BondType::Single, 1),
            (BondType::Double, 2),
            (BondType::Triple, 3),
            (BondType::Wedge, 1),
            (BondType::Dash, 1),
            (BondType::Wavy, 1),
            (BondType::Partial, 1),
            (BondType::Coordinate, 3),
            (BondType::Aromatic, 2),
            (BondType::Hydrogen, 1),
            (BondType::Ionic, 3),
            (BondType::Hidden, 0),
        ];
        for (bond_type, count) in expected {
            let primitives = geometry(bond_type, P1, P2, 2.0, 1.0, &stroke());
            assert_eq!(primitives.len(), count, "{bond_type}");
        }
    }

    #[test]
    fn test_double_spacing() {
        let primitives = geometry(BondType::Double, P1, P2, 2.0, 1.0, &stroke());
        let lines = lines(&primitives);
        // spacing = t + 2q = 4, lines at ±2
        let mut offsets: Vec<f32> = lines.iter().map(|(from, _, _)| from.y()).collect();
        offsets.sort_by(f32::total_cmp);
        assert_approx_eq!(f32, offsets[0], -2.0);
        assert_approx_eq!(f32, offsets[1], 2.0);
    }

    #[test]
    fn test_triple_spacing() {
        let primitives = geometry(BondType::Triple, P1, P2, 2.0, 1.5, &stroke());
        let mut offsets: Vec<f32> = lines(&primitives).iter().map(|(from, _, _)| from.y()).collect();
        offsets.sort_by(f32::total_cmp);
        assert_approx_eq!(f32, offsets[0], -3.5);
        assert_approx_eq!(f32, offsets[1], 0.0);
        assert_approx_eq!(f32, offsets[2], 3.5);
    }

    #[test]
    fn test_wedge_triangle() {
        let primitives = geometry(BondType::Wedge, P1, P2, 2.0, 1.0, &stroke());
        let Primitive::Polygon { points, .. } = &primitives[0] else {
            panic!("wedge must be a polygon");
        };
        assert_eq!(points[0], P1);
        assert_approx_eq!(f32, points[1].distance(points[2]), 6.0);
        assert_approx_eq!(f32, points[1].x(), 100.0);
    }

    #[test]
    fn test_wavy_segments() {
        let primitives = geometry(BondType::Wavy, P1, P2, 2.0, 1.0, &stroke());
        let Primitive::Polyline { points, .. } = &primitives[0] else {
            panic!("wavy must be a polyline");
        };
        assert_eq!(points.len(), 11);
        assert_eq!(points[0], P1);
        for point in points {
            assert!(point.y().abs() <= 2.0 + 1e-4);
        }
        assert_approx_eq!(f32, points[10].x(), 100.0);

        let short = geometry(BondType::Wavy, P1, Point::new(2.0, 0.0), 2.0, 1.0, &stroke());
        let Primitive::Polyline { points, .. } = &short[0] else {
            panic!("wavy must be a polyline");
        };
        assert_eq!(points.len(), 2);
    }

    #[test]
    fn test_coordinate_arrowhead() {
        let primitives = geometry(BondType::Coordinate, P1, P2, 2.0, 1.0, &stroke());
        let lines = lines(&primitives);
        for (from, to, _) in &lines[1..] {
            assert_eq!(*from, P2);
            assert_approx_eq!(f32, from.distance(*to), 6.0, epsilon = 1e-4);
            assert!(to.x() < 100.0);
        }
        assert!(lines[1].1.y() * lines[2].1.y() < 0.0);
    }

    #[test]
    fn test_aromatic_inner_line() {
        let primitives = geometry(BondType::Aromatic, P1, P2, 2.0, 1.0, &stroke());
        let lines = lines(&primitives);
        let (from, to, inner) = lines[1];
        assert_approx_eq!(f32, from.x(), 15.0);
        assert_approx_eq!(f32, to.x(), 85.0);
        assert_approx_eq!(f32, from.y(), 5.0);
        assert_approx_eq!(f32, inner.width(), 1.4);
        assert_eq!(inner.style(), &StrokeStyle::Dashed);
    }

    #[test]
    fn test_hydrogen_is_thin_and_dotted() {
        let primitives = geometry(BondType::Hydrogen, P1, P2, 2.0, 1.0, &stroke());
        let (_, _, line) = lines(&primitives)[0];
        assert_approx_eq!(f32, line.width(), 1.0);
        assert_eq!(line.style(), &StrokeStyle::Dotted);
    }

    #[test]
    fn test_ionic_ticks() {
        let primitives = geometry(BondType::Ionic, P1, P2, 2.0, 1.0, &stroke());
        let lines = lines(&primitives);
        assert_approx_eq!(f32, lines[1].0.distance(lines[1].1), 8.0);
        assert_approx_eq!(f32, lines[1].0.x(), 0.0);
        assert_approx_eq!(f32, lines[2].0.x(), 100.0);
    }

    #[test]
    fn test_end_caps() {
        assert!(end_cap(EndStyle::Normal, P1, P2, 2.0, &stroke()).is_empty());
        assert_eq!(end_cap(EndStyle::Arrow, P1, P2, 2.0, &stroke()).len(), 2);

        let circle = end_cap(EndStyle::Circle, P1, P2, 2.0, &stroke());
        let Primitive::Ellipse { radius_x, fill, .. } = &circle[0] else {
            panic!("circle cap must be an ellipse");
        };
        assert_approx_eq!(f32, *radius_x, 4.0);
        assert!(fill.is_none());

        let square = end_cap(EndStyle::Square, P1, P2, 2.0, &stroke());
        let bounds = square[0].bounds().unwrap();
        assert_approx_eq!(f32, bounds.width(), 8.0);
        assert_eq!(bounds.center(), P2);
    }
}
