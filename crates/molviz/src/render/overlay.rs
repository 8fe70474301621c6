//! Electron rings and lone-pair dots.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use molviz_core::{
    color::Color,
    draw::{Primitive, RenderLayer},
    element,
    geometry::Point,
};

use super::Painter;
use crate::model::Atom;

const ELECTRON_RADIUS: f32 = 1.5;
const ELECTRON_ORBIT_GAP: f32 = 20.0;
const ELECTRON_OPACITY: f32 = 0.7;
const LONE_PAIR_RADIUS: f32 = 2.0;
const LONE_PAIR_GAP: f32 = 15.0;
const LONE_PAIR_SPACING: f32 = 4.0;
const LONE_PAIR_OPACITY: f32 = 0.8;

/// Electrons drawn around an atom: the neutral count minus the charge.
pub fn electron_count(atom: &Atom) -> u32 {
    let base = i64::from(element::base_electrons(atom.element()));
    u32::try_from((base - i64::from(atom.charge())).max(0)).unwrap_or(0)
}

/// Centers of `count` dots evenly spaced on a circle.
pub fn ring_points(center: Point, radius: f32, count: u32) -> Vec<Point> {
    (0..count)
        .map(|i| {
            let angle = i as f32 * TAU / count as f32;
            center.add_point(Point::from_angle(angle).scale(radius))
        })
        .collect()
}

/// Dot pairs for `count` lone pairs on an atom with `degree` bonds. The
/// first pair is rotated away from the bonds; pairs are at least a quarter
/// turn apart.
pub fn lone_pair_points(
    center: Point,
    distance: f32,
    spacing: f32,
    count: u32,
    degree: usize,
) -> Vec<(Point, Point)> {
    let offset = if degree == 0 {
        0.0
    } else {
        PI / (2.0 + degree as f32)
    };
    let step = TAU / count.max(4) as f32;
    (0..count)
        .map(|i| {
            let angle = offset + i as f32 * step;
            let pair = center.add_point(Point::from_angle(angle).scale(distance));
            let half = Point::from_angle(angle + FRAC_PI_2).scale(spacing / 2.0);
            (pair.add_point(half), pair.sub_point(half))
        })
        .collect()
}

impl Painter<'_> {
    pub(crate) fn draw_electrons(&mut self, atom: &Atom, position: Point) {
        let count = electron_count(atom);
        if count == 0 {
            return;
        }
        let quality = self.quality;
        let orbit = atom.radius().max(0.0) * quality + ELECTRON_ORBIT_GAP * quality;
        let fill = self
            .cache
            .fill(Color::from_rgb8(255, 0, 0), ELECTRON_OPACITY);
        self.scene.extend(
            RenderLayer::Overlay,
            ring_points(position, orbit, count).into_iter().map(|dot| {
                Primitive::circle(dot, ELECTRON_RADIUS * quality, Some(fill), None)
            }),
        );
    }

    pub(crate) fn draw_lone_pairs(&mut self, atom: &Atom, position: Point, degree: usize) {
        let count = element::lone_pairs(atom.element());
        if count == 0 {
            return;
        }
        let quality = self.quality;
        let distance = atom.radius().max(0.0) * quality + LONE_PAIR_GAP * quality;
        let fill = self.cache.fill(self.palette.text, LONE_PAIR_OPACITY);
        let radius = LONE_PAIR_RADIUS * quality;
        let pairs = lone_pair_points(position, distance, LONE_PAIR_SPACING * quality, count, degree);
        for (first, second) in pairs {
            self.scene.extend(
                RenderLayer::Overlay,
                [
                    Primitive::circle(first, radius, Some(fill), None),
                    Primitive::circle(second, radius, Some(fill), None),
                ],
            );
        }
    }
}
