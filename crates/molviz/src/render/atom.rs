//! Atom circles, labels and skeletal vertices.

use molviz_core::{
    draw::{MIN_FONT_SIZE, Primitive, RenderLayer, TextRun},
    geometry::Point,
};

use super::Painter;
use crate::model::{
    Atom, AtomDisplayMode,
    atom::{charge_label, hydrogen_label},
};

/// Horizontal gap between an atom and its charge label.
const CHARGE_GAP: f32 = 15.0;
/// Charge labels use this fraction of the default font size.
const CHARGE_FONT_RATIO: f32 = 0.7;
const VERTEX_RADIUS: f32 = 1.5;
const VERTEX_OPACITY: f32 = 0.6;

/// Text drawn at the atom: element symbol plus attached hydrogens when
/// enabled.
pub fn atom_text(atom: &Atom, show_hydrogen: bool) -> String {
    let mut text = atom.element().to_string();
    if show_hydrogen && atom.hydrogen_count() > 0 {
        text.push_str(&hydrogen_label(atom.hydrogen_count()));
    }
    text
}

impl Painter<'_> {
    /// Draws the atom circle, label and charge, plus its electron ring in
    /// electron display mode. Hidden atoms draw nothing.
    pub(crate) fn draw_atom(&mut self, atom: &Atom, position: Point) {
        let mode = atom.display_mode();
        if mode == AtomDisplayMode::Hidden {
            return;
        }
        let quality = self.quality;
        let radius = atom.radius().max(0.0) * quality;
        let font_size = atom.font_size().max(MIN_FONT_SIZE) * quality;

        if radius > 0.0 && matches!(mode, AtomDisplayMode::Normal | AtomDisplayMode::Electron) {
            let fill = self.cache.fill(atom.fill_color(), 1.0);
            let outline = self.style.outline_thickness();
            let stroke = (outline > 0.0)
                .then(|| self.cache.stroke(self.palette.outline, 1.0, outline * quality));
            self.scene.push(
                RenderLayer::Atoms,
                Primitive::circle(position, radius, Some(fill), stroke),
            );
        }

        let text_style = self.cache.text_style(self.style.font_family(), font_size);
        let text_color = self.cache.fill(atom.text_color(), 1.0);
        self.scene.push(
            RenderLayer::Text,
            Primitive::text(TextRun::new(
                atom_text(atom, self.style.show_hydrogen()),
                position,
                text_style,
                text_color,
            )),
        );

        if self.style.show_charges() {
            if let Some(label) = charge_label(atom.charge()) {
                let size = (self.style.font_size() * CHARGE_FONT_RATIO).round() * quality;
                let text_radius = radius.max(font_size);
                let anchor = Point::new(
                    position.x() + text_radius + CHARGE_GAP * quality,
                    position.y() - text_radius / 2.0,
                );
                let style = self.cache.text_style(self.style.font_family(), size);
                self.scene.push(
                    RenderLayer::Text,
                    Primitive::text(TextRun::new(label, anchor, style, text_color)),
                );
            }
        }

        if mode == AtomDisplayMode::Electron {
            self.draw_electrons(atom, position);
        }
    }

    /// Marks a carbon vertex in skeletal notation: nothing for chain
    /// carbons of degree two, a faint dot otherwise.
    pub(crate) fn draw_vertex(&mut self, position: Point, degree: usize) {
        if degree == 2 {
            return;
        }
        let fill = self.cache.fill(self.palette.text, VERTEX_OPACITY);
        self.scene.push(
            RenderLayer::Atoms,
            Primitive::circle(position, VERTEX_RADIUS * self.quality, Some(fill), None),
        );
    }
}
