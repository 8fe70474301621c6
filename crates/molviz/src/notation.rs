//! Display notations.
//!
//! Each [`DisplayMode`] composes the renderer's bond, atom and overlay
//! drawing differently:
//!
//! | Mode | Content |
//! |------|---------|
//! | Structural, Constitutional | every bond, then every visible atom |
//! | Skeletal | every bond; carbons reduced to vertices where implied |
//! | Electronic | Structural plus lone pairs when enabled |
//! | Linear | `C-H-O`-style text ordered by x |
//! | Molecular | the molecular formula as text |

use std::collections::HashMap;

use log::trace;

use molviz_core::{geometry::Point, identifier::AtomId};

use crate::{
    config::DisplayMode,
    model::{Atom, AtomDisplayMode, MoleculeGraph},
    render::Painter,
};

/// How an atom appears in skeletal notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkeletalVisibility {
    /// Full atom rendering.
    Full,
    /// A small dot marking the vertex.
    Dot,
    /// Nothing; the vertex is implied by the bonds meeting there.
    Implicit,
}

/// Whether an atom keeps its symbol in skeletal notation.
///
/// Non-carbons, charged atoms, atoms carrying hydrogens, atoms explicitly
/// set to a labelled mode and atoms with fewer than two or more than four
/// bonds are shown.
pub fn shows_in_skeleton(atom: &Atom, degree: usize) -> bool {
    atom.element() != "C"
        || atom.charge() != 0
        || atom.hydrogen_count() > 0
        || (atom.is_display_mode_pinned()
            && matches!(
                atom.display_mode(),
                AtomDisplayMode::Normal | AtomDisplayMode::SymbolOnly
            ))
        || !(2..=4).contains(&degree)
}

pub fn skeletal_visibility(atom: &Atom, degree: usize) -> SkeletalVisibility {
    if shows_in_skeleton(atom, degree) {
        SkeletalVisibility::Full
    } else if degree == 2 {
        SkeletalVisibility::Implicit
    } else {
        SkeletalVisibility::Dot
    }
}

/// Draws `graph` in `mode` into the painter's scene.
pub(crate) fn compose(painter: &mut Painter<'_>, graph: &MoleculeGraph, mode: DisplayMode) {
    if graph.is_empty() {
        return;
    }
    match mode {
        DisplayMode::Linear => painter.draw_text_block(&graph.linear_formula()),
        DisplayMode::Molecular => painter.draw_text_block(&graph.formula()),
        DisplayMode::Structural | DisplayMode::Constitutional => {
            let positions = project(painter, graph);
            draw_bonds(painter, graph, &positions);
            draw_atoms(painter, graph, &positions);
        }
        DisplayMode::Skeletal => {
            let positions = project(painter, graph);
            draw_bonds(painter, graph, &positions);
            for (id, atom) in graph.atoms() {
                let Some(position) = positions.get(&id).copied() else {
                    continue;
                };
                let degree = graph.degree(id);
                let visibility = skeletal_visibility(atom, degree);
                trace!(atom:% = id, visibility:?; "Skeletal vertex");
                match visibility {
                    SkeletalVisibility::Full => painter.draw_atom(atom, position),
                    SkeletalVisibility::Dot => painter.draw_vertex(position, degree),
                    SkeletalVisibility::Implicit => {}
                }
            }
        }
        DisplayMode::Electronic => {
            let positions = project(painter, graph);
            draw_bonds(painter, graph, &positions);
            draw_atoms(painter, graph, &positions);
            if painter.style().show_lone_pairs() {
                for (id, atom) in graph.atoms() {
                    if let Some(position) = positions.get(&id).copied() {
                        painter.draw_lone_pairs(atom, position, graph.degree(id));
                    }
                }
            }
        }
    }
}

fn project(painter: &Painter<'_>, graph: &MoleculeGraph) -> HashMap<AtomId, Point> {
    graph
        .positions_at(painter.time())
        .into_iter()
        .map(|(id, position)| (id, painter.project(position)))
        .collect()
}

fn draw_bonds(painter: &mut Painter<'_>, graph: &MoleculeGraph, positions: &HashMap<AtomId, Point>) {
    for (_, bond) in graph.bonds() {
        let (Some(from), Some(to)) = (positions.get(&bond.a()), positions.get(&bond.b())) else {
            continue;
        };
        painter.draw_bond(bond, *from, *to);
    }
}

fn draw_atoms(painter: &mut Painter<'_>, graph: &MoleculeGraph, positions: &HashMap<AtomId, Point>) {
    for (id, atom) in graph.atoms() {
        if let Some(position) = positions.get(&id) {
            painter.draw_atom(atom, *position);
        }
    }
}
