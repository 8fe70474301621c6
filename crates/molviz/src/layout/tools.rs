//! Editing helpers that move atoms or add bonds based on geometry.

use log::debug;

use molviz_core::{geometry::Point, identifier::AtomId};

use crate::{error::ValidationError, layout::BondStyle, model::MoleculeGraph};

/// Spreads `atoms` evenly, in the given order, between the smallest and
/// largest x among them, all at their mean y.
///
/// # Errors
///
/// Fails without moving anything if fewer than two atoms are given or an id
/// is unknown.
pub fn align_atoms(graph: &mut MoleculeGraph, atoms: &[AtomId]) -> Result<(), ValidationError> {
    if atoms.len() < 2 {
        return Err(ValidationError::TooFewAtoms {
            layout: "align",
            required: 2,
            found: atoms.len(),
        });
    }
    let positions = atoms
        .iter()
        .map(|id| {
            graph
                .atom(*id)
                .map(|atom| atom.position())
                .ok_or(ValidationError::UnknownAtom(*id))
        })
        .collect::<Result<Vec<Point>, _>>()?;

    let min_x = positions.iter().map(|p| p.x()).fold(f32::MAX, f32::min);
    let max_x = positions.iter().map(|p| p.x()).fold(f32::MIN, f32::max);
    let mean_y = positions.iter().map(|p| p.y()).sum::<f32>() / positions.len() as f32;

    let last = (atoms.len() - 1) as f32;
    for (index, id) in atoms.iter().enumerate() {
        let x = min_x + (max_x - min_x) * index as f32 / last;
        graph.set_position(*id, Point::new(x, mean_y))?;
    }
    Ok(())
}

/// Adds a bond between every pair of atoms closer than √1.5 bond lengths
/// that is not already bonded. Returns the number of bonds added.
pub fn auto_bond(graph: &mut MoleculeGraph, bond_length: f32, style: BondStyle) -> usize {
    let threshold = bond_length * bond_length * 1.5;
    let positions = graph.positions();

    let mut candidates = Vec::new();
    for (i, (a, pa)) in positions.iter().enumerate() {
        for (b, pb) in &positions[i + 1..] {
            let delta = pa.sub_point(*pb);
            let distance_sq = delta.x() * delta.x() + delta.y() * delta.y();
            if distance_sq < threshold && graph.bond_between(*a, *b).is_none() {
                candidates.push((*a, *b));
            }
        }
    }

    let added = candidates
        .into_iter()
        .filter(|(a, b)| graph.add_bond_with(style.build(*a, *b)).is_ok())
        .count();
    debug!(added; "Auto-bonded close atoms");
    added
}
