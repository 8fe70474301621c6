//! Ring layout.
//!
//! The selected atoms are placed on a circle around their current centroid,
//! starting at angle zero and proceeding in the order given. Every bond
//! among them is dropped and replaced by a single cycle.

use std::f32::consts::TAU;

use log::debug;

use molviz_core::{
    geometry::{self, Point},
    identifier::AtomId,
};

use crate::{error::ValidationError, layout::BondStyle, model::MoleculeGraph};

/// Fewest atoms that form a ring.
pub const MIN_RING_ATOMS: usize = 3;

/// Arranges `atoms` as a ring of `radius`. Repeated ids are ignored.
///
/// # Errors
///
/// Returns [`ValidationError::TooFewAtoms`] for fewer than three atoms and
/// [`ValidationError::UnknownAtom`] if any id is missing. In both cases the
/// graph is unchanged.
pub fn arrange(
    graph: &mut MoleculeGraph,
    atoms: &[AtomId],
    radius: f32,
    style: BondStyle,
) -> Result<(), ValidationError> {
    let mut unique: Vec<AtomId> = Vec::with_capacity(atoms.len());
    for id in atoms {
        if !unique.contains(id) {
            unique.push(*id);
        }
    }
    let atoms = unique.as_slice();

    if atoms.len() < MIN_RING_ATOMS {
        return Err(ValidationError::TooFewAtoms {
            layout: "ring",
            required: MIN_RING_ATOMS,
            found: atoms.len(),
        });
    }

    let mut positions = Vec::with_capacity(atoms.len());
    for id in atoms {
        let atom = graph.atom(*id).ok_or(ValidationError::UnknownAtom(*id))?;
        positions.push(atom.position());
    }
    let center = geometry::centroid(positions).unwrap_or_default();

    let count = atoms.len();
    for (index, id) in atoms.iter().enumerate() {
        let angle = TAU * index as f32 / count as f32;
        let position = center.add_point(Point::from_angle(angle).scale(radius));
        graph.set_position(*id, position)?;
    }

    let removed = graph.remove_bonds_within(atoms);
    for (index, id) in atoms.iter().enumerate() {
        let next = atoms[(index + 1) % count];
        graph.add_bond_with(style.build(*id, next))?;
    }
    debug!(atoms = count, replaced_bonds = removed; "Arranged ring");
    Ok(())
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::model::Atom;

    fn scattered(n: usize) -> (MoleculeGraph, Vec<AtomId>) {
        let mut graph = MoleculeGraph::new();
        let ids = (0..n)
            .map(|i| {
                graph.add_atom(
                    Atom::new("C").with_position(Point::new(i as f32 * 37.0, (i % 3) as f32 * 11.0)),
                )
            })
            .collect();
        (graph, ids)
    }

    #[test]
    fn test_first_atom_at_angle_zero() {
        let (mut graph, ids) = scattered(4);
        let before = geometry::centroid(graph.positions().into_iter().map(|(_, p)| p)).unwrap();
        arrange(&mut graph, &ids, 80.0, BondStyle::default()).unwrap();

        let first = graph.atom(ids[0]).unwrap().position();
        assert_approx_eq!(f32, first.x(), before.x() + 80.0, epsilon = 0.01);
        assert_approx_eq!(f32, first.y(), before.y(), epsilon = 0.01);
    }

    #[test]
    fn test_prior_bonds_replaced() {
        let (mut graph, ids) = scattered(5);
        graph.add_bond(ids[0], ids[2]).unwrap();
        graph.add_bond(ids[1], ids[3]).unwrap();
        arrange(&mut graph, &ids, 80.0, BondStyle::default()).unwrap();

        assert_eq!(graph.bond_count(), 5);
        assert!(graph.bond_between(ids[0], ids[2]).is_none());
        assert!(graph.bond_between(ids[4], ids[0]).is_some());
    }

    #[test]
    fn test_bonds_to_outside_atoms_survive() {
        let (mut graph, ids) = scattered(4);
        let outside = graph.add_atom(Atom::new("O"));
        graph.add_bond(ids[0], outside).unwrap();
        arrange(&mut graph, &ids, 80.0, BondStyle::default()).unwrap();
        assert!(graph.bond_between(ids[0], outside).is_some());
        assert_eq!(graph.bond_count(), 5);
    }

    #[test]
    fn test_unknown_atom_leaves_graph() {
        let (mut graph, mut ids) = scattered(3);
        let ghost = graph.add_atom(Atom::new("C"));
        graph.remove_atom(ghost).unwrap();
        ids.push(ghost);

        let before = graph.positions();
        assert_eq!(
            arrange(&mut graph, &ids, 80.0, BondStyle::default()),
            Err(ValidationError::UnknownAtom(ghost))
        );
        assert_eq!(graph.positions(), before);
    }

    proptest! {
        #[test]
        fn prop_ring_is_equidistant_cycle(n in 3usize..12, radius in 20.0f32..300.0) {
            let (mut graph, ids) = scattered(n);
            let center = geometry::centroid(graph.positions().into_iter().map(|(_, p)| p)).unwrap();
            arrange(&mut graph, &ids, radius, BondStyle::default()).unwrap();

            for id in &ids {
                let distance = graph.atom(*id).unwrap().position().distance(center);
                prop_assert!((distance - radius).abs() < 0.05);
            }
            prop_assert_eq!(graph.bond_count(), n);
            for id in &ids {
                prop_assert_eq!(graph.degree(*id), 2);
            }
        }
    }
}
