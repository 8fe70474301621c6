//! Linear layout: atoms in insertion order along the x axis, centered on the
//! origin.

use log::debug;

use molviz_core::{geometry::Point, identifier::AtomId};

use crate::{layout::BondStyle, model::MoleculeGraph};

/// x coordinate of the `index`-th of `count` atoms spaced `spacing` apart.
pub fn slot(index: usize, count: usize, spacing: f32) -> f32 {
    let start = -((count.saturating_sub(1)) as f32) * spacing / 2.0;
    start + index as f32 * spacing
}

/// Places every atom on the x axis, `spacing` apart.
pub fn arrange(graph: &mut MoleculeGraph, spacing: f32) {
    let ids: Vec<AtomId> = graph.atom_ids().collect();
    let count = ids.len();
    for (index, id) in ids.into_iter().enumerate() {
        if let Some(atom) = graph.atom_mut(id) {
            atom.set_position(Point::new(slot(index, count, spacing), 0.0));
        }
    }
}

/// Arranges the atoms on a line and replaces all bonds with a chain that
/// follows atom order. Returns the number of bonds created.
pub fn linearize(graph: &mut MoleculeGraph, spacing: f32, style: BondStyle) -> usize {
    if graph.atom_count() < 2 {
        return 0;
    }
    arrange(graph, spacing);
    graph.clear_bonds();

    let ids: Vec<AtomId> = graph.atom_ids().collect();
    let created = ids
        .windows(2)
        .filter(|pair| graph.add_bond_with(style.build(pair[0], pair[1])).is_ok())
        .count();
    debug!(bonds = created; "Linearized atoms");
    created
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::model::Atom;

    fn carbons(n: usize) -> (MoleculeGraph, Vec<AtomId>) {
        let mut graph = MoleculeGraph::new();
        let ids = (0..n).map(|_| graph.add_atom(Atom::new("C"))).collect();
        (graph, ids)
    }

    #[test]
    fn test_arrange_centers_on_origin() {
        let (mut graph, ids) = carbons(3);
        arrange(&mut graph, 80.0);
        let xs: Vec<f32> = ids
            .iter()
            .map(|id| graph.atom(*id).unwrap().position().x())
            .collect();
        assert_approx_eq!(f32, xs[0], -80.0);
        assert_approx_eq!(f32, xs[1], 0.0);
        assert_approx_eq!(f32, xs[2], 80.0);
        for id in &ids {
            assert_approx_eq!(f32, graph.atom(*id).unwrap().position().y(), 0.0);
        }
    }

    #[test]
    fn test_single_atom_at_origin() {
        assert_approx_eq!(f32, slot(0, 1, 80.0), 0.0);
    }

    #[test]
    fn test_linearize_builds_chain() {
        let (mut graph, ids) = carbons(4);
        graph.add_bond(ids[0], ids[3]).unwrap();

        let created = linearize(&mut graph, 80.0, BondStyle::default());
        assert_eq!(created, 3);
        assert_eq!(graph.bond_count(), 3);
        assert!(graph.bond_between(ids[0], ids[3]).is_none());
        for pair in ids.windows(2) {
            assert!(graph.bond_between(pair[0], pair[1]).is_some());
        }
    }

    #[test]
    fn test_linearize_single_atom_is_noop() {
        let (mut graph, _) = carbons(1);
        assert_eq!(linearize(&mut graph, 80.0, BondStyle::default()), 0);
    }
}
