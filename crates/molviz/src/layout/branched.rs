//! Branched layout.
//!
//! A breadth-first walk starts at the first atom with at most one bond and
//! places it at the origin. Each visited atom fans its unvisited neighbors
//! out around its own incoming angle in steps of π/3, one spacing away.
//! Atoms the walk never reaches keep their coordinates.

use std::{
    collections::{HashSet, VecDeque},
    f32::consts::FRAC_PI_3,
};

use log::debug;
use petgraph::graphmap::UnGraphMap;

use molviz_core::{geometry::Point, identifier::AtomId};

use crate::{layout::linear, model::MoleculeGraph};

/// Builds the connectivity of `graph` as a petgraph map.
pub fn connectivity(graph: &MoleculeGraph) -> UnGraphMap<AtomId, ()> {
    let mut map = UnGraphMap::with_capacity(graph.atom_count(), graph.bond_count());
    for id in graph.atom_ids() {
        map.add_node(id);
    }
    for (_, bond) in graph.bonds() {
        map.add_edge(bond.a(), bond.b(), ());
    }
    map
}

/// Child angle of the `index`-th of `count` branches leaving at `angle`.
pub fn branch_angle(angle: f32, index: usize, count: usize) -> f32 {
    angle + (index as f32 - (count as f32 - 1.0) / 2.0) * FRAC_PI_3
}

/// Lays the graph out as a tree. Without bonds this falls back to the
/// linear layout.
pub fn arrange(graph: &mut MoleculeGraph, spacing: f32) {
    if graph.is_empty() {
        return;
    }
    if graph.bond_count() == 0 {
        linear::arrange(graph, spacing);
        return;
    }

    let map = connectivity(graph);
    let Some(start) = graph
        .atom_ids()
        .find(|id| map.neighbors(*id).count() <= 1)
        .or_else(|| graph.atom_id_at(0))
    else {
        return;
    };

    let mut visited = HashSet::new();
    let mut queue = VecDeque::from([(start, Point::default(), 0.0f32)]);
    let mut placed = Vec::new();

    while let Some((id, position, angle)) = queue.pop_front() {
        if !visited.insert(id) {
            continue;
        }
        placed.push((id, position));

        let pending: Vec<AtomId> = map
            .neighbors(id)
            .filter(|next| !visited.contains(next))
            .collect();
        for (index, next) in pending.iter().enumerate() {
            let next_angle = branch_angle(angle, index, pending.len());
            let next_position = position.add_point(Point::from_angle(next_angle).scale(spacing));
            queue.push_back((*next, next_position, next_angle));
        }
    }

    for (id, position) in &placed {
        if let Some(atom) = graph.atom_mut(*id) {
            atom.set_position(*position);
        }
    }
    debug!(start:%, placed = placed.len(); "Arranged branched layout");
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::model::Atom;

    #[test]
    fn test_branch_angles_are_symmetric() {
        assert_approx_eq!(f32, branch_angle(0.0, 0, 1), 0.0);
        assert_approx_eq!(f32, branch_angle(0.0, 0, 2), -FRAC_PI_3 / 2.0);
        assert_approx_eq!(f32, branch_angle(0.0, 1, 2), FRAC_PI_3 / 2.0);
        assert_approx_eq!(f32, branch_angle(1.0, 1, 3), 1.0);
    }

    #[test]
    fn test_chain_is_straight() {
        let mut graph = MoleculeGraph::new();
        let ids: Vec<_> = (0..3)
            .map(|i| graph.add_atom(Atom::new("C").with_position(Point::new(0.0, i as f32 * 10.0))))
            .collect();
        graph.add_bond(ids[0], ids[1]).unwrap();
        graph.add_bond(ids[1], ids[2]).unwrap();

        arrange(&mut graph, 80.0);
        let xs: Vec<f32> = ids
            .iter()
            .map(|id| graph.atom(*id).unwrap().position().x())
            .collect();
        assert_approx_eq!(f32, xs[0], 0.0);
        assert_approx_eq!(f32, xs[1], 80.0);
        assert_approx_eq!(f32, xs[2], 160.0, epsilon = 0.001);
    }

    #[test]
    fn test_starts_at_chain_end() {
        let mut graph = MoleculeGraph::new();
        let center = graph.add_atom(Atom::new("C"));
        let end = graph.add_atom(Atom::new("O"));
        graph.add_bond(center, end).unwrap();
        // The first atom already has degree one, so it is the root.
        arrange(&mut graph, 80.0);
        assert_eq!(graph.atom(center).unwrap().position(), Point::default());
    }

    #[test]
    fn test_branches_keep_spacing() {
        let mut graph = MoleculeGraph::new();
        let root = graph.add_atom(Atom::new("C"));
        let hub = graph.add_atom(Atom::new("C"));
        let leaves: Vec<_> = (0..3).map(|_| graph.add_atom(Atom::new("H"))).collect();
        graph.add_bond(root, hub).unwrap();
        for leaf in &leaves {
            graph.add_bond(hub, *leaf).unwrap();
        }

        arrange(&mut graph, 80.0);
        let hub_position = graph.atom(hub).unwrap().position();
        for leaf in &leaves {
            let distance = graph.atom(*leaf).unwrap().position().distance(hub_position);
            assert_approx_eq!(f32, distance, 80.0, epsilon = 0.001);
        }
    }

    #[test]
    fn test_unreachable_atoms_keep_coordinates() {
        let mut graph = MoleculeGraph::new();
        let a = graph.add_atom(Atom::new("C"));
        let b = graph.add_atom(Atom::new("C"));
        let c = graph.add_atom(Atom::new("C").with_position(Point::new(5.0, 5.0)));
        let d = graph.add_atom(Atom::new("C").with_position(Point::new(7.0, 7.0)));
        graph.add_bond(a, b).unwrap();
        graph.add_bond(c, d).unwrap();

        arrange(&mut graph, 80.0);
        assert_eq!(graph.atom(c).unwrap().position(), Point::new(5.0, 5.0));
        assert_eq!(graph.atom(d).unwrap().position(), Point::new(7.0, 7.0));
    }

    #[test]
    fn test_without_bonds_falls_back_to_linear() {
        let mut graph = MoleculeGraph::new();
        let ids: Vec<_> = (0..2).map(|_| graph.add_atom(Atom::new("C"))).collect();
        arrange(&mut graph, 80.0);
        assert_approx_eq!(f32, graph.atom(ids[0]).unwrap().position().x(), -40.0);
        assert_approx_eq!(f32, graph.atom(ids[1]).unwrap().position().x(), 40.0);
    }
}
