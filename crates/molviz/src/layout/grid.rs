//! Grid layout.

use molviz_core::{geometry::Point, identifier::AtomId};

use crate::model::MoleculeGraph;

/// Columns and rows of a near-square grid holding `count` cells.
pub fn dimensions(count: usize) -> (usize, usize) {
    if count == 0 {
        return (0, 0);
    }
    let cols = (count as f32).sqrt().ceil() as usize;
    let rows = count.div_ceil(cols);
    (cols, rows)
}

/// Places atoms row by row, `spacing` apart, around the origin.
pub fn arrange(graph: &mut MoleculeGraph, spacing: f32) {
    let ids: Vec<AtomId> = graph.atom_ids().collect();
    let (cols, rows) = dimensions(ids.len());
    for (index, id) in ids.into_iter().enumerate() {
        let col = index % cols;
        let row = index / cols;
        let x = (col as f32 - cols as f32 / 2.0) * spacing;
        let y = (row as f32 - rows as f32 / 2.0) * spacing;
        if let Some(atom) = graph.atom_mut(id) {
            atom.set_position(Point::new(x, y));
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::model::Atom;

    #[test]
    fn test_dimensions() {
        assert_eq!(dimensions(0), (0, 0));
        assert_eq!(dimensions(1), (1, 1));
        assert_eq!(dimensions(7), (3, 3));
        assert_eq!(dimensions(9), (3, 3));
        assert_eq!(dimensions(10), (4, 3));
    }

    #[test]
    fn test_arrange_seven_atoms() {
        let mut graph = MoleculeGraph::new();
        let ids: Vec<_> = (0..7).map(|_| graph.add_atom(Atom::new("C"))).collect();
        arrange(&mut graph, 80.0);

        let first = graph.atom(ids[0]).unwrap().position();
        assert_approx_eq!(f32, first.x(), -120.0);
        assert_approx_eq!(f32, first.y(), -120.0);

        let fifth = graph.atom(ids[4]).unwrap().position();
        assert_approx_eq!(f32, fifth.x(), -40.0);
        assert_approx_eq!(f32, fifth.y(), -40.0);

        let last = graph.atom(ids[6]).unwrap().position();
        assert_approx_eq!(f32, last.x(), -120.0);
        assert_approx_eq!(f32, last.y(), 40.0);
    }
}
