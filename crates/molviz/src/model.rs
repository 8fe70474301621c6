//! The molecule model: atoms, bonds and the graph that owns them.
//!
//! - [`atom`] - Atom data, element defaults and per-atom display modes
//! - [`bond`] - Bond data, bond types and end styles
//! - [`graph`] - [`MoleculeGraph`], which enforces the structural invariants
//!
//! Bonds reference their atoms by [`AtomId`](molviz_core::identifier::AtomId)
//! only. The graph keeps an adjacency index so that removing an atom also
//! removes its bonds in the same step.

pub mod atom;
pub mod bond;
pub mod graph;

pub use atom::{Atom, AtomDisplayMode};
pub use bond::{Bond, BondType, EndStyle};
pub use graph::{EditMarker, MoleculeGraph, SOFT_ATOM_CAPACITY, SOFT_BOND_CAPACITY};
