//! Layout engine for positioning atoms.
//!
//! Every strategy rewrites atom coordinates in place. Ring and the
//! linearize operation also regenerate bonds among the atoms they arrange.
//!
//! # Submodules
//!
//! - [`linear`] - Evenly spaced atoms along the x axis
//! - [`grid`] - Row-major grid centered on the origin
//! - [`ring`] - Regular polygon around the current centroid
//! - [`branched`] - Breadth-first fan-out from a chain end
//! - [`force`] - Force-directed relaxation
//! - [`tools`] - Alignment and distance-based bonding
//!
//! ```
//! use molviz::{
//!     config::LayoutConfig,
//!     layout::{LayoutEngine, LayoutStrategy},
//!     model::{Atom, MoleculeGraph},
//! };
//!
//! let mut graph = MoleculeGraph::new();
//! for _ in 0..4 {
//!     graph.add_atom(Atom::new("C"));
//! }
//! LayoutEngine::from_config(&LayoutConfig::default())
//!     .apply(&mut graph, LayoutStrategy::Ring)
//!     .unwrap();
//! assert_eq!(graph.bond_count(), 4);
//! ```

pub mod branched;
pub mod force;
pub mod grid;
pub mod linear;
pub mod ring;
pub mod tools;

use std::fmt;

use log::{debug, info};

use molviz_core::{color::Color, identifier::AtomId};

use crate::{
    config::{AutoLayout, LayoutConfig},
    error::ValidationError,
    model::{Bond, MoleculeGraph},
};

pub use force::{ForceVariant, SimulationReport};

/// A layout strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutStrategy {
    /// Leaves coordinates untouched.
    Manual,
    Linear,
    Grid,
    Ring,
    Branched,
    Optimize(ForceVariant),
}

impl LayoutStrategy {
    /// Strategy run when the reactive auto layout changes to `auto`.
    pub fn from_auto_layout(auto: AutoLayout) -> Option<Self> {
        match auto {
            AutoLayout::None => None,
            AutoLayout::Linear => Some(Self::Linear),
            AutoLayout::Branched => Some(Self::Branched),
            AutoLayout::Optimized => Some(Self::Optimize(ForceVariant::Declarative)),
        }
    }
}

impl fmt::Display for LayoutStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manual => f.write_str("manual"),
            Self::Linear => f.write_str("linear"),
            Self::Grid => f.write_str("grid"),
            Self::Ring => f.write_str("ring"),
            Self::Branched => f.write_str("branched"),
            Self::Optimize(variant) => write!(f, "optimize ({variant})"),
        }
    }
}

/// Styling applied to bonds created by layout operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BondStyle {
    color: Color,
    thickness: f32,
}

impl BondStyle {
    pub fn new(color: Color, thickness: f32) -> Self {
        Self { color, thickness }
    }

    pub fn build(&self, a: AtomId, b: AtomId) -> Bond {
        let mut bond = Bond::new(a, b);
        bond.set_color(self.color);
        bond.set_thickness(self.thickness);
        bond
    }
}

impl Default for BondStyle {
    fn default() -> Self {
        Self::new(Color::default(), 2.0)
    }
}

/// Applies layout strategies with a fixed set of distances.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    bond_length: f32,
    spacing_multiplier: f32,
    ring_radius: f32,
    bond_style: BondStyle,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}

impl LayoutEngine {
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            bond_length: config.bond_length(),
            spacing_multiplier: config.spacing_multiplier(),
            ring_radius: config.ring_size(),
            bond_style: BondStyle::default(),
        }
    }

    /// Set the style of bonds created by ring and linearize
    pub fn set_bond_style(&mut self, style: BondStyle) -> &mut Self {
        self.bond_style = style;
        self
    }

    /// Set the ideal bond length
    pub fn set_bond_length(&mut self, length: f32) -> &mut Self {
        self.bond_length = length;
        self
    }

    /// Set the ring radius
    pub fn set_ring_radius(&mut self, radius: f32) -> &mut Self {
        self.ring_radius = radius;
        self
    }

    /// Distance between neighbors in spaced layouts.
    pub fn spacing(&self) -> f32 {
        self.bond_length * self.spacing_multiplier
    }

    pub fn bond_length(&self) -> f32 {
        self.bond_length
    }

    pub fn bond_style(&self) -> BondStyle {
        self.bond_style
    }

    /// Runs `strategy` against `graph`.
    ///
    /// # Errors
    ///
    /// Ring needs three atoms and force layouts need two; with fewer atoms
    /// they return [`ValidationError::TooFewAtoms`] and leave the graph
    /// unchanged.
    pub fn apply(
        &self,
        graph: &mut MoleculeGraph,
        strategy: LayoutStrategy,
    ) -> Result<(), ValidationError> {
        info!(strategy:%, atoms = graph.atom_count(); "Applying layout");
        match strategy {
            LayoutStrategy::Manual => {}
            LayoutStrategy::Linear => linear::arrange(graph, self.spacing()),
            LayoutStrategy::Grid => grid::arrange(graph, self.spacing()),
            LayoutStrategy::Ring => {
                let atoms: Vec<AtomId> = graph.atom_ids().collect();
                ring::arrange(graph, &atoms, self.ring_radius, self.bond_style)?;
            }
            LayoutStrategy::Branched => branched::arrange(graph, self.spacing()),
            LayoutStrategy::Optimize(variant) => {
                let report = force::Simulation::for_variant(
                    variant,
                    self.bond_length,
                    self.spacing_multiplier,
                )
                .run(graph)?;
                debug!(
                    iterations = report.iterations(),
                    max_force = report.max_force();
                    "Force layout finished"
                );
            }
        }
        Ok(())
    }

    /// Lines the atoms up and replaces all bonds with a chain in atom order.
    pub fn linearize(&self, graph: &mut MoleculeGraph) -> usize {
        linear::linearize(graph, self.bond_length, self.bond_style)
    }

    /// Spreads `atoms` evenly between their extreme x coordinates.
    pub fn align(
        &self,
        graph: &mut MoleculeGraph,
        atoms: &[AtomId],
    ) -> Result<(), ValidationError> {
        tools::align_atoms(graph, atoms)
    }

    /// Bonds every close pair of atoms that is not bonded yet.
    pub fn auto_bond(&self, graph: &mut MoleculeGraph) -> usize {
        tools::auto_bond(graph, self.bond_length, self.bond_style)
    }
}
