//! Force-directed layout.
//!
//! Each iteration sums an inverse-square repulsion between every pair of
//! atoms and a linear spring along every bond, then moves each atom by its
//! damped net force and clamps the result to a square around the origin.
//! The run is deterministic: no randomness and a fixed iteration budget.

use std::{collections::HashMap, fmt};

use log::trace;

use molviz_core::{geometry::Point, identifier::AtomId};

use crate::{error::ValidationError, model::MoleculeGraph};

/// Distance under which two atoms exert no force on each other.
const MIN_FORCE_DISTANCE: f32 = 0.1;

/// Preset parameter sets.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForceVariant {
    /// A short relaxation for explicit user requests.
    #[default]
    Interactive,
    /// A longer, stiffer relaxation used by the reactive auto layout.
    Declarative,
}

impl fmt::Display for ForceVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interactive => f.write_str("interactive"),
            Self::Declarative => f.write_str("declarative"),
        }
    }
}

/// Outcome of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationReport {
    iterations: usize,
    max_force: f32,
}

impl SimulationReport {
    /// Iterations actually executed.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Largest net force magnitude seen in the last iteration.
    pub fn max_force(&self) -> f32 {
        self.max_force
    }
}

#[derive(Debug, Clone)]
pub struct Simulation {
    iterations: usize,
    repulsion: f32,
    spring: f32,
    ideal_length: f32,
    damping: f32,
    bound: f32,
    convergence_threshold: Option<f32>,
}

impl Simulation {
    /// Parameters for `variant`. The interactive variant springs toward the
    /// plain bond length, the declarative one toward the spaced length.
    pub fn for_variant(variant: ForceVariant, bond_length: f32, spacing_multiplier: f32) -> Self {
        match variant {
            ForceVariant::Interactive => Self {
                iterations: 50,
                repulsion: 1000.0,
                spring: 0.1,
                ideal_length: bond_length,
                damping: 0.1,
                bound: 500.0,
                convergence_threshold: None,
            },
            ForceVariant::Declarative => Self {
                iterations: 100,
                repulsion: 2000.0,
                spring: 0.2,
                ideal_length: bond_length * spacing_multiplier,
                damping: 0.05,
                bound: 1000.0,
                convergence_threshold: Some(1.0),
            },
        }
    }

    /// Set the iteration budget
    pub fn set_iterations(&mut self, iterations: usize) -> &mut Self {
        self.iterations = iterations;
        self
    }

    /// Set the spring rest length
    pub fn set_ideal_length(&mut self, length: f32) -> &mut Self {
        self.ideal_length = length;
        self
    }

    /// Set the force magnitude below which the run stops early
    pub fn set_convergence_threshold(&mut self, threshold: Option<f32>) -> &mut Self {
        self.convergence_threshold = threshold;
        self
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn ideal_length(&self) -> f32 {
        self.ideal_length
    }

    /// Relaxes atom positions in place.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::TooFewAtoms`] for graphs with fewer than
    /// two atoms; the graph is not touched.
    pub fn run(&self, graph: &mut MoleculeGraph) -> Result<SimulationReport, ValidationError> {
        if graph.atom_count() < 2 {
            return Err(ValidationError::TooFewAtoms {
                layout: "optimize",
                required: 2,
                found: graph.atom_count(),
            });
        }

        let ids: Vec<AtomId> = graph.atom_ids().collect();
        let index: HashMap<AtomId, usize> =
            ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();
        let springs: Vec<(usize, usize)> = graph
            .bonds()
            .filter_map(|(_, bond)| Some((*index.get(&bond.a())?, *index.get(&bond.b())?)))
            .collect();
        let mut positions: Vec<Point> = graph.positions().into_iter().map(|(_, p)| p).collect();

        let mut report = SimulationReport {
            iterations: 0,
            max_force: 0.0,
        };
        for iteration in 0..self.iterations {
            let max_force = self.step(&mut positions, &springs);
            report.iterations = iteration + 1;
            report.max_force = max_force;
            trace!(iteration, max_force; "Force iteration");

            if self
                .convergence_threshold
                .is_some_and(|threshold| max_force < threshold)
            {
                break;
            }
        }

        for (id, position) in ids.iter().zip(positions) {
            graph.set_position(*id, position)?;
        }
        Ok(report)
    }

    /// One iteration; returns the largest net force magnitude.
    fn step(&self, positions: &mut [Point], springs: &[(usize, usize)]) -> f32 {
        let mut forces = vec![Point::default(); positions.len()];

        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                let delta = positions[i].sub_point(positions[j]);
                let distance = delta.hypot();
                if distance > MIN_FORCE_DISTANCE {
                    let magnitude = self.repulsion / (distance * distance);
                    let force = delta.scale(magnitude / distance);
                    forces[i] = forces[i].add_point(force);
                    forces[j] = forces[j].sub_point(force);
                }
            }
        }

        for &(a, b) in springs {
            let delta = positions[b].sub_point(positions[a]);
            let distance = delta.hypot();
            if distance > MIN_FORCE_DISTANCE {
                let magnitude = self.spring * (distance - self.ideal_length);
                let force = delta.scale(magnitude / distance);
                forces[a] = forces[a].add_point(force);
                forces[b] = forces[b].sub_point(force);
            }
        }

        let mut max_force = 0.0f32;
        for (position, force) in positions.iter_mut().zip(&forces) {
            max_force = max_force.max(force.hypot());
            *position = position.add_point(force.scale(self.damping)).clamp(self.bound);
        }
        max_force
    }
}
