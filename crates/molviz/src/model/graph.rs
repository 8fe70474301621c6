//! The molecule graph.
//!
//! [`MoleculeGraph`] owns every atom and bond of one document. Atoms and
//! bonds live in insertion-ordered maps keyed by id, and an adjacency index
//! maps each atom to the bonds that touch it. Every public mutation either
//! succeeds completely or returns an error and leaves the graph untouched.
//!
//! # Invariants
//!
//! - Both endpoints of every bond exist in the graph.
//! - At most one bond joins any unordered pair of atoms, and no bond joins an
//!   atom to itself.
//! - Removing an atom removes every bond that references it in the same call.
//! - Ids are never reused; the session ordinal restarts only on [`clear`].
//!
//! [`clear`]: MoleculeGraph::clear

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, trace, warn};

use molviz_core::{
    element,
    geometry::Point,
    identifier::{AtomId, BondId, IdAllocator},
};
use molviz_formula::ParseMode;

use crate::{
    error::{MolvizError, ValidationError},
    layout,
    model::{Atom, AtomDisplayMode, Bond},
};

/// Atom count above which a warning is logged.
pub const SOFT_ATOM_CAPACITY: usize = 1000;
/// Bond count above which a warning is logged.
pub const SOFT_BOND_CAPACITY: usize = 2000;

/// Molecules up to this size are laid out on a line after formula generation.
const FORMULA_LINE_LIMIT: usize = 6;

/// A completed edit, recorded when its outermost bracket closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditMarker {
    label: String,
    depth: usize,
}

impl EditMarker {
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Nesting depth the edit was opened at; zero for outermost edits.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

#[derive(Debug, Clone, Default)]
pub struct MoleculeGraph {
    atoms: IndexMap<AtomId, Atom>,
    bonds: IndexMap<BondId, Bond>,
    adjacency: HashMap<AtomId, Vec<BondId>>,
    ids: IdAllocator,
    ordinal: u64,
    open_edits: Vec<String>,
    edit_log: Vec<EditMarker>,
    atom_capacity_warned: bool,
    bond_capacity_warned: bool,
}

impl MoleculeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn contains_atom(&self, id: AtomId) -> bool {
        self.atoms.contains_key(&id)
    }

    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(&id)
    }

    pub fn atom_mut(&mut self, id: AtomId) -> Option<&mut Atom> {
        self.atoms.get_mut(&id)
    }

    pub fn bond(&self, id: BondId) -> Option<&Bond> {
        self.bonds.get(&id)
    }

    pub fn bond_mut(&mut self, id: BondId) -> Option<&mut Bond> {
        self.bonds.get_mut(&id)
    }

    /// Atoms in insertion order.
    pub fn atoms(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter().map(|(id, atom)| (*id, atom))
    }

    pub fn atom_ids(&self) -> impl Iterator<Item = AtomId> + '_ {
        self.atoms.keys().copied()
    }

    /// Bonds in insertion order.
    pub fn bonds(&self) -> impl Iterator<Item = (BondId, &Bond)> {
        self.bonds.iter().map(|(id, bond)| (*id, bond))
    }

    /// Id of the atom at `index` in insertion order.
    pub fn atom_id_at(&self, index: usize) -> Option<AtomId> {
        self.atoms.get_index(index).map(|(id, _)| *id)
    }

    /// Insertion-order index of `id`.
    pub fn atom_index(&self, id: AtomId) -> Option<usize> {
        self.atoms.get_index_of(&id)
    }

    /// Inserts `atom`, assigning it a fresh id and the next session ordinal.
    pub fn add_atom(&mut self, mut atom: Atom) -> AtomId {
        let id = self.ids.next_atom();
        self.ordinal += 1;
        atom.attach(id, self.ordinal);
        trace!(id:%, element = atom.element(); "Adding atom");

        self.atoms.insert(id, atom);
        self.adjacency.insert(id, Vec::new());
        self.check_atom_capacity();
        id
    }

    /// Removes an atom together with every bond that references it.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownAtom`] if `id` is not in the graph.
    pub fn remove_atom(&mut self, id: AtomId) -> Result<Atom, ValidationError> {
        if !self.atoms.contains_key(&id) {
            return Err(ValidationError::UnknownAtom(id));
        }

        let incident = self.adjacency.remove(&id).unwrap_or_default();
        for bond_id in &incident {
            let Some(other) = self
                .bonds
                .shift_remove(bond_id)
                .and_then(|bond| bond.other(id))
            else {
                continue;
            };
            if let Some(list) = self.adjacency.get_mut(&other) {
                list.retain(|b| b != bond_id);
            }
        }
        debug!(id:%, removed_bonds = incident.len(); "Removed atom");

        let atom = self
            .atoms
            .shift_remove(&id)
            .ok_or(ValidationError::UnknownAtom(id))?;
        self.check_atom_capacity();
        self.check_bond_capacity();
        Ok(atom)
    }

    /// Adds a default single bond between `a` and `b`.
    ///
    /// # Errors
    ///
    /// Fails without changing the graph when `a == b`, when either atom is
    /// missing, or when the pair is already bonded in either direction.
    pub fn add_bond(&mut self, a: AtomId, b: AtomId) -> Result<BondId, ValidationError> {
        self.add_bond_with(Bond::new(a, b))
    }

    /// Adds a fully styled bond, subject to the same checks as [`add_bond`].
    ///
    /// [`add_bond`]: Self::add_bond
    pub fn add_bond_with(&mut self, mut bond: Bond) -> Result<BondId, ValidationError> {
        let (a, b) = bond.endpoints();
        self.validate_new_bond(a, b)?;

        let id = self.ids.next_bond();
        bond.attach(id);
        self.bonds.insert(id, bond);
        self.adjacency.entry(a).or_default().push(id);
        self.adjacency.entry(b).or_default().push(id);
        trace!(id:%, a:%, b:%; "Added bond");

        self.check_bond_capacity();
        Ok(id)
    }

    fn validate_new_bond(&self, a: AtomId, b: AtomId) -> Result<(), ValidationError> {
        if a == b {
            return Err(ValidationError::SelfLoop(a));
        }
        for id in [a, b] {
            if !self.atoms.contains_key(&id) {
                return Err(ValidationError::UnknownAtom(id));
            }
        }
        if self.bond_between(a, b).is_some() {
            return Err(ValidationError::DuplicateBond(a, b));
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownBond`] if `id` is not in the graph.
    pub fn remove_bond(&mut self, id: BondId) -> Result<Bond, ValidationError> {
        let bond = self
            .bonds
            .shift_remove(&id)
            .ok_or(ValidationError::UnknownBond(id))?;
        for atom in [bond.a(), bond.b()] {
            if let Some(list) = self.adjacency.get_mut(&atom) {
                list.retain(|b| *b != id);
            }
        }
        self.check_bond_capacity();
        Ok(bond)
    }

    /// Removes every bond whose endpoints are both in `atoms`.
    pub(crate) fn remove_bonds_within(&mut self, atoms: &[AtomId]) -> usize {
        let doomed: Vec<BondId> = self
            .bonds
            .iter()
            .filter(|(_, bond)| atoms.contains(&bond.a()) && atoms.contains(&bond.b()))
            .map(|(id, _)| *id)
            .collect();
        for id in &doomed {
            // Ids were collected from the map above.
            let _ = self.remove_bond(*id);
        }
        doomed.len()
    }

    /// Removes all bonds, keeping atoms.
    pub(crate) fn clear_bonds(&mut self) {
        self.bonds.clear();
        for list in self.adjacency.values_mut() {
            list.clear();
        }
        self.bond_capacity_warned = false;
    }

    /// Atoms joined to `id` by a bond, in bond insertion order.
    pub fn neighbors(&self, id: AtomId) -> impl Iterator<Item = AtomId> + '_ {
        self.adjacency
            .get(&id)
            .into_iter()
            .flatten()
            .filter_map(move |bond_id| self.bonds.get(bond_id).and_then(|b| b.other(id)))
    }

    /// Bonds that touch `id`.
    pub fn incident_bonds(&self, id: AtomId) -> impl Iterator<Item = BondId> + '_ {
        self.adjacency.get(&id).into_iter().flatten().copied()
    }

    pub fn degree(&self, id: AtomId) -> usize {
        self.adjacency.get(&id).map_or(0, Vec::len)
    }

    /// The bond joining `a` and `b` in either direction.
    pub fn bond_between(&self, a: AtomId, b: AtomId) -> Option<BondId> {
        self.adjacency
            .get(&a)?
            .iter()
            .copied()
            .find(|id| self.bonds.get(id).is_some_and(|bond| bond.connects(a, b)))
    }

    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownAtom`] if `id` is not in the graph.
    pub fn set_position(&mut self, id: AtomId, position: Point) -> Result<(), ValidationError> {
        let atom = self
            .atoms
            .get_mut(&id)
            .ok_or(ValidationError::UnknownAtom(id))?;
        atom.set_position(position);
        Ok(())
    }

    /// Positions of every atom at time zero, in insertion order.
    pub fn positions(&self) -> Vec<(AtomId, Point)> {
        self.positions_at(0.0)
    }

    /// Samples every atom's animated position at `time`.
    pub fn positions_at(&self, time: f32) -> Vec<(AtomId, Point)> {
        self.atoms
            .iter()
            .map(|(id, atom)| (*id, atom.position_at(time)))
            .collect()
    }

    /// Whether any atom or bond carries a keyframe track.
    pub fn is_animated(&self) -> bool {
        self.atoms
            .values()
            .any(|atom| atom.animated_channels().iter().any(|c| c.is_animated()))
            || self.bonds.values().any(|bond| {
                bond.length_multiplier().is_animated() || bond.offset().is_animated()
            })
    }

    /// Removes every atom and bond and restarts the session ordinal.
    pub fn clear(&mut self) {
        debug!(atoms = self.atoms.len(), bonds = self.bonds.len(); "Clearing graph");
        self.atoms.clear();
        self.bonds.clear();
        self.adjacency.clear();
        self.ordinal = 0;
        self.atom_capacity_warned = false;
        self.bond_capacity_warned = false;
    }

    /// Replaces the whole graph with `atoms` and no bonds in one step.
    pub fn replace_atoms(&mut self, atoms: impl IntoIterator<Item = Atom>) -> Vec<AtomId> {
        self.clear();
        atoms.into_iter().map(|atom| self.add_atom(atom)).collect()
    }

    /// Sum of atomic weights including attached hydrogens. Unknown elements
    /// weigh nothing.
    pub fn molecular_weight(&self) -> f64 {
        let hydrogen = element::atomic_weight("H");
        self.atoms
            .values()
            .map(|atom| {
                element::atomic_weight(atom.element())
                    + hydrogen * f64::from(atom.hydrogen_count())
            })
            .sum()
    }

    /// Condensed molecular formula, e.g. `C2H6O`.
    pub fn formula(&self) -> String {
        molviz_formula::molecular_formula(
            self.atoms
                .values()
                .map(|atom| (atom.element(), atom.hydrogen_count())),
        )
    }

    /// Linear notation of the atoms in left-to-right order, e.g. `CH3-CH2-OH`.
    pub fn linear_formula(&self) -> String {
        molviz_formula::linear_formula(
            self.atoms_by_x()
                .into_iter()
                .map(|atom| (atom.element(), atom.hydrogen_count())),
        )
    }

    /// Atoms sorted by x coordinate; ties keep insertion order.
    pub fn atoms_by_x(&self) -> Vec<&Atom> {
        let mut atoms: Vec<&Atom> = self.atoms.values().collect();
        atoms.sort_by(|a, b| a.position().x().total_cmp(&b.position().x()));
        atoms
    }

    /// Replaces the graph with the atoms of a formula.
    ///
    /// Atoms are created in token order, spaced `spacing` apart along the x
    /// axis and colored by element. When more than one atom results they are
    /// then centered on a line, or arranged in a grid for larger molecules.
    /// No bonds are created. Text without any element leaves the graph as is.
    ///
    /// At most [`SOFT_ATOM_CAPACITY`] atoms are generated. Lenient mode skips
    /// any token that would go past it.
    ///
    /// # Errors
    ///
    /// Returns [`MolvizError::Parse`] when `mode` is strict and the text
    /// contains characters outside the formula grammar or expands to more
    /// than [`SOFT_ATOM_CAPACITY`] atoms.
    pub fn generate_from_formula(
        &mut self,
        text: &str,
        mode: ParseMode,
        spacing: f32,
    ) -> Result<Vec<AtomId>, MolvizError> {
        let tokens = molviz_formula::parse_formula_with_limit(text, mode, SOFT_ATOM_CAPACITY)
            .map_err(|err| MolvizError::new_parse_error(err, text))?;
        let symbols = molviz_formula::expand_atoms(&tokens);
        if symbols.is_empty() {
            debug!(formula = text; "Formula produced no atoms");
            return Ok(Vec::new());
        }

        let atoms = symbols.iter().enumerate().map(|(index, symbol)| {
            let mut atom = Atom::new(*symbol).with_position(Point::new(index as f32 * spacing, 0.0));
            atom.set_fill_color(element::cpk_color(symbol));
            atom
        });
        let ids = self.replace_atoms(atoms);

        if ids.len() > 1 {
            if ids.len() <= FORMULA_LINE_LIMIT {
                layout::linear::arrange(self, spacing);
            } else {
                layout::grid::arrange(self, spacing);
            }
        }
        debug!(formula = text, atoms = ids.len(); "Generated atoms from formula");
        Ok(ids)
    }

    /// Marks every carbon as hidden.
    pub fn hide_carbons(&mut self) -> usize {
        let mut count = 0;
        for atom in self.atoms.values_mut().filter(|a| a.element() == "C") {
            atom.set_display_mode_unpinned(AtomDisplayMode::Hidden);
            count += 1;
        }
        count
    }

    /// Makes every hidden atom visible again.
    pub fn show_all_atoms(&mut self) -> usize {
        let mut count = 0;
        for atom in self
            .atoms
            .values_mut()
            .filter(|a| a.display_mode() == AtomDisplayMode::Hidden)
        {
            atom.set_display_mode_unpinned(AtomDisplayMode::Normal);
            count += 1;
        }
        count
    }

    /// Opens an edit bracket.
    pub fn begin_edit(&mut self, label: impl Into<String>) {
        let label = label.into();
        trace!(label = label.as_str(), depth = self.open_edits.len(); "Begin edit");
        self.open_edits.push(label);
    }

    /// Closes the innermost edit bracket and records it.
    pub fn end_edit(&mut self) -> Option<EditMarker> {
        let label = self.open_edits.pop()?;
        let marker = EditMarker {
            label,
            depth: self.open_edits.len(),
        };
        trace!(label = marker.label.as_str(), depth = marker.depth; "End edit");
        self.edit_log.push(marker.clone());
        Some(marker)
    }

    /// Number of edit brackets currently open.
    pub fn edit_depth(&self) -> usize {
        self.open_edits.len()
    }

    /// Completed edits, oldest first.
    pub fn edit_log(&self) -> &[EditMarker] {
        &self.edit_log
    }

    /// Runs `f` against a working copy inside an edit bracket and commits
    /// the copy only if `f` succeeds.
    ///
    /// ```
    /// use molviz::model::{Atom, MoleculeGraph};
    ///
    /// let mut graph = MoleculeGraph::new();
    /// let result = graph.edit("add pair", |g| {
    ///     let a = g.add_atom(Atom::new("C"));
    ///     g.add_bond(a, a)
    /// });
    /// assert!(result.is_err());
    /// assert!(graph.is_empty());
    /// ```
    pub fn edit<T, E>(
        &mut self,
        label: &str,
        f: impl FnOnce(&mut MoleculeGraph) -> Result<T, E>,
    ) -> Result<T, E> {
        let mut working = self.clone();
        working.begin_edit(label);
        match f(&mut working) {
            Ok(value) => {
                working.end_edit();
                *self = working;
                Ok(value)
            }
            Err(err) => {
                debug!(label; "Edit rolled back");
                Err(err)
            }
        }
    }

    fn check_atom_capacity(&mut self) {
        let over = self.atoms.len() > SOFT_ATOM_CAPACITY;
        if over && !self.atom_capacity_warned {
            warn!(
                atoms = self.atoms.len(),
                limit = SOFT_ATOM_CAPACITY;
                "Atom count exceeds recommended capacity"
            );
        }
        self.atom_capacity_warned = over;
    }

    fn check_bond_capacity(&mut self) {
        let over = self.bonds.len() > SOFT_BOND_CAPACITY;
        if over && !self.bond_capacity_warned {
            warn!(
                bonds = self.bonds.len(),
                limit = SOFT_BOND_CAPACITY;
                "Bond count exceeds recommended capacity"
            );
        }
        self.bond_capacity_warned = over;
    }
}
