//! Named molecule presets and their JSON store.
//!
//! A [`Preset`] is a self-contained snapshot of a molecule: atoms in order
//! and bonds that refer to atoms by their index in that list. Saving maps
//! graph ids to indices and loading maps them back to fresh ids.
//!
//! Field names are PascalCase, colors are `#RRGGBB` strings and enums are
//! stored as their integer index:
//!
//! ```json
//! {
//!   "Name": "Water",
//!   "Formula": "H2O",
//!   "Category": "Simple",
//!   "Atoms": [{ "Element": "O", "X": 0.0, "Y": 0.0, "DisplayMode": 0 }],
//!   "Bonds": []
//! }
//! ```

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

use molviz_core::{color::Color, geometry::Point, identifier::AtomId};

use crate::{
    error::MolvizError,
    model::{Atom, AtomDisplayMode, Bond, BondType, EndStyle, MoleculeGraph},
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoleculeCategory {
    #[default]
    Simple,
    Alkane,
    Alkene,
    Alkyne,
    Aromatic,
    Alcohol,
    Ether,
    Aldehyde,
    Ketone,
    Acid,
    Ester,
    Amine,
    Amide,
    Cyclic,
    Carbohydrate,
    Pharmaceutical,
    Biological,
    Complex,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PresetAtom {
    pub element: String,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub charge: i32,
    pub hydrogen_count: u32,
    pub fill_color: String,
    pub text_color: String,
    pub radius: f32,
    pub font_size: f32,
    pub display_mode: u8,
}

impl Default for PresetAtom {
    fn default() -> Self {
        Self {
            element: "C".to_string(),
            x: 0.0,
            y: 0.0,
            z: 0.0,
            charge: 0,
            hydrogen_count: 0,
            fill_color: "#FFFFFF".to_string(),
            text_color: "#000000".to_string(),
            radius: 20.0,
            font_size: 24.0,
            display_mode: 0,
        }
    }
}

impl PresetAtom {
    fn from_atom(atom: &Atom) -> Self {
        let position = atom.position();
        Self {
            element: atom.element().to_string(),
            x: position.x(),
            y: position.y(),
            z: atom.z(),
            charge: atom.charge(),
            hydrogen_count: atom.hydrogen_count(),
            fill_color: atom.fill_color().to_hex(),
            text_color: atom.text_color().to_hex(),
            radius: atom.radius(),
            font_size: atom.font_size(),
            display_mode: atom.display_mode().index(),
        }
    }

    fn to_atom(&self) -> Atom {
        let mut atom = Atom::new(self.element.as_str())
            .with_position(Point::new(self.x, self.y))
            .with_charge(self.charge)
            .with_hydrogen_count(self.hydrogen_count);
        atom.set_z(self.z);
        atom.set_fill_color(parse_color(&self.fill_color, Color::white()));
        atom.set_text_color(parse_color(&self.text_color, Color::default()));
        atom.set_radius(self.radius);
        atom.set_font_size(self.font_size);

        match AtomDisplayMode::from_index(self.display_mode) {
            Some(AtomDisplayMode::Normal) => {}
            Some(mode) => atom.set_display_mode(mode),
            None => {
                warn!(element = self.element, mode = self.display_mode; "Unknown atom display mode");
            }
        }
        atom
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PresetBond {
    pub atom1_index: usize,
    pub atom2_index: usize,
    pub bond_type: u8,
    pub color: String,
    pub thickness: f32,
    pub opacity: f32,
    pub end_style: u8,
    pub order: f32,
}

impl Default for PresetBond {
    fn default() -> Self {
        Self {
            atom1_index: 0,
            atom2_index: 0,
            bond_type: 0,
            color: "#000000".to_string(),
            thickness: 2.0,
            opacity: 1.0,
            end_style: 0,
            order: 1.0,
        }
    }
}

impl PresetBond {
    fn from_bond(bond: &Bond, a: usize, b: usize) -> Self {
        Self {
            atom1_index: a,
            atom2_index: b,
            bond_type: bond.bond_type().index(),
            color: bond.color().to_hex(),
            thickness: bond.thickness(),
            opacity: bond.opacity(),
            end_style: bond.end_style().index(),
            order: bond.order(),
        }
    }

    fn to_bond(&self, a: AtomId, b: AtomId) -> Bond {
        let bond_type = BondType::from_index(self.bond_type).unwrap_or_else(|| {
            warn!(bond_type = self.bond_type; "Unknown bond type, using single");
            BondType::Single
        });
        let mut bond = Bond::with_type(a, b, bond_type);
        bond.set_color(parse_color(&self.color, Color::default()));
        bond.set_thickness(self.thickness);
        bond.set_opacity(self.opacity);
        bond.set_end_style(EndStyle::from_index(self.end_style).unwrap_or_default());
        bond.set_order(self.order);
        bond
    }
}

/// A named, serializable molecule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Preset {
    pub name: String,
    pub formula: String,
    pub description: String,
    pub category: MoleculeCategory,
    pub atoms: Vec<PresetAtom>,
    pub bonds: Vec<PresetBond>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
}

impl Preset {
    /// Captures `graph` under `name`. Bond endpoints become indices into the
    /// atom list in graph order.
    pub fn from_graph(name: impl Into<String>, graph: &MoleculeGraph) -> Self {
        let index: HashMap<AtomId, usize> = graph
            .atom_ids()
            .enumerate()
            .map(|(i, id)| (id, i))
            .collect();
        let atoms = graph.atoms().map(|(_, atom)| PresetAtom::from_atom(atom)).collect();
        let bonds = graph
            .bonds()
            .filter_map(|(_, bond)| {
                let a = *index.get(&bond.a())?;
                let b = *index.get(&bond.b())?;
                Some(PresetBond::from_bond(bond, a, b))
            })
            .collect();

        Self {
            name: name.into(),
            formula: graph.formula(),
            atoms,
            bonds,
            ..Self::default()
        }
    }

    /// Builds a new graph from the preset.
    pub fn to_graph(&self) -> MoleculeGraph {
        let mut graph = MoleculeGraph::new();
        self.load_into(&mut graph);
        graph
    }

    /// Replaces the contents of `graph` with the preset in one edit.
    ///
    /// Bonds whose indices are out of range, point an atom at itself or
    /// repeat an earlier pair are skipped with a warning. Returns the number
    /// of skipped bonds.
    pub fn load_into(&self, graph: &mut MoleculeGraph) -> usize {
        graph.begin_edit(format!("load preset {}", self.name));
        let ids = graph.replace_atoms(self.atoms.iter().map(PresetAtom::to_atom));

        let mut skipped = 0;
        for (position, record) in self.bonds.iter().enumerate() {
            let endpoints = (ids.get(record.atom1_index), ids.get(record.atom2_index));
            let (Some(a), Some(b)) = endpoints else {
                warn!(
                    preset = self.name,
                    bond = position,
                    a = record.atom1_index,
                    b = record.atom2_index;
                    "Skipping bond with out-of-range atom index"
                );
                skipped += 1;
                continue;
            };
            if let Err(err) = graph.add_bond_with(record.to_bond(*a, *b)) {
                warn!(preset = self.name, bond = position, err:%; "Skipping invalid bond");
                skipped += 1;
            }
        }
        graph.end_edit();

        debug!(
            preset = self.name,
            atoms = graph.atom_count(),
            bonds = graph.bond_count(),
            skipped;
            "Loaded preset"
        );
        skipped
    }
}

fn parse_color(value: &str, fallback: Color) -> Color {
    Color::new(value).unwrap_or_else(|err| {
        warn!(value, err:%; "Invalid preset color, using fallback");
        fallback
    })
}

/// A JSON file holding a list of presets.
#[derive(Debug, Clone)]
pub struct PresetStore {
    path: PathBuf,
}

impl PresetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every preset. A missing, unreadable or corrupt file yields an
    /// empty list.
    pub fn load(&self) -> Vec<Preset> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) => {
                info!(path:? = self.path, err:%; "No preset file loaded");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<Preset>>(&json) {
            Ok(presets) => {
                debug!(path:? = self.path, count = presets.len(); "Loaded presets");
                presets
            }
            Err(err) => {
                error!(path:? = self.path, err:%; "Corrupt preset file, ignoring");
                Vec::new()
            }
        }
    }

    /// Writes `presets` as indented JSON, replacing the file.
    pub fn save(&self, presets: &[Preset]) -> Result<(), MolvizError> {
        let json = serde_json::to_string_pretty(presets)
            .map_err(|err| MolvizError::Persistence(err.to_string()))?;
        fs::write(&self.path, json)?;
        info!(path:? = self.path, count = presets.len(); "Saved presets");
        Ok(())
    }

    pub fn find(&self, name: &str) -> Option<Preset> {
        self.load().into_iter().find(|preset| preset.name == name)
    }

    /// Saves `preset`, replacing any stored preset of the same name.
    ///
    /// # Errors
    ///
    /// Returns [`MolvizError::Persistence`] without touching the file when
    /// the stored presets cannot be parsed.
    pub fn upsert(&self, preset: Preset) -> Result<(), MolvizError> {
        let mut presets = self.load_existing()?;
        presets.retain(|existing| existing.name != preset.name);
        presets.push(preset);
        self.save(&presets)
    }

    /// Deletes the preset called `name`. Returns whether one was removed.
    /// A corrupt file is an error, as for [`upsert`](Self::upsert).
    pub fn remove(&self, name: &str) -> Result<bool, MolvizError> {
        let mut presets = self.load_existing()?;
        let before = presets.len();
        presets.retain(|preset| preset.name != name);
        if presets.len() == before {
            return Ok(false);
        }
        self.save(&presets)?;
        Ok(true)
    }

    /// Reads the stored presets before a rewrite. Only a missing file counts
    /// as empty.
    fn load_existing(&self) -> Result<Vec<Preset>, MolvizError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        serde_json::from_str(&json).map_err(|err| {
            error!(path:? = self.path, err:%; "Corrupt preset file, refusing to overwrite");
            MolvizError::Persistence(format!("{}: {err}", self.path.display()))
        })
    }
}
