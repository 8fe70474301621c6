//! Bonds of a molecule graph.

use std::fmt;

use molviz_core::{
    animation::{Animated, ValueRange},
    color::Color,
    identifier::{AtomId, BondId},
};

pub const MIN_THICKNESS: f32 = 0.1;
pub const MIN_ORDER: f32 = 0.1;
pub const MAX_ORDER: f32 = 3.0;
/// Range of the length multiplier channel.
pub const LENGTH_MULTIPLIER_RANGE: ValueRange = ValueRange::new(0.1, 5.0);
/// Range of the perpendicular offset channel.
pub const OFFSET_RANGE: ValueRange = ValueRange::symmetric(200.0);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BondType {
    #[default]
    Single,
    Double,
    Triple,
    /// Stereo bond pointing toward the viewer.
    Wedge,
    /// Stereo bond pointing away from the viewer.
    Dash,
    /// Stereo bond of unknown configuration.
    Wavy,
    Partial,
    Coordinate,
    Aromatic,
    Hydrogen,
    Ionic,
    Hidden,
}

impl BondType {
    pub const ALL: [Self; 12] = [
        Self::Single,
        Self::Double,
        Self::Triple,
        Self::Wedge,
        Self::Dash,
        Self::Wavy,
        Self::Partial,
        Self::Coordinate,
        Self::Aromatic,
        Self::Hydrogen,
        Self::Ionic,
        Self::Hidden,
    ];

    /// Position in the persisted enumeration.
    pub fn index(self) -> u8 {
        match self {
            Self::Single => 0,
            Self::Double => 1,
            Self::Triple => 2,
            Self::Wedge => 3,
            Self::Dash => 4,
            Self::Wavy => 5,
            Self::Partial => 6,
            Self::Coordinate => 7,
            Self::Aromatic => 8,
            Self::Hydrogen => 9,
            Self::Ionic => 10,
            Self::Hidden => 11,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    /// Stroke width a bond of this type gets when its type is changed.
    pub fn default_thickness(self) -> f32 {
        match self {
            Self::Single | Self::Dash | Self::Wavy => 2.0,
            Self::Double => 1.8,
            Self::Triple => 1.6,
            Self::Wedge | Self::Ionic => 3.0,
            Self::Partial | Self::Aromatic => 1.5,
            Self::Coordinate => 2.5,
            Self::Hydrogen => 1.0,
            Self::Hidden => 0.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Double => "double",
            Self::Triple => "triple",
            Self::Wedge => "wedge",
            Self::Dash => "dash",
            Self::Wavy => "wavy",
            Self::Partial => "partial",
            Self::Coordinate => "coordinate",
            Self::Aromatic => "aromatic",
            Self::Hydrogen => "hydrogen",
            Self::Ionic => "ionic",
            Self::Hidden => "hidden",
        }
    }
}

impl fmt::Display for BondType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoration drawn at the second endpoint of a bond.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndStyle {
    #[default]
    Normal,
    Arrow,
    Circle,
    Square,
}

impl EndStyle {
    const ALL: [Self; 4] = [Self::Normal, Self::Arrow, Self::Circle, Self::Square];

    pub fn index(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::Arrow => 1,
            Self::Circle => 2,
            Self::Square => 3,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }
}

/// An undirected edge between two atoms, referenced by id.
#[derive(Debug, Clone, PartialEq)]
pub struct Bond {
    id: Option<BondId>,
    a: AtomId,
    b: AtomId,
    bond_type: BondType,
    color: Color,
    thickness: f32,
    opacity: f32,
    end_style: EndStyle,
    order: f32,
    length_multiplier: Animated,
    offset: Animated,
}

impl Bond {
    /// Creates a single bond between `a` and `b` with default styling.
    pub fn new(a: AtomId, b: AtomId) -> Self {
        Self {
            id: None,
            a,
            b,
            bond_type: BondType::Single,
            color: Color::default(),
            thickness: 2.0,
            opacity: 1.0,
            end_style: EndStyle::Normal,
            order: 1.0,
            length_multiplier: Animated::new(1.0, LENGTH_MULTIPLIER_RANGE),
            offset: Animated::new(0.0, OFFSET_RANGE),
        }
    }

    /// Creates a bond of `bond_type` using that type's default thickness.
    pub fn with_type(a: AtomId, b: AtomId, bond_type: BondType) -> Self {
        let mut bond = Self::new(a, b);
        bond.set_bond_type(bond_type);
        bond
    }

    pub fn id(&self) -> Option<BondId> {
        self.id
    }

    pub(crate) fn attach(&mut self, id: BondId) {
        self.id = Some(id);
    }

    pub fn a(&self) -> AtomId {
        self.a
    }

    pub fn b(&self) -> AtomId {
        self.b
    }

    pub fn endpoints(&self) -> (AtomId, AtomId) {
        (self.a, self.b)
    }

    /// Whether this bond joins `x` and `y` in either direction.
    pub fn connects(&self, x: AtomId, y: AtomId) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }

    pub fn involves(&self, atom: AtomId) -> bool {
        self.a == atom || self.b == atom
    }

    /// The endpoint opposite `atom`, if `atom` is an endpoint.
    pub fn other(&self, atom: AtomId) -> Option<AtomId> {
        if self.a == atom {
            Some(self.b)
        } else if self.b == atom {
            Some(self.a)
        } else {
            None
        }
    }

    pub fn bond_type(&self) -> BondType {
        self.bond_type
    }

    /// Changes the type and resets the thickness to the type's default.
    pub fn set_bond_type(&mut self, bond_type: BondType) {
        self.bond_type = bond_type;
        self.thickness = bond_type.default_thickness().max(MIN_THICKNESS);
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn set_thickness(&mut self, thickness: f32) {
        self.thickness = thickness.max(MIN_THICKNESS);
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn end_style(&self) -> EndStyle {
        self.end_style
    }

    pub fn set_end_style(&mut self, end_style: EndStyle) {
        self.end_style = end_style;
    }

    pub fn order(&self) -> f32 {
        self.order
    }

    pub fn set_order(&mut self, order: f32) {
        self.order = order.clamp(MIN_ORDER, MAX_ORDER);
    }

    pub fn length_multiplier(&self) -> &Animated {
        &self.length_multiplier
    }

    pub fn length_multiplier_mut(&mut self) -> &mut Animated {
        &mut self.length_multiplier
    }

    pub fn offset(&self) -> &Animated {
        &self.offset
    }

    pub fn offset_mut(&mut self) -> &mut Animated {
        &mut self.offset
    }

    /// Stroke color with the bond's opacity folded into the alpha channel.
    pub fn effective_color(&self) -> Color {
        self.color.with_opacity(self.opacity)
    }
}

impl fmt::Display for Bond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bond {} - {}", self.bond_type, self.a, self.b)?;
        if (self.order - 1.0).abs() > f32::EPSILON {
            write!(f, " ({:.1})", self.order)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use molviz_core::identifier::IdAllocator;

    use super::*;

    fn pair() -> (AtomId, AtomId) {
        let mut ids = IdAllocator::new();
        (ids.next_atom(), ids.next_atom())
    }

    #[test]
    fn test_defaults() {
        let (a, b) = pair();
        let bond = Bond::new(a, b);
        assert_eq!(bond.bond_type(), BondType::Single);
        assert_approx_eq!(f32, bond.thickness(), 2.0);
        assert_approx_eq!(f32, bond.opacity(), 1.0);
        assert_approx_eq!(f32, bond.order(), 1.0);
        assert_eq!(bond.end_style(), EndStyle::Normal);
        assert_approx_eq!(f32, bond.length_multiplier().value(), 1.0);
        assert_approx_eq!(f32, bond.offset().value(), 0.0);
    }

    #[test]
    fn test_type_change_resets_thickness() {
        let (a, b) = pair();
        let mut bond = Bond::new(a, b);
        bond.set_bond_type(BondType::Wedge);
        assert_approx_eq!(f32, bond.thickness(), 3.0);

        // Hidden has a zero default but the stroke floor still applies.
        bond.set_bond_type(BondType::Hidden);
        assert_approx_eq!(f32, bond.thickness(), MIN_THICKNESS);
    }

    #[test]
    fn test_setters_clamp() {
        let (a, b) = pair();
        let mut bond = Bond::new(a, b);
        bond.set_opacity(1.7);
        bond.set_order(9.0);
        bond.set_thickness(0.0);
        bond.length_multiplier_mut().set(12.0);
        bond.offset_mut().set(-900.0);

        assert_approx_eq!(f32, bond.opacity(), 1.0);
        assert_approx_eq!(f32, bond.order(), MAX_ORDER);
        assert_approx_eq!(f32, bond.thickness(), MIN_THICKNESS);
        assert_approx_eq!(f32, bond.length_multiplier().value(), 5.0);
        assert_approx_eq!(f32, bond.offset().value(), -200.0);
    }

    #[test]
    fn test_connects_is_undirected() {
        let (a, b) = pair();
        let bond = Bond::new(a, b);
        assert!(bond.connects(a, b));
        assert!(bond.connects(b, a));
        assert_eq!(bond.other(a), Some(b));
        assert_eq!(bond.other(b), Some(a));
    }

    #[test]
    fn test_effective_color_folds_opacity() {
        let (a, b) = pair();
        let mut bond = Bond::new(a, b);
        bond.set_opacity(0.5);
        assert_approx_eq!(f32, bond.effective_color().alpha(), 0.5);
    }

    #[test]
    fn test_index_mapping() {
        for bond_type in BondType::ALL {
            assert_eq!(BondType::from_index(bond_type.index()), Some(bond_type));
        }
        assert_eq!(BondType::from_index(12), None);
        assert_eq!(EndStyle::from_index(2), Some(EndStyle::Circle));
    }
}
