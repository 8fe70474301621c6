//! Atoms of a molecule graph.

use std::fmt;

use molviz_core::{
    animation::{Animated, ValueRange},
    color::Color,
    draw::MIN_FONT_SIZE,
    element,
    geometry::Point,
    identifier::AtomId,
};

/// Range of the x and y position channels.
pub const POSITION_RANGE: ValueRange = ValueRange::symmetric(10_000.0);
/// Range of the z position channel.
pub const DEPTH_RANGE: ValueRange = ValueRange::symmetric(1_000.0);

pub const MIN_CHARGE: i32 = -3;
pub const MAX_CHARGE: i32 = 3;
pub const MAX_HYDROGENS: u32 = 4;

/// Per-atom visual encoding.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomDisplayMode {
    #[default]
    Normal,
    SymbolOnly,
    Hidden,
    Electron,
}

impl AtomDisplayMode {
    const ALL: [Self; 4] = [Self::Normal, Self::SymbolOnly, Self::Hidden, Self::Electron];

    /// Position in the persisted enumeration.
    pub fn index(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::SymbolOnly => 1,
            Self::Hidden => 2,
            Self::Electron => 3,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }
}

/// Formats a charge as a superscript label: `+`, `-`, `2+`, `3-`.
///
/// This is the ion notation used in chemical formulas: the magnitude comes
/// first and is omitted for a single charge, then the sign. It is not the
/// signed-number form (`+1`, `-2`) some editors show.
pub fn charge_label(charge: i32) -> Option<String> {
    match charge {
        0 => None,
        1 => Some("+".to_string()),
        -1 => Some("-".to_string()),
        c if c > 0 => Some(format!("{c}+")),
        c => Some(format!("{}-", c.unsigned_abs())),
    }
}

/// Formats the hydrogen suffix of a label: empty, `H` or `Hn`.
pub fn hydrogen_label(count: u32) -> String {
    match count {
        0 => String::new(),
        1 => "H".to_string(),
        n => format!("H{n}"),
    }
}

/// A vertex of the molecule graph.
///
/// A fresh atom has no id; [`MoleculeGraph::add_atom`](super::MoleculeGraph::add_atom)
/// assigns one together with the session ordinal.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    id: Option<AtomId>,
    ordinal: u64,
    element: String,
    charge: i32,
    hydrogen_count: u32,
    x: Animated,
    y: Animated,
    z: Animated,
    radius: f32,
    fill_color: Color,
    text_color: Color,
    font_size: f32,
    display_mode: AtomDisplayMode,
    display_mode_pinned: bool,
}

impl Default for Atom {
    fn default() -> Self {
        Self {
            id: None,
            ordinal: 0,
            element: "C".to_string(),
            charge: 0,
            hydrogen_count: 0,
            x: Animated::new(0.0, POSITION_RANGE),
            y: Animated::new(0.0, POSITION_RANGE),
            z: Animated::new(0.0, DEPTH_RANGE),
            radius: 20.0,
            fill_color: Color::white(),
            text_color: Color::default(),
            font_size: 24.0,
            display_mode: AtomDisplayMode::Normal,
            display_mode_pinned: false,
        }
    }
}

impl Atom {
    /// Creates an atom of `element` at the origin with default styling.
    pub fn new(element: impl Into<String>) -> Self {
        Self {
            element: element.into(),
            ..Self::default()
        }
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.set_position(position);
        self
    }

    pub fn with_charge(mut self, charge: i32) -> Self {
        self.set_charge(charge);
        self
    }

    pub fn with_hydrogen_count(mut self, count: u32) -> Self {
        self.set_hydrogen_count(count);
        self
    }

    pub fn with_display_mode(mut self, mode: AtomDisplayMode) -> Self {
        self.set_display_mode(mode);
        self
    }

    /// Id assigned by the owning graph; `None` before insertion.
    pub fn id(&self) -> Option<AtomId> {
        self.id
    }

    /// Session ordinal used for human-readable names.
    pub fn ordinal(&self) -> u64 {
        self.ordinal
    }

    pub(crate) fn attach(&mut self, id: AtomId, ordinal: u64) {
        self.id = Some(id);
        self.ordinal = ordinal;
    }

    pub fn element(&self) -> &str {
        &self.element
    }

    pub fn set_element(&mut self, element: impl Into<String>) {
        self.element = element.into();
    }

    /// Whether the element symbol is in the periodic table.
    pub fn is_known_element(&self) -> bool {
        element::is_known(&self.element)
    }

    pub fn charge(&self) -> i32 {
        self.charge
    }

    pub fn set_charge(&mut self, charge: i32) {
        self.charge = charge.clamp(MIN_CHARGE, MAX_CHARGE);
    }

    pub fn hydrogen_count(&self) -> u32 {
        self.hydrogen_count
    }

    pub fn set_hydrogen_count(&mut self, count: u32) {
        self.hydrogen_count = count.min(MAX_HYDROGENS);
    }

    /// Position at time zero.
    pub fn position(&self) -> Point {
        Point::new(self.x.value(), self.y.value())
    }

    pub fn position_at(&self, time: f32) -> Point {
        Point::new(self.x.sample(time), self.y.sample(time))
    }

    /// Replaces both planar channels with constants.
    pub fn set_position(&mut self, position: Point) {
        self.x.set(position.x());
        self.y.set(position.y());
    }

    pub fn z(&self) -> f32 {
        self.z.value()
    }

    pub fn set_z(&mut self, z: f32) {
        self.z.set(z);
    }

    pub fn x_channel_mut(&mut self) -> &mut Animated {
        &mut self.x
    }

    pub fn y_channel_mut(&mut self) -> &mut Animated {
        &mut self.y
    }

    pub fn z_channel_mut(&mut self) -> &mut Animated {
        &mut self.z
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Sets the radius and derives the label font size from it.
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius.max(0.0);
        self.font_size = MIN_FONT_SIZE.max(self.radius * 1.2);
    }

    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    pub fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    pub fn text_color(&self) -> Color {
        self.text_color
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = size.max(MIN_FONT_SIZE);
    }

    pub fn display_mode(&self) -> AtomDisplayMode {
        self.display_mode
    }

    /// Sets the display mode explicitly. An explicit mode is honored by the
    /// skeletal notation even when it would hide the atom.
    pub fn set_display_mode(&mut self, mode: AtomDisplayMode) {
        self.display_mode = mode;
        self.display_mode_pinned = true;
    }

    /// Sets the display mode without marking it as a user override.
    pub(crate) fn set_display_mode_unpinned(&mut self, mode: AtomDisplayMode) {
        self.display_mode = mode;
        self.display_mode_pinned = false;
    }

    pub fn is_display_mode_pinned(&self) -> bool {
        self.display_mode_pinned
    }

    /// Applies the element's CPK fill color and default radius.
    pub fn reset_to_element_defaults(&mut self) {
        self.fill_color = element::cpk_color(&self.element);
        self.set_radius(element::default_radius(&self.element));
    }

    /// Element symbol followed by attached hydrogens and the signed charge,
    /// e.g. `NH4+1` or `O-2`.
    pub fn label(&self) -> String {
        let mut label = format!("{}{}", self.element, hydrogen_label(self.hydrogen_count));
        if self.charge != 0 {
            label.push_str(&format!("{:+}", self.charge));
        }
        label
    }

    /// Label with the element name and the zero-padded session ordinal,
    /// e.g. `Oxygen (O) #003`.
    pub fn display_name(&self) -> String {
        let name = element::lookup(&self.element)
            .map(|info| info.name())
            .unwrap_or("Unknown");
        format!("{name} ({}) #{:03}", self.label(), self.ordinal)
    }

    pub(crate) fn animated_channels(&self) -> [&Animated; 3] {
        [&self.x, &self.y, &self.z]
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "{} [{id}]", self.label()),
            None => f.write_str(&self.label()),
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let atom = Atom::default();
        assert_eq!(atom.element(), "C");
        assert_eq!(atom.fill_color(), Color::white());
        assert_approx_eq!(f32, atom.radius(), 20.0);
        assert_approx_eq!(f32, atom.font_size(), 24.0);
        assert_eq!(atom.display_mode(), AtomDisplayMode::Normal);
        assert!(!atom.is_display_mode_pinned());
        assert!(atom.id().is_none());
    }

    #[test]
    fn test_charge_and_hydrogens_are_clamped() {
        let atom = Atom::new("N").with_charge(7).with_hydrogen_count(9);
        assert_eq!(atom.charge(), 3);
        assert_eq!(atom.hydrogen_count(), 4);

        let atom = Atom::new("O").with_charge(-5);
        assert_eq!(atom.charge(), -3);
    }

    #[test]
    fn test_radius_drives_font_size() {
        let mut atom = Atom::default();
        atom.set_radius(30.0);
        assert_approx_eq!(f32, atom.font_size(), 36.0);

        atom.set_radius(2.0);
        assert_approx_eq!(f32, atom.font_size(), MIN_FONT_SIZE);

        atom.set_radius(-4.0);
        assert_approx_eq!(f32, atom.radius(), 0.0);
    }

    #[test]
    fn test_position_is_clamped() {
        let atom = Atom::default().with_position(Point::new(20_000.0, -50.0));
        assert_approx_eq!(f32, atom.position().x(), 10_000.0);
        assert_approx_eq!(f32, atom.position().y(), -50.0);

        let mut atom = Atom::default();
        atom.set_z(5_000.0);
        assert_approx_eq!(f32, atom.z(), 1_000.0);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Atom::new("O").label(), "O");
        assert_eq!(Atom::new("C").with_hydrogen_count(3).label(), "CH3");
        assert_eq!(
            Atom::new("N").with_hydrogen_count(4).with_charge(1).label(),
            "NH4+1"
        );
        assert_eq!(Atom::new("O").with_charge(-2).label(), "O-2");
    }

    #[test]
    fn test_charge_label() {
        assert_eq!(charge_label(0), None);
        assert_eq!(charge_label(1).as_deref(), Some("+"));
        assert_eq!(charge_label(-1).as_deref(), Some("-"));
        assert_eq!(charge_label(2).as_deref(), Some("2+"));
        assert_eq!(charge_label(-3).as_deref(), Some("3-"));
    }

    #[test]
    fn test_explicit_display_mode_is_pinned() {
        let mut atom = Atom::default();
        atom.set_display_mode(AtomDisplayMode::Normal);
        assert!(atom.is_display_mode_pinned());

        atom.set_display_mode_unpinned(AtomDisplayMode::Hidden);
        assert!(!atom.is_display_mode_pinned());
        assert_eq!(atom.display_mode(), AtomDisplayMode::Hidden);
    }

    #[test]
    fn test_reset_to_element_defaults() {
        let mut atom = Atom::new("H");
        atom.reset_to_element_defaults();
        assert_eq!(atom.fill_color().to_hex(), "#FFFFFF");
        assert_approx_eq!(f32, atom.radius(), 15.0);

        let mut atom = Atom::new("O");
        atom.reset_to_element_defaults();
        assert_eq!(atom.fill_color().to_hex(), "#FF0D0D");
    }

    #[test]
    fn test_display_mode_index() {
        for index in 0..4 {
            let mode = AtomDisplayMode::from_index(index).unwrap();
            assert_eq!(mode.index(), index);
        }
        assert_eq!(AtomDisplayMode::from_index(4), None);
    }
}
