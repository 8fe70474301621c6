//! Periodic table lookups.
//!
//! Atoms carry their element as a free-form symbol string; it is validated
//! lazily through [`lookup`]. Unknown symbols are never an error: each query
//! has a documented fallback so rendering always proceeds.

use crate::color::Color;

/// Static data for one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementInfo {
    atomic_number: u8,
    symbol: &'static str,
    name: &'static str,
    atomic_weight: f64,
    cpk: [u8; 3],
}

impl ElementInfo {
    const fn new(
        atomic_number: u8,
        symbol: &'static str,
        name: &'static str,
        atomic_weight: f64,
        cpk: [u8; 3],
    ) -> Self {
        Self {
            atomic_number,
            symbol,
            name,
            atomic_weight,
            cpk,
        }
    }

    pub fn atomic_number(&self) -> u8 {
        self.atomic_number
    }

    pub fn symbol(&self) -> &'static str {
        self.symbol
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn atomic_weight(&self) -> f64 {
        self.atomic_weight
    }

    /// Jmol CPK color for the element.
    pub fn cpk_color(&self) -> Color {
        let [r, g, b] = self.cpk;
        Color::from_rgb8(r, g, b)
    }
}

/// Fallback fill for symbols missing from the table.
pub const FALLBACK_RGB: [u8; 3] = [128, 128, 128];

/// Electron count used when an element has no entry in the electron table.
pub const DEFAULT_BASE_ELECTRONS: u32 = 6;

static ELEMENTS: [ElementInfo; 118] = [
    ElementInfo::new(1, "H", "Hydrogen", 1.008, [255, 255, 255]),
    ElementInfo::new(2, "He", "Helium", 4.003, [217, 255, 255]),
    ElementInfo::new(3, "Li", "Lithium", 6.941, [204, 128, 255]),
    ElementInfo::new(4, "Be", "Beryllium", 9.012, [194, 255, 0]),
    ElementInfo::new(5, "B", "Boron", 10.81, [255, 181, 181]),
    ElementInfo::new(6, "C", "Carbon", 12.011, [144, 144, 144]),
    ElementInfo::new(7, "N", "Nitrogen", 14.007, [48, 80, 248]),
    ElementInfo::new(8, "O", "Oxygen", 15.999, [255, 13, 13]),
    ElementInfo::new(9, "F", "Fluorine", 18.998, [144, 224, 80]),
    ElementInfo::new(10, "Ne", "Neon", 20.180, [179, 227, 245]),
    ElementInfo::new(11, "Na", "Sodium", 22.990, [171, 92, 242]),
    ElementInfo::new(12, "Mg", "Magnesium", 24.305, [138, 255, 0]),
    ElementInfo::new(13, "Al", "Aluminium", 26.982, [191, 166, 166]),
    ElementInfo::new(14, "Si", "Silicon", 28.085, [240, 200, 160]),
    ElementInfo::new(15, "P", "Phosphorus", 30.974, [255, 128, 0]),
    ElementInfo::new(16, "S", "Sulfur", 32.06, [255, 255, 48]),
    ElementInfo::new(17, "Cl", "Chlorine", 35.45, [31, 240, 31]),
    ElementInfo::new(18, "Ar", "Argon", 39.948, [128, 209, 227]),
    ElementInfo::new(19, "K", "Potassium", 39.098, [143, 64, 212]),
    ElementInfo::new(20, "Ca", "Calcium", 40.078, [61, 255, 0]),
    ElementInfo::new(21, "Sc", "Scandium", 44.956, [230, 230, 230]),
    ElementInfo::new(22, "Ti", "Titanium", 47.867, [191, 194, 199]),
    ElementInfo::new(23, "V", "Vanadium", 50.942, [166, 166, 171]),
    ElementInfo::new(24, "Cr", "Chromium", 51.996, [138, 153, 199]),
    ElementInfo::new(25, "Mn", "Manganese", 54.938, [156, 122, 199]),
    ElementInfo::new(26, "Fe", "Iron", 55.845, [224, 102, 51]),
    ElementInfo::new(27, "Co", "Cobalt", 58.933, [240, 144, 160]),
    ElementInfo::new(28, "Ni", "Nickel", 58.693, [80, 208, 80]),
    ElementInfo::new(29, "Cu", "Copper", 63.546, [200, 128, 51]),
    ElementInfo::new(30, "Zn", "Zinc", 65.38, [125, 128, 176]),
    ElementInfo::new(31, "Ga", "Gallium", 69.723, [194, 143, 143]),
    ElementInfo::new(32, "Ge", "Germanium", 72.64, [102, 143, 143]),
    ElementInfo::new(33, "As", "Arsenic", 74.922, [189, 128, 227]),
    ElementInfo::new(34, "Se", "Selenium", 78.96, [255, 161, 0]),
    ElementInfo::new(35, "Br", "Bromine", 79.904, [166, 41, 41]),
    ElementInfo::new(36, "Kr", "Krypton", 83.798, [92, 184, 209]),
    ElementInfo::new(37, "Rb", "Rubidium", 85.468, [112, 46, 176]),
    ElementInfo::new(38, "Sr", "Strontium", 87.62, [0, 255, 0]),
    ElementInfo::new(39, "Y", "Yttrium", 88.906, [148, 255, 255]),
    ElementInfo::new(40, "Zr", "Zirconium", 91.224, [148, 224, 224]),
    ElementInfo::new(41, "Nb", "Niobium", 92.906, [115, 194, 201]),
    ElementInfo::new(42, "Mo", "Molybdenum", 95.96, [84, 181, 181]),
    ElementInfo::new(43, "Tc", "Technetium", 98.0, [59, 158, 158]),
    ElementInfo::new(44, "Ru", "Ruthenium", 101.07, [36, 143, 143]),
    ElementInfo::new(45, "Rh", "Rhodium", 102.906, [10, 125, 140]),
    ElementInfo::new(46, "Pd", "Palladium", 106.42, [0, 105, 133]),
    ElementInfo::new(47, "Ag", "Silver", 107.868, [192, 192, 192]),
    ElementInfo::new(48, "Cd", "Cadmium", 112.411, [255, 217, 143]),
    ElementInfo::new(49, "In", "Indium", 114.818, [166, 117, 115]),
    ElementInfo::new(50, "Sn", "Tin", 118.71, [102, 128, 128]),
    ElementInfo::new(51, "Sb", "Antimony", 121.76, [158, 99, 181]),
    ElementInfo::new(52, "Te", "Tellurium", 127.6, [212, 122, 0]),
    ElementInfo::new(53, "I", "Iodine", 126.90, [148, 0, 148]),
    ElementInfo::new(54, "Xe", "Xenon", 131.293, [66, 158, 176]),
    ElementInfo::new(55, "Cs", "Caesium", 132.905, [87, 23, 143]),
    ElementInfo::new(56, "Ba", "Barium", 137.327, [0, 201, 0]),
    ElementInfo::new(57, "La", "Lanthanum", 138.905, [112, 212, 255]),
    ElementInfo::new(58, "Ce", "Cerium", 140.116, [255, 255, 199]),
    ElementInfo::new(59, "Pr", "Praseodymium", 140.908, [217, 255, 199]),
    ElementInfo::new(60, "Nd", "Neodymium", 144.242, [199, 255, 199]),
    ElementInfo::new(61, "Pm", "Promethium", 145.0, [163, 255, 199]),
    ElementInfo::new(62, "Sm", "Samarium", 150.36, [143, 255, 199]),
    ElementInfo::new(63, "Eu", "Europium", 151.964, [97, 255, 199]),
    ElementInfo::new(64, "Gd", "Gadolinium", 157.25, [69, 255, 199]),
    ElementInfo::new(65, "Tb", "Terbium", 158.925, [48, 255, 199]),
    ElementInfo::new(66, "Dy", "Dysprosium", 162.5, [31, 255, 199]),
    ElementInfo::new(67, "Ho", "Holmium", 164.930, [0, 255, 156]),
    ElementInfo::new(68, "Er", "Erbium", 167.259, [0, 230, 117]),
    ElementInfo::new(69, "Tm", "Thulium", 168.934, [0, 212, 82]),
    ElementInfo::new(70, "Yb", "Ytterbium", 173.054, [0, 191, 56]),
    ElementInfo::new(71, "Lu", "Lutetium", 174.967, [0, 171, 36]),
    ElementInfo::new(72, "Hf", "Hafnium", 178.49, [77, 194, 255]),
    ElementInfo::new(73, "Ta", "Tantalum", 180.948, [77, 166, 255]),
    ElementInfo::new(74, "W", "Tungsten", 183.84, [33, 148, 214]),
    ElementInfo::new(75, "Re", "Rhenium", 186.207, [38, 125, 171]),
    ElementInfo::new(76, "Os", "Osmium", 190.23, [38, 102, 150]),
    ElementInfo::new(77, "Ir", "Iridium", 192.217, [23, 84, 135]),
    ElementInfo::new(78, "Pt", "Platinum", 195.084, [208, 208, 224]),
    ElementInfo::new(79, "Au", "Gold", 196.967, [255, 209, 35]),
    ElementInfo::new(80, "Hg", "Mercury", 200.592, [184, 184, 208]),
    ElementInfo::new(81, "Tl", "Thallium", 204.383, [166, 84, 77]),
    ElementInfo::new(82, "Pb", "Lead", 207.2, [87, 89, 97]),
    ElementInfo::new(83, "Bi", "Bismuth", 208.980, [158, 79, 181]),
    ElementInfo::new(84, "Po", "Polonium", 209.0, [171, 92, 0]),
    ElementInfo::new(85, "At", "Astatine", 210.0, [117, 79, 69]),
    ElementInfo::new(86, "Rn", "Radon", 222.0, [66, 130, 150]),
    ElementInfo::new(87, "Fr", "Francium", 223.0, [66, 0, 102]),
    ElementInfo::new(88, "Ra", "Radium", 226.0, [0, 125, 0]),
    ElementInfo::new(89, "Ac", "Actinium", 227.0, [112, 171, 250]),
    ElementInfo::new(90, "Th", "Thorium", 232.038, [0, 186, 255]),
    ElementInfo::new(91, "Pa", "Protactinium", 231.036, [0, 161, 255]),
    ElementInfo::new(92, "U", "Uranium", 238.029, [0, 143, 255]),
    ElementInfo::new(93, "Np", "Neptunium", 237.0, [0, 128, 255]),
    ElementInfo::new(94, "Pu", "Plutonium", 244.0, [0, 107, 255]),
    ElementInfo::new(95, "Am", "Americium", 243.0, [84, 92, 242]),
    ElementInfo::new(96, "Cm", "Curium", 247.0, [120, 92, 227]),
    ElementInfo::new(97, "Bk", "Berkelium", 247.0, [138, 79, 227]),
    ElementInfo::new(98, "Cf", "Californium", 251.0, [161, 54, 212]),
    ElementInfo::new(99, "Es", "Einsteinium", 252.0, [179, 31, 212]),
    ElementInfo::new(100, "Fm", "Fermium", 257.0, [179, 31, 186]),
    ElementInfo::new(101, "Md", "Mendelevium", 258.0, [179, 13, 166]),
    ElementInfo::new(102, "No", "Nobelium", 259.0, [189, 13, 135]),
    ElementInfo::new(103, "Lr", "Lawrencium", 262.0, [199, 0, 102]),
    ElementInfo::new(104, "Rf", "Rutherfordium", 267.0, [204, 0, 89]),
    ElementInfo::new(105, "Db", "Dubnium", 268.0, [209, 0, 79]),
    ElementInfo::new(106, "Sg", "Seaborgium", 271.0, [217, 0, 69]),
    ElementInfo::new(107, "Bh", "Bohrium", 272.0, [224, 0, 56]),
    ElementInfo::new(108, "Hs", "Hassium", 270.0, [230, 0, 46]),
    ElementInfo::new(109, "Mt", "Meitnerium", 276.0, [235, 0, 38]),
    ElementInfo::new(110, "Ds", "Darmstadtium", 281.0, [235, 0, 38]),
    ElementInfo::new(111, "Rg", "Roentgenium", 280.0, [235, 0, 38]),
    ElementInfo::new(112, "Cn", "Copernicium", 285.0, [235, 0, 38]),
    ElementInfo::new(113, "Nh", "Nihonium", 284.0, [235, 0, 38]),
    ElementInfo::new(114, "Fl", "Flerovium", 289.0, [235, 0, 38]),
    ElementInfo::new(115, "Mc", "Moscovium", 288.0, [235, 0, 38]),
    ElementInfo::new(116, "Lv", "Livermorium", 293.0, [235, 0, 38]),
    ElementInfo::new(117, "Ts", "Tennessine", 294.0, [235, 0, 38]),
    ElementInfo::new(118, "Og", "Oganesson", 294.0, [235, 0, 38]),
];

/// Looks up an element by its case-sensitive symbol (`"Cl"`, not `"CL"`).
pub fn lookup(symbol: &str) -> Option<&'static ElementInfo> {
    ELEMENTS.iter().find(|element| element.symbol == symbol)
}

pub fn is_known(symbol: &str) -> bool {
    lookup(symbol).is_some()
}

/// CPK fill color, gray for unknown symbols.
pub fn cpk_color(symbol: &str) -> Color {
    lookup(symbol).map_or_else(
        || {
            let [r, g, b] = FALLBACK_RGB;
            Color::from_rgb8(r, g, b)
        },
        ElementInfo::cpk_color,
    )
}

/// Atomic weight in g/mol, `0.0` for unknown symbols.
pub fn atomic_weight(symbol: &str) -> f64 {
    lookup(symbol).map_or(0.0, ElementInfo::atomic_weight)
}

/// Default drawing radius for a freshly reset atom.
pub fn default_radius(symbol: &str) -> f32 {
    match symbol {
        "H" => 15.0,
        "C" | "N" | "O" => 20.0,
        _ => 25.0,
    }
}

/// Neutral-atom electron count used by the electron-dot overlay.
///
/// Elements up to calcium and a handful of common heavier ones use their
/// atomic number; everything else falls back to [`DEFAULT_BASE_ELECTRONS`].
pub fn base_electrons(symbol: &str) -> u32 {
    match lookup(symbol) {
        Some(element)
            if element.atomic_number <= 20
                || matches!(symbol, "Fe" | "Cu" | "Zn" | "Br" | "I") =>
        {
            u32::from(element.atomic_number)
        }
        _ => DEFAULT_BASE_ELECTRONS,
    }
}

/// Number of lone pairs drawn around the atom in electronic notation.
pub fn lone_pairs(symbol: &str) -> u32 {
    match symbol {
        "O" | "S" => 2,
        "N" | "P" => 1,
        "F" | "Cl" | "Br" | "I" => 3,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_table_is_ordered_by_atomic_number() {
        for (index, element) in ELEMENTS.iter().enumerate() {
            assert_eq!(usize::from(element.atomic_number()), index + 1);
        }
    }

    #[test]
    fn test_lookup_known_and_unknown() {
        let oxygen = lookup("O").unwrap();
        assert_eq!(oxygen.name(), "Oxygen");
        assert_eq!(oxygen.atomic_number(), 8);
        assert!(lookup("Xx").is_none());
        assert!(lookup("cl").is_none());
        assert!(is_known("Cl"));
    }

    #[test]
    fn test_cpk_colors() {
        assert_eq!(cpk_color("C").to_rgb8(), [144, 144, 144]);
        assert_eq!(cpk_color("N").to_rgb8(), [48, 80, 248]);
        assert_eq!(cpk_color("O").to_rgb8(), [255, 13, 13]);
        assert_eq!(cpk_color("Zz").to_rgb8(), FALLBACK_RGB);
    }

    #[test]
    fn test_atomic_weight() {
        assert_approx_eq!(f64, atomic_weight("C"), 12.011);
        assert_approx_eq!(f64, atomic_weight("Unobtainium"), 0.0);
    }

    #[test]
    fn test_base_electrons() {
        assert_eq!(base_electrons("H"), 1);
        assert_eq!(base_electrons("Ca"), 20);
        assert_eq!(base_electrons("Fe"), 26);
        assert_eq!(base_electrons("I"), 53);
        assert_eq!(base_electrons("Sc"), DEFAULT_BASE_ELECTRONS);
        assert_eq!(base_electrons("Qq"), DEFAULT_BASE_ELECTRONS);
    }

    #[test]
    fn test_lone_pairs() {
        assert_eq!(lone_pairs("O"), 2);
        assert_eq!(lone_pairs("N"), 1);
        assert_eq!(lone_pairs("Cl"), 3);
        assert_eq!(lone_pairs("C"), 0);
    }

    #[test]
    fn test_default_radius() {
        assert_approx_eq!(f32, default_radius("H"), 15.0);
        assert_approx_eq!(f32, default_radius("O"), 20.0);
        assert_approx_eq!(f32, default_radius("Fe"), 25.0);
    }
}
