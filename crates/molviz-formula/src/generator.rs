//! Formula text generation.
//!
//! [`molecular_formula`] tallies a set of atoms and their implicit hydrogens
//! into a condensed formula such as `C6H12O6`; [`linear_formula`] joins atom
//! labels in reading order.

use std::collections::BTreeMap;

/// Elements listed first, in this order; everything else follows sorted by
/// symbol.
pub const PRIORITY_ORDER: [&str; 10] = ["C", "H", "N", "O", "F", "P", "S", "Cl", "Br", "I"];

/// Element symbol to atom count.
pub type ElementCounts = BTreeMap<String, u64>;

/// Tallies `(symbol, implicit_hydrogens)` pairs; hydrogens count toward `H`.
pub fn tally<I, S>(atoms: I) -> ElementCounts
where
    I: IntoIterator<Item = (S, u32)>,
    S: AsRef<str>,
{
    let mut counts = ElementCounts::new();
    for (symbol, hydrogens) in atoms {
        *counts.entry(symbol.as_ref().to_string()).or_default() += 1;
        if hydrogens > 0 {
            *counts.entry("H".to_string()).or_default() += u64::from(hydrogens);
        }
    }
    counts
}

/// Renders counts in priority order; a count of 1 is omitted and zero
/// counts are skipped.
///
/// ```
/// use molviz_formula::{ElementCounts, format_counts};
///
/// let counts = ElementCounts::from([
///     ("O".to_string(), 6),
///     ("C".to_string(), 6),
///     ("H".to_string(), 12),
/// ]);
/// assert_eq!(format_counts(&counts), "C6H12O6");
/// ```
pub fn format_counts(counts: &ElementCounts) -> String {
    let mut formula = String::new();
    let mut append = |symbol: &str, count: u64| {
        if count == 0 {
            return;
        }
        formula.push_str(symbol);
        if count > 1 {
            formula.push_str(&count.to_string());
        }
    };

    for symbol in PRIORITY_ORDER {
        if let Some(&count) = counts.get(symbol) {
            append(symbol, count);
        }
    }
    for (symbol, &count) in counts {
        if !PRIORITY_ORDER.contains(&symbol.as_str()) {
            append(symbol, count);
        }
    }
    formula
}

/// Condensed molecular formula of a set of atoms.
pub fn molecular_formula<I, S>(atoms: I) -> String
where
    I: IntoIterator<Item = (S, u32)>,
    S: AsRef<str>,
{
    format_counts(&tally(atoms))
}

/// Label of one atom in linear notation: the symbol, then `H` or `Hn`.
pub fn linear_label(symbol: &str, hydrogens: u32) -> String {
    match hydrogens {
        0 => symbol.to_string(),
        1 => format!("{symbol}H"),
        n => format!("{symbol}H{n}"),
    }
}

/// Linear notation for atoms already sorted in reading order.
///
/// ```
/// use molviz_formula::linear_formula;
///
/// assert_eq!(linear_formula([("C", 3), ("C", 2), ("O", 1)]), "CH3-CH2-OH");
/// ```
pub fn linear_formula<I, S>(atoms: I) -> String
where
    I: IntoIterator<Item = (S, u32)>,
    S: AsRef<str>,
{
    atoms
        .into_iter()
        .map(|(symbol, hydrogens)| linear_label(symbol.as_ref(), hydrogens))
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glucose_from_atoms() {
        let mut atoms = Vec::new();
        atoms.extend(std::iter::repeat_n(("C", 0), 6));
        atoms.extend(std::iter::repeat_n(("H", 0), 12));
        atoms.extend(std::iter::repeat_n(("O", 0), 6));
        assert_eq!(molecular_formula(atoms), "C6H12O6");
    }

    #[test]
    fn test_implicit_hydrogens_join_h_tally() {
        assert_eq!(molecular_formula([("C", 4)]), "CH4");
        assert_eq!(molecular_formula([("C", 3), ("C", 2), ("O", 1)]), "C2H6O");
    }

    #[test]
    fn test_priority_then_lexicographic() {
        let formula = molecular_formula([("Zn", 0), ("Na", 0), ("Cl", 0), ("Br", 0), ("Ag", 0)]);
        assert_eq!(formula, "ClBrAgNaZn");
    }

    #[test]
    fn test_unknown_symbols_are_kept() {
        assert_eq!(molecular_formula([("Xx", 0), ("Xx", 0)]), "Xx2");
    }

    #[test]
    fn test_empty_formula() {
        assert_eq!(molecular_formula(Vec::<(&str, u32)>::new()), "");
    }

    #[test]
    fn test_linear_label() {
        assert_eq!(linear_label("O", 0), "O");
        assert_eq!(linear_label("O", 1), "OH");
        assert_eq!(linear_label("N", 2), "NH2");
    }
}
