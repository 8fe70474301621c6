//! # Molviz Formula
//!
//! Reading and writing molecular formula text.
//!
//! ## Usage
//!
//! ```
//! use molviz_formula::{ParseMode, expand_atoms, molecular_formula, parse_formula};
//!
//! let tokens = parse_formula("C2H6O", ParseMode::Strict).unwrap();
//! let atoms = expand_atoms(&tokens);
//! assert_eq!(atoms.len(), 9);
//!
//! let formula = molecular_formula(atoms.iter().map(|symbol| (*symbol, 0)));
//! assert_eq!(formula, "C2H6O");
//! ```

pub mod error;

mod generator;
mod parser;
mod span;

pub use generator::{
    ElementCounts, PRIORITY_ORDER, format_counts, linear_formula, linear_label, molecular_formula,
    tally,
};
pub use parser::{
    FormulaToken, MAX_FORMULA_ATOMS, ParseMode, expand_atoms, parse_formula,
    parse_formula_with_limit,
};
pub use span::Span;
