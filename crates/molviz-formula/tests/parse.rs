use proptest::prelude::*;

use molviz_formula::{
    ParseMode, error::ErrorCode, expand_atoms, format_counts, molecular_formula, parse_formula,
    tally,
};

#[test]
fn test_parse_then_generate_canonicalizes_order() {
    let tokens = parse_formula("OHHC6", ParseMode::Strict).unwrap();
    let atoms = expand_atoms(&tokens);
    assert_eq!(molecular_formula(atoms.iter().map(|s| (*s, 0))), "C6H2O");
}

#[test]
fn test_strict_error_display() {
    let err = parse_formula("C6 H6", ParseMode::Strict).unwrap_err();
    assert_eq!(err.diagnostics().len(), 1);
    assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E001));
    assert_eq!(err.to_string(), "error[E001]: unexpected ` ` in formula");
}

#[test]
fn test_lenient_matches_strict_on_clean_input() {
    let text = "CaCO3";
    assert_eq!(
        parse_formula(text, ParseMode::Lenient).unwrap(),
        parse_formula(text, ParseMode::Strict).unwrap()
    );
}

fn element() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["C", "H", "N", "O", "S", "Cl", "Na", "Fe", "Br"])
}

proptest! {
    #[test]
    fn prop_atom_count_matches_token_counts(parts in prop::collection::vec((element(), 0u32..15), 0..12)) {
        let text: String = parts
            .iter()
            .map(|(symbol, count)| format!("{symbol}{count}"))
            .collect();
        let tokens = parse_formula(&text, ParseMode::Strict).unwrap();
        let expected: u32 = parts.iter().map(|(_, count)| count).sum();
        prop_assert_eq!(expand_atoms(&tokens).len() as u32, expected);
    }

    #[test]
    fn prop_generated_formula_preserves_tally(symbols in prop::collection::vec(element(), 1..30)) {
        let formula = molecular_formula(symbols.iter().map(|s| (*s, 0)));
        let tokens = parse_formula(&formula, ParseMode::Strict).unwrap();
        let reparsed = tally(expand_atoms(&tokens).into_iter().map(|s| (s, 0)));
        prop_assert_eq!(format_counts(&reparsed), formula);
    }

    #[test]
    fn prop_lenient_never_fails(text in "\\PC{0,40}") {
        prop_assert!(parse_formula(&text, ParseMode::Lenient).is_ok());
    }
}
