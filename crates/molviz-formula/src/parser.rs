//! Formula tokenizer.
//!
//! A formula is a sequence of `ElementSymbol Count?` tokens: one uppercase
//! letter, an optional lowercase letter, and an optional decimal count that
//! defaults to 1. Characters that cannot start a token are handled according
//! to the [`ParseMode`], as are tokens that would push the expanded atom
//! count past the parse limit.

use log::{debug, warn};
use winnow::{
    Parser as _,
    ascii::digit1,
    combinator::opt,
    error::{ContextError, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::one_of,
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
};

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError>;

/// Expanded atom limit used by [`parse_formula`].
pub const MAX_FORMULA_ATOMS: usize = 1000;

/// How unmatched characters are treated.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// Skip them, logging a warning per unmatched run.
    #[default]
    Lenient,
    /// Report each unmatched run as an error.
    Strict,
}

/// One `ElementSymbol Count?` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormulaToken {
    symbol: String,
    count: u32,
    span: Span,
}

impl FormulaToken {
    pub fn new(symbol: impl Into<String>, count: u32, span: Span) -> Self {
        Self {
            symbol: symbol.into(),
            count,
            span,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

fn element_symbol<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    (
        one_of(|c: char| c.is_ascii_uppercase()),
        opt(one_of(|c: char| c.is_ascii_lowercase())),
    )
        .take()
        .parse_next(input)
}

fn element_token<'a>(input: &mut Input<'a>) -> IResult<(&'a str, Option<&'a str>, Span)> {
    let start = input.current_token_start();
    let (symbol, digits) = (element_symbol, opt(digit1)).parse_next(input)?;
    let end = input.current_token_start();
    Ok((symbol, digits, Span::new(start..end)))
}

struct FormulaParser {
    mode: ParseMode,
    max_atoms: usize,
    atoms: usize,
    tokens: Vec<FormulaToken>,
    diagnostics: DiagnosticCollector,
}

impl FormulaParser {
    fn new(mode: ParseMode, max_atoms: usize) -> Self {
        Self {
            mode,
            max_atoms,
            atoms: 0,
            tokens: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    fn run(&mut self, mut input: Input<'_>) {
        let mut unmatched: Option<(Span, String)> = None;

        while !input.is_empty() {
            let checkpoint = input.checkpoint();
            match element_token(&mut input) {
                Ok((symbol, digits, span)) => {
                    if let Some((span, text)) = unmatched.take() {
                        self.report_unmatched(span, &text);
                    }
                    self.push_token(symbol, digits, span);
                }
                Err(_) => {
                    input.reset(&checkpoint);
                    let start = input.current_token_start();
                    let Some(c) = input.next_token() else {
                        break;
                    };
                    let span = Span::new(start..input.current_token_start());
                    unmatched = Some(match unmatched.take() {
                        Some((run_span, mut text)) => {
                            text.push(c);
                            (run_span.union(span), text)
                        }
                        None => (span, c.to_string()),
                    });
                }
            }
        }

        if let Some((span, text)) = unmatched {
            self.report_unmatched(span, &text);
        }
    }

    fn push_token(&mut self, symbol: &str, digits: Option<&str>, span: Span) {
        let count = match digits {
            None => 1,
            Some(digits) => match digits.parse::<u32>() {
                Ok(count) => count,
                Err(_) => {
                    match self.mode {
                        ParseMode::Lenient => {
                            warn!(symbol, digits; "Skipping formula token with oversized count");
                        }
                        ParseMode::Strict => self.diagnostics.emit(
                            Diagnostic::error(format!("count `{digits}` for `{symbol}` is too large"))
                                .with_code(ErrorCode::E002)
                                .with_label(span, ErrorCode::E002.description())
                                .with_help("atom counts must fit in 32 bits"),
                        ),
                    }
                    return;
                }
            },
        };

        let total = self.atoms.saturating_add(count as usize);
        if total > self.max_atoms {
            match self.mode {
                ParseMode::Lenient => {
                    warn!(
                        symbol,
                        count,
                        limit = self.max_atoms;
                        "Skipping formula token past the atom limit"
                    );
                }
                ParseMode::Strict => self.diagnostics.emit(
                    Diagnostic::error(format!(
                        "formula expands to more than {} atoms",
                        self.max_atoms
                    ))
                    .with_code(ErrorCode::E002)
                    .with_label(span, ErrorCode::E002.description())
                    .with_help(format!("at most {} atoms can be generated", self.max_atoms)),
                ),
            }
            return;
        }
        self.atoms = total;
        self.tokens.push(FormulaToken::new(symbol, count, span));
    }

    fn report_unmatched(&mut self, span: Span, text: &str) {
        match self.mode {
            ParseMode::Lenient => {
                warn!(text, offset = span.start(); "Ignoring unmatched formula characters");
            }
            ParseMode::Strict => {
                let mut diagnostic = Diagnostic::error(format!("unexpected `{text}` in formula"))
                    .with_code(ErrorCode::E001)
                    .with_label(span, ErrorCode::E001.description());
                if text.starts_with(|c: char| c.is_ascii_lowercase()) {
                    diagnostic =
                        diagnostic.with_help("element symbols start with an uppercase letter");
                } else {
                    diagnostic = diagnostic
                        .with_help("a formula is a sequence of element symbols with optional counts");
                }
                self.diagnostics.emit(diagnostic);
            }
        }
    }

    fn finish(self) -> Result<Vec<FormulaToken>, ParseError> {
        self.diagnostics.finish().map(|()| self.tokens)
    }
}

/// Tokenizes `text` into element/count pairs in encounter order.
///
/// ```
/// use molviz_formula::{ParseMode, parse_formula};
///
/// let tokens = parse_formula("CH3COOH", ParseMode::Lenient).unwrap();
/// let symbols: Vec<_> = tokens.iter().map(|t| (t.symbol(), t.count())).collect();
/// assert_eq!(
///     symbols,
///     [("C", 1), ("H", 3), ("C", 1), ("O", 1), ("O", 1), ("H", 1)]
/// );
/// ```
///
/// The tokens expand to at most [`MAX_FORMULA_ATOMS`] atoms.
pub fn parse_formula(text: &str, mode: ParseMode) -> Result<Vec<FormulaToken>, ParseError> {
    parse_formula_with_limit(text, mode, MAX_FORMULA_ATOMS)
}

/// Like [`parse_formula`], but the tokens expand to at most `max_atoms`
/// atoms. A token that would cross the limit is an `E002` error in strict
/// mode and is skipped with a warning in lenient mode.
pub fn parse_formula_with_limit(
    text: &str,
    mode: ParseMode,
    max_atoms: usize,
) -> Result<Vec<FormulaToken>, ParseError> {
    let mut parser = FormulaParser::new(mode, max_atoms);
    parser.run(LocatingSlice::new(text));
    let tokens = parser.finish()?;
    debug!(formula = text, tokens = tokens.len(); "Formula parsed");
    Ok(tokens)
}

/// Expands tokens to one symbol per atom, in order.
pub fn expand_atoms(tokens: &[FormulaToken]) -> Vec<&str> {
    tokens
        .iter()
        .flat_map(|token| std::iter::repeat_n(token.symbol(), token.count() as usize))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(text: &str, mode: ParseMode) -> Vec<String> {
        let tokens = parse_formula(text, mode).unwrap();
        expand_atoms(&tokens).into_iter().map(String::from).collect()
    }

    #[test]
    fn test_water() {
        assert_eq!(symbols("H2O", ParseMode::Lenient), ["H", "H", "O"]);
    }

    #[test]
    fn test_two_letter_symbols() {
        assert_eq!(symbols("NaCl", ParseMode::Strict), ["Na", "Cl"]);
    }

    #[test]
    fn test_multi_digit_counts() {
        let tokens = parse_formula("C12H22O11", ParseMode::Strict).unwrap();
        let counts: Vec<u32> = tokens.iter().map(FormulaToken::count).collect();
        assert_eq!(counts, [12, 22, 11]);
    }

    #[test]
    fn test_zero_count_yields_no_atoms() {
        assert_eq!(symbols("C0H2", ParseMode::Strict), ["H", "H"]);
    }

    #[test]
    fn test_token_spans() {
        let tokens = parse_formula("Fe2O3", ParseMode::Strict).unwrap();
        assert_eq!(tokens[0].span(), Span::new(0..3));
        assert_eq!(tokens[1].span(), Span::new(3..5));
    }

    #[test]
    fn test_lenient_drops_unmatched() {
        assert_eq!(symbols("H2-O (x)", ParseMode::Lenient), ["H", "H", "O"]);
    }

    #[test]
    fn test_strict_reports_each_unmatched_run() {
        let err = parse_formula("H2--O??", ParseMode::Strict).unwrap_err();
        let diagnostics = err.diagnostics();
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].code(), Some(ErrorCode::E001));
        assert_eq!(diagnostics[0].labels()[0].span(), Span::new(2..4));
        assert_eq!(diagnostics[1].labels()[0].span(), Span::new(5..7));
    }

    #[test]
    fn test_strict_lowercase_help() {
        let err = parse_formula("h2o", ParseMode::Strict).unwrap_err();
        assert_eq!(
            err.diagnostics()[0].help(),
            Some("element symbols start with an uppercase letter")
        );
    }

    #[test]
    fn test_strict_oversized_count() {
        let err = parse_formula("C99999999999", ParseMode::Strict).unwrap_err();
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E002));
        assert!(
            parse_formula("C99999999999", ParseMode::Lenient)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_atom_limit_strict() {
        let tokens = parse_formula_with_limit("C3H5", ParseMode::Strict, 8).unwrap();
        assert_eq!(expand_atoms(&tokens).len(), 8);

        let err = parse_formula("C4000000000", ParseMode::Strict).unwrap_err();
        let diagnostic = &err.diagnostics()[0];
        assert_eq!(diagnostic.code(), Some(ErrorCode::E002));
        assert_eq!(diagnostic.labels()[0].span(), Span::new(0..11));
    }

    #[test]
    fn test_atom_limit_lenient_skips_token() {
        let tokens = parse_formula_with_limit("C6H12O", ParseMode::Lenient, 10).unwrap();
        assert_eq!(expand_atoms(&tokens), ["C", "C", "C", "C", "C", "C", "O"]);
        assert!(
            parse_formula("C4000000000", ParseMode::Lenient)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_formula("", ParseMode::Strict).unwrap().is_empty());
    }

    #[test]
    fn test_non_ascii_is_unmatched() {
        assert_eq!(symbols("H₂O", ParseMode::Lenient), ["H", "O"]);
        assert!(parse_formula("H₂O", ParseMode::Strict).is_err());
    }
}
