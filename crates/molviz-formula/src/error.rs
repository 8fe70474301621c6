//! Diagnostics produced while reading formula text.
//!
//! - [`Diagnostic`]: a single error or warning with labelled spans and help
//! - [`ErrorCode`]: stable codes (`E0xx`) identifying the problem
//! - [`ParseError`]: one or more diagnostics returned from a failed parse

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;
pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
