//! Error types for Molviz operations.
//!
//! [`MolvizError`] is returned by the public API. Graph mutations fail with
//! [`ValidationError`], and a failed mutation never changes the graph.

use std::io;

use thiserror::Error;

use molviz_core::identifier::{AtomId, BondId};
use molviz_formula::error::ParseError;

/// A rejected graph or layout operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("a bond between {0} and {1} already exists")]
    DuplicateBond(AtomId, AtomId),

    #[error("cannot bond atom {0} to itself")]
    SelfLoop(AtomId),

    #[error("unknown atom {0}")]
    UnknownAtom(AtomId),

    #[error("unknown bond {0}")]
    UnknownBond(BondId),

    #[error("layout `{layout}` needs at least {required} atoms, found {found}")]
    TooFewAtoms {
        layout: &'static str,
        required: usize,
        found: usize,
    },
}

#[derive(Debug, Error)]
pub enum MolvizError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl MolvizError {
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
