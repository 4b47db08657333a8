//! Errors raised while compiling parameter tables.
//!
//! Every error is fatal: a parameter table with a silently missing entry
//! would feed wrong numbers to the alignment engine, so nothing is emitted
//! unless every table builds cleanly.

use std::fmt::Display;
use std::path::PathBuf;

use thiserror::Error;

/// Where in the input an error was detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub file: String,
    pub line: Option<usize>,
}

impl Location {
    pub fn file(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line: None,
        }
    }

    pub fn line(file: impl Into<String>, line: usize) -> Self {
        Self {
            file: file.into(),
            line: Some(line),
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{line}", self.file),
            None => write!(f, "{}", self.file),
        }
    }
}

/// Why a well-formed input was still rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Invalid {
    #[error("row-count mismatch: expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },
    #[error("loop length {0} out of range 1..=30")]
    LengthOutOfRange(i64),
    #[error("missing loop length {0}")]
    MissingLength(usize),
    #[error("loop length {0} listed more than once")]
    DuplicateLength(usize),
    #[error("loop sequence has {found} bases, expected {expected}")]
    SequenceLength { expected: usize, found: usize },
    #[error("{entropy} entropy records but {enthalpy} enthalpy records")]
    ExceptionCount { entropy: usize, enthalpy: usize },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{at}: malformed row: {reason}")]
    MalformedRow { at: Location, reason: String },
    #[error("{at}: unknown base {base:?}")]
    UnknownBase { at: Location, base: char },
    #[error("{at}: {kind}")]
    Validation { at: Location, kind: Invalid },
}

impl Error {
    pub(crate) fn malformed(at: Location, reason: impl Into<String>) -> Self {
        Self::MalformedRow {
            at,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid(at: Location, kind: Invalid) -> Self {
        Self::Validation { at, kind }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
