use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Which linguistic dimension a term name was looked up in
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TermKind {
    Temperature,
    Regulator,
}

impl fmt::Display for TermKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temperature => f.write_str("temperature"),
            Self::Regulator => f.write_str("regulator"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid json payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("term {name:?} needs at least two breakpoints, got {got}")]
    TooFewPoints { name: String, got: usize },
    #[error("term {name:?} has a non-finite breakpoint at index {index}")]
    NonFiniteBreakpoint { name: String, index: usize },
    #[error("term {name:?} has decreasing breakpoints at index {index}")]
    DecreasingBreakpoints { name: String, index: usize },
    #[error("term {name:?} has core flag {flag} at index {index}, expected 0 or 1")]
    InvalidCoreFlag { name: String, index: usize, flag: u64 },
    #[error("term {0:?} is defined more than once")]
    DuplicateTerm(String),
    #[error("mapping references unknown {kind} term {name:?}")]
    UnknownTerm { kind: TermKind, name: String },
    #[error("no {0} terms defined")]
    EmptyVariable(TermKind),
    #[error("mapping is empty")]
    EmptyRules,
    #[error("scan step must be finite and positive")]
    InvalidStep,
}
