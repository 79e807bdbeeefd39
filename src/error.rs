//! Error types for loading and validating game balance.
//!
//! The simulation itself is infallible; only the tuning surface can fail.

use std::fmt;
use std::path::PathBuf;

/// Why a `Tuning` could not be produced.
#[derive(Debug)]
pub enum TuningError {
    /// The tuning file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The tuning document is not valid JSON for `Tuning`.
    Parse(serde_json::Error),

    /// A random range has its lower bound above its upper bound.
    InvertedRange {
        /// Name of the field (for logging).
        name: &'static str,
        min: u32,
        max: u32,
    },

    /// A value is outside the range the simulation can work with.
    OutOfRange {
        /// Name of the field (for logging).
        name: &'static str,
        value: f64,
        /// Human-readable description of the accepted range.
        accepted: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io { path, source } => {
                write!(f, "failed to read tuning file {}: {}", path.display(), source)
            }
            TuningError::Parse(err) => write!(f, "invalid tuning document: {}", err),
            TuningError::InvertedRange { name, min, max } => {
                write!(f, "range '{}' is inverted: min {} > max {}", name, min, max)
            }
            TuningError::OutOfRange {
                name,
                value,
                accepted,
            } => write!(
                f,
                "tuning value '{}' = {} is outside accepted range {}",
                name, value, accepted
            ),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io { source, .. } => Some(source),
            TuningError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        TuningError::Parse(err)
    }
}

/// Convenience alias: a `Result` using `TuningError` as the error type.
pub type TuningResult<T> = Result<T, TuningError>;
