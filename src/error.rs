//! Error types for loading, filtering and reporting on trip data.

use std::path::PathBuf;

use thiserror::Error;

/// User input that is not one of the allowed choices.
///
/// The interactive session recovers from this by asking again; the
/// non-interactive command line reports it as a usage error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field} `{input}`; expected {expected}")]
pub struct SelectionError {
    pub field: &'static str,
    pub input: String,
    pub expected: &'static str,
}

impl SelectionError {
    pub fn new(field: &'static str, input: &str, expected: &'static str) -> Self {
        Self {
            field,
            input: input.to_string(),
            expected,
        }
    }
}

/// Why a city's trip file could not be turned into a table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("required column `{0}` is missing")]
    MissingColumn(&'static str),
    #[error("unparsable start time `{value}` on line {line}")]
    InvalidTimestamp {
        line: u64,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Errors surfaced to the top level of a report run.
#[derive(Debug, Error)]
pub enum BikeshareError {
    #[error("data for {city} is unavailable: {source}")]
    DataUnavailable {
        city: String,
        #[source]
        source: LoadError,
    },
    #[error("no data matches these filters")]
    EmptyResultSet,
    #[error("unknown city `{0}`")]
    UnknownCity(String),
    #[error("cannot read city config {path}: {reason}")]
    Config { path: PathBuf, reason: String },
}

impl BikeshareError {
    /// Wraps a loader failure for `city`.
    pub fn unavailable(city: &str, source: LoadError) -> Self {
        BikeshareError::DataUnavailable {
            city: city.to_string(),
            source,
        }
    }
}
