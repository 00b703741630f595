//! Error types for loading and reshaping benchmark results.
//!
//! Every fallible operation in this crate returns `Result<T, ResultsError>`.
//! The variants name the record or selection that failed so callers can report
//! them directly.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResultsError {
    /// The results file could not be read
    #[error("Failed to read benchmark results from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The results document is not valid JSON or does not have a `benchmarks` array
    #[error("Invalid benchmark JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A benchmark name does not have the `...char[1<<K], char[1<<V]>/I` shape
    #[error("Benchmark name does not match `char[1<<K], char[1<<V]>/I`: {name}")]
    MalformedName { name: String },

    /// A size exponent is too large to be represented as a byte count
    #[error("Size exponent {exponent} in benchmark {name} does not fit in 64 bits")]
    ExponentOutOfRange { name: String, exponent: u32 },

    /// The `cpu_time` field is a string that is not a number
    #[error("Benchmark {name} has a non-numeric cpu_time: {value:?}")]
    InvalidTime { name: String, value: String },

    /// A filter selected zero samples
    #[error("No samples match {selection}")]
    NoData { selection: String },

    /// No benchmark in the document starts with the requested prefix
    #[error("No benchmarks found with prefix {prefix:?}")]
    NoMatchingBenchmarks { prefix: String },
}

impl ResultsError {
    /// Create a NoData error describing the selection that came back empty
    pub fn no_data(selection: impl Into<String>) -> Self {
        Self::NoData {
            selection: selection.into(),
        }
    }

    /// Create a MalformedName error for the given benchmark name
    pub fn malformed_name(name: impl Into<String>) -> Self {
        Self::MalformedName { name: name.into() }
    }
}

pub type Result<T> = std::result::Result<T, ResultsError>;
