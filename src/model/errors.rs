/// Errors from the model/table domain layer.
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while resolving, loading and tabulating a model output.
#[derive(Debug, Error)]
pub enum TableError {
    /// The log file glob is not a valid pattern.
    #[error("Invalid log file pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern as given on the command line.
        pattern: String,
        /// Underlying glob syntax error.
        source: glob::PatternError,
    },

    /// The log file glob matched more than one file.
    #[error(
        "Ambiguous logfile for '{pattern}'. Ensure that only one file matches. Candidates:\n  {}",
        candidates.join("\n  ")
    )]
    AmbiguousLogfile {
        /// The pattern as given on the command line.
        pattern: String,
        /// Every matching path, in sorted order.
        candidates: Vec<String>,
    },

    /// The log file glob matched nothing.
    #[error("No log file matches '{pattern}'")]
    LogfileNotFound {
        /// The pattern as given on the command line.
        pattern: String,
    },

    /// Reading or writing a file failed.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        /// The file being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The log file is not a readable model document.
    #[error("Cannot load model from '{}': {source}", path.display())]
    ModelParse {
        /// The log file.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The requested variable has no entry in `output_labels`.
    #[error("Unknown output variable '{variable}'")]
    UnknownVariable {
        /// The requested variable.
        variable: String,
        /// Known variable names closest to the request.
        candidates: Vec<String>,
    },

    /// The variable has labels but the model carries no `<variable>_map`.
    #[error("Model has labels for '{variable}' but no '{variable}_map'")]
    MissingOutputMap {
        /// The requested variable.
        variable: String,
    },

    /// The label structure does not fit the variable's output kind.
    #[error("Malformed labels for '{variable}': {source}")]
    MalformedLabels {
        /// The requested variable.
        variable: String,
        /// Underlying JSON shape error.
        source: serde_json::Error,
    },

    /// The output map does not fit the variable's output kind.
    #[error("Malformed '{variable}_map': {source}")]
    MalformedOutputMap {
        /// The requested variable.
        variable: String,
        /// Underlying JSON shape error.
        source: serde_json::Error,
    },

    /// An elementary step label has a state count other than 2 or 3.
    #[error("Elementary step {index} has {states} states; expected 2 or 3")]
    UnsupportedStep {
        /// Position of the step in the label list.
        index: usize,
        /// Number of states found.
        states: usize,
    },

    /// A `rate_control` value is not a `rows x cols` matrix.
    #[error("Row {row}: value is not a {rows}x{cols} matrix")]
    RaggedMatrix {
        /// Output map entry index.
        row: usize,
        /// Expected number of matrix rows.
        rows: usize,
        /// Expected number of matrix columns.
        cols: usize,
    },

    /// A descriptor point has the wrong number of coordinates.
    #[error("Row {row}: expected {expected} descriptor coordinates, found {found}")]
    DescriptorMismatch {
        /// Output map entry index.
        row: usize,
        /// Number of descriptor names.
        expected: usize,
        /// Number of coordinates in the point.
        found: usize,
    },

    /// A (flattened) value has a different length than the shaped labels.
    #[error("Row {row}: expected {expected} values to match labels, found {found}")]
    ShapeMismatch {
        /// Output map entry index.
        row: usize,
        /// Number of shaped labels.
        expected: usize,
        /// Number of values after flattening.
        found: usize,
    },
}

/// Exit code mapping for `TableError` variants.
impl TableError {
    /// Return the CLI exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidPattern { .. } => 2,
            Self::AmbiguousLogfile { .. }
            | Self::LogfileNotFound { .. }
            | Self::UnknownVariable { .. }
            | Self::MissingOutputMap { .. } => 4,
            Self::Io { .. }
            | Self::ModelParse { .. }
            | Self::MalformedLabels { .. }
            | Self::MalformedOutputMap { .. }
            | Self::UnsupportedStep { .. }
            | Self::RaggedMatrix { .. }
            | Self::DescriptorMismatch { .. }
            | Self::ShapeMismatch { .. } => 1,
        }
    }
}
