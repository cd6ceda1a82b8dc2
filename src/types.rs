/// Shared serializable output types.
///
/// These types are what gets written to stdout/stderr as reports, either as
/// JSON or rendered as a table. The TSV artifact itself is produced by
/// [`crate::model::Table::to_tsv`] and never goes through these.
use serde::{Deserialize, Serialize};

use crate::model::{OutputKind, TableError};

/// Report for one export run.
#[derive(Debug, Clone, Serialize)]
pub struct ExportOutput {
    /// Exported variable.
    pub variable: String,
    /// Shaping applied to labels and values.
    pub kind: OutputKind,
    /// Log file the model was loaded from.
    pub source: String,
    /// Path of the table file (written, or that would be written on `--dry-run`).
    pub path: String,
    /// Whether the file was actually written.
    pub written: bool,
    /// Number of descriptor columns.
    pub descriptors: usize,
    /// Number of label columns.
    pub columns: usize,
    /// Number of data rows.
    pub rows: usize,
}

/// One output variable known to a model, with its shaped labels.
#[derive(Debug, Clone, Serialize)]
pub struct LabelSetOutput {
    /// Variable name.
    pub variable: String,
    /// Shaping that applies to this variable.
    pub kind: OutputKind,
    /// Shaped header columns, or null when the labels cannot be shaped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    /// Why shaping failed, if it did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (snake_case).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Candidate log files or variable names, when the error has any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<String>>,
}

impl ErrorOutput {
    /// Construct from a `TableError`.
    #[must_use]
    pub fn from_table_error(err: &TableError) -> Self {
        let (code, candidates) = match err {
            TableError::InvalidPattern { .. } => ("invalid_pattern", None),
            TableError::AmbiguousLogfile { candidates, .. } => {
                ("ambiguous_logfile", Some(candidates.clone()))
            }
            TableError::LogfileNotFound { .. } => ("logfile_not_found", None),
            TableError::Io { .. } => ("io_error", None),
            TableError::ModelParse { .. } => ("model_parse_error", None),
            TableError::UnknownVariable { candidates, .. } => {
                ("unknown_variable", Some(candidates.clone()))
            }
            TableError::MissingOutputMap { .. } => ("missing_output_map", None),
            TableError::MalformedLabels { .. } => ("malformed_labels", None),
            TableError::MalformedOutputMap { .. } => ("malformed_output_map", None),
            TableError::UnsupportedStep { .. } => ("unsupported_step", None),
            TableError::RaggedMatrix { .. } => ("ragged_matrix", None),
            TableError::DescriptorMismatch { .. } => ("descriptor_mismatch", None),
            TableError::ShapeMismatch { .. } => ("shape_mismatch", None),
        };
        Self {
            ok: false,
            error: ErrorDetail {
                code: code.to_owned(),
                message: err.to_string(),
                candidates,
            },
        }
    }
}
