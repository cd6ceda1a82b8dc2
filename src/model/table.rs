/// Table assembly: descriptor header, shaped labels, one row per map entry.
use super::errors::TableError;
use super::flatten::OutputMap;
use super::labels::{LabelSet, OutputKind};
use super::loader::ReactionModel;
use super::number::format_number;
use super::search::{SUGGESTION_LIMIT, suggest};

/// Prefix of descriptor columns in the header.
pub const DESCRIPTOR_PREFIX: &str = "descriptor-";

/// Cell separator.
const SEP: &str = "\t";

/// A fully validated table: every row has exactly as many cells as the header.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// The exported variable.
    pub variable: String,
    /// Shaping applied to labels and values.
    pub kind: OutputKind,
    /// Number of leading descriptor columns.
    pub descriptors: usize,
    /// Header cells: descriptors first, then shaped labels.
    pub header: Vec<String>,
    /// Descriptor coordinates followed by flattened values, in map order.
    pub rows: Vec<Vec<f64>>,
}

impl Table {
    /// File name the table is written under.
    #[must_use]
    pub fn file_name(&self) -> String {
        table_file_name(&self.variable)
    }

    /// Serialize as tab-separated text, every line newline-terminated.
    #[must_use]
    pub fn to_tsv(&self) -> String {
        let mut out = self.header.join(SEP);
        out.push('\n');
        for row in &self.rows {
            let cells: Vec<String> = row.iter().copied().map(format_number).collect();
            out.push_str(&cells.join(SEP));
            out.push('\n');
        }
        out
    }
}

/// `<variable>_table.txt`.
#[must_use]
pub fn table_file_name(variable: &str) -> String {
    format!("{variable}_table.txt")
}

/// Build the table for `variable` from a loaded model. No I/O.
///
/// # Errors
///
/// - `TableError::UnknownVariable` / `TableError::MissingOutputMap` — nothing to export
/// - `TableError::MalformedLabels` / `TableError::MalformedOutputMap` — wrong shapes for the kind
/// - `TableError::UnsupportedStep` / `TableError::RaggedMatrix` — unshapeable entries
/// - `TableError::DescriptorMismatch` / `TableError::ShapeMismatch` — a row would not align
pub fn build_table(variable: &str, model: &ReactionModel) -> Result<Table, TableError> {
    let raw_labels = model.output_labels.get(variable).ok_or_else(|| {
        TableError::UnknownVariable {
            variable: variable.to_owned(),
            candidates: suggest(variable, model.variables(), SUGGESTION_LIMIT),
        }
    })?;
    let raw_map = model
        .output_map(variable)
        .ok_or_else(|| TableError::MissingOutputMap {
            variable: variable.to_owned(),
        })?;

    let kind = OutputKind::of(variable);
    let labels = LabelSet::parse(kind, variable, raw_labels)?;
    let columns = labels.columns()?;
    let entries = OutputMap::parse(kind, variable, raw_map)?.flatten(labels.matrix_dims())?;

    let descriptors = model.descriptor_names.len();
    let mut header: Vec<String> = model
        .descriptor_names
        .iter()
        .map(|d| format!("{DESCRIPTOR_PREFIX}{d}"))
        .collect();
    header.extend(columns);

    let mut rows = Vec::with_capacity(entries.len());
    for (row, entry) in entries.into_iter().enumerate() {
        if entry.point.len() != descriptors {
            return Err(TableError::DescriptorMismatch {
                row,
                expected: descriptors,
                found: entry.point.len(),
            });
        }
        let expected = header.len() - descriptors;
        if entry.values.len() != expected {
            return Err(TableError::ShapeMismatch {
                row,
                expected,
                found: entry.values.len(),
            });
        }
        let mut cells = entry.point;
        cells.extend(entry.values);
        rows.push(cells);
    }

    Ok(Table {
        variable: variable.to_owned(),
        kind,
        descriptors,
        header,
        rows,
    })
}
