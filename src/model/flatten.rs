/// Parse an output map and flatten its values to match the shaped labels.
use serde::Deserialize;
use serde_json::Value;

use super::errors::TableError;
use super::labels::OutputKind;

/// A descriptor point: one coordinate per descriptor name.
pub type Point = Vec<f64>;

/// A typed output map, entries in source order.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputMap {
    /// Flat value per point.
    Vector(Vec<(Point, Vec<f64>)>),
    /// Matrix value per point.
    Matrix(Vec<(Point, Vec<Vec<f64>>)>),
}

/// One map entry after flattening.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatEntry {
    /// Descriptor coordinates.
    pub point: Point,
    /// Values in header order.
    pub values: Vec<f64>,
}

impl OutputMap {
    /// Parse the raw `<variable>_map` according to the variable's kind.
    ///
    /// # Errors
    ///
    /// Returns `TableError::MalformedOutputMap` if entries are not `[point, value]`
    /// pairs of the expected shape.
    pub fn parse(kind: OutputKind, variable: &str, raw: &Value) -> Result<Self, TableError> {
        let parsed = match kind {
            OutputKind::Matrix => Vec::deserialize(raw).map(Self::Matrix),
            OutputKind::Vector | OutputKind::ElementaryStep => {
                Vec::deserialize(raw).map(Self::Vector)
            }
        };
        parsed.map_err(|source| TableError::MalformedOutputMap {
            variable: variable.to_owned(),
            source,
        })
    }

    /// Flatten every entry, keeping map order.
    ///
    /// `dims` is the `(rows, cols)` shape every matrix value must have; it is
    /// ignored for vector maps.
    ///
    /// # Errors
    ///
    /// Returns `TableError::RaggedMatrix` if a matrix value has the wrong shape.
    pub fn flatten(self, dims: Option<(usize, usize)>) -> Result<Vec<FlatEntry>, TableError> {
        match self {
            Self::Vector(entries) => Ok(entries
                .into_iter()
                .map(|(point, values)| FlatEntry { point, values })
                .collect()),
            Self::Matrix(entries) => {
                let (rows, cols) = dims.unwrap_or((0, 0));
                entries
                    .into_iter()
                    .enumerate()
                    .map(|(row, (point, matrix))| {
                        if !is_shaped(&matrix, rows, cols) {
                            return Err(TableError::RaggedMatrix { row, rows, cols });
                        }
                        Ok(FlatEntry {
                            point,
                            values: flatten_2d(matrix),
                        })
                    })
                    .collect()
            }
        }
    }
}

fn is_shaped(matrix: &[Vec<f64>], rows: usize, cols: usize) -> bool {
    matrix.len() == rows && matrix.iter().all(|r| r.len() == cols)
}

/// Concatenate inner rows in order (row-major).
#[must_use]
pub fn flatten_2d(matrix: Vec<Vec<f64>>) -> Vec<f64> {
    matrix.into_iter().flatten().collect()
}
