/// Reaction model documents and the loader seam used by the export command.
use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use super::errors::TableError;

/// Suffix of the attribute holding a variable's output map.
pub const MAP_SUFFIX: &str = "_map";

/// Read-only view of a solved microkinetic model.
///
/// Only the pieces needed for tabulation are typed. Every other top-level key
/// of the document is kept as an opaque attribute, so `<variable>_map` is
/// looked up by name the same way for every output kind.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReactionModel {
    /// Ordered descriptor names (e.g. `["T", "P"]`).
    #[serde(default)]
    pub descriptor_names: Vec<String>,
    /// Raw label structure per output variable.
    #[serde(default)]
    pub output_labels: BTreeMap<String, Value>,
    /// Remaining attributes, including every `<variable>_map`.
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

impl ReactionModel {
    /// The raw output map for `variable`, if the model carries one.
    #[must_use]
    pub fn output_map(&self, variable: &str) -> Option<&Value> {
        self.attributes.get(&format!("{variable}{MAP_SUFFIX}"))
    }

    /// Names of every variable with an `output_labels` entry.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.output_labels.keys().map(String::as_str)
    }
}

/// Something that can turn a log file path into a [`ReactionModel`].
pub trait ModelLoader {
    /// Load the model stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns `TableError` if the file cannot be read or parsed.
    fn load(&self, path: &Path) -> Result<ReactionModel, TableError>;
}

/// Loads models serialized as a single JSON document.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonModelLoader;

impl ModelLoader for JsonModelLoader {
    fn load(&self, path: &Path) -> Result<ReactionModel, TableError> {
        let text = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_owned(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| TableError::ModelParse {
            path: path.to_owned(),
            source,
        })
    }
}
