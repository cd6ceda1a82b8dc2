/// Output kinds and label shaping into flat header columns.
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::TableError;

/// The one variable whose values are matrices.
pub const MATRIX_VARIABLE: &str = "rate_control";

/// Variables labelled by elementary steps.
pub const STEP_VARIABLES: [&str; 4] = [
    "rate",
    "rate_constant",
    "forward_rate_constant",
    "reverse_rate_constant",
];

/// Separator between species of one state.
const SPECIES_SEP: &str = "+";
/// Reversible arrow between initial and next state.
const REVERSIBLE: &str = "<->";
/// Arrow from transition state to final state.
const FORWARD: &str = "->";

/// How a variable's labels and values are shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    /// Flat labels, flat values.
    Vector,
    /// Row and column labels, matrix values flattened row-major.
    Matrix,
    /// One elementary step per label, flat values.
    ElementaryStep,
}

impl OutputKind {
    /// Select the kind for a variable name.
    #[must_use]
    pub fn of(variable: &str) -> Self {
        if variable == MATRIX_VARIABLE {
            Self::Matrix
        } else if STEP_VARIABLES.contains(&variable) {
            Self::ElementaryStep
        } else {
            Self::Vector
        }
    }

    /// Stable lowercase name, as used in reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vector => "vector",
            Self::Matrix => "matrix",
            Self::ElementaryStep => "elementary_step",
        }
    }
}

/// One state of an elementary step: the species present in it.
pub type State = Vec<String>;

/// Typed label structure for one variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelSet {
    /// Labels used verbatim.
    Vector(Vec<String>),
    /// `(rows, cols)` label pair.
    Matrix(Vec<String>, Vec<String>),
    /// Steps, each an ordered list of states.
    Steps(Vec<Vec<State>>),
}

impl LabelSet {
    /// Parse the raw label structure of `variable` according to its kind.
    ///
    /// # Errors
    ///
    /// Returns `TableError::MalformedLabels` if the structure does not fit the kind.
    pub fn parse(kind: OutputKind, variable: &str, raw: &Value) -> Result<Self, TableError> {
        let malformed = |source: serde_json::Error| TableError::MalformedLabels {
            variable: variable.to_owned(),
            source,
        };
        match kind {
            OutputKind::Vector => Vec::deserialize(raw).map(Self::Vector),
            OutputKind::Matrix => {
                <(Vec<String>, Vec<String>)>::deserialize(raw).map(|(r, c)| Self::Matrix(r, c))
            }
            OutputKind::ElementaryStep => Vec::deserialize(raw).map(Self::Steps),
        }
        .map_err(malformed)
    }

    /// Matrix dimensions `(rows, cols)`, or `None` for flat label sets.
    #[must_use]
    pub fn matrix_dims(&self) -> Option<(usize, usize)> {
        match self {
            Self::Matrix(rows, cols) => Some((rows.len(), cols.len())),
            Self::Vector(_) | Self::Steps(_) => None,
        }
    }

    /// Flatten into one ordered list of header columns.
    ///
    /// Matrix labels come out row-major, matching the value flattening.
    ///
    /// # Errors
    ///
    /// Returns `TableError::UnsupportedStep` for a step with other than 2 or 3 states.
    pub fn columns(&self) -> Result<Vec<String>, TableError> {
        match self {
            Self::Vector(labels) => Ok(labels.clone()),
            Self::Matrix(rows, cols) => Ok(matrix_columns(rows, cols)),
            Self::Steps(steps) => steps
                .iter()
                .enumerate()
                .map(|(i, step)| format_step(i, step))
                .collect(),
        }
    }
}

/// `d<row>/d<col>` for every pair, columns varying fastest.
#[must_use]
pub fn matrix_columns(rows: &[String], cols: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(rows.len() * cols.len());
    for r in rows {
        for c in cols {
            out.push(format!("d{r}/d{c}"));
        }
    }
    out
}

/// Render an elementary step in arrow notation.
///
/// `A<->B` for two states, `A<->TS->B` for initial, transition and final.
///
/// # Errors
///
/// Returns `TableError::UnsupportedStep` for any other state count.
pub fn format_step(index: usize, step: &[State]) -> Result<String, TableError> {
    let states: Vec<String> = step.iter().map(|s| s.join(SPECIES_SEP)).collect();
    match states.as_slice() {
        [initial, last] => Ok(format!("{initial}{REVERSIBLE}{last}")),
        [initial, transition, last] => {
            Ok(format!("{initial}{REVERSIBLE}{transition}{FORWARD}{last}"))
        }
        _ => Err(TableError::UnsupportedStep {
            index,
            states: states.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn state(species: &[&str]) -> State {
        species.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_kind_selection() {
        assert_eq!(OutputKind::of("rate_control"), OutputKind::Matrix);
        assert_eq!(OutputKind::of("rate"), OutputKind::ElementaryStep);
        assert_eq!(OutputKind::of("reverse_rate_constant"), OutputKind::ElementaryStep);
        assert_eq!(OutputKind::of("coverage"), OutputKind::Vector);
        assert_eq!(OutputKind::of("production_rate"), OutputKind::Vector);
    }

    #[test]
    fn test_two_state_step() {
        let step = vec![state(&["A"]), state(&["B"])];
        assert_eq!(format_step(0, &step).unwrap(), "A<->B");
    }

    #[test]
    fn test_three_state_step() {
        let step = vec![state(&["A"]), state(&["TS"]), state(&["B"])];
        assert_eq!(format_step(0, &step).unwrap(), "A<->TS->B");
    }

    #[test]
    fn test_multi_species_state() {
        let step = vec![state(&["A", "B"]), state(&["C"])];
        assert_eq!(format_step(0, &step).unwrap(), "A+B<->C");
    }

    #[test]
    fn test_unsupported_step_lengths() {
        let one = vec![state(&["A"])];
        assert!(matches!(
            format_step(4, &one),
            Err(TableError::UnsupportedStep { index: 4, states: 1 })
        ));
        let four = vec![state(&["A"]), state(&["B"]), state(&["C"]), state(&["D"])];
        assert!(matches!(
            format_step(0, &four),
            Err(TableError::UnsupportedStep { states: 4, .. })
        ));
    }

    #[test]
    fn test_matrix_columns_row_major() {
        let rows = vec!["r1".to_owned(), "r2".to_owned()];
        let cols = vec!["a".to_owned(), "b".to_owned(), "c".to_owned()];
        let columns = matrix_columns(&rows, &cols);
        assert_eq!(columns.len(), 6);
        for (i, r) in rows.iter().enumerate() {
            for (j, c) in cols.iter().enumerate() {
                assert_eq!(columns[i * cols.len() + j], format!("d{r}/d{c}"));
            }
        }
    }

    #[test]
    fn test_parse_by_kind() {
        let raw = json!([["CO_s", "O_s"], ["CO_g", "O2_g"]]);
        let labels = LabelSet::parse(OutputKind::Matrix, "rate_control", &raw).unwrap();
        assert_eq!(labels.matrix_dims(), Some((2, 2)));
        assert_eq!(labels.columns().unwrap()[1], "dCO_s/dO2_g");

        let raw = json!([[["CO_g", "*_s"], ["CO_s"]], [["O_s", "CO_s"], ["O-CO_s"], ["CO2_g", "*_s"]]]);
        let labels = LabelSet::parse(OutputKind::ElementaryStep, "rate", &raw).unwrap();
        assert_eq!(
            labels.columns().unwrap(),
            vec!["CO_g+*_s<->CO_s", "O_s+CO_s<->O-CO_s->CO2_g+*_s"]
        );

        let raw = json!(["CO_s", "O_s"]);
        let labels = LabelSet::parse(OutputKind::Vector, "coverage", &raw).unwrap();
        assert_eq!(labels, LabelSet::Vector(vec!["CO_s".to_owned(), "O_s".to_owned()]));
        assert_eq!(labels.matrix_dims(), None);
    }

    #[test]
    fn test_parse_wrong_shape() {
        let raw = json!(["CO_s", "O_s"]);
        let result = LabelSet::parse(OutputKind::Matrix, "rate_control", &raw);
        assert!(matches!(result, Err(TableError::MalformedLabels { .. })));
    }
}
