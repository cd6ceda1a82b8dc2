/// Export command: resolve the log file, load the model, build and write the table.
use std::path::{Path, PathBuf};

use crate::cli::output::{write_export, write_labels};
use crate::cli::{Cli, OutputCtx};
use crate::model::{
    JsonModelLoader, LabelSet, ModelLoader, OutputKind, ReactionModel, Table, TableError,
    build_table, resolve_logfile,
};
use crate::types::{ExportOutput, LabelSetOutput};

/// Everything needed to write and report one table.
#[derive(Debug)]
pub struct Prepared {
    /// Log file the model came from.
    pub source: PathBuf,
    /// The validated table.
    pub table: Table,
}

/// Run `mkmtable <VARIABLE> <LOGFILE_GLOB>`.
///
/// # Errors
///
/// Returns `TableError` on an ambiguous or missing log file, an unreadable
/// model, an unknown variable, misshapen outputs, or a failed write.
pub fn run(cli: &Cli, ctx: &OutputCtx) -> Result<(), TableError> {
    // Labels go out before the variable is looked up, so a mistyped name
    // still shows what the model has.
    let prepared = prepare(&cli.variable, &cli.logfile, &JsonModelLoader, ctx, |model| {
        if cli.show_labels {
            write_labels(&label_sets(model), ctx);
        }
    })?;

    let path = cli.out_dir.join(prepared.table.file_name());
    if !cli.dry_run {
        let _t_write = ctx.timer("write");
        write_table(&prepared.table, &path)?;
    }

    let report = ExportOutput {
        variable: prepared.table.variable.clone(),
        kind: prepared.table.kind,
        source: prepared.source.display().to_string(),
        path: path.display().to_string(),
        written: !cli.dry_run,
        descriptors: prepared.table.descriptors,
        columns: prepared.table.header.len() - prepared.table.descriptors,
        rows: prepared.table.rows.len(),
    };
    write_export(&report, &prepared.table, ctx);
    Ok(())
}

/// Resolve, load and tabulate without touching the output directory.
///
/// The glob is resolved before the loader is consulted, so an ambiguous
/// pattern never loads anything. `on_loaded` sees the model before the
/// variable is looked up in it.
///
/// # Errors
///
/// Returns `TableError` from resolution, loading or table building.
pub fn prepare(
    variable: &str,
    pattern: &str,
    loader: &dyn ModelLoader,
    ctx: &OutputCtx,
    on_loaded: impl FnOnce(&ReactionModel),
) -> Result<Prepared, TableError> {
    let _t_resolve = ctx.timer("resolve_logfile");
    let source = resolve_logfile(pattern)?;
    drop(_t_resolve);
    ctx.note(&format!("logfile: {}", source.display()));

    let _t_load = ctx.timer("load_model");
    let model = loader.load(&source)?;
    drop(_t_load);
    on_loaded(&model);

    let _t_table = ctx.timer("build_table");
    let table = build_table(variable, &model)?;
    drop(_t_table);

    Ok(Prepared { source, table })
}

/// Write `table` as TSV to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns `TableError::Io` if the file cannot be written.
pub fn write_table(table: &Table, path: &Path) -> Result<(), TableError> {
    std::fs::write(path, table.to_tsv()).map_err(|source| TableError::Io {
        path: path.to_owned(),
        source,
    })
}

/// Shape every variable's labels for the `--show-labels` listing.
///
/// Variables whose labels cannot be shaped are listed with the reason.
#[must_use]
pub fn label_sets(model: &ReactionModel) -> Vec<LabelSetOutput> {
    model
        .output_labels
        .iter()
        .map(|(variable, raw)| {
            let kind = OutputKind::of(variable);
            let shaped = LabelSet::parse(kind, variable, raw).and_then(|l| l.columns());
            let (columns, error) = match shaped {
                Ok(cols) => (Some(cols), None),
                Err(e) => (None, Some(e.to_string())),
            };
            LabelSetOutput {
                variable: variable.clone(),
                kind,
                columns,
                error,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::cli::OutputFormat;
    use serde_json::json;
    use tempfile::tempdir;

    /// Serves a fixed model and counts how often it was asked to.
    struct FixedLoader {
        model: ReactionModel,
        loads: Cell<usize>,
    }

    impl FixedLoader {
        fn new(doc: serde_json::Value) -> Self {
            Self {
                model: serde_json::from_value(doc).unwrap(),
                loads: Cell::new(0),
            }
        }
    }

    impl ModelLoader for FixedLoader {
        fn load(&self, _path: &Path) -> Result<ReactionModel, TableError> {
            self.loads.set(self.loads.get() + 1);
            Ok(self.model.clone())
        }
    }

    fn quiet() -> OutputCtx {
        OutputCtx::new(OutputFormat::Json, false, 10, false, false)
    }

    fn rate_model() -> serde_json::Value {
        json!({
            "descriptor_names": ["T", "P"],
            "output_labels": {"rate": [[["A"], ["B"]]]},
            "rate_map": [[[300.0, 1.0], [0.5]]]
        })
    }

    #[test]
    fn test_prepare_and_write() {
        let tmp = tempdir().unwrap();
        std::fs::write(tmp.path().join("model.log"), "").unwrap();
        let loader = FixedLoader::new(rate_model());
        let pattern = format!("{}/*.log", tmp.path().display());

        let prepared = prepare("rate", &pattern, &loader, &quiet(), |_| {}).unwrap();
        assert_eq!(prepared.source, tmp.path().join("model.log"));
        assert_eq!(loader.loads.get(), 1);

        let out = tmp.path().join(prepared.table.file_name());
        write_table(&prepared.table, &out).unwrap();
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("rate_table.txt")).unwrap(),
            "descriptor-T\tdescriptor-P\tA<->B\n300.0\t1.0\t0.5\n"
        );
    }

    #[test]
    fn test_rewrite_is_byte_identical() {
        let tmp = tempdir().unwrap();
        std::fs::write(tmp.path().join("model.log"), "").unwrap();
        let loader = FixedLoader::new(rate_model());
        let pattern = format!("{}/*.log", tmp.path().display());
        let out = tmp.path().join("rate_table.txt");
        std::fs::write(&out, "stale contents that are longer than the table\n").unwrap();

        let first = prepare("rate", &pattern, &loader, &quiet(), |_| {}).unwrap();
        write_table(&first.table, &out).unwrap();
        let a = std::fs::read(&out).unwrap();
        let second = prepare("rate", &pattern, &loader, &quiet(), |_| {}).unwrap();
        write_table(&second.table, &out).unwrap();
        let b = std::fs::read(&out).unwrap();
        assert_eq!(a, b);
        assert!(!String::from_utf8(b).unwrap().contains("stale"));
    }

    #[test]
    fn test_ambiguous_glob_loads_nothing() {
        let tmp = tempdir().unwrap();
        std::fs::write(tmp.path().join("a.log"), "").unwrap();
        std::fs::write(tmp.path().join("b.log"), "").unwrap();
        let loader = FixedLoader::new(rate_model());
        let pattern = format!("{}/*.log", tmp.path().display());

        let result = prepare("rate", &pattern, &loader, &quiet(), |_| {});
        assert!(matches!(result, Err(TableError::AmbiguousLogfile { .. })));
        assert_eq!(loader.loads.get(), 0);
        assert!(!tmp.path().join("rate_table.txt").exists());
    }

    #[test]
    fn test_missing_glob_loads_nothing() {
        let tmp = tempdir().unwrap();
        let loader = FixedLoader::new(rate_model());
        let pattern = format!("{}/*.log", tmp.path().display());
        let result = prepare("rate", &pattern, &loader, &quiet(), |_| {});
        assert!(matches!(result, Err(TableError::LogfileNotFound { .. })));
        assert_eq!(loader.loads.get(), 0);
    }

    #[test]
    fn test_json_loader_end_to_end() {
        let tmp = tempdir().unwrap();
        let log = tmp.path().join("co_oxidation.log");
        std::fs::write(&log, rate_model().to_string()).unwrap();
        let pattern = format!("{}/*.log", tmp.path().display());
        let prepared = prepare("rate", &pattern, &JsonModelLoader, &quiet(), |_| {}).unwrap();
        assert_eq!(prepared.table.rows, vec![vec![300.0, 1.0, 0.5]]);
    }

    #[test]
    fn test_labels_listed_for_unknown_variable() {
        let tmp = tempdir().unwrap();
        std::fs::write(tmp.path().join("model.log"), "").unwrap();
        let loader = FixedLoader::new(json!({
            "descriptor_names": ["T"],
            "output_labels": {"coverage": ["CO_s"]},
            "coverage_map": [[[500.0], [0.5]]]
        }));
        let pattern = format!("{}/*.log", tmp.path().display());

        let mut listed = Vec::new();
        let result = prepare("rat", &pattern, &loader, &quiet(), |model| {
            listed = label_sets(model);
        });
        assert!(matches!(result, Err(TableError::UnknownVariable { .. })));
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].variable, "coverage");
        assert_eq!(listed[0].columns, Some(vec!["CO_s".to_owned()]));
    }

    #[test]
    fn test_label_sets_report_failures() {
        let model: ReactionModel = serde_json::from_value(json!({
            "descriptor_names": ["T"],
            "output_labels": {
                "coverage": ["CO_s"],
                "rate": [[["A"]]],
                "rate_control": [["CO2_g"], ["s1", "s2"]]
            }
        }))
        .unwrap();
        let sets = label_sets(&model);
        assert_eq!(sets.len(), 3);
        assert_eq!(sets[0].variable, "coverage");
        assert_eq!(sets[0].columns, Some(vec!["CO_s".to_owned()]));
        assert_eq!(sets[1].variable, "rate");
        assert!(sets[1].columns.is_none());
        assert!(sets[1].error.as_deref().unwrap().contains("1 states"));
        assert_eq!(sets[2].kind, OutputKind::Matrix);
        assert_eq!(
            sets[2].columns,
            Some(vec!["dCO2_g/ds1".to_owned(), "dCO2_g/ds2".to_owned()])
        );
    }
}
