/// Output formatting: JSON, table preview, path modes. TTY detection.
use std::io::{IsTerminal, Write};

use comfy_table::{Cell, Table, presets::UTF8_BORDERS_ONLY};
use serde::Serialize;

use super::OutputFormat;
use crate::model::number::format_number;
use crate::types::{ErrorOutput, ExportOutput, LabelSetOutput};

/// Resolve the effective output format, handling `--json` flag and TTY auto-detection.
#[must_use]
pub fn resolve_format(fmt: OutputFormat, json_flag: bool) -> OutputFormat {
    if json_flag {
        return OutputFormat::Json;
    }
    if fmt == OutputFormat::Auto {
        if std::io::stdout().is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    } else {
        fmt
    }
}

/// Output context passed to all formatters.
pub struct OutputCtx {
    pub format: OutputFormat,
    /// Data rows shown in the table preview.
    pub limit: usize,
    pub no_header: bool,
    /// When true, print stage timings and notes to stderr.
    pub debug: bool,
}

impl OutputCtx {
    /// Construct from CLI args.
    #[must_use]
    pub fn new(
        fmt: OutputFormat,
        json_flag: bool,
        limit: usize,
        no_header: bool,
        debug: bool,
    ) -> Self {
        Self {
            format: resolve_format(fmt, json_flag),
            limit,
            no_header,
            debug,
        }
    }

    /// Start a named debug timer. Prints elapsed on drop only when `--debug` is set.
    #[must_use]
    pub fn timer(&self, label: &'static str) -> DebugTimer {
        DebugTimer::new(label, self.debug)
    }

    /// Print a one-line note to stderr when `--debug` is set.
    pub fn note(&self, message: &str) {
        if self.debug {
            eprintln!("[debug] {message}");
        }
    }
}

// --- Export report ---

/// Write the export report to stdout.
pub fn write_export(report: &ExportOutput, table: &crate::model::Table, ctx: &OutputCtx) {
    match ctx.format {
        OutputFormat::Json => print_json(report),
        OutputFormat::Compact => print_compact_json(report),
        OutputFormat::Path => println!("{}", report.path),
        OutputFormat::Table | OutputFormat::Auto => {
            println!("{}", preview_table(table, ctx));
            let shown = table.rows.len().min(ctx.limit);
            if shown < table.rows.len() {
                println!("… {} more rows", table.rows.len() - shown);
            }
            let verb = if report.written {
                "Wrote"
            } else {
                "[dry-run] Would write"
            };
            println!(
                "{verb} {} rows x {} columns to {}",
                report.rows,
                report.descriptors + report.columns,
                report.path
            );
        }
    }
}

/// Render the first `ctx.limit` rows of `table` for humans.
#[must_use]
pub fn preview_table(table: &crate::model::Table, ctx: &OutputCtx) -> Table {
    let mut preview = Table::new();
    preview.load_preset(UTF8_BORDERS_ONLY);
    if !ctx.no_header {
        preview.set_header(table.header.iter().map(Cell::new));
    }
    for row in table.rows.iter().take(ctx.limit) {
        preview.add_row(row.iter().map(|v| Cell::new(format_number(*v))));
    }
    preview
}

// --- Labels listing ---

/// Write the model's output variables and their shaped labels to stdout.
pub fn write_labels(sets: &[LabelSetOutput], ctx: &OutputCtx) {
    match ctx.format {
        OutputFormat::Json => print_json(sets),
        OutputFormat::Compact => print_compact_json(sets),
        OutputFormat::Path => {
            for set in sets {
                println!("{}", set.variable);
            }
        }
        OutputFormat::Table | OutputFormat::Auto => {
            let mut table = Table::new();
            table.load_preset(UTF8_BORDERS_ONLY);
            if !ctx.no_header {
                table.set_header(["VARIABLE", "KIND", "COLUMNS"]);
            }
            for set in sets {
                let columns = match (&set.columns, &set.error) {
                    (Some(cols), _) => cols.join(", "),
                    (None, Some(err)) => format!("({err})"),
                    (None, None) => String::new(),
                };
                table.add_row([set.variable.as_str(), set.kind.as_str(), &columns]);
            }
            println!("{table}");
        }
    }
}

// --- Error output ---

/// Write a structured error to stderr.
pub fn write_error(err: &ErrorOutput, format: OutputFormat, json_flag: bool) {
    let fmt = resolve_format(format, json_flag);
    let stderr = std::io::stderr();
    let mut out = stderr.lock();
    match fmt {
        OutputFormat::Json | OutputFormat::Compact => {
            let s = serde_json::to_string_pretty(err).unwrap_or_default();
            let _ = writeln!(out, "{s}");
        }
        _ => {
            // Ambiguity messages already embed their candidates.
            let _ = writeln!(out, "Error: {}", err.error.message);
            if err.error.code == "unknown_variable" {
                if let Some(candidates) = &err.error.candidates {
                    let _ = writeln!(out, "  Did you mean:");
                    for c in candidates {
                        let _ = writeln!(out, "    {c}");
                    }
                }
            }
        }
    }
}

// --- Debug timer ---

/// A RAII timer that prints elapsed milliseconds to stderr on drop.
///
/// Created via [`OutputCtx::timer`]. Does nothing when `debug` is false.
pub struct DebugTimer {
    label: &'static str,
    start: std::time::Instant,
    active: bool,
}

impl DebugTimer {
    #[must_use]
    fn new(label: &'static str, active: bool) -> Self {
        Self {
            label,
            start: std::time::Instant::now(),
            active,
        }
    }
}

impl Drop for DebugTimer {
    fn drop(&mut self) {
        if self.active {
            let ms = self.start.elapsed().as_secs_f64() * 1000.0;
            eprintln!("[debug] {}: {ms:.2}ms", self.label);
        }
    }
}

// --- Generic JSON helpers ---

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("JSON serialization error: {e}"),
    }
}

fn print_compact_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("JSON serialization error: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OutputKind, Table as ModelTable};

    fn ctx(limit: usize, no_header: bool) -> OutputCtx {
        OutputCtx::new(OutputFormat::Table, false, limit, no_header, false)
    }

    fn sample() -> ModelTable {
        ModelTable {
            variable: "rate".to_owned(),
            kind: OutputKind::ElementaryStep,
            descriptors: 1,
            header: vec!["descriptor-T".to_owned(), "A<->B".to_owned()],
            rows: vec![vec![300.0, 0.5], vec![400.0, 0.75], vec![500.0, 1e-5]],
        }
    }

    #[test]
    fn test_json_flag_wins() {
        assert_eq!(resolve_format(OutputFormat::Table, true), OutputFormat::Json);
        assert_eq!(resolve_format(OutputFormat::Path, false), OutputFormat::Path);
    }

    #[test]
    fn test_preview_respects_limit() {
        let rendered = preview_table(&sample(), &ctx(2, false)).to_string();
        assert!(rendered.contains("A<->B"));
        assert!(rendered.contains("300.0"));
        assert!(rendered.contains("0.75"));
        assert!(!rendered.contains("1e-05"));
    }

    #[test]
    fn test_preview_without_header() {
        let rendered = preview_table(&sample(), &ctx(10, true)).to_string();
        assert!(!rendered.contains("descriptor-T"));
        assert!(rendered.contains("1e-05"));
    }
}
