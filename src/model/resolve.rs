/// Log file resolution: turn the user's glob into exactly one path.
///
/// Zero matches and multiple matches are both errors, and both are raised
/// before anything is loaded. Directories matched by the pattern are ignored.
use std::path::PathBuf;

use glob::glob;

use super::errors::TableError;

/// Resolve `pattern` to the single file it matches.
///
/// # Errors
///
/// - `TableError::InvalidPattern` — the pattern does not parse
/// - `TableError::AmbiguousLogfile` — more than one file matches
/// - `TableError::LogfileNotFound` — nothing matches
/// - `TableError::Io` — a matching entry could not be read
pub fn resolve_logfile(pattern: &str) -> Result<PathBuf, TableError> {
    let entries = glob(pattern).map_err(|source| TableError::InvalidPattern {
        pattern: pattern.to_owned(),
        source,
    })?;

    let mut matches = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| TableError::Io {
            path: e.path().to_owned(),
            source: std::io::Error::from(e),
        })?;
        if !path.is_dir() {
            matches.push(path);
        }
    }

    match matches.len() {
        0 => Err(TableError::LogfileNotFound {
            pattern: pattern.to_owned(),
        }),
        1 => Ok(matches.remove(0)),
        _ => Err(TableError::AmbiguousLogfile {
            pattern: pattern.to_owned(),
            candidates: matches.iter().map(|p| p.display().to_string()).collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_single_match() {
        let tmp = tempdir().unwrap();
        std::fs::write(tmp.path().join("run.log"), "{}").unwrap();
        std::fs::write(tmp.path().join("notes.txt"), "").unwrap();
        let pattern = format!("{}/*.log", tmp.path().display());
        let path = resolve_logfile(&pattern).unwrap();
        assert_eq!(path, tmp.path().join("run.log"));
    }

    #[test]
    fn test_ambiguous_match() {
        let tmp = tempdir().unwrap();
        std::fs::write(tmp.path().join("a.log"), "{}").unwrap();
        std::fs::write(tmp.path().join("b.log"), "{}").unwrap();
        let pattern = format!("{}/*.log", tmp.path().display());
        match resolve_logfile(&pattern) {
            Err(TableError::AmbiguousLogfile { candidates, .. }) => {
                assert_eq!(candidates.len(), 2);
                assert!(candidates[0].ends_with("a.log"));
                assert!(candidates[1].ends_with("b.log"));
            }
            other => panic!("expected ambiguity, got {other:?}"),
        }
    }

    #[test]
    fn test_no_match() {
        let tmp = tempdir().unwrap();
        let pattern = format!("{}/*.log", tmp.path().display());
        let result = resolve_logfile(&pattern);
        assert!(matches!(result, Err(TableError::LogfileNotFound { .. })));
    }

    #[test]
    fn test_directories_ignored() {
        let tmp = tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("old.log")).unwrap();
        std::fs::write(tmp.path().join("new.log"), "{}").unwrap();
        let pattern = format!("{}/*.log", tmp.path().display());
        let path = resolve_logfile(&pattern).unwrap();
        assert_eq!(path, tmp.path().join("new.log"));
    }

    #[test]
    fn test_invalid_pattern() {
        let result = resolve_logfile("[*.log");
        assert!(matches!(result, Err(TableError::InvalidPattern { .. })));
    }
}
