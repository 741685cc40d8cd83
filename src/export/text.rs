//! Plain-text report files

use std::path::Path;
use tracing::debug;

use super::create_parent_dir;
use crate::error::{ReportError, ReportResult};

/// Write a finished text report to `path`.
///
/// Missing parent directories are created. Failure to create them or to
/// write the file is a [`ReportError::ReportFile`].
pub fn write_text_report(path: &Path, contents: &str) -> ReportResult<()> {
    let to_error = |e: std::io::Error| ReportError::ReportFile {
        path: path.display().to_string(),
        reason: e.to_string(),
    };
    create_parent_dir(path).map_err(to_error)?;
    std::fs::write(path, contents).map_err(to_error)?;
    debug!(path = %path.display(), bytes = contents.len(), "text report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_text_report() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.txt");
        write_text_report(&path, "hello\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
    }

    #[test]
    fn test_missing_directory_is_created() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a").join("b").join("report.txt");
        write_text_report(&path, "hello\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
    }

    #[test]
    fn test_unwritable_path_exits_with_two() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("nope"), "").unwrap();
        let path = temp_dir.path().join("nope").join("report.txt");
        let err = write_text_report(&path, "x").unwrap_err();
        assert!(matches!(err, ReportError::ReportFile { .. }));
        assert_eq!(err.exit_code(), 2);
    }
}
