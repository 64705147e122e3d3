//! Report Writer
//!
//! Writes the rendered summary to its output file, replacing any previous
//! run's report.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Write `text` verbatim to `path`, creating the parent directory if needed
pub fn write_report(path: &Path, text: &str) -> Result<(), ReportError> {
    let io_err = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, text).map_err(io_err)?;

    tracing::info!(path = %path.display(), bytes = text.len(), "Report written");
    Ok(())
}
