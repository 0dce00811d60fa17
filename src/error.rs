// src/error.rs
// =============================================================================
// Error taxonomy for the scan engine.
//
// Two tiers:
// - ScanError: fatal failures that abort a run before a report exists
//   (bad input configuration, unusable root, no files at all, HTTP client
//   construction).
// - FileError: per-file failures (missing path, not a regular file,
//   unreadable content). These are recorded in the report and the run
//   continues with the remaining files; one bad path never blocks the rest.
//
// Everything per-link (malformed URLs, broken or unreachable targets) is
// not an error at all here: those outcomes are regular report data, see
// src/report.rs.
// =============================================================================

use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal, run-level failures. Raised before any file content is scanned
/// (or, for `HttpClient`, before any check is issued), never for a single
/// bad file or link.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The explicit file list was empty. Nothing to scan is not silently
    /// accepted as a successful run.
    #[error("no input files given: pass markdown file paths or use --recursive")]
    NoInputFiles,

    /// The recursive scan root is missing or not a readable directory.
    #[error("cannot scan root directory {}: {source}", path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Resolution finished without a single markdown file to scan.
    #[error("no markdown files found")]
    NoMarkdownFiles,

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Why one file dropped out of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileErrorKind {
    /// The named path does not exist.
    NotFound,
    /// The named path exists but is not a regular file.
    NotAFile,
    /// The file (or a directory during the recursive walk) exists but
    /// could not be read: permissions, invalid UTF-8, I/O failure.
    Unreadable,
}

/// A per-file failure, recorded in the report. Recoverable by design:
/// the scan continues with every other file.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{}: {message}", path.display())]
pub struct FileError {
    pub path: PathBuf,
    pub kind: FileErrorKind,
    pub message: String,
}

impl FileError {
    pub fn new(path: PathBuf, kind: FileErrorKind, message: impl Into<String>) -> Self {
        Self {
            path,
            kind,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_error_displays_path_and_message() {
        let error = FileError::new(
            PathBuf::from("docs/missing.md"),
            FileErrorKind::NotFound,
            "No such file or directory",
        );
        assert_eq!(error.to_string(), "docs/missing.md: No such file or directory");
    }

    #[test]
    fn test_scan_error_messages_name_the_failure() {
        assert!(ScanError::NoMarkdownFiles.to_string().contains("no markdown files"));
        assert!(ScanError::NoInputFiles.to_string().contains("--recursive"));
    }
}
