// src/pipeline.rs
// =============================================================================
// The straight-line pipeline: resolve -> read -> extract -> verify ->
// report.
//
// Only two failures abort a run, and both fire before any link work
// happens: a configuration-level resolver error, and HTTP client
// construction. Everything later is captured into the report instead of
// propagated: unreadable files become FileError entries, and every
// verification outcome (including "could not check") is a CheckResult.
// The report that comes back is always complete.
// =============================================================================

use std::fs;

use crate::checker;
use crate::config::ScanConfig;
use crate::error::{FileError, FileErrorKind, ScanError};
use crate::extractor::{self, MarkdownFile};
use crate::report::{FileReport, LinkOccurrence, RunReport};
use crate::resolver;

/// Runs one complete scan. Each invocation is independent: no cache, no
/// state carried over from previous runs.
pub async fn run_scan(config: &ScanConfig) -> Result<RunReport, ScanError> {
    let resolved = resolver::resolve(&config.inputs)?;
    if resolved.files.is_empty() {
        return Err(ScanError::NoMarkdownFiles);
    }
    tracing::info!(files = resolved.files.len(), "markdown files resolved");

    let mut file_errors = resolved.errors;
    let mut files = Vec::with_capacity(resolved.files.len());
    let mut occurrences: Vec<LinkOccurrence> = Vec::new();

    for path in resolved.files {
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(error) => {
                tracing::warn!(path = %path.display(), error = %error, "skipping unreadable file");
                file_errors.push(FileError::new(
                    path,
                    FileErrorKind::Unreadable,
                    error.to_string(),
                ));
                continue;
            }
        };

        let file = MarkdownFile::new(path, content);
        let found = extractor::extract_file(&file, config.detect_raw_urls);
        tracing::debug!(path = %file.path.display(), links = found.len(), "extracted");

        occurrences.extend(found.iter().cloned());
        // Zero-link files keep their entry: the report covers the whole
        // file set, not just the files with findings.
        files.push(FileReport {
            path: file.path,
            occurrences: found,
        });
    }

    let checks = checker::verify(&occurrences, config).await?;
    Ok(RunReport::new(files, file_errors, checks))
}
