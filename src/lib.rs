// src/lib.rs
// =============================================================================
// mdlinkcheck: extract every link from a set of markdown files and verify
// that the external ones still resolve.
//
// The library is the whole engine; the binary in src/main.rs is a thin
// collaborator that parses flags, renders the report, and maps exit
// codes. Pipeline shape:
//
//   resolver   file paths -> deduplicated, ordered markdown file set
//   extractor  file text  -> link occurrences with line numbers
//   checker    occurrences -> one CheckResult per unique external URL
//   report     everything, assembled with aggregate counts
//
// Entry point: pipeline::run_scan(&ScanConfig).
// =============================================================================

pub mod checker;
pub mod config;
pub mod error;
pub mod extractor;
pub mod pipeline;
pub mod report;
pub mod resolver;

pub use config::{InputSet, ScanConfig};
pub use error::{FileError, FileErrorKind, ScanError};
pub use extractor::{extract_file, MarkdownFile};
pub use pipeline::run_scan;
pub use report::{
    BrokenKind, CheckResult, CheckStatus, FailureKind, FileReport, LinkKind, LinkOccurrence,
    LinkTarget, RunReport, Summary,
};
