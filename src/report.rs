// src/report.rs
// =============================================================================
// The data model shared by the whole pipeline, and the final report.
//
// Key shapes:
// - LinkOccurrence: one syntactic appearance of a link in a document,
//   with its file, 1-indexed line, and target classification. Occurrences
//   are never deduplicated: every appearance of a broken URL is reported.
// - CheckResult: the verification outcome for one *unique* URL. Network
//   work is deduplicated by URL; all occurrences of that URL look their
//   shared result up here. Written once, never mutated.
// - RunReport: per-file occurrence lists (files with zero links included),
//   the URL -> CheckResult map, per-file failures, and aggregate counts.
//   Immutable after the verifier stage completes.
// =============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::FileError;

/// Where a URL points, decided at extraction time from its scheme and
/// shape. Only `ExternalHttp` is subject to network verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkTarget {
    /// `http` or `https` scheme.
    ExternalHttp,
    /// Any other scheme (`mailto:`, `ftp:`, ...). Unparsable URLs land
    /// here too: recorded as unverifiable, never silently dropped.
    ExternalOtherScheme,
    /// No scheme; a path relative to the source file. Recorded, not
    /// validated against the filesystem.
    LocalRelative,
    /// A `#fragment` within the same document.
    AnchorOnly,
}

/// The markdown syntax a link occurrence was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// `[text](url)`
    Inline,
    /// `<http://example.com>` or an email autolink
    Autolink,
    /// `[label]: url`, reported once at the definition's line rather
    /// than at every place the label is referenced.
    ReferenceDef,
    /// `![alt](url)`
    Image,
    /// A bare URL in prose, found by the heuristic scanner.
    Raw,
}

/// One syntactic appearance of a link inside a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkOccurrence {
    pub source_file: PathBuf,
    /// 1-indexed; the line holding the link's opening syntax.
    pub line_number: usize,
    pub raw_url: String,
    /// Visible text for inline links, the alt text for images, the label
    /// for reference definitions, empty for raw URLs.
    pub link_text: String,
    pub kind: LinkKind,
    pub target: LinkTarget,
}

impl LinkOccurrence {
    /// True when this occurrence is subject to network verification.
    pub fn is_checkable(&self) -> bool {
        self.target == LinkTarget::ExternalHttp
    }
}

/// Why a URL counts as confirmed broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrokenKind {
    /// The final HTTP response carried this status code (400 or above).
    HttpStatus(u16),
    /// The redirect chain exceeded the configured hop cap.
    TooManyRedirects,
}

impl fmt::Display for BrokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrokenKind::HttpStatus(code) => write!(f, "HTTP {code}"),
            BrokenKind::TooManyRedirects => write!(f, "too many redirects"),
        }
    }
}

/// Why a verification attempt could not be completed. Deliberately
/// separate from `BrokenKind`: a timeout or DNS hiccup may be transient
/// or environmental, which calls for different remediation than a
/// confirmed 404.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The request, or the whole run budget, ran out of time.
    Timeout,
    /// The hostname did not resolve.
    Dns,
    /// The remote host refused the connection.
    ConnectionRefused,
    /// TLS handshake or certificate failure.
    Tls,
    /// The connection failed for another transport-level reason.
    Connection,
    /// Anything the client reported that fits none of the above.
    Other(String),
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Timeout => write!(f, "timed out"),
            FailureKind::Dns => write!(f, "dns resolution failed"),
            FailureKind::ConnectionRefused => write!(f, "connection refused"),
            FailureKind::Tls => write!(f, "tls failure"),
            FailureKind::Connection => write!(f, "connection failed"),
            FailureKind::Other(message) => write!(f, "{message}"),
        }
    }
}

/// Verification outcome for one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum CheckStatus {
    /// The server answered with a status code below 400.
    Ok(u16),
    /// Confirmed broken: an HTTP answer of 400 or above, or a redirect
    /// chain past the hop cap.
    Broken(BrokenKind),
    /// Checking was disabled for this run; no request was made.
    Skipped,
    /// The check could not be completed (network or timeout failure).
    Error(FailureKind),
}

impl CheckStatus {
    pub fn is_broken(&self) -> bool {
        matches!(self, CheckStatus::Broken(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, CheckStatus::Error(_))
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStatus::Ok(code) => write!(f, "HTTP {code}"),
            CheckStatus::Broken(kind) => write!(f, "{kind}"),
            CheckStatus::Skipped => write!(f, "skipped"),
            CheckStatus::Error(kind) => write!(f, "{kind}"),
        }
    }
}

/// The finalized result for one unique URL, shared by every occurrence
/// of that URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub url: String,
    #[serde(flatten)]
    pub status: CheckStatus,
}

/// Everything found in one scanned file. A file with zero links still
/// gets an entry, so the report always covers the full file set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub occurrences: Vec<LinkOccurrence>,
}

/// Aggregate counts for the run. `total_links` counts occurrences; the
/// outcome counters (`ok`, `broken`, `errors`, `skipped`) count unique
/// URLs, matching the one-result-per-URL model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub files_scanned: usize,
    pub files_failed: usize,
    pub total_links: usize,
    pub unique_urls: usize,
    pub ok: usize,
    pub broken: usize,
    pub errors: usize,
    pub skipped: usize,
}

/// The complete outcome of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub files: Vec<FileReport>,
    /// Per-file failures that did not abort the run.
    pub file_errors: Vec<FileError>,
    /// One entry per unique external HTTP URL. BTreeMap keeps iteration
    /// (and JSON output) deterministic.
    pub checks: BTreeMap<String, CheckResult>,
    pub summary: Summary,
}

impl RunReport {
    pub fn new(
        files: Vec<FileReport>,
        file_errors: Vec<FileError>,
        checks: BTreeMap<String, CheckResult>,
    ) -> Self {
        let mut summary = Summary {
            files_scanned: files.len(),
            files_failed: file_errors.len(),
            total_links: files.iter().map(|file| file.occurrences.len()).sum(),
            unique_urls: checks.len(),
            ..Summary::default()
        };
        for result in checks.values() {
            match result.status {
                CheckStatus::Ok(_) => summary.ok += 1,
                CheckStatus::Broken(_) => summary.broken += 1,
                CheckStatus::Skipped => summary.skipped += 1,
                CheckStatus::Error(_) => summary.errors += 1,
            }
        }
        Self {
            files,
            file_errors,
            checks,
            summary,
        }
    }

    /// The check result shared by this occurrence, if its URL was
    /// scheduled for verification.
    pub fn result_for(&self, occurrence: &LinkOccurrence) -> Option<&CheckResult> {
        self.checks.get(&occurrence.raw_url)
    }

    /// Occurrences whose URL came back broken or unverifiable, in file
    /// order. This is what remediation work starts from.
    pub fn findings(&self) -> Vec<(&LinkOccurrence, &CheckResult)> {
        self.files
            .iter()
            .flat_map(|file| &file.occurrences)
            .filter_map(|occurrence| self.result_for(occurrence).map(|result| (occurrence, result)))
            .filter(|(_, result)| result.status.is_broken() || result.status.is_error())
            .collect()
    }

    /// Overall success: nothing confirmed broken and nothing that could
    /// not be verified. Skipped checks do not count against success.
    pub fn is_success(&self) -> bool {
        self.summary.broken == 0 && self.summary.errors == 0
    }
}
