// src/extractor/mod.rs
// =============================================================================
// Link extraction from markdown documents.
//
// Two passes over each file, merged into one position-ordered list:
// - a structural pass (markdown.rs) that walks real markdown syntax with
//   `pulldown-cmark` and records which byte ranges it consumed;
// - an optional heuristic pass (raw.rs) that regex-scans prose for bare
//   URLs, restricted to bytes the structural pass did not claim.
//
// The heuristic lives in its own module on purpose: it is the one part
// of extraction that guesses, and it must stay replaceable without
// touching the parser.
// =============================================================================

mod markdown;
mod raw;

use std::ops::Range;
use std::path::PathBuf;

use url::Url;

use crate::report::{LinkOccurrence, LinkTarget};

/// A markdown document loaded into memory, ready for extraction.
#[derive(Debug, Clone)]
pub struct MarkdownFile {
    pub path: PathBuf,
    pub content: String,
}

impl MarkdownFile {
    pub fn new(path: PathBuf, content: String) -> Self {
        Self { path, content }
    }
}

/// Maps byte offsets to 1-indexed line numbers.
pub struct LineIndex {
    starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut starts = vec![0];
        for (i, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                starts.push(i + 1);
            }
        }
        Self {
            starts,
            len: text.len(),
        }
    }

    /// 1-indexed line containing the byte at `offset`.
    pub fn line_of(&self, offset: usize) -> usize {
        self.starts.partition_point(|&start| start <= offset)
    }

    /// Byte range of the whole line containing `offset`.
    pub fn line_bounds(&self, offset: usize) -> Range<usize> {
        let line = self.line_of(offset);
        let start = self.starts[line - 1];
        let end = self.starts.get(line).copied().unwrap_or(self.len);
        start..end
    }
}

/// Decides where a URL points from its shape alone. No network, no
/// filesystem.
pub fn classify_url(url: &str) -> LinkTarget {
    if url.starts_with('#') {
        return LinkTarget::AnchorOnly;
    }
    match Url::parse(url) {
        Ok(parsed) => match parsed.scheme() {
            "http" | "https" => LinkTarget::ExternalHttp,
            _ => LinkTarget::ExternalOtherScheme,
        },
        // No scheme at all: a path relative to the document.
        Err(url::ParseError::RelativeUrlWithoutBase) => LinkTarget::LocalRelative,
        // Has a scheme but does not parse (e.g. "https://" with no host):
        // surfaced as unverifiable rather than silently dropped.
        Err(_) => LinkTarget::ExternalOtherScheme,
    }
}

/// Extracts every link occurrence from one file, in document order.
/// Each call parses from scratch; nothing is shared between files.
pub fn extract_file(file: &MarkdownFile, detect_raw_urls: bool) -> Vec<LinkOccurrence> {
    let index = LineIndex::new(&file.content);
    let structural = markdown::structural_pass(file, &index);

    let mut occurrences = structural.occurrences;
    if detect_raw_urls {
        occurrences.extend(raw::raw_url_pass(file, &structural.claimed));
    }

    // The raw pass appends after the structural pass; restore document
    // order before dropping the byte offsets.
    occurrences.sort_by_key(|(offset, _)| *offset);
    occurrences.into_iter().map(|(_, occ)| occ).collect()
}
