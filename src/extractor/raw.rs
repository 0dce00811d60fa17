// src/extractor/raw.rs
// =============================================================================
// The heuristic pass: bare http(s) URLs sitting in prose, outside any
// markdown link syntax.
//
// This is guesswork, not parsing. URLs in running text have no closing
// delimiter, so the scanner grabs everything up to whitespace (or a
// closing paren) and then strips the punctuation a sentence would add:
// "see https://example.com." must not report a URL ending in a dot.
//
// The whole heuristic stays behind raw_url_pass so its false-positive
// behavior can be tuned without touching the structural extractor.
// =============================================================================

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::extractor::{classify_url, MarkdownFile};
use crate::report::{LinkKind, LinkOccurrence};

/// A scheme, then everything up to whitespace or a closing paren.
static RAW_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://[^\s)]+").unwrap());

/// Trailing characters that belong to the surrounding prose, not the URL.
const TRAILING_PROSE: &[char] = &['.', ',', ';', ':', '!', '?', ')', '>', '"', '\'', '`'];

/// Scans a file line by line for bare URLs, skipping matches that start
/// inside a byte range the structural pass already claimed (links,
/// images, reference definitions, code).
pub(crate) fn raw_url_pass(
    file: &MarkdownFile,
    claimed: &[Range<usize>],
) -> Vec<(usize, LinkOccurrence)> {
    let mut occurrences = Vec::new();
    let mut line_start = 0;

    for (line_idx, line) in file.content.split('\n').enumerate() {
        for found in RAW_URL.find_iter(line) {
            let offset = line_start + found.start();
            if is_claimed(offset, claimed) {
                continue;
            }
            let url = found.as_str().trim_end_matches(TRAILING_PROSE);
            occurrences.push((
                offset,
                LinkOccurrence {
                    source_file: file.path.clone(),
                    line_number: line_idx + 1,
                    raw_url: url.to_string(),
                    link_text: String::new(),
                    kind: LinkKind::Raw,
                    target: classify_url(url),
                },
            ));
        }
        line_start += line.len() + 1;
    }

    occurrences
}

fn is_claimed(offset: usize, claimed: &[Range<usize>]) -> bool {
    claimed.iter().any(|range| range.contains(&offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::LinkTarget;
    use std::path::PathBuf;

    fn pass(content: &str, claimed: &[Range<usize>]) -> Vec<(usize, LinkOccurrence)> {
        let file = MarkdownFile::new(PathBuf::from("test.md"), content.to_string());
        raw_url_pass(&file, claimed)
    }

    #[test]
    fn test_bare_url_carries_offset_line_and_raw_kind() {
        let found = pass("intro\nsee https://one.example for details\n", &[]);
        assert_eq!(found.len(), 1);
        let (offset, occurrence) = &found[0];
        assert_eq!(*offset, 10);
        assert_eq!(occurrence.line_number, 2);
        assert_eq!(occurrence.raw_url, "https://one.example");
        assert_eq!(occurrence.kind, LinkKind::Raw);
        assert_eq!(occurrence.target, LinkTarget::ExternalHttp);
        assert!(occurrence.link_text.is_empty());
    }

    #[test]
    fn test_trailing_prose_punctuation_is_trimmed() {
        let found = pass(
            "read https://a.example. or 'https://b.example', even (https://c.example)\n",
            &[],
        );
        let urls: Vec<&str> = found.iter().map(|(_, occ)| occ.raw_url.as_str()).collect();
        assert_eq!(
            urls,
            vec!["https://a.example", "https://b.example", "https://c.example"]
        );
    }

    #[test]
    fn test_matches_inside_claimed_ranges_are_dropped() {
        let content = "see https://a.example and https://b.example\n";
        let found = pass(content, &[4..21]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].1.raw_url, "https://b.example");
    }

    #[test]
    fn test_both_schemes_are_detected_on_one_line() {
        let found = pass("http://plain.example then https://secure.example\n", &[]);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].1.line_number, 1);
        assert_eq!(found[1].1.line_number, 1);
        assert_eq!(found[0].1.raw_url, "http://plain.example");
        assert_eq!(found[1].1.raw_url, "https://secure.example");
    }

    #[test]
    fn test_scheme_with_no_host_is_surfaced_as_unverifiable() {
        let found = pass("dangling https://. in prose\n", &[]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].1.raw_url, "https://");
        assert_eq!(found[0].1.target, LinkTarget::ExternalOtherScheme);
    }
}
