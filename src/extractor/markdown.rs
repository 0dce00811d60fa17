// src/extractor/markdown.rs
// =============================================================================
// The structural extraction pass.
//
// Walks `pulldown-cmark` events with byte offsets and turns real markdown
// link syntax into occurrences:
// - inline links [text](url)
// - autolinks <http://...> and email autolinks
// - images ![alt](url)
// - reference definitions [label]: url, pulled from the parser's
//   definition table since they emit no events of their own
//
// Reference *uses* ([text][label], collapsed, shortcut) are skipped: the
// URL they resolve to is reported exactly once, at the definition's line.
//
// Besides occurrences, the pass reports every byte range it consumed
// (links, images, definitions, code blocks, inline code) so the raw-URL
// pass can stay out of them.
// =============================================================================

use std::ops::Range;

use pulldown_cmark::{Event, LinkType, Parser, Tag};

use crate::extractor::{classify_url, LineIndex, MarkdownFile};
use crate::report::{LinkKind, LinkOccurrence};

pub(crate) struct StructuralPass {
    /// Occurrences tagged with their byte offset, for merge-sorting with
    /// the raw pass.
    pub occurrences: Vec<(usize, LinkOccurrence)>,
    /// Byte ranges consumed by markdown syntax.
    pub claimed: Vec<Range<usize>>,
}

/// A link or image whose Start event has fired but whose End has not.
/// CommonMark never nests links in links, but an image can sit inside a
/// link, so there is one slot for each.
struct Open {
    offset: usize,
    url: String,
    kind: LinkKind,
    text: String,
}

impl Open {
    fn into_occurrence(self, file: &MarkdownFile, index: &LineIndex) -> (usize, LinkOccurrence) {
        let occurrence = LinkOccurrence {
            source_file: file.path.clone(),
            line_number: index.line_of(self.offset),
            raw_url: self.url.clone(),
            link_text: self.text.trim().to_string(),
            kind: self.kind,
            target: classify_url(&self.url),
        };
        (self.offset, occurrence)
    }
}

pub(crate) fn structural_pass(file: &MarkdownFile, index: &LineIndex) -> StructuralPass {
    let parser = Parser::new(&file.content);

    // Definitions are consumed by the parser without producing events;
    // copy them out before the event walk takes ownership.
    let definitions: Vec<(String, String, Range<usize>)> = parser
        .reference_definitions()
        .iter()
        .map(|(label, def)| (label.to_string(), def.dest.to_string(), def.span.clone()))
        .collect();

    let mut occurrences = Vec::new();
    let mut claimed = Vec::new();

    for (label, dest, span) in definitions {
        // Claim the definition's whole first line as well as its span, so
        // the raw pass never re-reports the destination.
        let line = index.line_bounds(span.start);
        claimed.push(line.start..span.end.max(line.end));

        let url = dest.trim();
        if url.is_empty() {
            continue;
        }
        occurrences.push((
            span.start,
            LinkOccurrence {
                source_file: file.path.clone(),
                line_number: index.line_of(span.start),
                raw_url: url.to_string(),
                link_text: label,
                kind: LinkKind::ReferenceDef,
                target: classify_url(url),
            },
        ));
    }

    let mut open_link: Option<Open> = None;
    let mut open_image: Option<Open> = None;

    for (event, range) in parser.into_offset_iter() {
        match event {
            Event::Start(Tag::Link(link_type, dest, _title)) => {
                claimed.push(range.clone());
                let is_email = link_type == LinkType::Email;
                let Some(kind) = link_kind(link_type) else {
                    continue;
                };
                let url = dest.trim();
                if url.is_empty() {
                    continue;
                }
                // Email autolink destinations arrive as the bare address;
                // store the mailto: form the HTML renderer emits.
                let url = if is_email {
                    format!("mailto:{url}")
                } else {
                    url.to_string()
                };
                open_link = Some(Open {
                    offset: range.start,
                    url,
                    kind,
                    text: String::new(),
                });
            }
            Event::End(Tag::Link(..)) => {
                if let Some(open) = open_link.take() {
                    occurrences.push(open.into_occurrence(file, index));
                }
            }
            Event::Start(Tag::Image(_link_type, dest, _title)) => {
                claimed.push(range.clone());
                let url = dest.trim();
                if url.is_empty() {
                    continue;
                }
                open_image = Some(Open {
                    offset: range.start,
                    url: url.to_string(),
                    kind: LinkKind::Image,
                    text: String::new(),
                });
            }
            Event::End(Tag::Image(..)) => {
                if let Some(open) = open_image.take() {
                    occurrences.push(open.into_occurrence(file, index));
                }
            }
            Event::Start(Tag::CodeBlock(_)) => {
                claimed.push(range.clone());
            }
            Event::Code(code) => {
                claimed.push(range.clone());
                if let Some(open) = open_image.as_mut() {
                    open.text.push_str(&code);
                }
                if let Some(open) = open_link.as_mut() {
                    open.text.push_str(&code);
                }
            }
            Event::Text(text) => {
                if let Some(open) = open_image.as_mut() {
                    open.text.push_str(&text);
                }
                if let Some(open) = open_link.as_mut() {
                    open.text.push_str(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(open) = open_image.as_mut() {
                    open.text.push(' ');
                }
                if let Some(open) = open_link.as_mut() {
                    open.text.push(' ');
                }
            }
            _ => {}
        }
    }

    StructuralPass {
        occurrences,
        claimed,
    }
}

/// Maps the parser's link type to an occurrence kind, or `None` for the
/// use sites whose definition is reported instead.
fn link_kind(link_type: LinkType) -> Option<LinkKind> {
    match link_type {
        LinkType::Inline => Some(LinkKind::Inline),
        LinkType::Autolink | LinkType::Email => Some(LinkKind::Autolink),
        LinkType::Reference
        | LinkType::ReferenceUnknown
        | LinkType::Collapsed
        | LinkType::CollapsedUnknown
        | LinkType::Shortcut
        | LinkType::ShortcutUnknown => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::LinkTarget;
    use std::path::PathBuf;

    fn extract(content: &str) -> Vec<LinkOccurrence> {
        let file = MarkdownFile::new(PathBuf::from("test.md"), content.to_string());
        let index = LineIndex::new(&file.content);
        let mut tagged = structural_pass(&file, &index).occurrences;
        tagged.sort_by_key(|(offset, _)| *offset);
        tagged.into_iter().map(|(_, occ)| occ).collect()
    }

    #[test]
    fn test_inline_links_carry_text_and_line_numbers() {
        let occurrences = extract(
            "# Title\n\nSee [the Rust site](https://www.rust-lang.org) for more.\n",
        );
        assert_eq!(occurrences.len(), 1);
        assert_eq!(occurrences[0].raw_url, "https://www.rust-lang.org");
        assert_eq!(occurrences[0].link_text, "the Rust site");
        assert_eq!(occurrences[0].kind, LinkKind::Inline);
        assert_eq!(occurrences[0].line_number, 3);
    }

    #[test]
    fn test_two_links_on_one_line_are_two_occurrences() {
        let occurrences = extract("[a](https://a.example) and [b](https://b.example)\n");
        assert_eq!(occurrences.len(), 2);
        assert_eq!(occurrences[0].raw_url, "https://a.example");
        assert_eq!(occurrences[1].raw_url, "https://b.example");
        assert_eq!(occurrences[0].line_number, 1);
        assert_eq!(occurrences[1].line_number, 1);
    }

    #[test]
    fn test_autolink_and_email_are_occurrences() {
        let occurrences = extract("Visit <https://example.com> or <admin@example.com>\n");
        assert_eq!(occurrences.len(), 2);
        assert_eq!(occurrences[0].kind, LinkKind::Autolink);
        assert_eq!(occurrences[0].target, LinkTarget::ExternalHttp);
        assert_eq!(occurrences[1].kind, LinkKind::Autolink);
        assert_eq!(occurrences[1].target, LinkTarget::ExternalOtherScheme);
        assert_eq!(occurrences[1].raw_url, "mailto:admin@example.com");
    }

    #[test]
    fn test_reference_definition_reported_once_at_its_own_line() {
        let occurrences = extract(
            "Uses [the docs][docs] twice: [again][docs].\n\n[docs]: https://docs.example/guide\n",
        );
        assert_eq!(occurrences.len(), 1);
        assert_eq!(occurrences[0].kind, LinkKind::ReferenceDef);
        assert_eq!(occurrences[0].raw_url, "https://docs.example/guide");
        assert_eq!(occurrences[0].link_text, "docs");
        assert_eq!(occurrences[0].line_number, 3);
    }

    #[test]
    fn test_image_is_an_occurrence_with_alt_text() {
        let occurrences = extract("![build badge](https://ci.example/badge.svg)\n");
        assert_eq!(occurrences.len(), 1);
        assert_eq!(occurrences[0].kind, LinkKind::Image);
        assert_eq!(occurrences[0].link_text, "build badge");
        assert_eq!(occurrences[0].raw_url, "https://ci.example/badge.svg");
    }

    #[test]
    fn test_links_inside_code_blocks_are_not_occurrences() {
        let occurrences = extract(
            "```\n[not a link](https://code.example)\n```\n\nAnd `[inline](https://code2.example)` too.\n",
        );
        assert!(occurrences.is_empty());
    }

    #[test]
    fn test_code_spans_and_blocks_are_claimed() {
        let file = MarkdownFile::new(
            PathBuf::from("test.md"),
            "run `curl https://api.example`\n\n```\nhttps://block.example\n```\n".to_string(),
        );
        let index = LineIndex::new(&file.content);
        let pass = structural_pass(&file, &index);
        assert!(pass.occurrences.is_empty());
        // one range for the inline code, one for the fenced block
        assert_eq!(pass.claimed.len(), 2);
    }

    #[test]
    fn test_styled_link_text_is_flattened() {
        let occurrences = extract("[see *the* `docs`](https://example.com)\n");
        assert_eq!(occurrences.len(), 1);
        assert_eq!(occurrences[0].link_text, "see the docs");
    }

    #[test]
    fn test_relative_and_anchor_links_are_classified_not_dropped() {
        let occurrences = extract("[local](./other.md) and [anchor](#section)\n");
        assert_eq!(occurrences.len(), 2);
        assert_eq!(occurrences[0].target, LinkTarget::LocalRelative);
        assert_eq!(occurrences[1].target, LinkTarget::AnchorOnly);
    }

    #[test]
    fn test_empty_destination_is_dropped() {
        let occurrences = extract("[empty]() here\n");
        assert!(occurrences.is_empty());
    }
}
