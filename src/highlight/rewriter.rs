//! Per-paragraph orchestration: flatten, find, re-segment, replace.

use crate::docx::color::HighlightColor;
use crate::docx::document::Document;
use crate::docx::error::Result;
use crate::highlight::finder::MatchFinder;
use crate::highlight::segment::segment;

/// Counters for one document pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighlightStats {
    /// Body paragraphs examined
    pub paragraphs_scanned: usize,
    /// Paragraphs whose run list was replaced
    pub paragraphs_rewritten: usize,
    /// Total match occurrences highlighted
    pub matches: usize,
}

/// Highlight every occurrence of the finder's needle in every body
/// paragraph of `doc`, in document order.
///
/// Paragraphs without a match are skipped entirely and keep their exact
/// original bytes. For the rest the replacement run sequence is computed
/// from that paragraph's own snapshot of runs and matches, then swapped in
/// as one unit, so no consumer ever observes a partially rewritten
/// paragraph. Mutates the in-memory document only; saving is the caller's
/// move.
pub fn highlight_document(
    doc: &mut Document,
    finder: &MatchFinder,
    color: HighlightColor,
) -> Result<HighlightStats> {
    let mut stats = HighlightStats::default();

    for index in 0..doc.paragraph_count() {
        stats.paragraphs_scanned += 1;

        let para = doc.paragraph(index);
        let runs = para.runs()?;
        let text: String = runs.iter().map(|r| r.text.as_str()).collect();

        let spans = finder.find(&text);
        if spans.is_empty() {
            continue;
        }
        log::debug!(
            "paragraph {index}: {} match(es) in {} run(s)",
            spans.len(),
            runs.len()
        );

        let new_runs = segment(&runs, &spans, color);
        let replacement = para.rebuild_with_runs(&new_runs)?;
        doc.replace_paragraph(index, replacement);

        stats.paragraphs_rewritten += 1;
        stats.matches += spans.len();
    }

    log::debug!(
        "rewrote {} of {} paragraphs ({} matches)",
        stats.paragraphs_rewritten,
        stats.paragraphs_scanned,
        stats.matches
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:t>The </w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>amp</w:t></w:r><w:r><w:t>R cassette was cloned.</w:t></w:r></w:p><w:p><w:r><w:t>Nothing to see here.</w:t></w:r></w:p></w:body></w:document>"#;

    #[test]
    fn test_matched_paragraph_is_rewritten() {
        let mut doc = Document::from_xml(DOC.as_bytes().to_vec()).unwrap();
        let finder = MatchFinder::new("ampr");

        let stats = highlight_document(&mut doc, &finder, HighlightColor::Green).unwrap();
        assert_eq!(
            stats,
            HighlightStats {
                paragraphs_scanned: 2,
                paragraphs_rewritten: 1,
                matches: 1
            }
        );

        // Text round-trips
        assert_eq!(
            doc.paragraph(0).text().unwrap(),
            "The ampR cassette was cloned."
        );

        // The bold boundary inside the match survives
        let runs = doc.paragraph(0).runs().unwrap();
        let texts: Vec<&str> = runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["The ", "amp", "R", " cassette was cloned."]);
        assert_eq!(runs[1].bold, Some(true));
        assert_eq!(runs[1].highlight, Some(HighlightColor::Green));
        assert_eq!(runs[2].bold, None);
        assert_eq!(runs[2].highlight, Some(HighlightColor::Green));
        assert_eq!(runs[3].highlight, None);
    }

    #[test]
    fn test_unmatched_paragraph_keeps_original_bytes() {
        let mut doc = Document::from_xml(DOC.as_bytes().to_vec()).unwrap();
        let before = doc.paragraph(1).xml_bytes().to_vec();

        let finder = MatchFinder::new("ampR");
        highlight_document(&mut doc, &finder, HighlightColor::Green).unwrap();

        assert_eq!(doc.paragraph(1).xml_bytes(), before.as_slice());
    }

    #[test]
    fn test_absent_needle_leaves_document_untouched() {
        let mut doc = Document::from_xml(DOC.as_bytes().to_vec()).unwrap();
        let finder = MatchFinder::new("zebrafish");

        let stats = highlight_document(&mut doc, &finder, HighlightColor::Yellow).unwrap();
        assert_eq!(stats.paragraphs_rewritten, 0);
        assert_eq!(stats.matches, 0);
        assert_eq!(doc.to_xml(), DOC.as_bytes());
    }

    #[test]
    fn test_multiple_matches_in_one_paragraph() {
        let xml = r#"<w:document xmlns:w="ns"><w:body><w:p><w:r><w:t>egfp then EGFP again</w:t></w:r></w:p></w:body></w:document>"#;
        let mut doc = Document::from_xml(xml.as_bytes().to_vec()).unwrap();
        let finder = MatchFinder::new("egfp");

        let stats = highlight_document(&mut doc, &finder, HighlightColor::Magenta).unwrap();
        assert_eq!(stats.matches, 2);

        let runs = doc.paragraph(0).runs().unwrap();
        let highlighted: Vec<&str> = runs
            .iter()
            .filter(|r| r.highlight == Some(HighlightColor::Magenta))
            .map(|r| r.text.as_str())
            .collect();
        assert_eq!(highlighted, vec!["egfp", "EGFP"]);
        assert_eq!(doc.paragraph(0).text().unwrap(), "egfp then EGFP again");
    }
}
