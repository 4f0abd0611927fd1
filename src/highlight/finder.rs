//! Literal, case-insensitive match scanning over flattened paragraph text.

use aho_corasick::AhoCorasick;

/// One occurrence of the search text: half-open byte offsets into the
/// paragraph's flattened text, `0 <= start < end <= len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

impl MatchSpan {
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Scans text for all non-overlapping occurrences of one literal needle,
/// ASCII-case-insensitively.
///
/// The automaton is built once per search term and shared across
/// paragraphs; scanning itself keeps no state, so every call to
/// [`MatchFinder::find`] restarts from offset zero.
pub struct MatchFinder {
    /// `None` when the needle is empty: nothing ever matches.
    automaton: Option<AhoCorasick>,
}

impl MatchFinder {
    /// Build a finder for one literal needle.
    ///
    /// No pattern metacharacters are honored. An empty needle yields a
    /// finder that never matches, making the whole operation a no-op
    /// rather than an error at this level.
    pub fn new(needle: &str) -> Self {
        let automaton = (!needle.is_empty()).then(|| {
            AhoCorasick::builder()
                .ascii_case_insensitive(true)
                .build([needle])
                .expect("failed to build single-literal automaton")
        });
        Self { automaton }
    }

    /// Find all matches in `haystack`, in increasing start order.
    ///
    /// Scanning is left-to-right and resumes after each match's end, so the
    /// returned spans never overlap: after a match at `[s, e)` the next
    /// candidate is searched from `e`, not `s + 1`.
    pub fn find(&self, haystack: &str) -> Vec<MatchSpan> {
        match &self.automaton {
            Some(ac) => ac
                .find_iter(haystack)
                .map(|m| MatchSpan::new(m.start(), m.end()))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Whether `haystack` contains the needle at all.
    pub fn is_match(&self, haystack: &str) -> bool {
        match &self.automaton {
            Some(ac) => ac.is_match(haystack),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_matching() {
        let finder = MatchFinder::new("egfp");
        let spans = finder.find("EGFP and eGFP and egfp");
        assert_eq!(
            spans,
            vec![
                MatchSpan::new(0, 4),
                MatchSpan::new(9, 13),
                MatchSpan::new(18, 22)
            ]
        );
    }

    #[test]
    fn test_non_overlapping_resume_after_end() {
        // "aaaa" contains "aa" at 0, 1 and 2; scanning resumes after each
        // match's end, so only 0..2 and 2..4 are reported
        let finder = MatchFinder::new("aa");
        let spans = finder.find("aaaa");
        assert_eq!(spans, vec![MatchSpan::new(0, 2), MatchSpan::new(2, 4)]);
    }

    #[test]
    fn test_spans_are_ordered_and_disjoint() {
        let finder = MatchFinder::new("ab");
        let spans = finder.find("ab ab abab");
        for pair in spans.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
    }

    #[test]
    fn test_empty_needle_never_matches() {
        let finder = MatchFinder::new("");
        assert!(finder.find("anything").is_empty());
        assert!(!finder.is_match("anything"));
    }

    #[test]
    fn test_absent_needle() {
        let finder = MatchFinder::new("ampR");
        assert!(finder.find("no resistance cassette here").is_empty());
    }

    #[test]
    fn test_metacharacters_are_literal() {
        let finder = MatchFinder::new("a.c");
        assert!(finder.find("abc").is_empty());
        assert_eq!(finder.find("a.c"), vec![MatchSpan::new(0, 3)]);
    }
}
