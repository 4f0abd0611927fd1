//! Run re-segmentation: rebuild a paragraph's run sequence so match spans
//! are highlighted and everything else keeps its original formatting.

use crate::docx::color::HighlightColor;
use crate::docx::run::RunFormat;
use crate::highlight::finder::MatchSpan;
use std::ops::Range;

/// Reconstruct a run sequence with `color` applied inside `matches`.
///
/// The match spans partition the paragraph's flattened text `[0, len)` into
/// alternating outside-match and inside-match regions. Each region is then
/// re-sliced against the *original* run boundaries: every original run
/// covering part of a region contributes exactly one output run whose text
/// is the intersection substring and whose attributes are copied unchanged,
/// except that inside-match runs get their highlight forced to `color`.
/// Formatting boundaries that existed in the source are therefore never
/// merged, and a single match may decompose into several output runs when
/// it crosses an original run boundary.
///
/// With no matches the input comes back structurally identical. Offsets are
/// byte offsets into the flattened text; both run and match boundaries fall
/// on character boundaries, so slicing is always valid.
///
/// # Panics
///
/// Panics if the spans are unordered, overlapping, empty or out of bounds.
/// Such input is a finder defect, not a runtime condition: clamping it here
/// would corrupt formatting invisibly.
pub fn segment(
    runs: &[RunFormat],
    matches: &[MatchSpan],
    color: HighlightColor,
) -> Vec<RunFormat> {
    let text_len: usize = runs.iter().map(|r| r.text.len()).sum();

    let mut prev_end = 0usize;
    for span in matches {
        assert!(
            span.start < span.end,
            "empty or inverted match span {}..{}",
            span.start,
            span.end
        );
        assert!(
            span.start >= prev_end,
            "match span {}..{} overlaps or precedes previous span ending at {}",
            span.start,
            span.end,
            prev_end
        );
        assert!(
            span.end <= text_len,
            "match span {}..{} exceeds text length {}",
            span.start,
            span.end,
            text_len
        );
        prev_end = span.end;
    }

    if matches.is_empty() {
        return runs.to_vec();
    }

    let mut out = Vec::with_capacity(runs.len() + 2 * matches.len());
    let mut cursor = 0usize;
    for span in matches {
        // Outside-match region before this match; empty regions are skipped
        if span.start > cursor {
            emit_region(&mut out, runs, cursor..span.start, None);
        }
        emit_region(&mut out, runs, span.start..span.end, Some(color));
        cursor = span.end;
    }
    if cursor < text_len {
        emit_region(&mut out, runs, cursor..text_len, None);
    }

    out
}

/// Emit one region, re-sliced against the original run boundaries.
///
/// `highlight` is `Some` for inside-match regions; outside-match regions
/// keep each original run's own highlight.
fn emit_region(
    out: &mut Vec<RunFormat>,
    runs: &[RunFormat],
    region: Range<usize>,
    highlight: Option<HighlightColor>,
) {
    let mut run_start = 0usize;
    for run in runs {
        let run_end = run_start + run.text.len();
        if run_start >= region.end {
            break;
        }
        let start = region.start.max(run_start);
        let end = region.end.min(run_end);
        if start < end {
            let mut emitted = run.resliced(&run.text[start - run_start..end - run_start]);
            if let Some(color) = highlight {
                emitted.highlight = Some(color);
            }
            out.push(emitted);
        }
        run_start = run_end;
    }
}
