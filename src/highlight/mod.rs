//! Search-and-highlight core.
//!
//! Three pieces, leaf-first:
//! - `finder`: locates all non-overlapping, case-insensitive occurrences of
//!   a literal needle in a paragraph's flattened text.
//! - `segment`: the run re-segmentation algorithm, rebuilding a run
//!   sequence so match spans carry the target highlight while every other
//!   character keeps its original run's formatting.
//! - `rewriter`: runs the finder and the segmenter over each paragraph and
//!   swaps the result into the document.

pub mod finder;
pub mod rewriter;
pub mod segment;

pub use finder::{MatchFinder, MatchSpan};
pub use rewriter::{HighlightStats, highlight_document};
pub use segment::segment;
