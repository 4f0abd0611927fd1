//! Loquat - search-and-highlight for Word documents
//!
//! This library finds every occurrence of a literal search string inside the
//! paragraphs of a .docx document and rewrites those paragraphs so the
//! matched spans carry a highlight color, while every other character keeps
//! its original run-level formatting (bold, italic, underline, font, size,
//! color, prior highlight) exactly as it was.
//!
//! # Features
//!
//! - **Run re-segmentation**: matches are highlighted without merging or
//!   losing formatting boundaries that existed in the source document
//! - **Case-insensitive literal search**: no pattern metacharacters
//! - **Lossless container handling**: archive parts and paragraphs without
//!   matches round-trip byte-for-byte
//!
//! # Example - highlighting one file
//!
//! ```no_run
//! use loquat::docx::HighlightColor;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let stats = loquat::highlight_file(
//!     "plasmid_map.docx",
//!     "plasmid_map_output_egfp.docx",
//!     "egfp",
//!     HighlightColor::Magenta,
//! )?;
//! println!("{} matches highlighted", stats.matches);
//! # Ok(())
//! # }
//! ```
//!
//! # Example - working with the document model
//!
//! ```no_run
//! use loquat::docx::{HighlightColor, Package};
//! use loquat::highlight::{MatchFinder, highlight_document};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut pkg = Package::open("document.docx")?;
//! let finder = MatchFinder::new("ampR");
//! let stats = highlight_document(pkg.document_mut(), &finder, HighlightColor::Green)?;
//! if stats.matches > 0 {
//!     pkg.save("document_highlighted.docx")?;
//! }
//! # Ok(())
//! # }
//! ```

/// Word (.docx) container reading and writing
pub mod docx;

/// Match finding and run re-segmentation
pub mod highlight;

/// Built-in sequence table and needle resolution
pub mod sequences;

mod error;

pub use error::{HighlightError, Result};
pub use highlight::HighlightStats;

use docx::{HighlightColor, Package};
use highlight::{MatchFinder, highlight_document};
use std::path::Path;

/// Open `input`, highlight every occurrence of `needle`, and save to
/// `output`.
///
/// A document with no matches still writes an output file; that is a
/// successful no-op pass, not an error.
pub fn highlight_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    needle: &str,
    color: HighlightColor,
) -> Result<HighlightStats> {
    let mut pkg = Package::open(input)?;
    let finder = MatchFinder::new(needle);
    let stats = highlight_document(pkg.document_mut(), &finder, color)?;
    pkg.save(output)?;
    Ok(stats)
}
