//! Word (.docx) container support.
//!
//! This module owns loading and saving the document container and exposes
//! paragraphs and runs for rewriting. It is organized around these types:
//! - `Package`: the overall .docx file (OPC/ZIP archive)
//! - `Document`: the main document part with its body-level paragraphs
//! - `Paragraph`: a paragraph with runs
//! - `RunFormat`: one run's text and character formatting snapshot
//!
//! Only paragraphs that are direct children of the document body are
//! exposed for rewriting; tables, headers, footers and footnotes pass
//! through the container byte-for-byte.

pub mod color;
pub mod document;
pub mod error;
pub mod package;
pub mod paragraph;
pub mod run;
pub mod xml;

pub use color::{HighlightColor, RgbColor};
pub use document::Document;
pub use error::{DocxError, Result};
pub use package::Package;
pub use paragraph::Paragraph;
pub use run::RunFormat;
