//! Search-term configuration: the built-in sequence table and its
//! file-backed needle lookup.
//!
//! The tool ships a small table of known sequence labels, each paired with
//! a highlight color and a file stem. The actual search text lives in
//! `<sequences-dir>/<stem>.txt`; free-form terms bypass the table and
//! default to yellow.

use crate::docx::color::HighlightColor;
use phf::phf_map;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for sequence configuration.
pub type Result<T> = std::result::Result<T, SequenceError>;

/// Configuration errors, all reported before the document is touched.
#[derive(Error, Debug)]
pub enum SequenceError {
    /// The requested label is not in the built-in table
    #[error("Unknown sequence '{0}'")]
    UnknownSequence(String),

    /// The backing definition file for a label is missing
    #[error("Sequence file {0} does not exist; create it and retry")]
    MissingFile(PathBuf),

    /// The resolved search text is empty
    #[error("Empty search text for '{0}'")]
    EmptyNeedle(String),

    /// IO error while reading a sequence file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where the needle text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NeedleSource {
    /// A file stem resolved against the sequences directory
    File(String),
    /// Free-form text carried inline (the "other" menu path)
    Inline(String),
}

/// One resolved menu choice: a needle source plus the highlight color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRule {
    label: String,
    pub source: NeedleSource,
    pub color: HighlightColor,
}

/// Built-in table: label → (file stem, color).
///
/// The stem is configuration data, not derived from the label — for hPGK
/// the shipped data set spells the file `hpGK.txt`, and that spelling is
/// what gets looked up.
static BUILTIN: phf::Map<&'static str, (&'static str, HighlightColor)> = phf_map! {
    "alox15" => ("alox15", HighlightColor::Yellow),
    "AmpR" => ("AmpR", HighlightColor::Green),
    "egfp" => ("egfp", HighlightColor::Magenta),
    "hPGK" => ("hpGK", HighlightColor::Red),
    "MLL_AF6" => ("MLL_AF6", HighlightColor::DarkBlue),
};

/// Built-in labels in menu order (phf maps iterate in arbitrary order).
pub const MENU_LABELS: [&str; 5] = ["alox15", "AmpR", "egfp", "hPGK", "MLL_AF6"];

impl SequenceRule {
    /// Look up a built-in sequence by its label.
    pub fn builtin(label: &str) -> Result<Self> {
        let (stem, color) = BUILTIN
            .get(label)
            .ok_or_else(|| SequenceError::UnknownSequence(label.to_string()))?;
        Ok(Self {
            label: label.to_string(),
            source: NeedleSource::File((*stem).to_string()),
            color: *color,
        })
    }

    /// A free-form term. Defaults to yellow; override `color` afterwards
    /// if the caller picked one.
    pub fn inline(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            label: text.clone(),
            source: NeedleSource::Inline(text),
            color: HighlightColor::Yellow,
        }
    }

    /// The user-facing label, also used in the output file name.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Produce the literal search text.
    ///
    /// File-backed rules read `<sequences_dir>/<stem>.txt` and trim
    /// surrounding whitespace; inline rules return their text trimmed. An
    /// empty result is a configuration error either way.
    pub fn resolve_needle(&self, sequences_dir: &Path) -> Result<String> {
        let needle = match &self.source {
            NeedleSource::File(stem) => {
                let path = sequences_dir.join(format!("{stem}.txt"));
                if !path.exists() {
                    return Err(SequenceError::MissingFile(path));
                }
                std::fs::read_to_string(&path)?.trim().to_string()
            },
            NeedleSource::Inline(text) => text.trim().to_string(),
        };
        if needle.is_empty() {
            return Err(SequenceError::EmptyNeedle(self.label.clone()));
        }
        Ok(needle)
    }
}

/// Derive the output file path from the input path and the term label:
/// `<stem>_output_<label>.<ext>`, next to the input.
pub fn output_path(input: &Path, label: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match input.extension() {
        Some(ext) => format!("{stem}_output_{label}.{}", ext.to_string_lossy()),
        None => format!("{stem}_output_{label}"),
    };
    input.with_file_name(name)
}
