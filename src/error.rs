//! Crate-level error type wrapping the per-layer errors.

use thiserror::Error;

/// Result type for whole-pipeline operations.
pub type Result<T> = std::result::Result<T, HighlightError>;

/// Errors from the end-to-end highlight pipeline.
#[derive(Error, Debug)]
pub enum HighlightError {
    /// Container or XML error
    #[error(transparent)]
    Docx(#[from] crate::docx::DocxError),

    /// Search-term configuration error
    #[error(transparent)]
    Sequence(#[from] crate::sequences::SequenceError),
}
