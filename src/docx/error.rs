//! Error types for .docx container and XML operations.

use thiserror::Error;

/// Result type for .docx operations.
pub type Result<T> = std::result::Result<T, DocxError>;

/// Error types for .docx operations.
#[derive(Error, Debug)]
pub enum DocxError {
    /// ZIP archive error
    #[error("ZIP error: {0}")]
    Zip(String),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// Package file not found
    #[error("Package not found: {0}")]
    PackageNotFound(String),

    /// Part not found
    #[error("Part not found: {0}")]
    PartNotFound(String),

    /// Invalid content type
    #[error("Invalid content type: expected {expected}, got {got}")]
    InvalidContentType { expected: String, got: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<quick_xml::Error> for DocxError {
    fn from(err: quick_xml::Error) -> Self {
        DocxError::Xml(err.to_string())
    }
}

impl From<zip::result::ZipError> for DocxError {
    fn from(err: zip::result::ZipError) -> Self {
        DocxError::Zip(err.to_string())
    }
}
