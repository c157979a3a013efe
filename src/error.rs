//! Error types for docmd library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for docmd operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading or converting a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input file does not exist.
    #[error("Input file does not exist: {}", .0.display())]
    NotFound(PathBuf),

    /// The file format is not recognized as a Word document.
    #[error("Unknown file format: not a Word document")]
    UnknownFormat,

    /// The file is a recognized container but not one we can convert.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Pre-converting a legacy .doc file through the office suite failed.
    #[error("Legacy .doc conversion failed: {0}")]
    LegacyConversion(String),

    /// The DOCX package is structurally invalid.
    #[error("Invalid DOCX: {0}")]
    InvalidDocx(String),

    /// Error reading the ZIP container.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Error parsing one of the XML parts.
    #[error("XML error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// Error during rendering (Markdown, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

/// Coarse classification of an [`Error`], used for per-file reporting in batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// File missing, unreadable, unrecognized, or legacy pre-conversion failed.
    Input,
    /// The container could not be turned into a document model.
    ParseBoundary,
    /// Rendering or writing the output failed.
    Output,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound(_)
            | Error::UnknownFormat
            | Error::UnsupportedFormat(_)
            | Error::LegacyConversion(_) => ErrorKind::Input,
            Error::InvalidDocx(_) | Error::Zip(_) | Error::Xml(_) => ErrorKind::ParseBoundary,
            Error::Io(e) if e.kind() == io::ErrorKind::NotFound => ErrorKind::Input,
            Error::Io(_) | Error::Render(_) | Error::Other(_) => ErrorKind::Output,
        }
    }

    /// Whether this error means the input itself could not be used.
    pub fn is_input_error(&self) -> bool {
        self.kind() == ErrorKind::Input
    }
}
