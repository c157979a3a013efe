//! Word document format detection.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Container format of a Word document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocFormat {
    /// Office Open XML package (.docx)
    Docx,
    /// Legacy binary Word document (.doc, OLE2 compound file)
    LegacyDoc,
}

impl DocFormat {
    /// Conventional file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            DocFormat::Docx => "docx",
            DocFormat::LegacyDoc => "doc",
        }
    }

    /// Guess the format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "docx" => Some(DocFormat::Docx),
            "doc" => Some(DocFormat::LegacyDoc),
            _ => None,
        }
    }
}

impl std::fmt::Display for DocFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocFormat::Docx => write!(f, "DOCX"),
            DocFormat::LegacyDoc => write!(f, "DOC (legacy)"),
        }
    }
}

/// ZIP local file header: PK\x03\x04
const ZIP_MAGIC: &[u8] = &[0x50, 0x4B, 0x03, 0x04];
/// OLE2 compound document header
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Detect the document format from a file path.
///
/// # Example
/// ```no_run
/// use docmd::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("report.docx").unwrap();
/// println!("Format: {}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<DocFormat> {
    let mut file = File::open(path)?;
    let mut header = [0u8; 8];
    let read = file.read(&mut header)?;
    detect_format_from_bytes(&header[..read])
}

/// Detect the document format from the leading bytes of a file.
///
/// A ZIP header is reported as [`DocFormat::Docx`]; whether the package
/// really is a Word document is checked when it is parsed.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<DocFormat> {
    if data.starts_with(ZIP_MAGIC) {
        return Ok(DocFormat::Docx);
    }
    if data.starts_with(OLE_MAGIC) {
        return Ok(DocFormat::LegacyDoc);
    }
    Err(Error::UnknownFormat)
}

/// Check whether a path has a Word document extension (.docx or .doc).
pub fn has_word_extension<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .and_then(DocFormat::from_extension)
        .is_some()
}

/// Check if a file is a Word document by content.
pub fn is_word_document<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}
