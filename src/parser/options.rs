//! Parsing options and configuration.

use std::path::PathBuf;

/// Options for reading Word documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Whether to read embedded image bytes
    pub extract_images: bool,

    /// Office suite binary used to pre-convert legacy `.doc` files.
    /// When unset, `DOCMD_SOFFICE_PATH`, `SOFFICE_PATH` and `PATH` are searched.
    pub soffice_path: Option<PathBuf>,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip unreadable styles, numbering or media parts).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable or disable image extraction.
    pub fn with_images(mut self, extract: bool) -> Self {
        self.extract_images = extract;
        self
    }

    /// Extract text only.
    pub fn text_only(mut self) -> Self {
        self.extract_images = false;
        self
    }

    /// Set the office suite binary for legacy conversion.
    pub fn with_soffice_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.soffice_path = Some(path.into());
        self
    }

    pub(crate) fn is_lenient(&self) -> bool {
        self.error_mode == ErrorMode::Lenient
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            extract_images: true,
            soffice_path: None,
        }
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    #[default]
    Strict,
    /// Skip invalid sub-parts and continue
    Lenient,
}
