//! Document converter module: format dispatch, output layout and batch conversion.
//!
//! Converters are registered by file extension and return the converted text
//! together with the image bytes the text refers to. [`OutputLayout`] decides
//! where those land on disk and writes them all-or-nothing.
//!
//! # Example
//!
//! ```no_run
//! use docmd::convert::{ConverterRegistry, ConvertOptions, OutputLayout};
//! use std::path::Path;
//!
//! fn main() -> docmd::Result<()> {
//!     let registry = ConverterRegistry::with_defaults();
//!     let input = Path::new("report.docx");
//!     let result = registry.convert(input, &ConvertOptions::default())?;
//!
//!     let layout = OutputLayout::resolve(input, None);
//!     layout.write(&result)?;
//!     Ok(())
//! }
//! ```

mod batch;
mod docx;
mod output;

pub use batch::{convert_batch, BatchJob, BatchOutcome};
pub use docx::DocxConverter;
pub use output::OutputLayout;

use crate::detect::detect_format_from_path;
use crate::error::{Error, Result};
use crate::model::Metadata;
use crate::parser::ParseOptions;
use crate::render::{ExtractionStats, RenderOptions, Warning};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Options for document conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Rendering options
    pub render: RenderOptions,

    /// Parsing options
    pub parse: ParseOptions,

    /// Output format
    pub output_format: OutputFormat,

    /// Write extracted images next to the output file
    pub write_assets: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            render: RenderOptions::default(),
            parse: ParseOptions::default(),
            output_format: OutputFormat::default(),
            write_assets: true,
        }
    }
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Set parsing options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Enable statistics collection.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.render.collect_stats = collect;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Enable or disable writing image assets.
    pub fn with_assets(mut self, write: bool) -> Self {
        self.write_assets = write;
        self
    }
}

/// Output format for conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Markdown format
    #[default]
    Markdown,

    /// JSON structure of the assembled blocks
    Json,
}

impl OutputFormat {
    /// File extension of the main output file.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Json => "json",
        }
    }
}

/// An image ready to be written into the asset folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedAsset {
    /// File name inside the asset folder (e.g. "image_001.png")
    pub file_name: String,

    /// MIME type of the image
    pub mime_type: String,

    /// Raw image bytes
    pub data: Vec<u8>,
}

/// Result of document conversion.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Converted content
    pub content: String,

    /// Source document metadata
    pub metadata: Metadata,

    /// Extraction statistics (if collected)
    pub stats: Option<ExtractionStats>,

    /// MIME type of the output
    pub mime_type: &'static str,

    /// Non-fatal problems met while converting
    pub warnings: Vec<Warning>,

    /// Images the content refers to
    pub assets: Vec<ConvertedAsset>,
}

impl ConvertResult {
    /// Create a new conversion result.
    pub fn new(content: String, metadata: Metadata) -> Self {
        Self {
            content,
            metadata,
            stats: None,
            mime_type: "text/markdown",
            warnings: Vec::new(),
            assets: Vec::new(),
        }
    }

    /// Set extraction statistics.
    pub fn with_stats(mut self, stats: ExtractionStats) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Set MIME type.
    pub fn with_mime_type(mut self, mime_type: &'static str) -> Self {
        self.mime_type = mime_type;
        self
    }

    /// Get content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }

    /// Whether any image has to be written.
    pub fn has_assets(&self) -> bool {
        !self.assets.is_empty()
    }
}

/// A converter from one family of input formats to Markdown or JSON.
pub trait DocumentConverter: Send + Sync {
    /// Lowercase extensions without the leading dot, e.g. `["docx", "doc"]`.
    fn supported_extensions(&self) -> &[&str];

    /// Name the converter is registered under.
    fn name(&self) -> &str;

    /// Convert a file.
    fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult>;

    /// Convert an in-memory document.
    fn convert_bytes(&self, bytes: &[u8], options: &ConvertOptions) -> Result<ConvertResult>;

    /// Whether `ext` is one of [`supported_extensions`](Self::supported_extensions), ignoring case.
    fn supports_extension(&self, ext: &str) -> bool {
        self.supported_extensions()
            .iter()
            .any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// Converters keyed by extension and by name.
///
/// Files without an extension are routed by their leading bytes, so a Word
/// package saved as `report` still reaches the Word converter.
pub struct ConverterRegistry {
    by_extension: HashMap<String, Arc<dyn DocumentConverter>>,
    by_name: HashMap<String, Arc<dyn DocumentConverter>>,
}

impl ConverterRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            by_extension: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Registry with the Word converter (`.docx`, `.doc`).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(DocxConverter::new()));
        registry
    }

    /// Register a converter for every extension it lists. Later registrations win.
    pub fn register(&mut self, converter: Arc<dyn DocumentConverter>) {
        for ext in converter.supported_extensions() {
            let previous = self
                .by_extension
                .insert(ext.to_ascii_lowercase(), Arc::clone(&converter));
            if let Some(previous) = previous {
                log::debug!(
                    "Converter {} replaces {} for .{}",
                    converter.name(),
                    previous.name(),
                    ext
                );
            }
        }
        self.by_name
            .insert(converter.name().to_ascii_lowercase(), converter);
    }

    /// Converter registered for an extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.by_extension.get(&ext.to_ascii_lowercase()).cloned()
    }

    /// Converter registered under a name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.by_name.get(&name.to_ascii_lowercase()).cloned()
    }

    /// Whether some converter handles the extension.
    pub fn supports(&self, ext: &str) -> bool {
        self.by_extension.contains_key(&ext.to_ascii_lowercase())
    }

    /// Registered extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.by_extension.keys().map(String::as_str).collect();
        extensions.sort_unstable();
        extensions
    }

    /// Pick the converter for a path: by extension, or by content when it has none.
    pub fn resolve(&self, path: &Path) -> Result<Arc<dyn DocumentConverter>> {
        let ext = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => ext.to_string(),
            None => detect_format_from_path(path)
                .map(|format| format.extension().to_string())
                .map_err(|_| {
                    Error::UnsupportedFormat(format!(
                        "{} has no extension and unrecognised content",
                        path.display()
                    ))
                })?,
        };
        self.get_by_extension(&ext)
            .ok_or_else(|| Error::UnsupportedFormat(format!("no converter for .{}", ext)))
    }

    /// Convert a file with the converter [`resolve`](Self::resolve) picks.
    pub fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
        self.resolve(path)?.convert(path, options)
    }

    /// Convert bytes with the converter registered for `ext`.
    pub fn convert_bytes(
        &self,
        bytes: &[u8],
        ext: &str,
        options: &ConvertOptions,
    ) -> Result<ConvertResult> {
        let converter = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedFormat(format!("no converter for .{}", ext)))?;
        converter.convert_bytes(bytes, options)
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ErrorMode;

    #[test]
    fn test_convert_options_builder() {
        let options = ConvertOptions::new()
            .with_stats(true)
            .with_format(OutputFormat::Json)
            .with_assets(false)
            .with_parse_options(ParseOptions::new().lenient());

        assert!(options.render.collect_stats);
        assert_eq!(options.output_format, OutputFormat::Json);
        assert!(!options.write_assets);
        assert_eq!(options.parse.error_mode, ErrorMode::Lenient);
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = ConverterRegistry::with_defaults();
        assert!(registry.supports("docx"));
        assert!(registry.supports("DOCX"));
        assert!(registry.supports("doc"));
        assert!(!registry.supports("pdf"));
    }

    #[test]
    fn test_registry_get_by_extension() {
        let registry = ConverterRegistry::with_defaults();
        let converter = registry.get_by_extension("doc");
        assert!(converter.is_some());
        assert_eq!(converter.unwrap().name(), "docx");
    }

    #[test]
    fn test_registry_get_by_name() {
        let registry = ConverterRegistry::with_defaults();
        assert!(registry.get_by_name("DOCX").is_some());
        assert!(registry.get_by_name("pdf").is_none());
    }

    #[test]
    fn test_registry_rejects_unknown_extension() {
        let registry = ConverterRegistry::with_defaults();
        let err = registry
            .convert(Path::new("notes.txt"), &ConvertOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_registry_sniffs_extensionless_files() {
        let dir = tempfile::tempdir().unwrap();
        let package = dir.path().join("report");
        std::fs::write(&package, b"PK\x03\x04rest").unwrap();
        assert_eq!(registry_name(&package), Some("docx".to_string()));

        let text = dir.path().join("README");
        std::fs::write(&text, b"plain text").unwrap();
        assert_eq!(registry_name(&text), None);
    }

    fn registry_name(path: &Path) -> Option<String> {
        ConverterRegistry::with_defaults()
            .resolve(path)
            .ok()
            .map(|c| c.name().to_string())
    }

    #[test]
    fn test_supported_extensions_sorted() {
        let registry = ConverterRegistry::with_defaults();
        assert_eq!(registry.supported_extensions(), vec!["doc", "docx"]);
    }
}
