//! # docmd
//!
//! Word document to Markdown conversion library for Rust.
//!
//! This library reads `.docx` packages (and legacy `.doc` files through an
//! office suite) and converts them to Markdown with extracted images, or to a
//! JSON dump of the converted block structure.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docmd::{parse_file, render};
//!
//! fn main() -> docmd::Result<()> {
//!     // Parse a Word file
//!     let doc = parse_file("report.docx")?;
//!
//!     // Convert to Markdown
//!     let options = render::RenderOptions::default();
//!     let markdown = render::to_markdown(&doc, &options)?;
//!     println!("{}", markdown);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Headings**: style names first, font-size hierarchy second, title shift
//! - **Inline formatting**: bold, italic, underline and hyperlinks with minimal markup
//! - **Lists**: numbering definitions and textual markers, with restart tracking
//! - **Tables**: pipe tables, irregular grids normalized with a warning
//! - **Images**: written to `assets/` as `image_NNN.<ext>`
//! - **Batch conversion**: independent documents converted in parallel with Rayon

pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use convert::{
    convert_batch, BatchJob, BatchOutcome, ConvertOptions, ConvertResult, ConvertedAsset,
    ConverterRegistry, DocumentConverter, DocxConverter, OutputFormat, OutputLayout,
};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_word_document, DocFormat};
pub use error::{Error, ErrorKind, Result};
pub use model::{
    Block, BodyElement, Document, FormatSet, ImageRef, InlineSpan, ListInfo, ListKind, Metadata,
    Paragraph, Resource, Table, TableCell, TableRow, TextRun, TextStyle,
};
pub use parser::{DocxParser, ErrorMode, ParseOptions};
pub use render::{
    DocumentAssembler, ExtractionStats, HeadingResolver, ImageReferenceResolver, JsonFormat,
    ListTracker, MarkdownRenderer, RenderOptions, RenderResult, RunFormatter, StyleContext,
    TableSerializer, Warning,
};

use std::path::Path;

/// Parse a Word file and return a structured document.
///
/// Legacy `.doc` files are pre-converted through the office suite.
///
/// # Example
///
/// ```no_run
/// use docmd::parse_file;
///
/// let doc = parse_file("report.docx").unwrap();
/// println!("Paragraphs: {}", doc.paragraphs().count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    parse_file_with_options(path, ParseOptions::default())
}

/// Parse a Word file with custom options.
///
/// # Example
///
/// ```no_run
/// use docmd::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new()
///     .lenient()
///     .text_only();
/// let doc = parse_file_with_options("report.docx", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    DocxConverter::new().load(path.as_ref(), &options)
}

/// Parse a Word document from bytes.
///
/// # Example
///
/// ```no_run
/// use docmd::parse_bytes;
///
/// let data = std::fs::read("report.docx").unwrap();
/// let doc = parse_bytes(&data).unwrap();
/// ```
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    parse_bytes_with_options(data, ParseOptions::default())
}

/// Parse a Word document from bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Document> {
    DocxConverter::new().load_bytes(data, &options)
}

/// Convert a Word file to Markdown text.
///
/// Images are referenced but not written; use [`convert_file`] to write
/// the Markdown file together with its asset folder.
///
/// # Example
///
/// ```no_run
/// use docmd::to_markdown;
///
/// let markdown = to_markdown("report.docx").unwrap();
/// print!("{}", markdown);
/// ```
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    to_markdown_with_options(path, &RenderOptions::default())
}

/// Convert a Word file to Markdown with custom options.
///
/// # Example
///
/// ```no_run
/// use docmd::{to_markdown_with_options, RenderOptions};
///
/// let options = RenderOptions::new()
///     .with_frontmatter(true)
///     .with_heading_normalization(true);
/// let markdown = to_markdown_with_options("report.docx", &options).unwrap();
/// ```
pub fn to_markdown_with_options<P: AsRef<Path>>(
    path: P,
    options: &RenderOptions,
) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_markdown(&doc, options)
}

/// Convert a Word file to JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_json(&doc, &RenderOptions::default(), format)
}

/// Convert a Word file and write the result.
///
/// `output` follows [`OutputLayout::resolve`]: `None` writes
/// `<stem>/<stem>.md`, a directory writes `<dir>/<stem>/<stem>.md`, any
/// other path is the Markdown file itself. Images go to `assets/` next to it.
///
/// # Example
///
/// ```no_run
/// use docmd::{convert_file, ConvertOptions};
/// use std::path::Path;
///
/// let written = convert_file(Path::new("report.docx"), Some(Path::new("out/")), &ConvertOptions::default())?;
/// println!("{}", written.output_file.display());
/// # Ok::<(), docmd::Error>(())
/// ```
pub fn convert_file(
    input: &Path,
    output: Option<&Path>,
    options: &ConvertOptions,
) -> Result<OutputLayout> {
    let result = DocxConverter::new().convert(input, options)?;
    let layout = OutputLayout::resolve_for(input, output, options.output_format)
        .with_asset_dir_name(&options.render.asset_dir_name);
    layout.write(&result)?;
    Ok(layout)
}

/// Builder for parsing and converting Word documents.
///
/// # Example
///
/// ```no_run
/// use docmd::Docmd;
///
/// let markdown = Docmd::new()
///     .with_frontmatter()
///     .normalize_headings()
///     .lenient()
///     .parse("report.docx")?
///     .to_markdown()?;
/// # Ok::<(), docmd::Error>(())
/// ```
pub struct Docmd {
    parse_options: ParseOptions,
    render_options: RenderOptions,
}

impl Docmd {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Enable lenient parsing mode.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Skip image extraction.
    pub fn text_only(mut self) -> Self {
        self.parse_options = self.parse_options.text_only();
        self
    }

    /// Enable or disable image extraction.
    pub fn with_images(mut self, extract: bool) -> Self {
        self.parse_options = self.parse_options.with_images(extract);
        self
    }

    /// Set the office suite binary for legacy `.doc` input.
    pub fn with_soffice(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.parse_options = self.parse_options.with_soffice_path(path);
        self
    }

    /// Set the asset folder name.
    pub fn with_asset_dir(mut self, name: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_asset_dir(name);
        self
    }

    /// Enable frontmatter in output.
    pub fn with_frontmatter(mut self) -> Self {
        self.render_options = self.render_options.with_frontmatter(true);
        self
    }

    /// Smooth heading level jumps and strip trailing heading punctuation.
    pub fn normalize_headings(mut self) -> Self {
        self.render_options = self.render_options.with_heading_normalization(true);
        self
    }

    /// Parse a Word file and return a result wrapper.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<DocmdResult> {
        let document = parse_file_with_options(path, self.parse_options)?;
        Ok(DocmdResult {
            document,
            render_options: self.render_options,
        })
    }

    /// Parse a Word document from bytes.
    pub fn parse_bytes(self, data: &[u8]) -> Result<DocmdResult> {
        let document = parse_bytes_with_options(data, self.parse_options)?;
        Ok(DocmdResult {
            document,
            render_options: self.render_options,
        })
    }
}

impl Default for Docmd {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing a Word document.
pub struct DocmdResult {
    /// The parsed document
    pub document: Document,
    /// Render options to use
    render_options: RenderOptions,
}

impl DocmdResult {
    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.document, &self.render_options)
    }

    /// Convert to Markdown, keeping warnings, assets and statistics.
    pub fn render(&self) -> Result<RenderResult> {
        render::to_markdown_with_stats(&self.document, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, &self.render_options, format)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docmd_builder() {
        let docmd = Docmd::new().lenient().with_frontmatter().normalize_headings();

        assert!(matches!(docmd.parse_options.error_mode, ErrorMode::Lenient));
        assert!(docmd.render_options.include_frontmatter);
        assert!(docmd.render_options.normalize_headings);
    }

    #[test]
    fn test_docmd_builder_default() {
        let builder = Docmd::default();
        assert!(!builder.render_options.include_frontmatter);
        assert!(builder.parse_options.extract_images);
    }

    #[test]
    fn test_docmd_builder_text_only() {
        let builder = Docmd::new().text_only().with_asset_dir("media");
        assert!(!builder.parse_options.extract_images);
        assert_eq!(builder.render_options.asset_dir_name, "media");
    }

    // ==================== Edge Case Tests ====================

    #[test]
    fn test_parse_bytes_empty_data() {
        let result = parse_bytes(&[]);
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_parse_bytes_truncated_zip() {
        let data = b"PK\x03\x04garbage";
        let err = parse_bytes(data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseBoundary);
    }

    #[test]
    fn test_parse_bytes_unknown_magic() {
        let data = b"<!DOCTYPE html><html></html>";
        assert!(parse_bytes(data).is_err());
    }

    #[test]
    fn test_parse_missing_file() {
        let err = parse_file("definitely/not/here.docx").unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn test_builder_parse_invalid_bytes() {
        let result = Docmd::new().parse_bytes(b"not a word file");
        assert!(result.is_err());
    }
}
