//! Integration tests for the converter module.

mod common;

use std::path::Path;
use std::sync::Arc;

use common::DocxBuilder;
use docmd::convert::{
    ConvertOptions, ConvertResult, ConverterRegistry, DocumentConverter, DocxConverter,
    OutputFormat,
};
use docmd::error::{Error, Result};

/// Mock converter for testing.
struct MockConverter {
    extensions: Vec<&'static str>,
    name: &'static str,
}

impl MockConverter {
    fn new(extensions: Vec<&'static str>, name: &'static str) -> Self {
        Self { extensions, name }
    }
}

impl DocumentConverter for MockConverter {
    fn supported_extensions(&self) -> &[&str] {
        &self.extensions
    }

    fn name(&self) -> &str {
        self.name
    }

    fn convert(&self, _path: &Path, _options: &ConvertOptions) -> Result<ConvertResult> {
        Ok(ConvertResult::new(
            format!("Converted by {}", self.name),
            Default::default(),
        ))
    }

    fn convert_bytes(&self, _bytes: &[u8], _options: &ConvertOptions) -> Result<ConvertResult> {
        Ok(ConvertResult::new(
            format!("Converted bytes by {}", self.name),
            Default::default(),
        ))
    }
}

#[test]
fn test_convert_options_builder() {
    let options = ConvertOptions::new()
        .with_stats(true)
        .with_assets(false)
        .with_format(OutputFormat::Json);

    assert!(options.render.collect_stats);
    assert!(!options.write_assets);
    assert_eq!(options.output_format, OutputFormat::Json);
}

#[test]
fn test_converter_registry_new() {
    let registry = ConverterRegistry::new();

    assert!(!registry.supports("docx"));
    assert!(!registry.supports("doc"));
}

#[test]
fn test_converter_registry_with_defaults() {
    let registry = ConverterRegistry::with_defaults();

    assert!(registry.supports("docx"));
    assert!(registry.supports("DOC"));
    assert!(!registry.supports("pdf"));
}

#[test]
fn test_converter_registry_register() {
    let mut registry = ConverterRegistry::new();
    registry.register(Arc::new(MockConverter::new(vec!["rtf", "odt"], "office")));

    assert!(registry.supports("rtf"));
    assert!(registry.supports("ODT"));
    assert_eq!(registry.get_by_name("OFFICE").unwrap().name(), "office");
}

#[test]
fn test_converter_registry_get_by_extension() {
    let registry = ConverterRegistry::with_defaults();

    assert_eq!(registry.get_by_extension("docx").unwrap().name(), "docx");
    assert_eq!(registry.get_by_extension("doc").unwrap().name(), "docx");
    assert!(registry.get_by_extension("txt").is_none());
}

#[test]
fn test_supported_extensions() {
    let registry = ConverterRegistry::with_defaults();
    let extensions = registry.supported_extensions();

    assert!(extensions.contains(&"docx"));
    assert!(extensions.contains(&"doc"));
}

#[test]
fn test_docx_converter_identity() {
    let converter = DocxConverter::new();

    assert_eq!(converter.name(), "docx");
    assert!(converter.supports_extension("DOCX"));
    assert!(!converter.supports_extension("pdf"));
}

#[test]
fn test_registry_converts_bytes() {
    let registry = ConverterRegistry::with_defaults();
    let bytes = DocxBuilder::new()
        .paragraph(Some("Heading1"), "Report")
        .paragraph(None, "Body")
        .build();

    let result = registry
        .convert_bytes(&bytes, "docx", &ConvertOptions::default())
        .unwrap();
    assert_eq!(result.content, "# Report\n\nBody\n");
    assert_eq!(result.mime_type, "text/markdown");
    assert!(result.stats.is_none());
}

#[test]
fn test_json_output_format() {
    let bytes = DocxBuilder::new()
        .paragraph(Some("Heading2"), "Scope")
        .build();
    let options = ConvertOptions::new().with_format(OutputFormat::Json);

    let result = DocxConverter::new().convert_bytes(&bytes, &options).unwrap();
    assert_eq!(result.mime_type, "application/json");

    let value: serde_json::Value = serde_json::from_str(&result.content).unwrap();
    assert_eq!(value["blocks"][0]["type"], "heading");
    assert_eq!(value["blocks"][0]["level"], 2);
    assert_eq!(value["blocks"][0]["text"], "Scope");
}

#[test]
fn test_stats_collected_on_request() {
    let bytes = DocxBuilder::new()
        .paragraph(Some("Heading1"), "One")
        .paragraph(None, "two words")
        .build();
    let options = ConvertOptions::new().with_stats(true);

    let result = DocxConverter::new().convert_bytes(&bytes, &options).unwrap();
    let stats = result.stats.unwrap();
    assert_eq!(stats.heading_count, 1);
    assert_eq!(stats.paragraph_count, 1);
}

#[test]
fn test_mock_converter() {
    let converter = MockConverter::new(vec!["mock"], "mock-converter");

    let result = converter
        .convert(Path::new("test.mock"), &ConvertOptions::default())
        .unwrap();
    assert!(result.content.contains("mock-converter"));
}

#[test]
fn test_registry_convert_no_extension_error() {
    let registry = ConverterRegistry::with_defaults();

    let result = registry.convert(Path::new("noextension"), &ConvertOptions::default());
    assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
}

#[test]
fn test_registry_convert_unsupported_extension_error() {
    let registry = ConverterRegistry::with_defaults();

    let result = registry.convert(Path::new("test.xyz"), &ConvertOptions::default());
    assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
}

#[test]
fn test_registry_convert_bytes_not_a_package() {
    let registry = ConverterRegistry::with_defaults();

    let result = registry.convert_bytes(b"plain text", "docx", &ConvertOptions::default());
    assert!(result.is_err());
}

#[test]
fn test_output_format_default() {
    assert_eq!(OutputFormat::default(), OutputFormat::Markdown);
    assert_eq!(OutputFormat::Json.extension(), "json");
}
