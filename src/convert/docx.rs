//! Word document converter implementation.

use std::io::Write;
use std::path::Path;

use crate::detect::{detect_format_from_bytes, detect_format_from_path, DocFormat};
use crate::error::{Error, Result};
use crate::model::Document;
use crate::parser::{convert_legacy_doc, DocxParser, ParseOptions};
use crate::render::{render_json, AssetInstruction, JsonFormat, MarkdownRenderer};

use super::{ConvertOptions, ConvertResult, ConvertedAsset, DocumentConverter, OutputFormat};

/// Word document converter.
///
/// Converts DOCX packages to Markdown or JSON. Legacy `.doc` files are
/// pre-converted to DOCX through the office suite first.
#[derive(Debug, Clone, Default)]
pub struct DocxConverter {
    _private: (),
}

impl DocxConverter {
    /// Create a new Word converter.
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Read a file into the document model, pre-converting legacy input.
    pub fn load(&self, path: &Path, options: &ParseOptions) -> Result<Document> {
        if !path.exists() {
            return Err(Error::NotFound(path.to_path_buf()));
        }
        let parser = match detect_format_from_path(path)? {
            DocFormat::Docx => DocxParser::open_with_options(path, options.clone())?,
            DocFormat::LegacyDoc => {
                let bytes = convert_legacy_doc(path, options.soffice_path.as_deref())?;
                DocxParser::from_bytes_with_options(&bytes, options.clone())?
            }
        };
        parser.parse()
    }

    /// Read in-memory bytes into the document model.
    pub fn load_bytes(&self, bytes: &[u8], options: &ParseOptions) -> Result<Document> {
        let parser = match detect_format_from_bytes(bytes)? {
            DocFormat::Docx => DocxParser::from_bytes_with_options(bytes, options.clone())?,
            DocFormat::LegacyDoc => {
                let mut scratch = tempfile::Builder::new()
                    .prefix("docmd-")
                    .suffix(".doc")
                    .tempfile()?;
                scratch.write_all(bytes)?;
                scratch.flush()?;
                let converted = convert_legacy_doc(scratch.path(), options.soffice_path.as_deref())?;
                DocxParser::from_bytes_with_options(&converted, options.clone())?
            }
        };
        parser.parse()
    }

    fn convert_document(&self, doc: &Document, options: &ConvertOptions) -> Result<ConvertResult> {
        let (render_result, mime_type) = match options.output_format {
            OutputFormat::Markdown => (
                MarkdownRenderer::new(options.render.clone()).render(doc)?,
                "text/markdown",
            ),
            OutputFormat::Json => (
                render_json(doc, &options.render, JsonFormat::Pretty)?,
                "application/json",
            ),
        };

        let assets = if options.write_assets {
            collect_assets(doc, &render_result.assets)
        } else {
            Vec::new()
        };

        let mut result = ConvertResult::new(render_result.content, render_result.metadata)
            .with_mime_type(mime_type);
        if options.render.collect_stats {
            result = result.with_stats(render_result.stats);
        }
        result.warnings = render_result.warnings;
        result.assets = assets;
        Ok(result)
    }
}

/// Pair every write instruction with the image bytes it names.
fn collect_assets(doc: &Document, instructions: &[AssetInstruction]) -> Vec<ConvertedAsset> {
    instructions
        .iter()
        .filter_map(|instruction| {
            let resource = doc.get_resource(&instruction.relationship_id)?;
            Some(ConvertedAsset {
                file_name: instruction.file_name.clone(),
                mime_type: resource.mime_type.clone(),
                data: resource.data.clone(),
            })
        })
        .collect()
}

impl DocumentConverter for DocxConverter {
    fn supported_extensions(&self) -> &[&str] {
        &["docx", "doc"]
    }

    fn name(&self) -> &str {
        "docx"
    }

    fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
        let doc = self.load(path, &options.parse)?;
        let result = self.convert_document(&doc, options)?;
        log::info!(
            "Converted {} ({} bytes, {} images, {} warnings)",
            path.display(),
            result.content_len(),
            result.assets.len(),
            result.warnings.len()
        );
        Ok(result)
    }

    fn convert_bytes(&self, bytes: &[u8], options: &ConvertOptions) -> Result<ConvertResult> {
        let doc = self.load_bytes(bytes, &options.parse)?;
        self.convert_document(&doc, options)
    }
}
