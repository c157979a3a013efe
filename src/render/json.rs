//! JSON rendering of the assembled block sequence.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{Block, Document, Metadata};

use super::assembler::DocumentAssembler;
use super::cleanup::normalize_heading_blocks;
use super::result::{AssetInstruction, Warning};
use super::{RenderOptions, RenderResult};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    metadata: &'a Metadata,
    blocks: &'a [Block],
    assets: &'a [AssetInstruction],
    warnings: &'a [Warning],
}

/// Convert a document to JSON.
pub fn to_json(doc: &Document, options: &RenderOptions, format: JsonFormat) -> Result<String> {
    Ok(render_json(doc, options, format)?.content)
}

/// Convert a document to JSON, keeping warnings, assets and statistics.
pub fn render_json(
    doc: &Document,
    options: &RenderOptions,
    format: JsonFormat,
) -> Result<RenderResult> {
    let mut assembly = DocumentAssembler::new(options).assemble(doc);
    if options.normalize_headings {
        normalize_heading_blocks(&mut assembly.blocks);
    }

    let view = JsonDocument {
        metadata: &doc.metadata,
        blocks: &assembly.blocks,
        assets: &assembly.assets,
        warnings: &assembly.warnings,
    };
    let content = serialize(&view, format)?;

    Ok(RenderResult {
        content,
        metadata: doc.metadata.clone(),
        stats: assembly.stats,
        warnings: assembly.warnings,
        assets: assembly.assets,
    })
}

/// Serialize a block sequence alone.
pub fn blocks_to_json(blocks: &[Block], format: JsonFormat) -> Result<String> {
    serialize(&blocks, format)
}

fn serialize<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
