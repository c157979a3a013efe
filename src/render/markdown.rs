//! Markdown rendering for Word documents.

use crate::error::Result;
use crate::model::{Block, Document};

use super::assembler::{Assembly, DocumentAssembler};
use super::cleanup::{normalize_heading_blocks, CleanupPipeline};
use super::image::image_markdown;
use super::inline::{escape_markdown, RunFormatter};
use super::list::ListEntry;
use super::table::TableSerializer;
use super::{RenderOptions, RenderResult};

/// Convert a document to Markdown.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    Ok(renderer.render(doc)?.content)
}

/// Convert a document to Markdown with statistics.
pub fn to_markdown_with_stats(doc: &Document, options: &RenderOptions) -> Result<RenderResult> {
    let options = options.clone().with_stats(true);
    MarkdownRenderer::new(options).render(doc)
}

/// Markdown renderer.
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Options in use.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Assemble and render a document.
    pub fn render(&self, doc: &Document) -> Result<RenderResult> {
        let assembly = DocumentAssembler::new(&self.options).assemble(doc);
        self.render_assembly(doc, assembly)
    }

    /// Render a finished assembly. `doc` supplies the frontmatter metadata.
    pub fn render_assembly(&self, doc: &Document, mut assembly: Assembly) -> Result<RenderResult> {
        if self.options.normalize_headings {
            normalize_heading_blocks(&mut assembly.blocks);
        }

        let mut output = String::new();
        if self.options.include_frontmatter && !doc.metadata.is_empty() {
            output.push_str(&doc.metadata.to_yaml_frontmatter());
            output.push('\n');
        }
        output.push_str(&self.render_blocks(&assembly.blocks));

        let pipeline = CleanupPipeline::for_render(&self.options);
        let content = pipeline.process(&output);

        log::debug!(
            "Rendered {} blocks into {} bytes",
            assembly.blocks.len(),
            content.len()
        );

        Ok(RenderResult {
            content,
            metadata: doc.metadata.clone(),
            stats: assembly.stats,
            warnings: assembly.warnings,
            assets: assembly.assets,
        })
    }

    /// Render blocks without output normalization.
    ///
    /// Consecutive list items are separated by a single newline, every other
    /// pair of blocks by one blank line.
    pub fn render_blocks(&self, blocks: &[Block]) -> String {
        let mut output = String::new();
        let mut previous: Option<&Block> = None;

        for block in blocks {
            if let Some(prev) = previous {
                if prev.is_list_item() && block.is_list_item() {
                    output.push('\n');
                } else {
                    output.push_str("\n\n");
                }
            }
            output.push_str(&self.render_block(block));
            previous = Some(block);
        }

        output
    }

    /// Render one block.
    pub fn render_block(&self, block: &Block) -> String {
        let formatter = RunFormatter::new(self.options.escape_special_chars);
        match block {
            Block::Heading { level, text } => {
                format!("{} {}", "#".repeat(*level as usize), self.escape(text))
            }
            Block::Paragraph { spans } => formatter.render(spans),
            Block::ListItem {
                ordered,
                level,
                index,
                spans,
            } => {
                let entry = ListEntry {
                    ordered: *ordered,
                    level: *level,
                    index: *index,
                };
                format!(
                    "{}{}",
                    entry.prefix(self.options.list_indent, self.options.list_marker),
                    formatter.render(spans)
                )
            }
            Block::Table { rows } => TableSerializer::new().render(rows),
            Block::Image(image) => image_markdown(image, &self.options.image_alt),
        }
    }

    fn escape(&self, text: &str) -> String {
        if self.options.escape_special_chars {
            escape_markdown(text)
        } else {
            text.to_string()
        }
    }
}
