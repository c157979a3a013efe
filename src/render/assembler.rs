//! Single-pass document assembly: source body → output blocks.

use super::heading::{HeadingResolver, StyleContext};
use super::image::{ImageMap, ImageReferenceResolver};
use super::inline::RunFormatter;
use super::list::{detect_list, strip_leading_chars, ListTracker};
use super::options::RenderOptions;
use super::result::{AssetInstruction, ExtractionStats, Warning};
use super::table::TableSerializer;
use crate::model::{Block, BodyElement, Document, InlineSpan, Paragraph, Table};

/// Paragraphs carrying images whose visible text is shorter than this emit only the images.
const IMAGE_ONLY_TEXT_LIMIT: usize = 3;

/// Output of one assembly pass.
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    /// Blocks in source order
    pub blocks: Vec<Block>,
    /// Images the caller must write
    pub assets: Vec<AssetInstruction>,
    /// Non-fatal problems
    pub warnings: Vec<Warning>,
    /// Counters, filled when statistics are enabled
    pub stats: ExtractionStats,
}

/// Accumulates the pass's output. Owned by one [`DocumentAssembler::assemble_with`] call.
struct AssemblyBuilder {
    blocks: Vec<Block>,
    warnings: Vec<Warning>,
    stats: ExtractionStats,
    collect_stats: bool,
    tables_seen: usize,
    list: ListTracker,
}

impl AssemblyBuilder {
    fn push(&mut self, block: Block) {
        if !block.is_list_item() {
            self.list.interrupt();
        }
        if self.collect_stats {
            self.stats.record(&block);
        }
        self.blocks.push(block);
    }
}

/// Walks the document body once and dispatches each element to the
/// heading, list, inline, table and image components.
#[derive(Debug, Clone, Copy)]
pub struct DocumentAssembler<'a> {
    options: &'a RenderOptions,
}

impl<'a> DocumentAssembler<'a> {
    /// Create an assembler.
    pub fn new(options: &'a RenderOptions) -> Self {
        Self { options }
    }

    /// Build the style context and image map, then assemble.
    pub fn assemble(&self, document: &Document) -> Assembly {
        let context = StyleContext::build(document);
        let images = ImageMap::build(document);
        self.assemble_with(document, &context, &images)
    }

    /// Assemble with a precomputed style context and image map.
    pub fn assemble_with(
        &self,
        document: &Document,
        context: &StyleContext,
        images: &ImageMap,
    ) -> Assembly {
        let headings = HeadingResolver::new(context);
        let resolver = ImageReferenceResolver::new(images, &self.options.asset_dir_name);
        let tables = TableSerializer::new();

        let mut builder = AssemblyBuilder {
            blocks: Vec::new(),
            warnings: Vec::new(),
            stats: ExtractionStats::default(),
            collect_stats: self.options.collect_stats,
            tables_seen: 0,
            list: ListTracker::new(),
        };

        for element in &document.body {
            match element {
                BodyElement::Paragraph(paragraph) => {
                    self.paragraph(paragraph, &headings, &resolver, &mut builder)
                }
                BodyElement::Table(table) => self.table(table, &tables, &mut builder),
            }
        }

        Assembly {
            blocks: builder.blocks,
            assets: images.instructions(),
            warnings: builder.warnings,
            stats: builder.stats,
        }
    }

    fn paragraph(
        &self,
        paragraph: &Paragraph,
        headings: &HeadingResolver,
        resolver: &ImageReferenceResolver,
        builder: &mut AssemblyBuilder,
    ) {
        // Empty paragraphs are spacing only; they neither emit nor end a list.
        if paragraph.is_empty() {
            return;
        }

        for rel_id in &paragraph.images {
            let image = resolver.resolve(rel_id, &mut builder.warnings);
            builder.push(Block::Image(image));
        }

        let text = paragraph.plain_text();
        let visible = text.trim().chars().count();
        if visible == 0 || (!paragraph.images.is_empty() && visible < IMAGE_ONLY_TEXT_LIMIT) {
            return;
        }

        let role = headings.classify(paragraph);
        if let Some(level) = headings.emitted_level(role) {
            log::debug!("Heading level {} ({:?}): {}", level, role, text.trim());
            builder.push(Block::Heading {
                level,
                text: heading_text(&text),
            });
            return;
        }

        let mut spans = RunFormatter::spans_from_runs(&paragraph.runs);
        if let Some(detection) = detect_list(paragraph) {
            strip_leading_chars(&mut spans, detection.marker_chars);
            trim_spans(&mut spans);
            let entry = builder.list.next(detection.kind, detection.level);
            builder.push(Block::ListItem {
                ordered: entry.ordered,
                level: entry.level,
                index: entry.index,
                spans,
            });
            return;
        }

        trim_spans(&mut spans);
        builder.push(Block::Paragraph { spans });
    }

    fn table(&self, table: &Table, serializer: &TableSerializer, builder: &mut AssemblyBuilder) {
        builder.list.interrupt();
        if table.is_empty() {
            return;
        }
        let index = builder.tables_seen;
        builder.tables_seen += 1;

        let (rows, warnings) = serializer.normalize(&table.grid(), index);
        builder.warnings.extend(warnings);
        builder.push(Block::Table { rows });
    }
}

/// Heading text on one line.
fn heading_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drop leading and trailing whitespace of a span sequence.
fn trim_spans(spans: &mut Vec<InlineSpan>) {
    while let Some(first) = spans.first_mut() {
        let trimmed = first.text.trim_start().len();
        first.text.drain(..first.text.len() - trimmed);
        if first.text.is_empty() {
            spans.remove(0);
        } else {
            break;
        }
    }
    while let Some(last) = spans.last_mut() {
        let keep = last.text.trim_end().len();
        last.text.truncate(keep);
        if last.text.is_empty() {
            spans.pop();
        } else {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ImageRef, ListInfo, Resource, TextRun, TextStyle};

    fn assemble(document: &Document) -> Assembly {
        let options = RenderOptions::default().with_stats(true);
        DocumentAssembler::new(&options).assemble(document)
    }

    #[test]
    fn test_title_and_heading_shift() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::styled("Title", "TEST DOC"));
        doc.add_paragraph(Paragraph::styled("Heading 1", "Title 1"));
        let mut body = Paragraph::new();
        body.add_run(TextRun::new("X").with_style(TextStyle {
            bold: true,
            italic: true,
            ..Default::default()
        }));
        doc.add_paragraph(body);

        let assembly = assemble(&doc);
        assert_eq!(
            assembly.blocks[0],
            Block::Heading {
                level: 1,
                text: "TEST DOC".into()
            }
        );
        assert_eq!(
            assembly.blocks[1],
            Block::Heading {
                level: 2,
                text: "Title 1".into()
            }
        );
        assert!(matches!(assembly.blocks[2], Block::Paragraph { .. }));
        assert_eq!(assembly.stats.heading_count, 2);
    }

    #[test]
    fn test_list_restarts_after_paragraph() {
        let mut doc = Document::new();
        for text in ["one", "two"] {
            doc.add_paragraph(Paragraph::with_text(text).with_list(ListInfo::numbered(0)));
        }
        doc.add_paragraph(Paragraph::with_text("   "));
        doc.add_paragraph(Paragraph::with_text("three").with_list(ListInfo::numbered(0)));
        doc.add_paragraph(Paragraph::with_text("Between"));
        for text in ["a", "b"] {
            doc.add_paragraph(Paragraph::with_text(text).with_list(ListInfo::numbered(0)));
        }

        let indices: Vec<Option<u32>> = assemble(&doc)
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::ListItem { index, .. } => Some(*index),
                _ => None,
            })
            .collect();
        assert_eq!(indices, vec![Some(1), Some(2), Some(3), Some(1), Some(2)]);
    }

    #[test]
    fn test_text_marker_is_stripped() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("• first"));
        doc.add_paragraph(Paragraph::with_text("2. second"));

        let blocks = assemble(&doc).blocks;
        assert_eq!(
            blocks[0],
            Block::ListItem {
                ordered: false,
                level: 0,
                index: None,
                spans: vec![InlineSpan::plain("first")],
            }
        );
        assert_eq!(
            blocks[1],
            Block::ListItem {
                ordered: true,
                level: 0,
                index: Some(1),
                spans: vec![InlineSpan::plain("second")],
            }
        );
    }

    #[test]
    fn test_missing_image_is_placeholder() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::new().with_image("rId1"));
        doc.add_paragraph(Paragraph::with_text("Caption text").with_image("rId2"));
        doc.add_paragraph(Paragraph::with_text("after"));
        doc.add_resource(
            "rId1",
            Resource::from_part("word/media/image1.png", vec![0x89, 0x50, 0x4E, 0x47]),
        );

        let assembly = assemble(&doc);
        assert_eq!(
            assembly.blocks[0],
            Block::Image(ImageRef::Asset {
                path: "assets/image_001.png".into()
            })
        );
        assert_eq!(
            assembly.blocks[1],
            Block::Image(ImageRef::Missing {
                relationship_id: "rId2".into()
            })
        );
        assert_eq!(assembly.blocks[2].plain_text(), "Caption text");
        assert_eq!(assembly.blocks[3].plain_text(), "after");
        assert_eq!(assembly.warnings.len(), 1);
        assert_eq!(assembly.assets.len(), 1);
        assert_eq!(assembly.stats.missing_image_count, 1);
    }

    #[test]
    fn test_image_only_paragraph_drops_stray_text() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text(" .").with_image("rId1"));
        let assembly = assemble(&doc);
        assert_eq!(assembly.blocks.len(), 1);
        assert!(matches!(assembly.blocks[0], Block::Image(_)));
    }

    #[test]
    fn test_irregular_table_warning() {
        let mut doc = Document::new();
        let mut table = Table::from_grid([vec!["A", "B"]]);
        table.add_row(crate::model::TableRow::from_strings(["1"]));
        doc.add_table(table);
        doc.add_table(Table::new());

        let assembly = assemble(&doc);
        assert_eq!(assembly.blocks.len(), 1);
        assert_eq!(
            assembly.blocks[0],
            Block::Table {
                rows: vec![
                    vec!["A".to_string(), "B".to_string()],
                    vec!["1".to_string(), String::new()],
                ]
            }
        );
        assert_eq!(assembly.warnings.len(), 1);
    }

    #[test]
    fn test_trim_spans() {
        let mut spans = vec![
            InlineSpan::plain("  "),
            InlineSpan::plain(" lead"),
            InlineSpan::plain("tail  "),
        ];
        trim_spans(&mut spans);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text, "lead");
        assert_eq!(spans[1].text, "tail");
    }
}
