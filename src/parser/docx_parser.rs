//! DOCX document parser using zip and roxmltree.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use chrono::{DateTime, Utc};
use roxmltree::Node;
use zip::ZipArchive;

use crate::error::{Error, Result};
use crate::model::{
    Document, ListInfo, ListKind, Metadata, Paragraph, Resource, Table, TableCell, TableRow,
    TextRun,
};

use super::options::ParseOptions;
use super::styles::{parse_relationships, rel_attr, Numbering, Relationship, RunProps, StyleSheet};
use super::xml::{
    collect_block_nodes, is_wml, read_zip_text, resolve_part_path, wml, wml_attr, DML_NS, VML_NS,
    WML_NS,
};

/// Twips per list nesting step when the level comes from indentation.
const TWIPS_PER_LEVEL: i64 = 720;
const MAX_INDENT_LEVEL: i64 = 5;
/// Widest table Word produces; also the span cap when `w:tblGrid` is absent.
const MAX_TABLE_COLUMNS: usize = 63;

/// Raw parts of a DOCX package, read up front.
struct Package {
    document: String,
    styles: Option<String>,
    numbering: Option<String>,
    relationships: Option<String>,
    core: Option<String>,
    media: HashMap<String, Vec<u8>>,
}

impl Package {
    fn read<R: Read + Seek>(reader: R, options: &ParseOptions) -> Result<Self> {
        let mut zip = ZipArchive::new(reader)
            .map_err(|_| Error::InvalidDocx("file is not a ZIP archive".into()))?;

        let document = read_zip_text(&mut zip, "word/document.xml")?.ok_or_else(|| {
            Error::InvalidDocx("missing word/document.xml (is this a DOCX file?)".into())
        })?;

        let styles = read_zip_text(&mut zip, "word/styles.xml")?;
        let numbering = read_zip_text(&mut zip, "word/numbering.xml")?;
        let relationships = read_zip_text(&mut zip, "word/_rels/document.xml.rels")?;
        let core = read_zip_text(&mut zip, "docProps/core.xml")?;

        let mut media = HashMap::new();
        if options.extract_images {
            for i in 0..zip.len() {
                let mut entry = match zip.by_index(i) {
                    Ok(entry) => entry,
                    Err(e) if options.is_lenient() => {
                        log::warn!("Skipping unreadable archive entry {}: {}", i, e);
                        continue;
                    }
                    Err(e) => return Err(e.into()),
                };
                if !entry.is_file() || !entry.name().starts_with("word/media/") {
                    continue;
                }
                let name = entry.name().to_string();
                let mut data = Vec::new();
                match entry.read_to_end(&mut data) {
                    Ok(_) => {
                        media.insert(name, data);
                    }
                    Err(e) if options.is_lenient() => {
                        log::warn!("Skipping unreadable media part {}: {}", name, e);
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }

        Ok(Self {
            document,
            styles,
            numbering,
            relationships,
            core,
            media,
        })
    }
}

/// DOCX document parser.
pub struct DocxParser {
    package: Package,
    options: ParseOptions,
}

impl DocxParser {
    /// Open a DOCX file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a DOCX file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::NotFound(path.to_path_buf()));
        }
        let file = File::open(path)?;
        let package = Package::read(file, &options)?;
        Ok(Self { package, options })
    }

    /// Parse a DOCX from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a DOCX from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let package = Package::read(Cursor::new(data), &options)?;
        Ok(Self { package, options })
    }

    /// Parse a DOCX from a reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let options = ParseOptions::default();
        let package = Package::read(reader, &options)?;
        Ok(Self { package, options })
    }

    /// Parse the document and return the document model.
    pub fn parse(&self) -> Result<Document> {
        let styles = self.optional_part(
            "word/styles.xml",
            self.package.styles.as_deref(),
            StyleSheet::parse,
        )?;
        let numbering = self.optional_part(
            "word/numbering.xml",
            self.package.numbering.as_deref(),
            Numbering::parse,
        )?;
        let rels = self.optional_part(
            "word/_rels/document.xml.rels",
            self.package.relationships.as_deref(),
            parse_relationships,
        )?;

        let xml = roxmltree::Document::parse(&self.package.document)?;
        let body = wml(xml.root_element(), "body")
            .ok_or_else(|| Error::InvalidDocx("missing w:body".into()))?;

        let reader = BodyReader {
            styles: &styles,
            numbering: &numbering,
            rels: &rels,
        };

        let mut document = Document::new();
        for node in collect_block_nodes(body) {
            if is_wml(node, "p") {
                document.add_paragraph(reader.paragraph(node));
            } else if is_wml(node, "tbl") {
                document.add_table(reader.table(node));
            }
        }

        document.metadata = self.optional_part(
            "docProps/core.xml",
            self.package.core.as_deref(),
            parse_core_properties,
        )?;

        if self.options.extract_images {
            self.attach_images(&mut document, &rels);
        }

        log::debug!(
            "Parsed {} body elements, {} images",
            document.body.len(),
            document.resources.len()
        );
        Ok(document)
    }

    /// Parse an optional package part, honouring the error mode.
    fn optional_part<T: Default>(
        &self,
        name: &str,
        content: Option<&str>,
        parse: impl Fn(&str) -> Result<T>,
    ) -> Result<T> {
        let Some(content) = content else {
            return Ok(T::default());
        };
        match parse(content) {
            Ok(value) => Ok(value),
            Err(e) if self.options.is_lenient() => {
                log::warn!("Ignoring unreadable part {}: {}", name, e);
                Ok(T::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Load the media parts referenced by body paragraphs, keyed by relationship id.
    fn attach_images(&self, document: &mut Document, rels: &HashMap<String, Relationship>) {
        let mut seen = HashSet::new();
        let referenced: Vec<String> = document
            .paragraphs()
            .flat_map(|p| p.images.iter())
            .filter(|id| seen.insert(id.as_str()))
            .cloned()
            .collect();

        for rel_id in referenced {
            let Some(rel) = rels.get(&rel_id) else {
                log::debug!("Image relationship {} is not declared", rel_id);
                continue;
            };
            if rel.external || !rel.is_image() {
                log::debug!("Image relationship {} is not an embedded image", rel_id);
                continue;
            }
            let part_name = resolve_part_path(&rel.target);
            match self.package.media.get(&part_name) {
                Some(data) => {
                    document.add_resource(
                        rel_id,
                        Resource::from_part(part_name.clone(), data.clone()),
                    );
                }
                None => log::debug!("Media part {} not found in package", part_name),
            }
        }
    }
}

/// Walks `w:body` content with the document's shared definitions.
struct BodyReader<'a> {
    styles: &'a StyleSheet,
    numbering: &'a Numbering,
    rels: &'a HashMap<String, Relationship>,
}

impl BodyReader<'_> {
    fn paragraph(&self, node: Node) -> Paragraph {
        let ppr = wml(node, "pPr");
        let style_id = ppr
            .and_then(|p| wml_attr(p, "pStyle"))
            .or_else(|| self.styles.default_paragraph_style());

        let mut paragraph = Paragraph {
            style_name: style_id.map(|id| self.styles.display_name(id)),
            ..Default::default()
        };

        if let Some(ppr) = ppr {
            paragraph.list = self.list_info(ppr);
            paragraph.indent_level = indent_level(ppr);
        }

        let base = self.styles.resolved_run_props(style_id);
        self.collect_runs(node, base, None, &mut paragraph);
        paragraph
    }

    fn list_info(&self, ppr: Node) -> Option<ListInfo> {
        let num_pr = wml(ppr, "numPr")?;
        let num_id = wml_attr(num_pr, "numId")?;
        if num_id == "0" {
            return None;
        }
        let level = wml_attr(num_pr, "ilvl")
            .and_then(|v| v.parse::<u8>().ok())
            .unwrap_or(0);
        let kind = self
            .numbering
            .kind(num_id, level)
            .unwrap_or(ListKind::Unordered);
        Some(ListInfo { kind, level })
    }

    /// Collect runs of a paragraph or inline container in document order.
    fn collect_runs(
        &self,
        container: Node,
        base: RunProps,
        link: Option<&str>,
        paragraph: &mut Paragraph,
    ) {
        for child in container.children().filter(|n| n.is_element()) {
            if child.tag_name().namespace() != Some(WML_NS) {
                continue;
            }
            match child.tag_name().name() {
                "r" => self.run(child, base, link, paragraph),
                "hyperlink" => {
                    let target = self.hyperlink_target(child);
                    self.collect_runs(child, base, target.as_deref().or(link), paragraph);
                }
                "ins" | "smartTag" | "fldSimple" | "customXml" => {
                    self.collect_runs(child, base, link, paragraph)
                }
                "sdt" => {
                    if let Some(content) = wml(child, "sdtContent") {
                        self.collect_runs(content, base, link, paragraph);
                    }
                }
                _ => {}
            }
        }
    }

    fn hyperlink_target(&self, node: Node) -> Option<String> {
        if let Some(rel) = rel_attr(node, "id").and_then(|id| self.rels.get(id)) {
            return Some(rel.target.clone());
        }
        node.attribute((WML_NS, "anchor"))
            .map(|anchor| format!("#{}", anchor))
    }

    fn run(&self, node: Node, base: RunProps, link: Option<&str>, paragraph: &mut Paragraph) {
        let rpr = wml(node, "rPr");
        let char_style = rpr
            .and_then(|r| wml_attr(r, "rStyle"))
            .map(|id| self.styles.style_run_props(id))
            .unwrap_or_default();
        let direct = rpr.map(RunProps::from_rpr).unwrap_or_default();
        let style = base.overlay(char_style).overlay(direct).to_text_style();

        let mut text = String::new();
        for child in node.children().filter(|n| n.is_element()) {
            if child.tag_name().namespace() != Some(WML_NS) {
                continue;
            }
            match child.tag_name().name() {
                "t" => text.push_str(child.text().unwrap_or_default()),
                "tab" => text.push('\t'),
                // page and column breaks carry no text
                "br" => {
                    if child.attribute((WML_NS, "type")).unwrap_or("textWrapping") == "textWrapping"
                    {
                        text.push('\n');
                    }
                }
                "cr" => text.push('\n'),
                "noBreakHyphen" => text.push('-'),
                "drawing" => {
                    if let Some(id) = find_blip_embed(child) {
                        paragraph.images.push(id.to_string());
                    }
                }
                "pict" | "object" => {
                    if let Some(id) = find_vml_image(child) {
                        paragraph.images.push(id.to_string());
                    }
                }
                _ => {}
            }
        }

        if !text.is_empty() {
            paragraph.add_run(TextRun {
                text,
                style,
                link: link.map(str::to_string),
            });
        }
    }

    fn table(&self, node: Node) -> Table {
        let span_limit = grid_columns(node)
            .filter(|cols| *cols > 0)
            .unwrap_or(MAX_TABLE_COLUMNS)
            .min(MAX_TABLE_COLUMNS);
        let mut table = Table::new();
        for row_node in collect_block_nodes(node)
            .into_iter()
            .filter(|n| is_wml(*n, "tr"))
        {
            let mut row = TableRow::default();
            for cell_node in collect_block_nodes(row_node)
                .into_iter()
                .filter(|n| is_wml(*n, "tc"))
            {
                let tc_pr = wml(cell_node, "tcPr");
                let span = tc_pr
                    .and_then(|p| wml_attr(p, "gridSpan"))
                    .and_then(|v| v.parse::<usize>().ok())
                    .unwrap_or(1)
                    .clamp(1, span_limit);
                let continuation = tc_pr
                    .and_then(|p| wml(p, "vMerge"))
                    .map_or(false, |m| m.attribute((WML_NS, "val")) != Some("restart"));

                let text = if continuation {
                    String::new()
                } else {
                    self.cell_text(cell_node)
                };
                for _ in 0..span {
                    row.cells.push(TableCell::text(text.clone()));
                }
            }
            table.add_row(row);
        }
        table
    }

    fn cell_text(&self, cell: Node) -> String {
        collect_block_nodes(cell)
            .into_iter()
            .filter(|n| is_wml(*n, "p"))
            .map(|p| self.paragraph(p).plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Column count declared by `w:tblGrid`.
fn grid_columns(table: Node) -> Option<usize> {
    let grid = wml(table, "tblGrid")?;
    Some(grid.children().filter(|n| is_wml(*n, "gridCol")).count())
}

/// Indentation depth from `w:ind w:left` (or `w:start`), 720 twips per step.
fn indent_level(ppr: Node) -> Option<u8> {
    let ind = wml(ppr, "ind")?;
    let left = ind
        .attribute((WML_NS, "left"))
        .or_else(|| ind.attribute((WML_NS, "start")))?
        .parse::<i64>()
        .ok()?;
    Some((left / TWIPS_PER_LEVEL).clamp(0, MAX_INDENT_LEVEL) as u8)
}

fn find_blip_embed<'a>(container: Node<'a, '_>) -> Option<&'a str> {
    container
        .descendants()
        .find(|n| n.tag_name().name() == "blip" && n.tag_name().namespace() == Some(DML_NS))
        .and_then(|n| rel_attr(n, "embed"))
}

fn find_vml_image<'a>(container: Node<'a, '_>) -> Option<&'a str> {
    container
        .descendants()
        .find(|n| n.tag_name().name() == "imagedata" && n.tag_name().namespace() == Some(VML_NS))
        .and_then(|n| rel_attr(n, "id"))
}

/// Parse `docProps/core.xml`.
fn parse_core_properties(xml: &str) -> Result<Metadata> {
    let doc = roxmltree::Document::parse(xml)?;
    let mut metadata = Metadata::default();
    for node in doc.root_element().children().filter(|n| n.is_element()) {
        let Some(value) = node.text().map(str::trim).filter(|t| !t.is_empty()) else {
            continue;
        };
        match node.tag_name().name() {
            "title" => metadata.title = Some(value.to_string()),
            "creator" => metadata.author = Some(value.to_string()),
            "subject" => metadata.subject = Some(value.to_string()),
            "keywords" => metadata.keywords = Some(value.to_string()),
            "lastModifiedBy" => metadata.last_modified_by = Some(value.to_string()),
            "created" => metadata.created = parse_w3c_date(value),
            "modified" => metadata.modified = parse_w3c_date(value),
            _ => {}
        }
    }
    Ok(metadata)
}

fn parse_w3c_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|d| d.with_timezone(&Utc))
}
