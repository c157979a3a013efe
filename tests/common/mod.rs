//! In-memory DOCX packages for integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const WML: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const PKG_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const IMAGE_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
const HYPERLINK_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";

/// Minimal PNG signature, enough for MIME sniffing.
pub const PNG_BYTES: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

/// Builds a DOCX package from body XML fragments.
#[derive(Default)]
pub struct DocxBuilder {
    body: Vec<String>,
    styles: Option<String>,
    numbering: Option<String>,
    rels: Vec<String>,
    media: Vec<(String, Vec<u8>)>,
    core: Option<String>,
}

impl DocxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw body XML (any `w:` element).
    pub fn raw(mut self, xml: impl Into<String>) -> Self {
        self.body.push(xml.into());
        self
    }

    /// Paragraph with an optional style id and plain text.
    pub fn paragraph(self, style: Option<&str>, text: &str) -> Self {
        let ppr = style
            .map(|s| format!(r#"<w:pPr><w:pStyle w:val="{}"/></w:pPr>"#, s))
            .unwrap_or_default();
        self.raw(format!(
            r#"<w:p>{}<w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
            ppr, text
        ))
    }

    /// Numbered paragraph referencing `numId`.
    pub fn numbered(self, num_id: u32, level: u8, text: &str) -> Self {
        self.raw(format!(
            r#"<w:p><w:pPr><w:numPr><w:ilvl w:val="{}"/><w:numId w:val="{}"/></w:numPr></w:pPr><w:r><w:t>{}</w:t></w:r></w:p>"#,
            level, num_id, text
        ))
    }

    /// Table from a grid of cell text.
    pub fn table(self, rows: &[&[&str]]) -> Self {
        let mut xml = String::from("<w:tbl>");
        for row in rows {
            xml.push_str("<w:tr>");
            for cell in *row {
                xml.push_str(&format!(
                    "<w:tc><w:p><w:r><w:t>{}</w:t></w:r></w:p></w:tc>",
                    cell
                ));
            }
            xml.push_str("</w:tr>");
        }
        xml.push_str("</w:tbl>");
        self.raw(xml)
    }

    /// Paragraph holding one inline picture.
    pub fn image(self, rel_id: &str) -> Self {
        self.raw(format!(
            r#"<w:p><w:r><w:drawing><wp:inline><a:graphic><a:graphicData><pic:pic><pic:blipFill><a:blip r:embed="{}"/></pic:blipFill></pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing></w:r></w:p>"#,
            rel_id
        ))
    }

    /// Declare an embedded image relationship and its media bytes.
    pub fn media(mut self, rel_id: &str, file_name: &str, data: &[u8]) -> Self {
        self.rels.push(format!(
            r#"<Relationship Id="{}" Type="{}" Target="media/{}"/>"#,
            rel_id, IMAGE_REL, file_name
        ));
        self.media
            .push((format!("word/media/{}", file_name), data.to_vec()));
        self
    }

    /// Declare an external hyperlink relationship.
    pub fn hyperlink_rel(mut self, rel_id: &str, target: &str) -> Self {
        self.rels.push(format!(
            r#"<Relationship Id="{}" Type="{}" Target="{}" TargetMode="External"/>"#,
            rel_id, HYPERLINK_REL, target
        ));
        self
    }

    /// `w:styles` inner XML.
    pub fn styles(mut self, inner: &str) -> Self {
        self.styles = Some(format!(r#"<w:styles xmlns:w="{}">{}</w:styles>"#, WML, inner));
        self
    }

    /// `w:numbering` inner XML.
    pub fn numbering(mut self, inner: &str) -> Self {
        self.numbering = Some(format!(
            r#"<w:numbering xmlns:w="{}">{}</w:numbering>"#,
            WML, inner
        ));
        self
    }

    /// `docProps/core.xml` with a title and creator.
    pub fn core(mut self, title: &str, creator: &str) -> Self {
        self.core = Some(format!(
            r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/"><dc:title>{}</dc:title><dc:creator>{}</dc:creator><dcterms:created>2024-03-01T10:00:00Z</dcterms:created></cp:coreProperties>"#,
            title, creator
        ));
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        let document = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="{}" xmlns:r="{}" xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture"><w:body>{}</w:body></w:document>"#,
            WML,
            REL,
            self.body.concat()
        );
        add(&mut zip, "[Content_Types].xml", CONTENT_TYPES.as_bytes(), options);
        add(&mut zip, "word/document.xml", document.as_bytes(), options);

        if let Some(styles) = self.styles {
            add(&mut zip, "word/styles.xml", styles.as_bytes(), options);
        }
        if let Some(numbering) = self.numbering {
            add(&mut zip, "word/numbering.xml", numbering.as_bytes(), options);
        }
        if !self.rels.is_empty() {
            let rels = format!(
                r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="{}">{}</Relationships>"#,
                PKG_REL,
                self.rels.concat()
            );
            add(&mut zip, "word/_rels/document.xml.rels", rels.as_bytes(), options);
        }
        if let Some(core) = self.core {
            add(&mut zip, "docProps/core.xml", core.as_bytes(), options);
        }
        let stored = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        for (name, data) in &self.media {
            add(&mut zip, name, data, stored);
        }

        zip.finish().unwrap().into_inner()
    }
}

fn add(zip: &mut ZipWriter<Cursor<Vec<u8>>>, name: &str, data: &[u8], options: SimpleFileOptions) {
    zip.start_file(name, options).unwrap();
    zip.write_all(data).unwrap();
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

/// Decimal numbering definition `numId` 1 and bullet definition `numId` 2.
pub const LIST_NUMBERING: &str = r#"<w:abstractNum w:abstractNumId="0"><w:lvl w:ilvl="0"><w:numFmt w:val="decimal"/></w:lvl><w:lvl w:ilvl="1"><w:numFmt w:val="decimal"/></w:lvl></w:abstractNum><w:abstractNum w:abstractNumId="1"><w:lvl w:ilvl="0"><w:numFmt w:val="bullet"/></w:lvl></w:abstractNum><w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num><w:num w:numId="2"><w:abstractNumId w:val="1"/></w:num>"#;
