//! Readers for `styles.xml`, `numbering.xml` and part relationships.

use std::collections::HashMap;

use roxmltree::Node;

use super::xml::{is_wml, wml, wml_attr, wml_bool, REL_NS, WML_NS};
use crate::error::Result;
use crate::model::{ListKind, TextStyle};

/// Limit on `w:basedOn` chains, guards against cycles.
const MAX_STYLE_DEPTH: usize = 16;

/// Run properties as declared at one level of the style hierarchy.
/// `None` means "not specified here, inherit".
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct RunProps {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub size: Option<f32>,
}

impl RunProps {
    /// Read properties from a `w:rPr` element.
    pub fn from_rpr(rpr: Node) -> Self {
        Self {
            bold: wml_bool(rpr, "b"),
            italic: wml_bool(rpr, "i"),
            underline: wml(rpr, "u").map(|u| {
                u.attribute((WML_NS, "val"))
                    .map_or(true, |v| v != "none")
            }),
            // w:sz is in half-points
            size: wml_attr(rpr, "sz")
                .and_then(|v| v.parse::<f32>().ok())
                .map(|half_points| half_points / 2.0),
        }
    }

    /// Properties of `over` win where they are set.
    pub fn overlay(self, over: RunProps) -> RunProps {
        RunProps {
            bold: over.bold.or(self.bold),
            italic: over.italic.or(self.italic),
            underline: over.underline.or(self.underline),
            size: over.size.or(self.size),
        }
    }

    pub fn to_text_style(self) -> TextStyle {
        TextStyle {
            bold: self.bold.unwrap_or(false),
            italic: self.italic.unwrap_or(false),
            underline: self.underline.unwrap_or(false),
            font_size: self.size,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct StyleDef {
    name: Option<String>,
    based_on: Option<String>,
    run: RunProps,
}

/// Style definitions of one document.
#[derive(Debug, Clone, Default)]
pub(crate) struct StyleSheet {
    styles: HashMap<String, StyleDef>,
    default_paragraph: Option<String>,
    doc_defaults: RunProps,
}

impl StyleSheet {
    /// Parse `word/styles.xml`.
    pub fn parse(xml: &str) -> Result<Self> {
        let doc = roxmltree::Document::parse(xml)?;
        let root = doc.root_element();
        let mut sheet = StyleSheet::default();

        if let Some(rpr) = wml(root, "docDefaults")
            .and_then(|d| wml(d, "rPrDefault"))
            .and_then(|d| wml(d, "rPr"))
        {
            sheet.doc_defaults = RunProps::from_rpr(rpr);
        }

        for node in root.children().filter(|n| is_wml(*n, "style")) {
            let Some(id) = node.attribute((WML_NS, "styleId")) else {
                continue;
            };
            let style_type = node.attribute((WML_NS, "type")).unwrap_or("paragraph");
            let is_default = node
                .attribute((WML_NS, "default"))
                .map_or(false, |v| v == "1" || v == "true");
            if is_default && style_type == "paragraph" {
                sheet.default_paragraph = Some(id.to_string());
            }
            let def = StyleDef {
                name: wml_attr(node, "name").map(str::to_string),
                based_on: wml_attr(node, "basedOn").map(str::to_string),
                run: wml(node, "rPr").map(RunProps::from_rpr).unwrap_or_default(),
            };
            sheet.styles.insert(id.to_string(), def);
        }

        Ok(sheet)
    }

    /// Display name for a style id; unknown ids are returned as-is.
    pub fn display_name(&self, style_id: &str) -> String {
        self.styles
            .get(style_id)
            .and_then(|s| s.name.clone())
            .unwrap_or_else(|| style_id.to_string())
    }

    /// Id of the default paragraph style ("Normal" in most documents).
    pub fn default_paragraph_style(&self) -> Option<&str> {
        self.default_paragraph.as_deref()
    }

    /// Document defaults overlaid with the style's `basedOn` chain.
    pub fn resolved_run_props(&self, style_id: Option<&str>) -> RunProps {
        match style_id {
            Some(id) => self.doc_defaults.overlay(self.chain_props(id, 0)),
            None => self.doc_defaults,
        }
    }

    /// Run properties declared by a style and its ancestors, without document defaults.
    pub fn style_run_props(&self, style_id: &str) -> RunProps {
        self.chain_props(style_id, 0)
    }

    fn chain_props(&self, style_id: &str, depth: usize) -> RunProps {
        let Some(def) = self.styles.get(style_id) else {
            return RunProps::default();
        };
        let inherited = match def.based_on.as_deref() {
            Some(parent) if depth < MAX_STYLE_DEPTH && parent != style_id => {
                self.chain_props(parent, depth + 1)
            }
            _ => RunProps::default(),
        };
        inherited.overlay(def.run)
    }
}

/// Numbering definitions: `(numId, ilvl)` → list kind.
#[derive(Debug, Clone, Default)]
pub(crate) struct Numbering {
    abstract_formats: HashMap<String, HashMap<u8, String>>,
    num_to_abstract: HashMap<String, String>,
}

impl Numbering {
    /// Parse `word/numbering.xml`.
    pub fn parse(xml: &str) -> Result<Self> {
        let doc = roxmltree::Document::parse(xml)?;
        let mut numbering = Numbering::default();

        for node in doc.root_element().children() {
            if is_wml(node, "abstractNum") {
                let Some(abs_id) = node.attribute((WML_NS, "abstractNumId")) else {
                    continue;
                };
                let levels = node
                    .children()
                    .filter(|n| is_wml(*n, "lvl"))
                    .filter_map(|lvl| {
                        let ilvl = lvl.attribute((WML_NS, "ilvl"))?.parse::<u8>().ok()?;
                        let num_fmt = wml_attr(lvl, "numFmt").unwrap_or("decimal");
                        Some((ilvl, num_fmt.to_string()))
                    })
                    .collect();
                numbering
                    .abstract_formats
                    .insert(abs_id.to_string(), levels);
            } else if is_wml(node, "num") {
                let Some(num_id) = node.attribute((WML_NS, "numId")) else {
                    continue;
                };
                let Some(abs_id) = wml_attr(node, "abstractNumId") else {
                    continue;
                };
                numbering
                    .num_to_abstract
                    .insert(num_id.to_string(), abs_id.to_string());
            }
        }

        Ok(numbering)
    }

    /// List kind of a numbering level, when the definition exists.
    pub fn kind(&self, num_id: &str, ilvl: u8) -> Option<ListKind> {
        let abs_id = self.num_to_abstract.get(num_id)?;
        let fmt = self.abstract_formats.get(abs_id)?.get(&ilvl)?;
        Some(match fmt.as_str() {
            "bullet" | "none" => ListKind::Unordered,
            _ => ListKind::Ordered,
        })
    }
}

/// One entry of a `.rels` part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Relationship {
    pub target: String,
    pub rel_type: String,
    pub external: bool,
}

impl Relationship {
    pub fn is_image(&self) -> bool {
        self.rel_type.ends_with("/image")
    }
}

/// Parse a relationships part into id → relationship.
pub(crate) fn parse_relationships(xml: &str) -> Result<HashMap<String, Relationship>> {
    let doc = roxmltree::Document::parse(xml)?;
    let mut rels = HashMap::new();
    for node in doc.root_element().children().filter(|n| n.is_element()) {
        if node.tag_name().name() != "Relationship" {
            continue;
        }
        if let (Some(id), Some(target)) = (node.attribute("Id"), node.attribute("Target")) {
            rels.insert(
                id.to_string(),
                Relationship {
                    target: target.to_string(),
                    rel_type: node.attribute("Type").unwrap_or_default().to_string(),
                    external: node.attribute("TargetMode") == Some("External"),
                },
            );
        }
    }
    Ok(rels)
}

/// The `r:id`/`r:embed` attribute of a node.
pub(crate) fn rel_attr<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute((REL_NS, name))
}
