//! Document-level types.

use super::{Paragraph, Resource, Table};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A parsed Word document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (title, author, etc.)
    pub metadata: Metadata,

    /// Body content in source order
    pub body: Vec<BodyElement>,

    /// Embedded images keyed by relationship id
    pub resources: HashMap<String, Resource>,
}

/// One top-level element of the document body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BodyElement {
    /// A paragraph
    Paragraph(Paragraph),
    /// A table
    Table(Table),
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a paragraph to the body.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.body.push(BodyElement::Paragraph(paragraph));
    }

    /// Append a table to the body.
    pub fn add_table(&mut self, table: Table) {
        self.body.push(BodyElement::Table(table));
    }

    /// Add a resource to the document.
    pub fn add_resource(&mut self, relationship_id: impl Into<String>, resource: Resource) {
        self.resources.insert(relationship_id.into(), resource);
    }

    /// Get a resource by relationship id.
    pub fn get_resource(&self, relationship_id: &str) -> Option<&Resource> {
        self.resources.get(relationship_id)
    }

    /// Iterate over body paragraphs, skipping tables.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.body.iter().filter_map(|e| match e {
            BodyElement::Paragraph(p) => Some(p),
            BodyElement::Table(_) => None,
        })
    }

    /// Check if the document has no body content.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Document metadata from `docProps/core.xml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Keywords
    pub keywords: Option<String>,

    /// Last author to modify the document
    pub last_modified_by: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Whether no metadata field is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.subject.is_none()
            && self.keywords.is_none()
            && self.last_modified_by.is_none()
            && self.created.is_none()
            && self.modified.is_none()
    }

    /// Convert metadata to YAML frontmatter format.
    pub fn to_yaml_frontmatter(&self) -> String {
        let mut lines = vec!["---".to_string()];

        if let Some(ref title) = self.title {
            lines.push(format!("title: \"{}\"", escape_yaml(title)));
        }
        if let Some(ref author) = self.author {
            lines.push(format!("author: \"{}\"", escape_yaml(author)));
        }
        if let Some(ref subject) = self.subject {
            lines.push(format!("subject: \"{}\"", escape_yaml(subject)));
        }
        if let Some(ref keywords) = self.keywords {
            lines.push(format!("keywords: \"{}\"", escape_yaml(keywords)));
        }
        if let Some(ref modified_by) = self.last_modified_by {
            lines.push(format!("last_modified_by: \"{}\"", escape_yaml(modified_by)));
        }
        if let Some(ref created) = self.created {
            lines.push(format!("created: {}", created.to_rfc3339()));
        }
        if let Some(ref modified) = self.modified {
            lines.push(format!("modified: {}", modified.to_rfc3339()));
        }

        lines.push("---".to_string());
        lines.push(String::new());

        lines.join("\n")
    }
}

/// Escape special characters for YAML strings.
fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.paragraphs().count(), 0);
    }

    #[test]
    fn test_paragraphs_skip_tables() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("one"));
        doc.add_table(Table::from_grid([vec!["a"]]));
        doc.add_paragraph(Paragraph::with_text("two"));

        let texts: Vec<String> = doc.paragraphs().map(|p| p.plain_text()).collect();
        assert_eq!(texts, vec!["one", "two"]);
    }

    #[test]
    fn test_metadata_frontmatter() {
        let metadata = Metadata {
            title: Some("Test \"Doc\"".to_string()),
            author: Some("Jane Roe".to_string()),
            ..Default::default()
        };

        let yaml = metadata.to_yaml_frontmatter();
        assert!(yaml.starts_with("---\n"));
        assert!(yaml.contains("title: \"Test \\\"Doc\\\"\""));
        assert!(yaml.contains("author: \"Jane Roe\""));
        assert!(yaml.ends_with("---\n"));
        assert!(!metadata.is_empty());
        assert!(Metadata::default().is_empty());
    }
}
