//! Rendering result with metadata, statistics and warnings.

use crate::model::{Block, Metadata};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of rendering a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered content (Markdown or JSON)
    pub content: String,

    /// Document metadata (copied from source document)
    pub metadata: Metadata,

    /// Extraction statistics
    pub stats: ExtractionStats,

    /// Non-fatal problems met while converting
    pub warnings: Vec<Warning>,

    /// Images the caller must write for the content's references to resolve
    pub assets: Vec<AssetInstruction>,
}

impl RenderResult {
    /// Create a simple result with just content.
    pub fn content_only(content: String) -> Self {
        Self {
            content,
            metadata: Metadata::default(),
            stats: ExtractionStats::default(),
            warnings: Vec::new(),
            assets: Vec::new(),
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }

    /// Whether any warning was raised.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// One image to be written into the asset folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetInstruction {
    /// Relationship id of the source image
    pub relationship_id: String,

    /// Target file name inside the asset folder (e.g. "image_001.png")
    pub file_name: String,
}

/// Non-fatal conditions. Each one is also logged when it is raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// An image reference had no entry in the image map
    MissingImage {
        /// The unresolved relationship id
        relationship_id: String,
    },

    /// A table row was padded or truncated to the header width
    IrregularTable {
        /// Zero-based table index within the document
        table_index: usize,
        /// Column count of the first row
        expected_columns: usize,
        /// Zero-based row index
        row_index: usize,
        /// Column count found in that row
        found_columns: usize,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::MissingImage { relationship_id } => {
                write!(f, "image {} could not be resolved", relationship_id)
            }
            Warning::IrregularTable {
                table_index,
                expected_columns,
                row_index,
                found_columns,
            } => write!(
                f,
                "table {} row {} has {} cells, expected {}; row {}",
                table_index,
                row_index,
                found_columns,
                expected_columns,
                if found_columns < expected_columns {
                    "padded"
                } else {
                    "truncated"
                }
            ),
        }
    }
}

/// Statistics collected during content extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Number of headings extracted
    pub heading_count: u32,

    /// Number of paragraphs extracted
    pub paragraph_count: u32,

    /// Number of list items extracted
    pub list_item_count: u32,

    /// Number of tables extracted
    pub table_count: u32,

    /// Number of images referenced and resolved
    pub image_count: u32,

    /// Number of image references that could not be resolved
    pub missing_image_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one block and its text.
    pub fn record(&mut self, block: &Block) {
        match block {
            Block::Heading { .. } => self.heading_count += 1,
            Block::Paragraph { .. } => self.paragraph_count += 1,
            Block::ListItem { .. } => self.list_item_count += 1,
            Block::Table { .. } => self.table_count += 1,
            Block::Image(crate::model::ImageRef::Asset { .. }) => self.image_count += 1,
            Block::Image(crate::model::ImageRef::Missing { .. }) => self.missing_image_count += 1,
        }
        self.count_text(&block.plain_text());
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ExtractionStats) {
        self.heading_count += other.heading_count;
        self.paragraph_count += other.paragraph_count;
        self.list_item_count += other.list_item_count;
        self.table_count += other.table_count;
        self.image_count += other.image_count;
        self.missing_image_count += other.missing_image_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}
