//! Output block model: what the assembler produces and the renderer prints.

use serde::{Deserialize, Serialize};

/// Set of inline emphasis flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormatSet {
    /// Bold
    pub bold: bool,
    /// Italic
    pub italic: bool,
    /// Underline
    pub underline: bool,
}

impl FormatSet {
    /// No formatting.
    pub const PLAIN: FormatSet = FormatSet {
        bold: false,
        italic: false,
        underline: false,
    };

    /// Whether no flag is set.
    pub fn is_plain(&self) -> bool {
        !self.bold && !self.italic && !self.underline
    }
}

/// A run of text with one format set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineSpan {
    /// Text content (unescaped)
    pub text: String,

    /// Emphasis flags
    #[serde(default, skip_serializing_if = "FormatSet::is_plain")]
    pub format: FormatSet,

    /// Hyperlink target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl InlineSpan {
    /// Create a plain span.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Create a span with the given format set.
    pub fn formatted(text: impl Into<String>, format: FormatSet) -> Self {
        Self {
            text: text.into(),
            format,
            link: None,
        }
    }

    /// Whether this span can be concatenated with `other` without changing meaning.
    pub fn mergeable_with(&self, other: &InlineSpan) -> bool {
        self.format == other.format && self.link == other.link
    }
}

/// Reference to an image asset, or a marker for one that could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImageRef {
    /// Image written to the asset folder; path is relative to the Markdown file
    Asset {
        /// e.g. "assets/image_001.png"
        path: String,
    },
    /// Image referenced by the body but absent from the extraction map
    Missing {
        /// Relationship id of the unresolved reference
        relationship_id: String,
    },
}

/// One block of the converted document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// ATX heading, level 1..=6
    Heading {
        /// Heading level
        level: u8,
        /// Heading text
        text: String,
    },

    /// Body paragraph
    Paragraph {
        /// Inline spans in order
        spans: Vec<InlineSpan>,
    },

    /// List item
    ListItem {
        /// Numbered or bulleted
        ordered: bool,
        /// Nesting level, 0 or 1
        level: u8,
        /// Ordinal for ordered items
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<u32>,
        /// Inline spans in order
        spans: Vec<InlineSpan>,
    },

    /// Pipe table
    Table {
        /// Rectangular grid of cell text
        rows: Vec<Vec<String>>,
    },

    /// Standalone image
    Image(ImageRef),
}

impl Block {
    /// Whether this block is a list item.
    pub fn is_list_item(&self) -> bool {
        matches!(self, Block::ListItem { .. })
    }

    /// Plain text of the block, without markup.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading { text, .. } => text.clone(),
            Block::Paragraph { spans } | Block::ListItem { spans, .. } => {
                spans.iter().map(|s| s.text.as_str()).collect()
            }
            Block::Table { rows } => rows
                .iter()
                .map(|r| r.join("\t"))
                .collect::<Vec<_>>()
                .join("\n"),
            Block::Image(_) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mergeable() {
        let bold = FormatSet {
            bold: true,
            ..Default::default()
        };
        let a = InlineSpan::formatted("a", bold);
        let b = InlineSpan::formatted("b", bold);
        assert!(a.mergeable_with(&b));

        let mut linked = b.clone();
        linked.link = Some("https://example.com".into());
        assert!(!a.mergeable_with(&linked));
        assert!(!a.mergeable_with(&InlineSpan::plain("c")));
    }

    #[test]
    fn test_block_plain_text() {
        let block = Block::ListItem {
            ordered: true,
            level: 0,
            index: Some(1),
            spans: vec![InlineSpan::plain("one "), InlineSpan::plain("two")],
        };
        assert!(block.is_list_item());
        assert_eq!(block.plain_text(), "one two");
    }

    #[test]
    fn test_block_serialization() {
        let block = Block::Heading {
            level: 2,
            text: "Intro".into(),
        };
        let json = serde_json::to_string(&block).unwrap();
        assert_eq!(json, r#"{"type":"heading","level":2,"text":"Intro"}"#);
    }
}
