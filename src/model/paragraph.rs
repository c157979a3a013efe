//! Paragraph and text-level types.

use serde::{Deserialize, Serialize};

/// A paragraph of the source document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Paragraph {
    /// Display name of the paragraph style (e.g., "Heading 1", "Title")
    pub style_name: Option<String>,

    /// Text runs in source order
    pub runs: Vec<TextRun>,

    /// Numbering attached to the paragraph, if any
    pub list: Option<ListInfo>,

    /// Left indentation converted to nesting steps (720 twips each, capped at 5)
    pub indent_level: Option<u8>,

    /// Relationship ids of images anchored in this paragraph, in order
    pub images: Vec<String>,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph with plain text.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.add_text(text);
        p
    }

    /// Create a paragraph with a style name and plain text.
    pub fn styled(style_name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut p = Self::with_text(text);
        p.style_name = Some(style_name.into());
        p
    }

    /// Set list numbering and return self.
    pub fn with_list(mut self, list: ListInfo) -> Self {
        self.list = Some(list);
        self
    }

    /// Add an image reference and return self.
    pub fn with_image(mut self, relationship_id: impl Into<String>) -> Self {
        self.images.push(relationship_id.into());
        self
    }

    /// Add plain text to the paragraph.
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.runs.push(TextRun::new(text));
    }

    /// Add a styled text run.
    pub fn add_run(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    /// Get plain text content of the paragraph.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Whether the paragraph has no visible text.
    pub fn is_blank(&self) -> bool {
        self.runs.iter().all(|r| r.text.trim().is_empty())
    }

    /// Whether the paragraph carries neither text nor images.
    pub fn is_empty(&self) -> bool {
        self.is_blank() && self.images.is_empty()
    }

    /// The single font size shared by every non-blank run.
    ///
    /// Returns `None` when a non-blank run has no size or when sizes differ.
    pub fn uniform_font_size(&self) -> Option<f32> {
        let mut sizes = self
            .runs
            .iter()
            .filter(|r| !r.text.trim().is_empty())
            .map(|r| r.style.font_size);
        let first = sizes.next()??;
        if sizes.all(|s| s.map_or(false, |s| (s - first).abs() < f32::EPSILON)) {
            Some(first)
        } else {
            None
        }
    }
}

/// A run of text with consistent formatting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Character formatting
    pub style: TextStyle,

    /// Hyperlink target when the run sits inside a hyperlink
    pub link: Option<String>,
}

impl TextRun {
    /// Create a new text run with default style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Create a bold text run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::new(text).with_style(TextStyle {
            bold: true,
            ..Default::default()
        })
    }

    /// Create an italic text run.
    pub fn italic(text: impl Into<String>) -> Self {
        Self::new(text).with_style(TextStyle {
            italic: true,
            ..Default::default()
        })
    }

    /// Create an underlined text run.
    pub fn underline(text: impl Into<String>) -> Self {
        Self::new(text).with_style(TextStyle {
            underline: true,
            ..Default::default()
        })
    }

    /// Replace the style and return self.
    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the font size in points and return self.
    pub fn with_size(mut self, size: f32) -> Self {
        self.style.font_size = Some(size);
        self
    }

    /// Set the hyperlink target and return self.
    pub fn with_link(mut self, target: impl Into<String>) -> Self {
        self.link = Some(target.into());
        self
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Character formatting of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Underlined text
    pub underline: bool,

    /// Font size in points
    pub font_size: Option<f32>,
}

impl TextStyle {
    /// Check if any emphasis is applied.
    pub fn has_styling(&self) -> bool {
        self.bold || self.italic || self.underline
    }
}

/// Kind of list a paragraph belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// Numbered list
    Ordered,
    /// Bulleted list
    Unordered,
}

/// Numbering information attached by the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListInfo {
    /// Ordered or unordered
    pub kind: ListKind,

    /// Nesting level (0 = top level)
    pub level: u8,
}

impl ListInfo {
    /// Create a new bulleted list item.
    pub fn bullet(level: u8) -> Self {
        Self {
            kind: ListKind::Unordered,
            level,
        }
    }

    /// Create a new numbered list item.
    pub fn numbered(level: u8) -> Self {
        Self {
            kind: ListKind::Ordered,
            level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_plain_text() {
        let mut p = Paragraph::new();
        p.add_text("Hello ");
        p.add_run(TextRun::bold("world"));
        p.add_text("!");

        assert_eq!(p.plain_text(), "Hello world!");
        assert!(!p.is_blank());
    }

    #[test]
    fn test_blank_and_empty() {
        let p = Paragraph::with_text("   ");
        assert!(p.is_blank());
        assert!(p.is_empty());

        let p = p.with_image("rId5");
        assert!(p.is_blank());
        assert!(!p.is_empty());
    }

    #[test]
    fn test_uniform_font_size() {
        let mut p = Paragraph::new();
        p.add_run(TextRun::new("Big ").with_size(20.0));
        p.add_run(TextRun::new(" "));
        p.add_run(TextRun::bold("title").with_size(20.0));
        assert_eq!(p.uniform_font_size(), Some(20.0));

        p.add_run(TextRun::new("small").with_size(11.0));
        assert_eq!(p.uniform_font_size(), None);

        assert_eq!(Paragraph::with_text("plain").uniform_font_size(), None);
    }

    #[test]
    fn test_unsized_run_breaks_uniformity() {
        let mut p = Paragraph::new();
        p.add_run(TextRun::new("Large").with_size(24.0));
        p.add_run(TextRun::new(" tail"));
        assert_eq!(p.uniform_font_size(), None);

        let mut q = Paragraph::new();
        q.add_run(TextRun::new("  "));
        q.add_run(TextRun::new("Large").with_size(24.0));
        assert_eq!(q.uniform_font_size(), Some(24.0));
    }

    #[test]
    fn test_text_style() {
        assert!(!TextStyle::default().has_styling());
        assert!(TextRun::underline("u").style.has_styling());
    }

    #[test]
    fn test_list_info() {
        assert_eq!(ListInfo::bullet(1).kind, ListKind::Unordered);
        assert_eq!(ListInfo::numbered(0).level, 0);
    }
}
