//! Rendering options and configuration.

/// Options for turning a parsed document into Markdown.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Name of the image folder next to the Markdown file
    pub asset_dir_name: String,

    /// Alt text used for image spans
    pub image_alt: String,

    /// Spaces per nesting level for list items
    pub list_indent: usize,

    /// Character to use for unordered list markers
    pub list_marker: char,

    /// Escape special Markdown characters in body text
    pub escape_special_chars: bool,

    /// Apply Unicode NFC normalization to the output
    pub normalize_unicode: bool,

    /// Include YAML frontmatter with metadata
    pub include_frontmatter: bool,

    /// Smooth heading level jumps and strip trailing heading punctuation
    pub normalize_headings: bool,

    /// Collect extraction statistics during rendering
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the asset folder name.
    pub fn with_asset_dir(mut self, name: impl Into<String>) -> Self {
        self.asset_dir_name = name.into();
        self
    }

    /// Set the alt text for images.
    pub fn with_image_alt(mut self, alt: impl Into<String>) -> Self {
        self.image_alt = alt.into();
        self
    }

    /// Set the indentation width per list level.
    pub fn with_list_indent(mut self, spaces: usize) -> Self {
        self.list_indent = spaces;
        self
    }

    /// Set the list marker character.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.list_marker = marker;
        self
    }

    /// Enable or disable Markdown escaping.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_special_chars = escape;
        self
    }

    /// Enable or disable Unicode normalization.
    pub fn with_unicode_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }

    /// Enable or disable frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }

    /// Enable or disable heading normalization.
    pub fn with_heading_normalization(mut self, normalize: bool) -> Self {
        self.normalize_headings = normalize;
        self
    }

    /// Enable statistics collection during rendering.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            asset_dir_name: "assets".to_string(),
            image_alt: "Image".to_string(),
            list_indent: 2,
            list_marker: '-',
            escape_special_chars: true,
            normalize_unicode: true,
            include_frontmatter: false,
            normalize_headings: false,
            collect_stats: false,
        }
    }
}
