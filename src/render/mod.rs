//! Rendering: the conversion core that turns a parsed document into Markdown.
//!
//! [`DocumentAssembler`] walks the body once and hands each element to
//! [`HeadingResolver`], [`ListTracker`], [`RunFormatter`], [`TableSerializer`]
//! and [`ImageReferenceResolver`]. [`MarkdownRenderer`] prints the resulting
//! blocks and normalizes the text.

mod assembler;
mod cleanup;
mod heading;
mod image;
mod inline;
mod json;
mod list;
mod markdown;
mod options;
mod result;
mod table;

pub use assembler::{Assembly, DocumentAssembler};
pub use cleanup::{clean_heading_text, normalize_heading_blocks, CleanupOptions, CleanupPipeline};
pub use heading::{classify_style, HeadingResolver, HeadingRole, StyleClass, StyleContext};
pub use image::{image_markdown, ImageMap, ImageReferenceResolver};
pub use inline::{escape_markdown, RunFormatter};
pub use json::{blocks_to_json, render_json, to_json, JsonFormat};
pub use list::{detect_list, ListDetection, ListEntry, ListTracker, MAX_LIST_LEVEL};
pub use markdown::{to_markdown, to_markdown_with_stats, MarkdownRenderer};
pub use options::RenderOptions;
pub use result::{AssetInstruction, ExtractionStats, RenderResult, Warning};
pub use table::TableSerializer;
