//! Document model types.
//!
//! Two halves live here: the input model produced by the parser
//! ([`Document`], [`Paragraph`], [`Table`], ...) and the output block
//! model produced by the assembler ([`Block`], [`InlineSpan`]).

mod block;
mod document;
mod paragraph;
mod resource;
mod table;

pub use block::{Block, FormatSet, ImageRef, InlineSpan};
pub use document::{BodyElement, Document, Metadata};
pub use paragraph::{ListInfo, ListKind, Paragraph, TextRun, TextStyle};
pub use resource::Resource;
pub use table::{Table, TableCell, TableRow};
