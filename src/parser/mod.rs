//! DOCX parsing module: the boundary between the Word container and the document model.

mod docx_parser;
mod legacy;
mod options;
mod styles;
mod xml;

pub use docx_parser::DocxParser;
pub use legacy::{convert_legacy_doc, resolve_soffice_binary, SOFFICE_ENV_VARS};
pub use options::{ErrorMode, ParseOptions};
