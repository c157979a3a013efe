//! Output normalization and optional heading cleanup.

use unicode_normalization::UnicodeNormalization;

use super::RenderOptions;
use crate::model::Block;

/// Trailing sentence punctuation removed from headings, tried first.
const FULLWIDTH_HEADING_PUNCTUATION: &[char] = &['。', '！', '？', '：', '；', '，'];

/// Trailing ASCII punctuation removed from headings after the full-width pass.
const ASCII_HEADING_PUNCTUATION: &[char] = &[':', '.'];

/// Options for output cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Strip trailing spaces and tabs from every line
    pub strip_trailing_whitespace: bool,

    /// Maximum consecutive newlines (0 = unlimited)
    pub max_consecutive_newlines: u8,
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self {
            normalize_unicode: true,
            strip_trailing_whitespace: true,
            max_consecutive_newlines: 2,
        }
    }
}

/// Final text pass over rendered Markdown.
///
/// Line endings become `\n`, blank-line runs collapse to one, and the text
/// ends with exactly one newline.
#[derive(Debug, Clone, Default)]
pub struct CleanupPipeline {
    options: CleanupOptions,
}

impl CleanupPipeline {
    /// Create a new cleanup pipeline with the given options.
    pub fn new(options: CleanupOptions) -> Self {
        Self { options }
    }

    /// Pipeline configured from render options.
    pub fn for_render(options: &RenderOptions) -> Self {
        Self::new(CleanupOptions {
            normalize_unicode: options.normalize_unicode,
            ..CleanupOptions::default()
        })
    }

    /// Process text through the cleanup pipeline.
    pub fn process(&self, text: &str) -> String {
        let mut result = text.replace("\r\n", "\n").replace('\r', "\n");

        if self.options.normalize_unicode {
            result = result.nfc().collect();
        }

        if self.options.strip_trailing_whitespace {
            result = strip_trailing_whitespace(&result);
        }

        if self.options.max_consecutive_newlines > 0 {
            result = limit_newlines(&result, self.options.max_consecutive_newlines as usize);
        }

        let mut result = result.trim().to_string();
        result.push('\n');
        result
    }
}

fn strip_trailing_whitespace(text: &str) -> String {
    text.split('\n')
        .map(|line| line.trim_end_matches([' ', '\t']))
        .collect::<Vec<_>>()
        .join("\n")
}

fn limit_newlines(text: &str, max: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = 0;
    for c in text.chars() {
        if c == '\n' {
            run += 1;
            if run > max {
                continue;
            }
        } else {
            run = 0;
        }
        out.push(c);
    }
    out
}

/// Limit heading level jumps and strip trailing heading punctuation.
///
/// The first heading keeps its level; every later heading is at most one
/// level deeper than the heading before it.
pub fn normalize_heading_blocks(blocks: &mut [Block]) {
    let mut last_level: Option<u8> = None;
    for block in blocks.iter_mut() {
        if let Block::Heading { level, text } = block {
            if let Some(last) = last_level {
                let max_allowed = (last + 1).min(6);
                if *level > max_allowed {
                    log::debug!("Heading level {} -> {}: {}", level, max_allowed, text);
                    *level = max_allowed;
                }
            }
            last_level = Some(*level);

            let cleaned = clean_heading_text(text);
            if !cleaned.is_empty() {
                *text = cleaned;
            }
        }
    }
}

/// Remove trailing sentence punctuation from heading text.
pub fn clean_heading_text(text: &str) -> String {
    text.trim_end()
        .trim_end_matches(FULLWIDTH_HEADING_PUNCTUATION)
        .trim_end_matches(ASCII_HEADING_PUNCTUATION)
        .trim()
        .to_string()
}
