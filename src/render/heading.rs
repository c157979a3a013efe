//! Heading level inference.
//!
//! Two strategies are reconciled here. Declared heading styles always win.
//! Only when a document declares no heading style at all does font size
//! decide: sizes above the body-text baseline become levels 1, 2, 3, ...
//! from largest to smallest. A title-styled paragraph shifts every other
//! heading down one level; that shift is applied by the assembler.

use std::collections::HashMap;

use crate::model::{Document, Paragraph};

/// Closed classification of a paragraph style name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleClass {
    /// "Heading N" / "HeadingN"; levels above 6 are clamped to 6
    Heading(u8),
    /// The document title style
    Title,
    /// No style or the default "Normal" style
    Normal,
    /// Any other named style
    Unknown,
}

/// Classify a paragraph style name.
pub fn classify_style(style_name: Option<&str>) -> StyleClass {
    let Some(name) = style_name.map(str::trim) else {
        return StyleClass::Normal;
    };
    let lower = name.to_lowercase();
    if lower == "title" {
        return StyleClass::Title;
    }
    if lower.is_empty() || lower == "normal" {
        return StyleClass::Normal;
    }
    if let Some(rest) = lower.strip_prefix("heading") {
        if let Ok(level) = rest.trim_start().parse::<u8>() {
            if level >= 1 {
                return StyleClass::Heading(level.min(6));
            }
        }
    }
    StyleClass::Unknown
}

/// Font sizes compared in half-point steps, the resolution of `w:sz`.
fn size_key(size: f32) -> u32 {
    (size * 2.0).round().max(0.0) as u32
}

/// Per-document facts for heading inference, computed once before assembly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleContext {
    /// Most frequent uniform font size among body-like paragraphs
    pub baseline_font_size: Option<f32>,

    /// Sizes above the baseline, largest first, paired with their level
    pub heading_size_thresholds: Vec<(f32, u8)>,

    /// Whether a non-empty title-styled paragraph exists
    pub has_explicit_title_style: bool,

    /// Whether any paragraph declares a heading style
    pub has_heading_styles: bool,
}

impl StyleContext {
    /// Scan every body paragraph once.
    pub fn build(document: &Document) -> Self {
        Self::from_paragraphs(document.paragraphs())
    }

    /// Scan a paragraph sequence once.
    pub fn from_paragraphs<'a>(paragraphs: impl IntoIterator<Item = &'a Paragraph>) -> Self {
        let mut context = StyleContext::default();
        let mut frequencies: HashMap<u32, usize> = HashMap::new();
        let mut sizes: HashMap<u32, f32> = HashMap::new();

        for paragraph in paragraphs {
            if paragraph.is_blank() {
                continue;
            }
            match classify_style(paragraph.style_name.as_deref()) {
                StyleClass::Heading(_) => context.has_heading_styles = true,
                StyleClass::Title => context.has_explicit_title_style = true,
                StyleClass::Normal | StyleClass::Unknown => {
                    if let Some(size) = paragraph.uniform_font_size() {
                        let key = size_key(size);
                        *frequencies.entry(key).or_insert(0) += 1;
                        sizes.entry(key).or_insert(size);
                    }
                }
            }
        }

        // Ties go to the smaller size so more distinct sizes count as headings.
        let baseline = frequencies
            .iter()
            .max_by(|(ka, ca), (kb, cb)| ca.cmp(cb).then(kb.cmp(ka)))
            .map(|(key, _)| *key);

        if let Some(baseline) = baseline {
            context.baseline_font_size = sizes.get(&baseline).copied();
            let mut larger: Vec<u32> = sizes.keys().copied().filter(|k| *k > baseline).collect();
            larger.sort_unstable_by(|a, b| b.cmp(a));
            context.heading_size_thresholds = larger
                .into_iter()
                .enumerate()
                .map(|(i, key)| (key as f32 / 2.0, (i + 1).min(u8::MAX as usize) as u8))
                .collect();
        }

        log::debug!(
            "Style context: heading styles={}, title={}, baseline={:?}, size levels={:?}",
            context.has_heading_styles,
            context.has_explicit_title_style,
            context.baseline_font_size,
            context.heading_size_thresholds
        );
        context
    }

    /// Whether font size is used to infer headings.
    pub fn uses_font_size_detection(&self) -> bool {
        !self.has_heading_styles && !self.heading_size_thresholds.is_empty()
    }

    fn level_for_size(&self, size: f32) -> Option<u8> {
        let key = size_key(size);
        self.heading_size_thresholds
            .iter()
            .find(|(s, _)| size_key(*s) == key)
            .map(|(_, level)| *level)
    }
}

/// Heading role of one paragraph before the title shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingRole {
    /// Body text
    Body,
    /// Title-styled paragraph
    Title,
    /// Heading with its unshifted level (may exceed 6)
    Heading(u8),
}

/// Decides the heading level of paragraphs against an immutable [`StyleContext`].
#[derive(Debug, Clone, Copy)]
pub struct HeadingResolver<'a> {
    context: &'a StyleContext,
}

impl<'a> HeadingResolver<'a> {
    /// Create a resolver for one document.
    pub fn new(context: &'a StyleContext) -> Self {
        Self { context }
    }

    /// The context this resolver reads.
    pub fn context(&self) -> &StyleContext {
        self.context
    }

    /// Classify a paragraph.
    pub fn classify(&self, paragraph: &Paragraph) -> HeadingRole {
        if paragraph.is_blank() {
            return HeadingRole::Body;
        }
        match classify_style(paragraph.style_name.as_deref()) {
            StyleClass::Heading(level) => HeadingRole::Heading(level),
            StyleClass::Title => HeadingRole::Title,
            StyleClass::Normal | StyleClass::Unknown => {
                if !self.context.uses_font_size_detection() {
                    return HeadingRole::Body;
                }
                paragraph
                    .uniform_font_size()
                    .and_then(|size| self.context.level_for_size(size))
                    .map_or(HeadingRole::Body, HeadingRole::Heading)
            }
        }
    }

    /// Raw heading level: 0 for body text and for the title itself.
    pub fn resolve(&self, paragraph: &Paragraph) -> u8 {
        match self.classify(paragraph) {
            HeadingRole::Heading(level) => level,
            HeadingRole::Body | HeadingRole::Title => 0,
        }
    }

    /// Output level of a role after the title shift and clamping, `None` for body text.
    pub fn emitted_level(&self, role: HeadingRole) -> Option<u8> {
        match role {
            HeadingRole::Body => None,
            HeadingRole::Title => Some(1),
            HeadingRole::Heading(level) => {
                let shift = u8::from(self.context.has_explicit_title_style);
                Some(level.saturating_add(shift).clamp(1, 6))
            }
        }
    }
}
