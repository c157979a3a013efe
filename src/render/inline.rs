//! Inline formatting: turns text runs into minimal Markdown emphasis markup.

use crate::model::{FormatSet, InlineSpan, TextRun};

/// Characters escaped in body text.
const MARKDOWN_SPECIAL: &[char] = &['\\', '*', '_', '`', '[', ']'];

/// Escape Markdown-significant characters.
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if MARKDOWN_SPECIAL.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Renders inline spans as Markdown.
///
/// Underline becomes `<u>…</u>`, bold `**…**`, italic `*…*` and bold+italic a
/// single `***…***` wrap. Underline sits outside the emphasis markers, a
/// hyperlink outside everything.
#[derive(Debug, Clone, Copy)]
pub struct RunFormatter {
    escape: bool,
}

impl Default for RunFormatter {
    fn default() -> Self {
        Self { escape: true }
    }
}

impl RunFormatter {
    /// Create a formatter; `escape` controls Markdown escaping of text.
    pub fn new(escape: bool) -> Self {
        Self { escape }
    }

    /// Convert source runs into spans, keeping order.
    pub fn spans_from_runs(runs: &[TextRun]) -> Vec<InlineSpan> {
        runs.iter()
            .map(|run| InlineSpan {
                text: run.text.clone(),
                format: FormatSet {
                    bold: run.style.bold,
                    italic: run.style.italic,
                    underline: run.style.underline,
                },
                link: run.link.clone(),
            })
            .collect()
    }

    /// Merge adjacent spans with identical format set and link.
    ///
    /// Empty spans are dropped. A stretch of whitespace-only spans sitting
    /// between two spans that could merge is absorbed, so `**a** **b**`
    /// becomes `**a b**`. Merging an already merged sequence returns it unchanged.
    pub fn merge(spans: &[InlineSpan]) -> Vec<InlineSpan> {
        let mut joined: Vec<InlineSpan> = Vec::with_capacity(spans.len());
        for span in spans.iter().filter(|s| !s.text.is_empty()) {
            match joined.last_mut() {
                Some(last) if last.mergeable_with(span) => last.text.push_str(&span.text),
                _ => joined.push(span.clone()),
            }
        }

        let mut merged: Vec<InlineSpan> = Vec::with_capacity(joined.len());
        let mut i = 0;
        while i < joined.len() {
            let span = &joined[i];
            if let Some(last) = merged.last_mut() {
                if last.mergeable_with(span) {
                    last.text.push_str(&span.text);
                    i += 1;
                    continue;
                }
                if is_gap(span) {
                    let next = joined[i..].iter().position(|s| !is_gap(s)).map(|p| i + p);
                    if let Some(end) = next.filter(|end| last.mergeable_with(&joined[*end])) {
                        for absorbed in &joined[i..=end] {
                            last.text.push_str(&absorbed.text);
                        }
                        i = end + 1;
                        continue;
                    }
                }
            }
            merged.push(span.clone());
            i += 1;
        }

        merged
    }

    /// Render a span sequence; spans are merged first.
    pub fn render(&self, spans: &[InlineSpan]) -> String {
        Self::merge(spans)
            .iter()
            .map(|span| self.render_span(span))
            .collect()
    }

    /// Render source runs of one paragraph.
    pub fn render_runs(&self, runs: &[TextRun]) -> String {
        self.render(&Self::spans_from_runs(runs))
    }

    /// Render a single span.
    pub fn render_span(&self, span: &InlineSpan) -> String {
        let text = if self.escape {
            escape_markdown(&span.text)
        } else {
            span.text.clone()
        };

        // Markers around whitespace produce literal asterisks; keep it plain.
        if text.trim().is_empty() {
            return text;
        }

        let core = text.trim();
        let lead = &text[..text.len() - text.trim_start().len()];
        let trail = &text[text.trim_end().len()..];

        let mut inner = match (span.format.bold, span.format.italic) {
            (true, true) => format!("***{}***", core),
            (true, false) => format!("**{}**", core),
            (false, true) => format!("*{}*", core),
            (false, false) => core.to_string(),
        };
        if span.format.underline {
            inner = format!("<u>{}</u>", inner);
        }
        if let Some(ref target) = span.link {
            inner = format!("[{}]({})", inner, link_destination(target));
        }

        format!("{}{}{}", lead, inner, trail)
    }
}

/// Whitespace-only text outside any link.
fn is_gap(span: &InlineSpan) -> bool {
    span.link.is_none() && span.text.trim().is_empty()
}

/// Link destinations with spaces or parentheses use the `<...>` form.
fn link_destination(target: &str) -> String {
    if target.contains(|c: char| c.is_whitespace() || c == '(' || c == ')') {
        format!("<{}>", target)
    } else {
        target.to_string()
    }
}
