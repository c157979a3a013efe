//! List detection and numbering.

use crate::model::{InlineSpan, ListKind, Paragraph};

/// Bullet glyphs recognised at the start of a paragraph (followed by a space).
const BULLET_MARKERS: &[char] = &['•', '◦', '▪', '▫', '‣', '-', '*', '+'];

/// Glyphs that conventionally mark the second nesting level.
const NESTED_MARKERS: &[&str] = &["o ", "▪", "◦"];

/// Deepest level rendered; anything deeper collapses onto it.
pub const MAX_LIST_LEVEL: u8 = 1;

/// A paragraph recognised as a list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListDetection {
    /// Numbered or bulleted
    pub kind: ListKind,
    /// Source nesting level (before collapsing)
    pub level: u8,
    /// Characters of visible marker text to drop from the start of the paragraph
    pub marker_chars: usize,
}

/// Decide whether a paragraph is a list item.
///
/// Numbering attached by the document wins. Otherwise a list style name
/// ("list"/"bullet"), a leading bullet glyph or a `1.`/`1）` number marker
/// makes the paragraph a list item.
pub fn detect_list(paragraph: &Paragraph) -> Option<ListDetection> {
    let text = paragraph.plain_text();
    let style = paragraph
        .style_name
        .as_deref()
        .map(str::to_lowercase)
        .unwrap_or_default();
    let list_style = style.contains("list") || style.contains("bullet");

    let number_marker = number_marker_len(&text);
    let bullet_marker = bullet_marker_len(&text);
    let nested_marker = nested_marker_len(&text);

    let (kind, marker_chars) = match paragraph.list {
        Some(info) => (
            info.kind,
            number_marker.or(bullet_marker).unwrap_or(0),
        ),
        None => {
            if let Some(len) = number_marker {
                (ListKind::Ordered, len)
            } else if let Some(len) = bullet_marker {
                (ListKind::Unordered, len)
            } else if list_style {
                let kind = if style.contains("number") || style.contains("ordered") {
                    ListKind::Ordered
                } else {
                    ListKind::Unordered
                };
                (kind, nested_marker.unwrap_or(0))
            } else {
                return None;
            }
        }
    };

    let level = paragraph
        .list
        .map(|info| info.level)
        .or(paragraph.indent_level)
        .filter(|level| *level > 0)
        .unwrap_or_else(|| u8::from(nested_marker.is_some()));

    Some(ListDetection {
        kind,
        level,
        marker_chars,
    })
}

/// Length in chars of a leading `12.` / `12）` marker plus surrounding whitespace.
fn number_marker_len(text: &str) -> Option<usize> {
    let trimmed = text.trim_start();
    let lead = text.chars().count() - trimmed.chars().count();
    let digits = trimmed.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let mut rest = trimmed.chars().skip(digits);
    if !matches!(rest.next(), Some('.') | Some('）')) {
        return None;
    }
    let spaces = rest.take_while(|c| c.is_whitespace()).count();
    if spaces == 0 {
        return None;
    }
    Some(lead + digits + 1 + spaces)
}

/// Length in chars of a leading bullet glyph plus surrounding whitespace.
fn bullet_marker_len(text: &str) -> Option<usize> {
    let trimmed = text.trim_start();
    let lead = text.chars().count() - trimmed.chars().count();
    let mut chars = trimmed.chars();
    let marker = chars.next()?;
    if !BULLET_MARKERS.contains(&marker) {
        return None;
    }
    let spaces = chars.take_while(|c| *c == ' ' || *c == '\t').count();
    if spaces == 0 {
        return None;
    }
    Some(lead + 1 + spaces)
}

/// Length in chars of a leading `o `/`▪`/`◦` nesting marker plus whitespace.
fn nested_marker_len(text: &str) -> Option<usize> {
    let trimmed = text.trim_start();
    let lead = text.chars().count() - trimmed.chars().count();
    let marker = NESTED_MARKERS.iter().find(|m| trimmed.starts_with(**m))?;
    let marker_len = marker.chars().count();
    let spaces = trimmed
        .chars()
        .skip(marker_len)
        .take_while(|c| c.is_whitespace())
        .count();
    Some(lead + marker_len + spaces)
}

/// Remove `count` characters from the front of a span sequence.
pub fn strip_leading_chars(spans: &mut Vec<InlineSpan>, mut count: usize) {
    while count > 0 && !spans.is_empty() {
        let len = spans[0].text.chars().count();
        if len <= count {
            spans.remove(0);
            count -= len;
        } else {
            let byte_index = spans[0]
                .text
                .char_indices()
                .nth(count)
                .map_or(spans[0].text.len(), |(i, _)| i);
            spans[0].text.drain(..byte_index);
            count = 0;
        }
    }
}

/// Position of one list item in its list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListEntry {
    /// Numbered or bulleted
    pub ordered: bool,
    /// Rendered nesting level, 0 or 1
    pub level: u8,
    /// Ordinal for numbered items
    pub index: Option<u32>,
}

impl ListEntry {
    /// Indentation plus marker, e.g. `"  2. "` or `"- "`.
    pub fn prefix(&self, indent_width: usize, bullet: char) -> String {
        let indent = " ".repeat(indent_width * self.level as usize);
        match self.index {
            Some(n) if self.ordered => format!("{}{}. ", indent, n),
            _ => format!("{}{} ", indent, bullet),
        }
    }
}

/// Running state of the list being emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ListState {
    kinds: [Option<ListKind>; (MAX_LIST_LEVEL + 1) as usize],
    counters: [u32; (MAX_LIST_LEVEL + 1) as usize],
    level: u8,
}

/// Tracks list kind, level and ordinal across consecutive list paragraphs.
///
/// Numbering continues while items follow each other. A change of kind at
/// a level, entering a deeper level, or any non-list block restarts at 1.
/// Returning to a shallower level continues that level's count.
#[derive(Debug, Clone, Default)]
pub struct ListTracker {
    state: Option<ListState>,
}

impl ListTracker {
    /// Create a tracker with no active list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a list is currently open.
    pub fn in_list(&self) -> bool {
        self.state.is_some()
    }

    /// Register the next list item.
    pub fn next(&mut self, kind: ListKind, level: u8) -> ListEntry {
        let level = level.min(MAX_LIST_LEVEL);
        let slot = level as usize;
        let state = self.state.get_or_insert_with(ListState::default);

        if level > state.level {
            for deeper in (state.level as usize + 1)..=slot {
                state.kinds[deeper] = None;
                state.counters[deeper] = 0;
            }
        } else if level < state.level {
            for deeper in (slot + 1)..=(state.level as usize) {
                state.kinds[deeper] = None;
                state.counters[deeper] = 0;
            }
        }
        if state.kinds[slot] != Some(kind) {
            log::debug!("List kind at level {} is now {:?}", level, kind);
            state.kinds[slot] = Some(kind);
            state.counters[slot] = 0;
        }
        state.level = level;

        let index = match kind {
            ListKind::Ordered => {
                state.counters[slot] += 1;
                Some(state.counters[slot])
            }
            ListKind::Unordered => None,
        };

        ListEntry {
            ordered: kind == ListKind::Ordered,
            level,
            index,
        }
    }

    /// A non-list block ends the current list.
    pub fn interrupt(&mut self) {
        if self.state.take().is_some() {
            log::debug!("List interrupted");
        }
    }
}
