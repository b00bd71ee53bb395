//! Text measurement for the prompter surface.
//!
//! The renderer has no DOM to query, so the vertical geometry of a script is
//! estimated the same way everywhere: glyph units per character, greedy word
//! wrap against the available width, fixed-height marker blocks. Both the
//! canvas and the cue navigator read offsets from the same [`ContentLayout`].

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

/// Literal cue marker, also accepted in its HTML-escaped form.
pub static MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r">>>|&gt;&gt;&gt;").expect("valid marker regex"));

pub const DEFAULT_LINE_SPACING: f32 = 1.5;
pub const DEFAULT_GLYPH_SCALE: f32 = 0.55;
pub const MARKER_BLOCK_HEIGHT: f32 = 48.0;
/// Share of the viewport that may scroll past the end of the text.
pub const TAIL_VIEWPORT_SHARE: f32 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub font_size: f32,
    pub line_spacing: f32,
    /// Usable text width in pixels, margins already removed.
    pub width: f32,
    pub glyph_scale: f32,
}

impl LayoutParams {
    pub fn new(font_size: f32, width: f32) -> Self {
        Self {
            font_size,
            line_spacing: DEFAULT_LINE_SPACING,
            width,
            glyph_scale: DEFAULT_GLYPH_SCALE,
        }
    }

    pub fn line_height(&self) -> f32 {
        self.font_size.max(1.0) * self.line_spacing.max(0.8)
    }

    fn max_units_per_line(&self) -> f32 {
        let glyph_width = (self.font_size.max(1.0) * self.glyph_scale).max(1.0);
        (self.width.max(0.0) / glyph_width).max(8.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutBlock {
    Line { text: String, top: f32, height: f32 },
    /// `index` is 1-based, in document order.
    Marker { index: usize, top: f32, height: f32 },
}

impl LayoutBlock {
    pub fn top(&self) -> f32 {
        match self {
            LayoutBlock::Line { top, .. } | LayoutBlock::Marker { top, .. } => *top,
        }
    }

    pub fn height(&self) -> f32 {
        match self {
            LayoutBlock::Line { height, .. } | LayoutBlock::Marker { height, .. } => *height,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.top() + self.height()
    }

    pub fn center(&self) -> f32 {
        self.top() + self.height() / 2.0
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentLayout {
    blocks: Vec<LayoutBlock>,
    text_height: f32,
}

impl ContentLayout {
    pub fn measure(content: &str, params: &LayoutParams) -> Self {
        let line_height = params.line_height();
        let max_units = params.max_units_per_line();
        let mut blocks = Vec::new();
        let mut cursor = 0.0f32;
        let mut marker_index = 0usize;

        let push_text = |blocks: &mut Vec<LayoutBlock>, cursor: &mut f32, text: &str| {
            for line in wrap_segment(text, max_units) {
                blocks.push(LayoutBlock::Line {
                    text: line,
                    top: *cursor,
                    height: line_height,
                });
                *cursor += line_height;
            }
        };

        for source_line in content.lines() {
            let mut last_end = 0;
            let mut had_marker = false;
            for found in MARKER_RE.find_iter(source_line) {
                let before = source_line[last_end..found.start()].trim();
                if !before.is_empty() {
                    push_text(&mut blocks, &mut cursor, before);
                }
                marker_index += 1;
                blocks.push(LayoutBlock::Marker {
                    index: marker_index,
                    top: cursor,
                    height: MARKER_BLOCK_HEIGHT,
                });
                cursor += MARKER_BLOCK_HEIGHT;
                last_end = found.end();
                had_marker = true;
            }
            let rest = &source_line[last_end..];
            if !had_marker || !rest.trim().is_empty() {
                push_text(&mut blocks, &mut cursor, rest.trim_end());
            }
        }

        Self {
            blocks,
            text_height: cursor,
        }
    }

    pub fn blocks(&self) -> &[LayoutBlock] {
        &self.blocks
    }

    pub fn text_height(&self) -> f32 {
        self.text_height
    }

    /// Vertical centres of the markers, strictly increasing.
    pub fn marker_centers(&self) -> Vec<f32> {
        self.blocks
            .iter()
            .filter(|block| matches!(block, LayoutBlock::Marker { .. }))
            .map(LayoutBlock::center)
            .collect()
    }

    pub fn max_scroll(&self, container_height: f32) -> f32 {
        max_scroll(self.text_height, container_height)
    }

    /// Blocks overlapping `[from, to)` in content coordinates.
    pub fn visible(&self, from: f32, to: f32) -> impl Iterator<Item = &LayoutBlock> {
        self.blocks
            .iter()
            .filter(move |block| block.bottom() > from && block.top() < to)
    }

    pub fn marker_at(&self, content_y: f32) -> Option<usize> {
        self.blocks.iter().find_map(|block| match block {
            LayoutBlock::Marker { index, top, height }
                if content_y >= *top && content_y < top + height =>
            {
                Some(*index)
            }
            _ => None,
        })
    }
}

pub fn max_scroll(text_height: f32, container_height: f32) -> f32 {
    let max = text_height - container_height * TAIL_VIEWPORT_SHARE;
    if max.is_finite() { max.max(0.0) } else { 0.0 }
}

pub fn marker_count(content: &str) -> usize {
    MARKER_RE.find_iter(content).count()
}

/// Byte ranges of every marker, in document order.
pub fn marker_spans(content: &str) -> Vec<Range<usize>> {
    MARKER_RE.find_iter(content).map(|found| found.range()).collect()
}

fn glyph_units(ch: char) -> f32 {
    if ch.is_whitespace() {
        0.45
    } else if ch.is_ascii_punctuation() {
        0.55
    } else if ch.is_ascii() {
        1.0
    } else {
        1.8
    }
}

fn word_units(word: &str) -> f32 {
    word.chars().map(glyph_units).sum()
}

/// Greedy wrap. An empty segment still occupies one blank line.
fn wrap_segment(text: &str, max_units: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_units = 0.0f32;
    let space = glyph_units(' ');

    for word in text.split_whitespace() {
        let units = word_units(word);
        if !current.is_empty() && current_units + space + units <= max_units {
            current.push(' ');
            current.push_str(word);
            current_units += space + units;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_units = 0.0;
        }
        if units <= max_units {
            current.push_str(word);
            current_units = units;
            continue;
        }
        for ch in word.chars() {
            let ch_units = glyph_units(ch);
            if current_units + ch_units > max_units && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_units = 0.0;
            }
            current.push(ch);
            current_units += ch_units;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
