//! Lays a summary out as a fixed-width SVG document.
//!
//! The layout is a single column of blocks stacked top to bottom. Heights are
//! fixed per block kind (text paragraphs grow with their wrapped line count),
//! so the document's pixel size is known before anything is rasterized.

use crate::domain::model::VisualDocument;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

const FONT_FAMILY: &str = "Inter, Segoe UI, Noto Sans, sans-serif";
const TEXT_COLOR: &str = "#1f2937";
const MUTED_COLOR: &str = "#4b5563";
const ACCENT_COLOR: &str = "#1d4ed8";
const PANEL_COLOR: &str = "#f3f4f6";
const SUCCESS_COLOR: &str = "#166534";
const SUCCESS_PANEL: &str = "#dcfce7";

const TEXT_FONT_SIZE: f32 = 16.0;
const TEXT_LINE_HEIGHT: u32 = 22;
/// Average glyph advance relative to font size, used for wrapping.
const GLYPH_WIDTH_RATIO: f32 = 0.55;
const IMAGE_BOX_HEIGHT: u32 = 256;

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title(String),
    Subtitle(String),
    Section(String),
    Field { label: String, value: String },
    /// A cost line: label and optional breakdown on the left, amount on the right.
    Amount {
        label: String,
        detail: Option<String>,
        value: String,
    },
    Highlight { label: String, value: String },
    Text(String),
    /// Image given as an `href` usvg can resolve, typically a `data:` URI.
    Image { href: String },
    Callout(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentStyle {
    pub width: u32,
    pub padding: u32,
}

impl Default for DocumentStyle {
    fn default() -> Self {
        Self {
            width: 720,
            padding: 32,
        }
    }
}

impl DocumentStyle {
    fn content_width(&self) -> u32 {
        self.width.saturating_sub(self.padding * 2).max(1)
    }

    fn chars_per_line(&self) -> usize {
        ((self.content_width() as f32) / (TEXT_FONT_SIZE * GLYPH_WIDTH_RATIO))
            .floor()
            .max(1.0) as usize
    }
}

/// Greedy word wrap; explicit newlines are kept.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };
            if needed > max_chars && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn block_height(block: &Block, style: &DocumentStyle) -> u32 {
    match block {
        Block::Title(_) => 44,
        Block::Subtitle(_) => 26,
        Block::Section(_) => 48,
        Block::Field { .. } => 50,
        Block::Amount { detail, .. } => {
            if detail.is_some() {
                56
            } else {
                40
            }
        }
        Block::Highlight { .. } => 64,
        Block::Text(text) => {
            let lines = wrap_text(text, style.chars_per_line()).len() as u32;
            lines * TEXT_LINE_HEIGHT + 16
        }
        Block::Image { .. } => IMAGE_BOX_HEIGHT + 16,
        Block::Callout(_) => 64,
    }
}

pub fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[allow(clippy::too_many_arguments)]
fn text_element(
    svg: &mut String,
    x: u32,
    y: u32,
    size: f32,
    weight: u32,
    fill: &str,
    anchor: &str,
    content: &str,
) {
    let _ = writeln!(
        svg,
        "  <text x='{}' y='{}' font-family='{}' font-size='{}' font-weight='{}' fill='{}' text-anchor='{}'>{}</text>",
        x,
        y,
        FONT_FAMILY,
        size,
        weight,
        fill,
        anchor,
        escape_xml(content)
    );
}

/// Builds the SVG for `blocks`. Height is the sum of block heights plus padding.
pub fn render_document(blocks: &[Block], style: &DocumentStyle) -> VisualDocument {
    let width = style.width.max(style.padding * 2 + 1);
    let left = style.padding;
    let right = width - style.padding;
    let center = width / 2;
    let content_width = style.content_width();

    let height = style.padding * 2
        + blocks
            .iter()
            .map(|block| block_height(block, style))
            .sum::<u32>();

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns='http://www.w3.org/2000/svg' xmlns:xlink='http://www.w3.org/1999/xlink' width='{}' height='{}' viewBox='0 0 {} {}'>",
        width, height, width, height
    );
    let _ = writeln!(svg, "  <rect width='{}' height='{}' fill='#ffffff'/>", width, height);

    let mut y = style.padding;
    for block in blocks {
        let block_h = block_height(block, style);
        match block {
            Block::Title(title) => {
                text_element(&mut svg, center, y + 32, 28.0, 700, TEXT_COLOR, "middle", title);
            }
            Block::Subtitle(subtitle) => {
                text_element(&mut svg, center, y + 18, 15.0, 400, MUTED_COLOR, "middle", subtitle);
            }
            Block::Section(heading) => {
                text_element(&mut svg, left, y + 34, 20.0, 700, ACCENT_COLOR, "start", heading);
                let _ = writeln!(
                    svg,
                    "  <line x1='{}' y1='{}' x2='{}' y2='{}' stroke='#e5e7eb' stroke-width='1'/>",
                    left,
                    y + 42,
                    right,
                    y + 42
                );
            }
            Block::Field { label, value } => {
                let _ = writeln!(
                    svg,
                    "  <rect x='{}' y='{}' width='{}' height='{}' rx='8' fill='{}'/>",
                    left,
                    y + 2,
                    content_width,
                    block_h - 4,
                    PANEL_COLOR
                );
                text_element(&mut svg, left + 12, y + 20, 13.0, 400, MUTED_COLOR, "start", label);
                text_element(&mut svg, left + 12, y + 40, 17.0, 600, TEXT_COLOR, "start", value);
            }
            Block::Amount {
                label,
                detail,
                value,
            } => {
                text_element(&mut svg, left, y + 22, 16.0, 500, TEXT_COLOR, "start", label);
                if let Some(detail) = detail {
                    text_element(&mut svg, left, y + 42, 13.0, 400, MUTED_COLOR, "start", detail);
                }
                text_element(&mut svg, right, y + 22, 17.0, 600, TEXT_COLOR, "end", value);
                let _ = writeln!(
                    svg,
                    "  <line x1='{}' y1='{}' x2='{}' y2='{}' stroke='#e5e7eb' stroke-width='1'/>",
                    left,
                    y + block_h - 2,
                    right,
                    y + block_h - 2
                );
            }
            Block::Highlight { label, value } => {
                let _ = writeln!(
                    svg,
                    "  <rect x='{}' y='{}' width='{}' height='{}' rx='10' fill='#eff6ff' stroke='#bfdbfe' stroke-width='2'/>",
                    left,
                    y + 4,
                    content_width,
                    block_h - 8
                );
                text_element(&mut svg, left + 16, y + 40, 18.0, 700, TEXT_COLOR, "start", label);
                text_element(&mut svg, right - 16, y + 41, 24.0, 700, ACCENT_COLOR, "end", value);
            }
            Block::Text(text) => {
                for (i, line) in wrap_text(text, style.chars_per_line()).iter().enumerate() {
                    let line_y = y + 8 + TEXT_LINE_HEIGHT * (i as u32 + 1) - 6;
                    text_element(
                        &mut svg,
                        left,
                        line_y,
                        TEXT_FONT_SIZE,
                        400,
                        TEXT_COLOR,
                        "start",
                        line,
                    );
                }
            }
            Block::Image { href } => {
                let _ = writeln!(
                    svg,
                    "  <image x='{}' y='{}' width='{}' height='{}' preserveAspectRatio='xMidYMid meet' xlink:href='{}'/>",
                    left,
                    y + 8,
                    content_width,
                    IMAGE_BOX_HEIGHT,
                    escape_xml(href)
                );
            }
            Block::Callout(text) => {
                let _ = writeln!(
                    svg,
                    "  <rect x='{}' y='{}' width='{}' height='{}' rx='10' fill='{}' stroke='#bbf7d0' stroke-width='2'/>",
                    left,
                    y + 6,
                    content_width,
                    block_h - 12,
                    SUCCESS_PANEL
                );
                text_element(&mut svg, center, y + 39, 18.0, 600, SUCCESS_COLOR, "middle", text);
            }
        }
        y += block_h;
    }

    let _ = writeln!(svg, "</svg>");

    VisualDocument { svg, width, height }
}
