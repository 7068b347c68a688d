//! Character-cell layout: one unit is one terminal column or row.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::{LayoutEngine, LayoutSpec, RenderNode};
use crate::component::{Alignment, CellType, Color, Component, FontWeight, Point, Rect, Size};

/// Reference engine that word-wraps text by display width.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellLayoutEngine;

impl CellLayoutEngine {
    pub fn new() -> Self {
        Self
    }
}

impl LayoutEngine for CellLayoutEngine {
    fn measure(&self, component: &Component, available: Size) -> Size {
        match component.layout() {
            LayoutSpec::Fixed { height } => Size::new(finite_or_zero(available.width), height),
            LayoutSpec::Label {
                text,
                insets,
                line_padding,
                min_height,
                trailing_reserve,
                ..
            } => {
                let chrome = insets.horizontal() + trailing_reserve;
                let lines = wrap(&text, columns(available.width - chrome));
                let content = lines_height(lines.len(), line_padding);
                let height = (content + insets.vertical()).max(min_height);
                let width = if available.width.is_finite() {
                    available.width
                } else {
                    let widest = lines.iter().map(|l| l.width()).max().unwrap_or(0);
                    widest as f64 + chrome
                };
                Size::new(width, height)
            }
        }
    }

    fn arrange(&self, component: &Component, origin: Point, size: Size) -> RenderNode {
        let mut node = RenderNode::new(component.cell_type(), Rect::new(origin, size));
        node.background = background(component);

        if let LayoutSpec::Label {
            text,
            font,
            insets,
            trailing_reserve,
            ..
        } = component.layout()
        {
            let inner = columns(size.width - insets.horizontal() - trailing_reserve);
            let alignment = alignment(component);
            node.alignment = alignment;
            node.lines = wrap(&text, inner)
                .into_iter()
                .map(|line| align(line, inner, alignment))
                .collect();
            if font.weight == FontWeight::Bold {
                node.attributes.push("bold".to_string());
            }

            if let Component::Expandable(expandable) = component {
                let chevron = expandable.chevron_size;
                let chevron_origin = Point::new(
                    origin.x + size.width - insets.right - chevron.width,
                    origin.y + insets.top,
                );
                let mut child =
                    RenderNode::new(CellType::EXPANDABLE, Rect::new(chevron_origin, chevron));
                child.lines = vec![if expandable.expanded { "▾" } else { "▸" }.to_string()];
                node.children.push(child);
            }
        }

        if let Some(style) = component.style() {
            style.apply(&mut node);
        }
        node
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// Usable columns for a width; unbounded widths never wrap.
fn columns(width: f64) -> usize {
    if !width.is_finite() {
        return usize::MAX;
    }
    (width.floor() as usize).max(1)
}

fn lines_height(count: usize, line_padding: f64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    count as f64 + (count - 1) as f64 * line_padding
}

fn background(component: &Component) -> Color {
    match component {
        Component::Button(c) => c.background,
        Component::Text(c) => c.background,
        Component::Spacer(c) => c.background,
        Component::Expandable(c) => c.background,
    }
}

fn alignment(component: &Component) -> Alignment {
    match component {
        Component::Button(c) => c.alignment,
        Component::Text(c) => c.alignment,
        Component::Spacer(_) | Component::Expandable(_) => Alignment::Leading,
    }
}

fn align(line: String, columns: usize, alignment: Alignment) -> String {
    let width = line.width();
    if columns == usize::MAX || width >= columns {
        return line;
    }
    let slack = columns - width;
    let lead = match alignment {
        Alignment::Leading => return line,
        Alignment::Center => slack / 2,
        Alignment::Trailing => slack,
    };
    format!("{}{}", " ".repeat(lead), line)
}

/// Greedy word wrap by display width. Words wider than a line are split
/// between characters. Explicit newlines are kept.
fn wrap(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    if text.is_empty() {
        return lines;
    }

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0usize;

        for word in paragraph.split_whitespace() {
            let word_width = word.width();
            let gap = usize::from(!current.is_empty());

            if current_width + gap + word_width <= columns {
                if gap == 1 {
                    current.push(' ');
                }
                current.push_str(word);
                current_width += gap + word_width;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }

            if word_width <= columns {
                current.push_str(word);
                current_width = word_width;
                continue;
            }

            for c in word.chars() {
                let c_width = c.width().unwrap_or(1);
                if current_width + c_width > columns && !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(c);
                current_width += c_width;
            }
        }

        lines.push(current);
    }
    lines
}
