//! Layout engine interface.
//!
//! The pipeline never computes geometry itself. It asks a [`LayoutEngine`] to
//! measure a component within an available size and to arrange it into a
//! [`RenderNode`] tree at a given origin.

mod cells;

pub use cells::CellLayoutEngine;

use crate::component::{Alignment, CellType, Color, Component, Font, Insets, Point, Rect, Size};

/// Size-relevant description of a component.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutSpec {
    /// Full width, fixed height.
    Fixed { height: f64 },
    /// Wrapped text inside insets, at least `min_height` tall, with
    /// `trailing_reserve` kept free on the right of every line.
    Label {
        text: String,
        font: Font,
        insets: Insets,
        line_padding: f64,
        min_height: f64,
        trailing_reserve: f64,
    },
}

/// Arranged output for one component.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderNode {
    pub cell_type: CellType,
    pub frame: Rect,
    pub lines: Vec<String>,
    pub alignment: Alignment,
    pub background: Color,
    /// Free-form markers set by style behaviors.
    pub attributes: Vec<String>,
    pub children: Vec<RenderNode>,
}

impl RenderNode {
    pub fn new(cell_type: CellType, frame: Rect) -> Self {
        Self {
            cell_type,
            frame,
            lines: Vec::new(),
            alignment: Alignment::default(),
            background: Color::default(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }
}

pub trait LayoutEngine: Send + Sync {
    /// Size `component` needs within `available`. An unbounded dimension is
    /// `f64::INFINITY`.
    fn measure(&self, component: &Component, available: Size) -> Size;

    /// Lays `component` out into a node tree occupying `size` at `origin`.
    fn arrange(&self, component: &Component, origin: Point, size: Size) -> RenderNode;
}
