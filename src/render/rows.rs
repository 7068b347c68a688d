use std::sync::Arc;

use parking_lot::Mutex;

use super::Renderer;
use crate::component::{CellType, Component, Point, Size};
use crate::diff::Changeset;
use crate::layout::{LayoutEngine, RenderNode};

/// Materializes a flat list into arranged rows, stacked top to bottom.
///
/// Rows of kept and moved components are reused as they are; only inserted
/// and updated components go through the layout engine again.
pub struct RowRenderer {
    engine: Arc<dyn LayoutEngine>,
    width: f64,
    rows: Arc<Mutex<Vec<RenderNode>>>,
    registered: Vec<CellType>,
    arranged: Arc<Mutex<usize>>,
}

impl Clone for RowRenderer {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            width: self.width,
            rows: Arc::clone(&self.rows),
            registered: self.registered.clone(),
            arranged: Arc::clone(&self.arranged),
        }
    }
}

impl RowRenderer {
    pub fn new(engine: Arc<dyn LayoutEngine>, width: f64) -> Self {
        Self {
            engine,
            width,
            rows: Arc::new(Mutex::new(Vec::new())),
            registered: Vec::new(),
            arranged: Arc::new(Mutex::new(0)),
        }
    }

    pub fn rows(&self) -> Vec<RenderNode> {
        self.rows.lock().clone()
    }

    /// How many rows went through the layout engine in total.
    pub fn arranged_count(&self) -> usize {
        *self.arranged.lock()
    }

    /// Plain-text rendering, one line per text line. Child nodes (such as an
    /// expandable's chevron) are appended to their row's first line.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for row in self.rows.lock().iter() {
            if row.lines.is_empty() {
                out.push('\n');
                continue;
            }
            for (n, line) in row.lines.iter().enumerate() {
                out.push_str(line);
                if n == 0 {
                    for child in &row.children {
                        for child_line in &child.lines {
                            out.push(' ');
                            out.push_str(child_line);
                        }
                    }
                }
                out.push('\n');
            }
        }
        out
    }

    fn arrange(&self, component: &Component) -> RenderNode {
        let size = self
            .engine
            .measure(component, Size::new(self.width, f64::INFINITY));
        *self.arranged.lock() += 1;
        self.engine.arrange(component, Point::ORIGIN, size)
    }
}

impl Renderer<Vec<Component>> for RowRenderer {
    fn register_cell_type(&mut self, cell_type: CellType) {
        if !self.registered.contains(&cell_type) {
            self.registered.push(cell_type);
        }
    }

    fn render(&mut self, snapshot: &Vec<Component>, changes: &Changeset) {
        let old = std::mem::take(&mut *self.rows.lock());
        let mut arranged = Vec::new();
        let mut rows = changes.apply(old, |index| {
            arranged.push(index);
            self.arrange(&snapshot[index])
        });

        // Expansion is not compared, so kept headers may show a stale chevron.
        for (index, component) in snapshot.iter().enumerate() {
            if matches!(component, Component::Expandable(_)) && !arranged.contains(&index) {
                rows[index] = self.arrange(component);
            }
        }

        let mut y = 0.0;
        for row in &mut rows {
            let dy = y - row.frame.origin.y;
            if dy != 0.0 {
                shift(row, dy);
            }
            y = row.frame.max_y();
        }

        tracing::trace!(rows = rows.len(), "rows rendered");
        *self.rows.lock() = rows;
    }
}

fn shift(node: &mut RenderNode, dy: f64) {
    node.frame.origin.y += dy;
    for child in &mut node.children {
        shift(child, dy);
    }
}
