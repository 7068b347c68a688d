use std::sync::Arc;

use parking_lot::Mutex;

use super::Renderer;
use crate::component::CellType;
use crate::pipeline::Blueprint;

struct Recording<B: Blueprint> {
    cell_types: Vec<CellType>,
    changesets: Vec<B::Changes>,
    last: Option<B>,
}

/// Keeps every changeset it is given. Clones share one recording, so a test
/// can hand one clone to a controller and inspect another.
pub struct RecordingRenderer<B: Blueprint> {
    inner: Arc<Mutex<Recording<B>>>,
}

impl<B: Blueprint> Clone for RecordingRenderer<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B: Blueprint> Default for RecordingRenderer<B> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Recording {
                cell_types: Vec::new(),
                changesets: Vec::new(),
                last: None,
            })),
        }
    }
}

impl<B> RecordingRenderer<B>
where
    B: Blueprint + Clone,
    B::Changes: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn changesets(&self) -> Vec<B::Changes> {
        self.inner.lock().changesets.clone()
    }

    pub fn render_count(&self) -> usize {
        self.inner.lock().changesets.len()
    }

    pub fn last_snapshot(&self) -> Option<B> {
        self.inner.lock().last.clone()
    }

    pub fn cell_types(&self) -> Vec<CellType> {
        self.inner.lock().cell_types.clone()
    }
}

impl<B> Renderer<B> for RecordingRenderer<B>
where
    B: Blueprint + Clone,
    B::Changes: Clone,
{
    fn register_cell_type(&mut self, cell_type: CellType) {
        self.inner.lock().cell_types.push(cell_type);
    }

    fn render(&mut self, snapshot: &B, changes: &B::Changes) {
        let mut recording = self.inner.lock();
        recording.changesets.push(changes.clone());
        recording.last = Some(snapshot.clone());
    }
}
