//! Renderer interface and the task that feeds it.

mod recording;
mod rows;

pub use recording::RecordingRenderer;
pub use rows::RowRenderer;

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::component::CellType;
use crate::observer::ObserverContext;
use crate::pipeline::Blueprint;

/// The list widget: performs minimal visual updates for a changeset.
pub trait Renderer<B: Blueprint>: Send + 'static {
    /// Called once per cell type before the first render.
    fn register_cell_type(&mut self, cell_type: CellType);

    /// `snapshot` is the new content; `changes` turn the previously rendered
    /// content into it.
    fn render(&mut self, snapshot: &B, changes: &B::Changes);
}

/// Diffs consecutive snapshots and hands non-empty changesets to `renderer`.
pub(crate) fn spawn_driver<B, R>(
    controller: Uuid,
    mut renderer: R,
    mut snapshots: watch::Receiver<Arc<B>>,
    observer: ObserverContext,
) -> JoinHandle<()>
where
    B: Blueprint,
    R: Renderer<B>,
{
    for cell_type in CellType::ALL {
        renderer.register_cell_type(cell_type);
    }
    let renderer = Arc::new(Mutex::new(renderer));

    tokio::spawn(async move {
        let mut previous = Arc::new(B::default());
        loop {
            let next = snapshots.borrow_and_update().clone();
            let changes = B::diff(&previous, &next);
            let count = B::change_count(&changes);
            previous = Arc::clone(&next);

            if count == 0 {
                tracing::trace!(%controller, "snapshot unchanged; nothing to render");
            } else {
                tracing::debug!(%controller, operations = count, "rendering changeset");
                let renderer = Arc::clone(&renderer);
                observer.post(move || renderer.lock().render(&next, &changes));
            }

            if snapshots.changed().await.is_err() {
                break;
            }
        }
    })
}
