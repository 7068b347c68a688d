//! Delivery of callbacks to an observer context, and scoped release of the
//! tasks that produce them.

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

type Job = Box<dyn FnOnce() + Send>;

/// Where subscription callbacks run.
///
/// `Immediate` runs them on the subscription's own task. `Queue` hands them to
/// an [`ObserverQueue`], typically drained by a UI thread, in the order they
/// were posted.
#[derive(Clone, Default)]
pub enum ObserverContext {
    #[default]
    Immediate,
    Queue(mpsc::UnboundedSender<Job>),
}

impl ObserverContext {
    /// Creates a queued context and the queue that drains it.
    pub fn queue() -> (Self, ObserverQueue) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (ObserverContext::Queue(sender), ObserverQueue { receiver })
    }

    pub fn post<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        match self {
            ObserverContext::Immediate => job(),
            ObserverContext::Queue(sender) => {
                if sender.send(Box::new(job)).is_err() {
                    tracing::trace!("observer queue closed; callback dropped");
                }
            }
        }
    }
}

/// Receiving end of a queued [`ObserverContext`].
pub struct ObserverQueue {
    receiver: mpsc::UnboundedReceiver<Job>,
}

impl ObserverQueue {
    /// Runs every callback already posted. Returns how many ran.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(job) = self.receiver.try_recv() {
            job();
            ran += 1;
        }
        ran
    }

    /// Waits for the next callback and runs it. Returns false once every
    /// context handle is gone.
    pub async fn run_next(&mut self) -> bool {
        match self.receiver.recv().await {
            Some(job) => {
                job();
                true
            }
            None => false,
        }
    }

    /// Runs callbacks until every context handle is gone.
    pub async fn run(mut self) {
        while self.run_next().await {}
    }
}

/// Tasks owned by one view model or controller.
///
/// Subscriptions keep their closures and channels alive until released, so
/// owners release them explicitly with [`dispose`](Self::dispose) or by
/// dropping the set.
#[derive(Default)]
pub struct Subscriptions {
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, handle: JoinHandle<()>) {
        let mut handles = self.handles.lock();
        handles.retain(|h| !h.is_finished());
        handles.push(handle);
    }

    /// Number of subscriptions still running.
    pub fn active(&self) -> usize {
        self.handles
            .lock()
            .iter()
            .filter(|h| !h.is_finished())
            .count()
    }

    pub fn dispose(&self) {
        for handle in self.handles.lock().drain(..) {
            handle.abort();
        }
    }
}

impl Drop for Subscriptions {
    fn drop(&mut self) {
        self.dispose();
    }
}
