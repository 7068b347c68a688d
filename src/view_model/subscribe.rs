//! Field-level subscriptions over a view model's snapshot stream.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use super::ViewModel;
use crate::observer::ObserverContext;
use crate::state::{Async, AsyncError, State};

impl<S: State> ViewModel<S> {
    /// Calls `on_change` with every new distinct value of `selector`.
    ///
    /// The value at subscription time is the baseline and is not delivered.
    /// Callbacks run on the view model's observer context.
    pub fn select_subscribe<T, Sel, F>(&self, selector: Sel, on_change: F)
    where
        T: PartialEq + Clone + Send + 'static,
        Sel: Fn(&S) -> T + Send + 'static,
        F: Fn(T) + Send + Sync + 'static,
    {
        let handle = spawn_distinct(
            self.snapshots(),
            self.observer().clone(),
            selector,
            Arc::new(on_change),
        );
        self.subscriptions().insert(handle);
    }

    /// Fires when either selected value changes; equality is on the pair.
    pub fn select_subscribe2<A, B, SelA, SelB, F>(&self, first: SelA, second: SelB, on_change: F)
    where
        A: PartialEq + Clone + Send + 'static,
        B: PartialEq + Clone + Send + 'static,
        SelA: Fn(&S) -> A + Send + 'static,
        SelB: Fn(&S) -> B + Send + 'static,
        F: Fn(A, B) + Send + Sync + 'static,
    {
        self.select_subscribe(
            move |state| (first(state), second(state)),
            move |(a, b)| on_change(a, b),
        );
    }

    /// Fires when any of three selected values changes; equality is on the triple.
    pub fn select_subscribe3<A, B, C, SelA, SelB, SelC, F>(
        &self,
        first: SelA,
        second: SelB,
        third: SelC,
        on_change: F,
    ) where
        A: PartialEq + Clone + Send + 'static,
        B: PartialEq + Clone + Send + 'static,
        C: PartialEq + Clone + Send + 'static,
        SelA: Fn(&S) -> A + Send + 'static,
        SelB: Fn(&S) -> B + Send + 'static,
        SelC: Fn(&S) -> C + Send + 'static,
        F: Fn(A, B, C) + Send + Sync + 'static,
    {
        self.select_subscribe(
            move |state| (first(state), second(state), third(state)),
            move |(a, b, c)| on_change(a, b, c),
        );
    }

    /// Watches an [`Async`] field and reports completions.
    ///
    /// `on_success` runs when the field becomes a new `Success`, `on_failure`
    /// when it becomes a new `Failure`. Failures are told apart by error kind
    /// and message. `Uninitialized` and `Loading` are ignored.
    pub fn async_subscribe<T, Sel, OnSuccess, OnFailure>(
        &self,
        selector: Sel,
        on_success: OnSuccess,
        on_failure: OnFailure,
    ) where
        T: PartialEq + Clone + Send + 'static,
        Sel: Fn(&S) -> Async<T> + Send + 'static,
        OnSuccess: Fn(T) + Send + Sync + 'static,
        OnFailure: Fn(AsyncError) + Send + Sync + 'static,
    {
        self.select_subscribe(selector, move |value| match value {
            Async::Success(value) => on_success(value),
            Async::Failure(error) => on_failure(error),
            Async::Uninitialized | Async::Loading => {}
        });
    }
}

fn spawn_distinct<S, T, Sel, F>(
    mut snapshots: watch::Receiver<S>,
    observer: ObserverContext,
    selector: Sel,
    on_change: Arc<F>,
) -> JoinHandle<()>
where
    S: State,
    T: PartialEq + Clone + Send + 'static,
    Sel: Fn(&S) -> T + Send + 'static,
    F: Fn(T) + Send + Sync + 'static,
{
    // Taken before spawning so writes queued right after subscribing are
    // compared against the state at subscription time.
    let mut last = selector(&snapshots.borrow_and_update());
    tokio::spawn(async move {
        while snapshots.changed().await.is_ok() {
            let next = selector(&snapshots.borrow_and_update());
            if next == last {
                continue;
            }
            last = next.clone();
            let callback = Arc::clone(&on_change);
            observer.post(move || callback(next));
        }
        tracing::trace!("snapshot stream closed; subscription finished");
    })
}

/// A source of "something changed" signals for a reconciliation controller.
///
/// View models implement it by forwarding their snapshot stream. `index`
/// identifies the source within the controller's observed set.
pub trait StateSource: Send + Sync {
    fn watch_changes(&self, index: usize, changes: mpsc::UnboundedSender<usize>) -> JoinHandle<()>;
}

impl<S: State> StateSource for ViewModel<S> {
    fn watch_changes(&self, index: usize, changes: mpsc::UnboundedSender<usize>) -> JoinHandle<()> {
        let mut snapshots = self.snapshots();
        snapshots.mark_unchanged();
        tokio::spawn(async move {
            while snapshots.changed().await.is_ok() {
                if changes.send(index).is_err() {
                    break;
                }
            }
        })
    }
}
