//! Application-facing handle to one state store.

mod subscribe;

pub use subscribe::StateSource;

use std::any::type_name;
use std::collections::HashMap;
use std::sync::{Arc, Weak};

use tokio::sync::watch;
use uuid::Uuid;

use crate::component::ToggleAction;
use crate::config::StoreConfig;
use crate::contract::{self, ContractViolation};
use crate::observer::{ObserverContext, Subscriptions};
use crate::state::{ExpandableState, Reducer, State};
use crate::store::{StateStore, StoreError};

/// Options fixed at construction.
#[derive(Clone, Default)]
pub struct ViewModelOptions {
    /// Evaluate every reducer twice and fail loudly when the results differ.
    pub debug_mode: bool,
    /// Where subscription callbacks are delivered.
    pub observer: ObserverContext,
}

impl From<&StoreConfig> for ViewModelOptions {
    fn from(config: &StoreConfig) -> Self {
        Self {
            debug_mode: config.debug_mode,
            observer: ObserverContext::Immediate,
        }
    }
}

/// Owns one screen's state.
///
/// Reads and writes are serialized by the underlying [`StateStore`]; nothing
/// here blocks. Subscriptions registered through this view model are released
/// by [`dispose`](Self::dispose) or when it is dropped.
pub struct ViewModel<S: State> {
    id: Uuid,
    store: StateStore<S>,
    options: ViewModelOptions,
    subscriptions: Subscriptions,
}

impl<S: State> ViewModel<S> {
    /// # Panics
    /// Panics when called outside a tokio runtime.
    pub fn new(initial: S) -> Self {
        Self::with_options(initial, ViewModelOptions::default())
    }

    /// # Panics
    /// Panics when called outside a tokio runtime.
    pub fn with_options(initial: S, options: ViewModelOptions) -> Self {
        Self::from_store(StateStore::spawn(initial), options)
    }

    /// Wraps an existing store whose resolver the caller drives.
    pub fn from_store(store: StateStore<S>, options: ViewModelOptions) -> Self {
        let id = Uuid::new_v4();
        tracing::debug!(
            view_model = %id,
            store = %store.id(),
            state = type_name::<S>(),
            debug_mode = options.debug_mode,
            "view model created"
        );
        Self {
            id,
            store,
            options,
            subscriptions: Subscriptions::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_debug_mode(&self) -> bool {
        self.options.debug_mode
    }

    /// The latest published state, without waiting for queued writes.
    pub fn current_state(&self) -> S {
        self.store.current_state()
    }

    /// Runs `read` with the state once every earlier write has resolved.
    pub fn with_state<F>(&self, read: F)
    where
        F: FnOnce(&S) + Send + 'static,
    {
        self.store.get_state(read);
    }

    /// Awaits the state once every earlier write has resolved.
    pub async fn state(&self) -> Result<S, StoreError> {
        self.store.state().await
    }

    /// Queues a mutation.
    ///
    /// `reducer` must be a pure function of the state it receives. In debug
    /// mode it is applied to two independent copies first; differing results
    /// are a contract violation and stop the store before anything is
    /// published.
    pub fn set_state<F>(&self, reducer: F)
    where
        F: Fn(&mut S) + Send + 'static,
    {
        if !self.options.debug_mode {
            self.store.set_state(move |state| reducer(state));
            return;
        }

        self.store.set_state(move |state| {
            let mut first = state.clone();
            reducer(&mut first);
            let mut second = state.clone();
            reducer(&mut second);
            if first != second {
                contract::fatal(ContractViolation::ImpureReducer {
                    state_type: type_name::<S>(),
                });
            }
            *state = first;
        });
    }

    /// Routes an intent through `R::reduce`.
    pub fn dispatch<R>(&self, intent: R::Intent)
    where
        R: Reducer<State = S> + 'static,
        R::Intent: Clone,
    {
        self.set_state(move |state| {
            let current = std::mem::take(state);
            *state = R::reduce(current, intent.clone());
        });
    }

    /// Replay-latest, deduplicated snapshot stream.
    pub fn snapshots(&self) -> watch::Receiver<S> {
        self.store.subscribe()
    }

    /// Number of subscriptions still running.
    pub fn active_subscriptions(&self) -> usize {
        self.subscriptions.active()
    }

    /// Releases every subscription registered through this view model.
    pub fn dispose(&self) {
        tracing::debug!(view_model = %self.id, "disposing subscriptions");
        self.subscriptions.dispose();
    }

    pub(crate) fn observer(&self) -> &ObserverContext {
        &self.options.observer
    }

    pub(crate) fn subscriptions(&self) -> &Subscriptions {
        &self.subscriptions
    }
}

impl<S: ExpandableState> ViewModel<S> {
    /// Records whether the expandable component `id` is open.
    pub fn set_expandable_state(&self, id: &str, expanded: bool) {
        let id = id.to_string();
        self.set_state(move |state| {
            state.expandable_mut().insert(id.clone(), expanded);
        });
    }

    /// A toggle action for expandable components that writes into this view
    /// model. It holds the view model weakly and does nothing once it is gone.
    pub fn expandable_toggle(self: &Arc<Self>) -> ToggleAction {
        let weak: Weak<Self> = Arc::downgrade(self);
        ToggleAction::new(move |id, expanded| {
            if let Some(view_model) = weak.upgrade() {
                view_model.set_expandable_state(id.as_str(), expanded);
            }
        })
    }

    /// Snapshot of the expandable map, for builders.
    pub fn expandable_snapshot(&self) -> HashMap<String, bool> {
        self.current_state().expandable().clone()
    }
}

impl<S: State> Drop for ViewModel<S> {
    fn drop(&mut self) {
        tracing::trace!(view_model = %self.id, "view model dropped");
    }
}
