//! Reconciliation: observed state changes in, rebuilt component snapshots out.
//!
//! ```text
//!  ViewModel ─┐
//!  ViewModel ─┼─→ changes ─→ throttle ─→ builder ─→ snapshot ─→ render driver
//!  viewport ──┘          └─→ throttle ─→ invalidate hook
//! ```
//!
//! A [`Controller`] merges change signals from every observed source and the
//! viewport, rate limits them, runs the application's builder callback and
//! publishes the result. The builder reads state through the view models it
//! captured; by the time it runs, every write that triggered the pass has been
//! resolved and published.

mod blueprint;
mod reconciler;
mod throttle;

pub use blueprint::{Blueprint, IndexPath};
pub use throttle::ThrottlePolicy;

use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};
use uuid::Uuid;

use crate::builder::Section;
use crate::component::{Component, Size};
use crate::layout::LayoutEngine;
use crate::observer::{ObserverContext, Subscriptions};
use crate::render::{self, Renderer};
use crate::view_model::StateSource;
use reconciler::Reconciler;

/// Controller over a flat list.
pub type ListController = Controller<Vec<Component>>;

/// Controller over a list of sections.
pub type SectionedController = Controller<Vec<Section>>;

/// Width handed to the builder.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Width {
    /// Follow the viewport. Zero widths and repeats of the current width are
    /// ignored.
    #[default]
    Automatic,
    Exactly(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControllerConfig {
    pub throttle: ThrottlePolicy,
    pub invalidate_throttle: ThrottlePolicy,
    pub width: Width,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ControllerPhase {
    Idle = 0,
    Subscribed = 1,
    Throttled = 2,
    Rebuilding = 3,
    /// A snapshot is published and nothing is pending.
    Rendered = 4,
}

type BuildFn<B> = dyn Fn(&mut <B as Blueprint>::Builder) + Send + Sync;
type InvalidateFn = dyn Fn() + Send + Sync;

/// State shared between a controller handle and its reconcile task.
pub(crate) struct Shared<B: Blueprint> {
    pub(crate) id: Uuid,
    build: Box<BuildFn<B>>,
    snapshots: watch::Sender<Arc<B>>,
    built_size: Mutex<Size>,
    phase: AtomicU8,
    rebuilds: AtomicUsize,
}

impl<B: Blueprint> Shared<B> {
    pub(crate) fn set_phase(&self, phase: ControllerPhase) {
        self.phase.store(phase as u8, Ordering::SeqCst);
        tracing::trace!(controller = %self.id, ?phase, "phase");
    }

    fn phase(&self) -> ControllerPhase {
        match self.phase.load(Ordering::SeqCst) {
            0 => ControllerPhase::Idle,
            1 => ControllerPhase::Subscribed,
            2 => ControllerPhase::Throttled,
            3 => ControllerPhase::Rebuilding,
            _ => ControllerPhase::Rendered,
        }
    }

    /// Runs the builder for `size` and publishes the result.
    pub(crate) fn rebuild(&self, size: Size) {
        self.set_phase(ControllerPhase::Rebuilding);
        let started = std::time::Instant::now();

        let mut builder = B::builder(size);
        (self.build)(&mut builder);
        let snapshot = Arc::new(B::finish(builder));
        let count = snapshot.component_count();

        *self.built_size.lock() = size;
        self.snapshots.send_replace(snapshot);
        let pass = self.rebuilds.fetch_add(1, Ordering::SeqCst) + 1;

        tracing::debug!(
            controller = %self.id,
            pass,
            components = count,
            width = size.width,
            elapsed_us = started.elapsed().as_micros() as u64,
            "rebuilt components"
        );
        self.set_phase(ControllerPhase::Rendered);
    }
}

/// Reconciliation controller.
///
/// Configure it with [`observe`](Self::observe), [`on_invalidate`](Self::on_invalidate)
/// and [`attach_renderer`](Self::attach_renderer), then call
/// [`activate`](Self::activate). Source watchers and the reconcile task are
/// released by [`deactivate`](Self::deactivate) or on drop. Attached renderers
/// outlive deactivation and only stop when the controller is dropped.
pub struct Controller<B: Blueprint> {
    shared: Arc<Shared<B>>,
    config: ControllerConfig,
    sources: Vec<Arc<dyn StateSource>>,
    invalidate: Option<Arc<InvalidateFn>>,
    observer: ObserverContext,
    viewport: watch::Sender<Size>,
    tasks: Subscriptions,
    renderers: Subscriptions,
}

impl<B: Blueprint> Controller<B> {
    pub fn new<F>(config: ControllerConfig, build: F) -> Self
    where
        F: Fn(&mut B::Builder) + Send + Sync + 'static,
    {
        let id = Uuid::new_v4();
        let (snapshots, _) = watch::channel(Arc::new(B::default()));
        let (viewport, _) = watch::channel(Size::ZERO);
        tracing::debug!(controller = %id, ?config, "controller created");
        Self {
            shared: Arc::new(Shared {
                id,
                build: Box::new(build),
                snapshots,
                built_size: Mutex::new(Size::ZERO),
                phase: AtomicU8::new(ControllerPhase::Idle as u8),
                rebuilds: AtomicUsize::new(0),
            }),
            config,
            sources: Vec::new(),
            invalidate: None,
            observer: ObserverContext::Immediate,
            viewport,
            tasks: Subscriptions::new(),
            renderers: Subscriptions::new(),
        }
    }

    /// Delivers renderer and invalidate callbacks on `observer`.
    pub fn with_observer(mut self, observer: ObserverContext) -> Self {
        self.observer = observer;
        self
    }

    pub fn id(&self) -> Uuid {
        self.shared.id
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Adds a state source. Sources added after activation are picked up by
    /// the next activation.
    pub fn observe(&mut self, source: Arc<dyn StateSource>) -> &mut Self {
        self.sources.push(source);
        self
    }

    /// Hook run whenever observed state changes, throttled independently of
    /// rebuilds by `invalidate_throttle`.
    pub fn on_invalidate<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.invalidate = Some(Arc::new(hook));
        self
    }

    /// Reports the viewport size. Under [`Width::Automatic`] a new non-zero
    /// width triggers a rebuild.
    pub fn set_viewport(&self, size: Size) {
        self.viewport.send_replace(size);
    }

    /// Starts reconciling. Runs one pass immediately when a width is known.
    ///
    /// # Panics
    /// Panics when called outside a tokio runtime.
    pub fn activate(&self) {
        if self.phase() != ControllerPhase::Idle {
            tracing::warn!(controller = %self.shared.id, "activate called on an active controller");
            return;
        }
        self.shared.set_phase(ControllerPhase::Subscribed);

        let (changes_tx, changes_rx) = mpsc::unbounded_channel();
        for (index, source) in self.sources.iter().enumerate() {
            self.tasks.insert(source.watch_changes(index, changes_tx.clone()));
        }
        drop(changes_tx);

        let reconciler = Reconciler::new(
            Arc::clone(&self.shared),
            &self.config,
            self.invalidate.clone(),
            self.observer.clone(),
        );
        let viewport = self.viewport.subscribe();
        self.tasks.insert(tokio::spawn(reconciler.run(changes_rx, viewport)));

        tracing::debug!(
            controller = %self.shared.id,
            sources = self.sources.len(),
            "controller activated"
        );
    }

    /// Stops the source watchers and the reconcile task. The last snapshot
    /// stays readable and attached renderers keep listening, so a later
    /// [`activate`](Self::activate) resumes rendering.
    pub fn deactivate(&self) {
        self.tasks.dispose();
        self.shared.set_phase(ControllerPhase::Idle);
        tracing::debug!(controller = %self.shared.id, "controller deactivated");
    }

    /// Feeds every published snapshot, diffed against the one before it, to
    /// `renderer` on the observer context. The current snapshot is rendered
    /// right away. The renderer stays attached across deactivation.
    pub fn attach_renderer<R>(&self, renderer: R)
    where
        R: Renderer<B>,
    {
        let handle = render::spawn_driver(
            self.shared.id,
            renderer,
            self.shared.snapshots.subscribe(),
            self.observer.clone(),
        );
        self.renderers.insert(handle);
    }

    /// The latest built snapshot.
    pub fn current(&self) -> Arc<B> {
        self.shared.snapshots.borrow().clone()
    }

    /// Replay-latest stream of built snapshots.
    pub fn components(&self) -> watch::Receiver<Arc<B>> {
        self.shared.snapshots.subscribe()
    }

    pub fn phase(&self) -> ControllerPhase {
        self.shared.phase()
    }

    /// Number of builder passes so far.
    pub fn rebuild_count(&self) -> usize {
        self.shared.rebuilds.load(Ordering::SeqCst)
    }

    /// Runs the selection behavior of the component at `path`. Returns false
    /// when the path is out of range or the component is not selectable.
    pub fn select(&self, path: IndexPath) -> bool {
        let snapshot = self.current();
        match snapshot.component_at(path) {
            Some(component) => component.select(),
            None => {
                tracing::trace!(controller = %self.shared.id, %path, "select out of range");
                false
            }
        }
    }

    /// Size of the component at `path` at the width of the current snapshot,
    /// or zero when the path is out of range.
    pub fn size_for(&self, path: IndexPath, engine: &dyn LayoutEngine) -> Size {
        let snapshot = self.current();
        let Some(component) = snapshot.component_at(path) else {
            tracing::trace!(controller = %self.shared.id, %path, "size requested out of range");
            return Size::ZERO;
        };
        let width = self.shared.built_size.lock().width;
        engine.measure(component, Size::new(width, f64::INFINITY))
    }
}

impl<B: Blueprint> Drop for Controller<B> {
    fn drop(&mut self) {
        tracing::trace!(controller = %self.shared.id, "controller dropped");
    }
}
