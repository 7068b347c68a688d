use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::time::{sleep_until, Instant};

use super::throttle::{Offer, Throttle};
use super::{Blueprint, ControllerConfig, ControllerPhase, InvalidateFn, Shared, Width};
use crate::component::Size;
use crate::observer::ObserverContext;

/// The controller's serialized context: one task that owns throttles and
/// width tracking, and runs every rebuild.
pub(super) struct Reconciler<B: Blueprint> {
    shared: Arc<Shared<B>>,
    width: Width,
    viewport: Size,
    last_width: Option<f64>,
    rebuild: Throttle,
    invalidate: Throttle,
    invalidate_hook: Option<Arc<InvalidateFn>>,
    observer: ObserverContext,
}

impl<B: Blueprint> Reconciler<B> {
    pub(super) fn new(
        shared: Arc<Shared<B>>,
        config: &ControllerConfig,
        invalidate_hook: Option<Arc<InvalidateFn>>,
        observer: ObserverContext,
    ) -> Self {
        Self {
            shared,
            width: config.width,
            viewport: Size::ZERO,
            last_width: None,
            rebuild: Throttle::new(config.throttle),
            invalidate: Throttle::new(config.invalidate_throttle),
            invalidate_hook,
            observer,
        }
    }

    pub(super) async fn run(
        mut self,
        mut changes: mpsc::UnboundedReceiver<usize>,
        mut viewport: watch::Receiver<Size>,
    ) {
        self.viewport = *viewport.borrow_and_update();
        self.rebuild_now();

        loop {
            let rebuild_at = self.rebuild.deadline();
            let invalidate_at = self.invalidate.deadline();
            let now = Instant::now();

            tokio::select! {
                Some(source) = changes.recv() => self.state_changed(source),
                Ok(()) = viewport.changed() => {
                    let size = *viewport.borrow_and_update();
                    self.viewport_changed(size);
                }
                _ = sleep_until(rebuild_at.unwrap_or(now)), if rebuild_at.is_some() => {
                    if self.rebuild.fire() {
                        self.rebuild_now();
                    }
                }
                _ = sleep_until(invalidate_at.unwrap_or(now)), if invalidate_at.is_some() => {
                    if self.invalidate.fire() {
                        self.notify_invalidate();
                    }
                }
                else => break,
            }
        }
        tracing::debug!(controller = %self.shared.id, "reconciler stopped");
    }

    fn state_changed(&mut self, source: usize) {
        tracing::trace!(controller = %self.shared.id, source, "observed state changed");
        let now = Instant::now();

        match self.invalidate.offer(now) {
            Offer::Now => self.notify_invalidate(),
            Offer::Later => {}
            Offer::Dropped => {
                tracing::trace!(controller = %self.shared.id, "invalidate dropped by throttle")
            }
        }
        self.request_rebuild(now);
    }

    fn viewport_changed(&mut self, size: Size) {
        if size.width <= 0.0 {
            return;
        }
        self.viewport = size;
        let Width::Automatic = self.width else {
            return;
        };
        if self.last_width == Some(size.width) {
            return;
        }
        tracing::trace!(controller = %self.shared.id, width = size.width, "viewport width changed");
        self.request_rebuild(Instant::now());
    }

    fn request_rebuild(&mut self, now: Instant) {
        match self.rebuild.offer(now) {
            Offer::Now => self.rebuild_now(),
            Offer::Later => self.shared.set_phase(ControllerPhase::Throttled),
            Offer::Dropped => {
                tracing::trace!(controller = %self.shared.id, "rebuild dropped by throttle")
            }
        }
    }

    fn resolved_width(&self) -> Option<f64> {
        match self.width {
            Width::Exactly(width) => Some(width),
            Width::Automatic if self.viewport.width > 0.0 => Some(self.viewport.width),
            Width::Automatic => None,
        }
    }

    fn rebuild_now(&mut self) {
        let Some(width) = self.resolved_width() else {
            tracing::trace!(
                controller = %self.shared.id,
                "no viewport width yet; rebuild deferred"
            );
            self.shared.set_phase(ControllerPhase::Subscribed);
            return;
        };
        self.last_width = Some(width);
        self.shared.rebuild(Size::new(width, self.viewport.height));
    }

    fn notify_invalidate(&self) {
        if let Some(hook) = &self.invalidate_hook {
            let hook = Arc::clone(hook);
            self.observer.post(move || hook());
        }
    }
}
