//! Rate limiting for rebuild and invalidate requests.

use std::time::Duration;

use tokio::time::Instant;

/// How often a burst of state changes may trigger work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThrottlePolicy {
    /// Every change triggers work immediately.
    #[default]
    None,
    /// The first change opens a window; work runs once when it closes, with
    /// whatever is latest by then. Changes inside the window do not extend it.
    Debounce(Duration),
    /// Work runs immediately on the first change, and changes are dropped
    /// until the window has elapsed. The last change of a burst may be among
    /// the dropped ones, so the built output can lag behind state until the
    /// next change arrives.
    FirstInWindow(Duration),
}

/// What to do with one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Offer {
    Now,
    Later,
    Dropped,
}

#[derive(Debug)]
pub(crate) struct Throttle {
    policy: ThrottlePolicy,
    /// Debounce: when the open window closes.
    deadline: Option<Instant>,
    /// FirstInWindow: end of the suppression window.
    suppressed_until: Option<Instant>,
}

impl Throttle {
    pub(crate) fn new(policy: ThrottlePolicy) -> Self {
        Self {
            policy,
            deadline: None,
            suppressed_until: None,
        }
    }

    pub(crate) fn offer(&mut self, now: Instant) -> Offer {
        match self.policy {
            ThrottlePolicy::None => Offer::Now,
            ThrottlePolicy::Debounce(window) => {
                if self.deadline.is_none() {
                    self.deadline = Some(now + window);
                }
                Offer::Later
            }
            ThrottlePolicy::FirstInWindow(window) => match self.suppressed_until {
                Some(until) if now < until => Offer::Dropped,
                _ => {
                    self.suppressed_until = Some(now + window);
                    Offer::Now
                }
            },
        }
    }

    /// When pending work must run, if any.
    pub(crate) fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Closes the pending window. Returns true when work was pending.
    pub(crate) fn fire(&mut self) -> bool {
        self.deadline.take().is_some()
    }
}
