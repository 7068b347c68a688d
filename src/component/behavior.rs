//! Behavior carried by components.
//!
//! Closures are not comparable, so these fields never take part in component
//! equality or hashing. Each kind lists the fields it compares explicitly.

use std::fmt;
use std::sync::Arc;

use super::ComponentId;
use crate::layout::RenderNode;

/// Shared, cloneable closure.
pub struct Behavior<F: ?Sized>(Arc<F>);

impl<F: ?Sized> Clone for Behavior<F> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<F: ?Sized> fmt::Debug for Behavior<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Behavior(..)")
    }
}

/// Runs when a button is selected.
pub type TapAction = Behavior<dyn Fn() + Send + Sync>;

/// Runs when an expandable is selected, with the id and the requested state.
pub type ToggleAction = Behavior<dyn Fn(&ComponentId, bool) + Send + Sync>;

/// Adjusts an arranged node after layout.
pub type StyleAction = Behavior<dyn Fn(&mut RenderNode) + Send + Sync>;

impl Behavior<dyn Fn() + Send + Sync> {
    pub fn new(action: impl Fn() + Send + Sync + 'static) -> Self {
        Behavior(Arc::new(action))
    }

    pub fn call(&self) {
        (self.0)()
    }
}

impl Behavior<dyn Fn(&ComponentId, bool) + Send + Sync> {
    pub fn new(action: impl Fn(&ComponentId, bool) + Send + Sync + 'static) -> Self {
        Behavior(Arc::new(action))
    }

    pub fn call(&self, id: &ComponentId, expanded: bool) {
        (self.0)(id, expanded)
    }
}

impl Behavior<dyn Fn(&mut RenderNode) + Send + Sync> {
    pub fn new(style: impl Fn(&mut RenderNode) + Send + Sync + 'static) -> Self {
        Behavior(Arc::new(style))
    }

    pub fn apply(&self, node: &mut RenderNode) {
        (self.0)(node)
    }
}
