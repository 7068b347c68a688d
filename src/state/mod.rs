//! State primitives for unidirectional data flow.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ Components
//!    ↑                                 │
//!    └─────────────────────────────────┘
//! ```
//!
//! - **State**: immutable value describing one screen
//! - **Intent**: user actions or system events
//! - **Reducer**: pure function that produces the next state

mod async_value;
mod expandable;
mod intent;
mod reducer;

pub use async_value::{Async, AsyncError};
pub use expandable::ExpandableState;
pub use intent::Intent;
pub use reducer::Reducer;

use std::fmt::Debug;

/// Marker trait for screen state.
///
/// States should be:
/// - Immutable once published (Clone to derive the next value)
/// - Self-contained (everything the builder needs to describe the screen)
/// - Structurally comparable (PartialEq decides whether a snapshot is new)
pub trait State: Clone + PartialEq + Debug + Default + Send + Sync + 'static {}
