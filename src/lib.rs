//! Declarative list rendering.
//!
//! Application code describes rows and sections as immutable [`Component`]
//! values built from state. The crate serializes every state mutation, rebuilds
//! the component sequence whenever observed state changes, diffs it against the
//! previous sequence by identity and hands the minimal changeset to a renderer.
//!
//! ```text
//! ViewModel::set_state ──→ StateStore (serialized) ──→ snapshot stream
//!                                                         │
//!   Renderer ←── diff(old, new) ←── builder callback ←── Controller (throttled)
//! ```

pub mod builder;
pub mod component;
pub mod config;
pub mod contract;
pub mod demo;
pub mod diff;
pub mod layout;
pub mod logging;
pub mod observer;
pub mod pipeline;
pub mod render;
pub mod state;
pub mod store;
pub mod view_model;

pub use builder::{ComponentsController, MultiSectionController, SectionController};
pub use component::{Component, ComponentId};
pub use pipeline::{Controller, ControllerConfig, ThrottlePolicy, Width};
pub use state::{Async, State};
pub use view_model::ViewModel;
