//! Base trait for intents (user/system actions).

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User actions (taps, toggles)
/// - System events (responses, timers)
///
/// Intents are folded into state by a [`Reducer`](super::Reducer).
pub trait Intent: Send + 'static {}
