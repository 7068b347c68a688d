//! Reducer trait for intent-driven state transitions.

use super::intent::Intent;
use super::State;

/// Reducer transforms state based on intents.
///
/// It must be a pure function: (State, Intent) -> State. Debug-mode view
/// models evaluate it twice per dispatch and treat differing results as a
/// contract violation.
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: State;

    /// The intent type this reducer handles.
    type Intent: Intent;

    /// Process an intent and return the new state.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
