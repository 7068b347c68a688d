//! Programmer errors.
//!
//! These are broken invariants, not runtime conditions: continuing would
//! silently corrupt what the renderer shows, so they stop execution.

use thiserror::Error;

use crate::component::ComponentId;

#[derive(Debug, Error)]
pub enum ContractViolation {
    /// A reducer returned different states for the same input.
    #[error("reducer for {state_type} produced different states from the same input; reducers must be pure")]
    ImpureReducer { state_type: &'static str },

    /// Two components in one ordered sequence share an id.
    #[error("component id '{id}' appears more than once in one sequence")]
    DuplicateId { id: ComponentId },
}

/// Logs the violation and panics.
pub fn fatal(violation: ContractViolation) -> ! {
    tracing::error!(%violation, "contract violation");
    panic!("{violation}");
}

/// Duplicate ids are fatal in debug builds; release builds log and carry on
/// with undefined diff results.
pub fn duplicate_id(id: &ComponentId) {
    if cfg!(debug_assertions) {
        fatal(ContractViolation::DuplicateId { id: id.clone() });
    }
    tracing::warn!(id = %id, "duplicate component id; diff results are undefined");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "reducers must be pure")]
    fn fatal_panics_with_message() {
        fatal(ContractViolation::ImpureReducer {
            state_type: "ExampleState",
        });
    }

    #[test]
    fn duplicate_message_names_the_id() {
        let violation = ContractViolation::DuplicateId {
            id: ComponentId::new("header"),
        };
        assert_eq!(
            violation.to_string(),
            "component id 'header' appears more than once in one sequence"
        );
    }
}
