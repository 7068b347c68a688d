use thiserror::Error;

/// Errors surfaced by state store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The resolver task has ended, either because every handle was dropped
    /// or because a reducer broke its contract.
    #[error("state store resolver has shut down")]
    Closed,
}
