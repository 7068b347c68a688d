//! Lifecycle of a value produced by asynchronous work.

use std::any::type_name;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// A state field that tracks asynchronous work.
///
/// Failures are ordinary data: they travel through snapshots and diffs like
/// any other field and reach application code through
/// [`ViewModel::async_subscribe`](crate::view_model::ViewModel::async_subscribe).
#[derive(Debug, Clone, PartialEq)]
pub enum Async<T> {
    Uninitialized,
    Loading,
    Success(T),
    Failure(AsyncError),
}

impl<T> Default for Async<T> {
    fn default() -> Self {
        Async::Uninitialized
    }
}

impl<T> Async<T> {
    /// Wraps an error, recording its concrete type and message.
    pub fn failure<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Async::Failure(AsyncError::new(error))
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Async::Success(_) | Async::Failure(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Async::Success(value) => Some(value),
            _ => None,
        }
    }
}

/// Error carried by [`Async::Failure`].
///
/// Errors are not structurally comparable, so equality uses the error's type
/// name and rendered message. The original error is kept for handlers but
/// never compared.
#[derive(Clone)]
pub struct AsyncError {
    kind: &'static str,
    message: String,
    source: Option<Arc<dyn Error + Send + Sync>>,
}

impl AsyncError {
    pub fn new<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            kind: type_name::<E>(),
            message: error.to_string(),
            source: Some(Arc::new(error)),
        }
    }

    /// Builds an error from a kind label and message without an underlying source.
    pub fn message(kind: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.source.as_deref()
    }
}

impl PartialEq for AsyncError {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.message == other.message
    }
}

impl fmt::Debug for AsyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}

impl fmt::Display for AsyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thiserror::Error;

    #[derive(Debug, Error)]
    #[error("lookup failed: {0}")]
    struct LookupError(String);

    #[derive(Debug, Error)]
    #[error("lookup failed: {0}")]
    struct OtherError(String);

    #[test]
    fn failures_compare_by_kind_and_message() {
        let a: Async<u32> = Async::failure(LookupError("users".into()));
        let b: Async<u32> = Async::failure(LookupError("users".into()));
        let c: Async<u32> = Async::failure(LookupError("teams".into()));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn same_message_different_type_is_not_equal() {
        let a: Async<u32> = Async::failure(LookupError("users".into()));
        let b: Async<u32> = Async::failure(OtherError("users".into()));
        assert_ne!(a, b);
    }

    #[test]
    fn source_is_kept_for_handlers() {
        let error = AsyncError::new(LookupError("users".into()));
        assert_eq!(error.text(), "lookup failed: users");
        assert!(error.source_error().is_some());
        assert!(AsyncError::message("timeout", "took too long")
            .source_error()
            .is_none());
    }

    #[test]
    fn value_only_for_success() {
        assert_eq!(Async::Success(3).value(), Some(&3));
        assert_eq!(Async::<u32>::Loading.value(), None);
        assert!(!Async::<u32>::Uninitialized.is_complete());
        assert!(Async::<u32>::Success(1).is_complete());
    }
}
