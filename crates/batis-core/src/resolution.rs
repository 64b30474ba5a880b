use crate::Error;

/// Outcome of an attempt to resolve an element that may reference elements
/// not loaded yet.
///
/// Fatal problems travel through the `Err` side of [`crate::Result`];
/// `Deferred` carries the retryable reason so the caller can queue the
/// element and try again after more documents are loaded.
#[derive(Debug, Clone)]
pub enum Resolution<T> {
    Resolved(T),
    Deferred(Error),
}

impl<T> Resolution<T> {
    /// Defers with an [`Error::incomplete`] reason.
    pub fn deferred(reason: impl Into<String>) -> Self {
        Resolution::Deferred(Error::incomplete(reason))
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Resolution::Deferred(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolution<U> {
        match self {
            Resolution::Resolved(value) => Resolution::Resolved(f(value)),
            Resolution::Deferred(reason) => Resolution::Deferred(reason),
        }
    }

    /// Returns the resolved value, if any.
    pub fn resolved(self) -> Option<T> {
        match self {
            Resolution::Resolved(value) => Some(value),
            Resolution::Deferred(_) => None,
        }
    }

    /// Returns the deferral reason, if any.
    pub fn reason(&self) -> Option<&Error> {
        match self {
            Resolution::Resolved(_) => None,
            Resolution::Deferred(reason) => Some(reason),
        }
    }
}
