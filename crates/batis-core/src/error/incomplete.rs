use super::Error;

/// Error when a reference names something that has not been loaded yet.
///
/// The document parser treats this as retryable: the element is queued and
/// attempted again after later elements or later documents are loaded.
#[derive(Debug)]
pub(super) struct Incomplete {
    message: Box<str>,
}

impl std::error::Error for Incomplete {}

impl core::fmt::Display for Incomplete {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "incomplete: {}", self.message)
    }
}

impl Error {
    /// Creates an incomplete (retryable) error.
    pub fn incomplete(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Incomplete(Incomplete {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is retryable.
    pub fn is_incomplete(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::Incomplete(_)))
    }
}
