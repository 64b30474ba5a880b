use super::Error;

/// Error when a mapper document describes something that can never resolve.
///
/// This occurs when:
/// - The root element is missing its namespace
/// - A declared id contains dots that are not the current namespace
/// - A result mapping has both a nested select and a nested result map
/// - A collection property type is ambiguous
///
/// These errors abort the current document and are never retried.
#[derive(Debug)]
pub(super) struct InvalidMapping {
    message: Box<str>,
}

impl std::error::Error for InvalidMapping {}

impl core::fmt::Display for InvalidMapping {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid mapping: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid mapping error.
    pub fn invalid_mapping(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidMapping(InvalidMapping {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error, or any error it wraps, is an invalid
    /// mapping error.
    pub fn is_invalid_mapping(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidMapping(_)))
    }
}
