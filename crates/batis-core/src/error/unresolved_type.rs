use super::Error;

/// Error when a type name is neither an alias nor a registered type.
#[derive(Debug)]
pub(super) struct UnresolvedType {
    name: Box<str>,
}

impl std::error::Error for UnresolvedType {}

impl core::fmt::Display for UnresolvedType {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "could not resolve type alias '{}'", self.name)
    }
}

impl Error {
    /// Creates an unresolved type error.
    pub fn unresolved_type(name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnresolvedType(UnresolvedType {
            name: name.into().into(),
        }))
    }

    /// Returns `true` if this error, or any error it wraps, is an unresolved
    /// type error.
    pub fn is_unresolved_type(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::UnresolvedType(_)))
    }
}
