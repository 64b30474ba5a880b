use super::Error;

/// Error when no registered constructor matches a result map's constructor
/// arguments.
///
/// Constructor matching is never retried: the target type is fully known by
/// the time the result map is built.
#[derive(Debug)]
pub(super) struct ConstructorNotFound {
    result_map: Box<str>,
    ty: Box<str>,
    arg_names: Vec<String>,
}

impl std::error::Error for ConstructorNotFound {}

impl core::fmt::Display for ConstructorNotFound {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "Error in result map '{}'. Failed to find a constructor in '{}' by arg names [{}]",
            self.result_map,
            self.ty,
            self.arg_names.join(", ")
        )
    }
}

impl Error {
    /// Creates a constructor not found error.
    pub fn constructor_not_found(
        result_map: impl Into<String>,
        ty: impl Into<String>,
        arg_names: &[String],
    ) -> Error {
        Error::from(super::ErrorKind::ConstructorNotFound(ConstructorNotFound {
            result_map: result_map.into().into(),
            ty: ty.into().into(),
            arg_names: arg_names.to_vec(),
        }))
    }

    /// Returns `true` if this error, or any error it wraps, is a constructor
    /// not found error.
    pub fn is_constructor_not_found(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::ConstructorNotFound(_)))
    }
}
