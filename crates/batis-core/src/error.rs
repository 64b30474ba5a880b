mod adhoc;
mod constructor_not_found;
mod duplicate_id;
mod incomplete;
mod invalid_mapping;
mod unknown_id;
mod unresolved;
mod unresolved_type;
mod xml;

use adhoc::AdhocError;
use constructor_not_found::ConstructorNotFound;
use duplicate_id::DuplicateId;
use incomplete::Incomplete;
use invalid_mapping::InvalidMapping;
use std::sync::Arc;
use unknown_id::UnknownId;
use unresolved::Unresolved;
use unresolved_type::UnresolvedType;
use xml::XmlError;

pub use unresolved::UnresolvedItem;

/// Returns early with an ad-hoc error built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Builds an ad-hoc error from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error raised while resolving mapping metadata.
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added context
    /// is shown first, followed by earlier context, ending with the root cause.
    #[inline(always)]
    pub fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let mut err = consequent;

        if let Some(inner) = err.inner.as_mut().and_then(Arc::get_mut) {
            if inner.cause.is_none() {
                inner.cause = Some(self);
                return err;
            }
        }

        // The consequent is shared or already chained; rebuild it so the
        // chain stays linear.
        let kind = match &err.inner {
            None => ErrorKind::Unknown,
            Some(_) => ErrorKind::Adhoc(AdhocError::new(err.kind().to_string())),
        };

        Error {
            inner: Some(Arc::new(ErrorInner {
                kind,
                cause: Some(self),
            })),
        }
    }

    /// Returns the deepest error in the context chain.
    pub fn root(&self) -> &Error {
        self.chain().last().unwrap_or(self)
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }

    /// True if any error in the chain matches `f`.
    fn any_kind(&self, f: impl Fn(&ErrorKind) -> bool) -> bool {
        self.chain().any(|err| f(err.kind()))
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f.debug_struct("Error").field("kind", &"None").finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    InvalidMapping(InvalidMapping),
    Incomplete(Incomplete),
    DuplicateId(DuplicateId),
    UnknownId(UnknownId),
    ConstructorNotFound(ConstructorNotFound),
    UnresolvedType(UnresolvedType),
    Unresolved(Unresolved),
    Xml(XmlError),
    Unknown,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            InvalidMapping(err) => core::fmt::Display::fmt(err, f),
            Incomplete(err) => core::fmt::Display::fmt(err, f),
            DuplicateId(err) => core::fmt::Display::fmt(err, f),
            UnknownId(err) => core::fmt::Display::fmt(err, f),
            ConstructorNotFound(err) => core::fmt::Display::fmt(err, f),
            UnresolvedType(err) => core::fmt::Display::fmt(err, f),
            Unresolved(err) => core::fmt::Display::fmt(err, f),
            Xml(err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown batis error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner { kind, cause: None })),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

impl From<std::num::ParseIntError> for Error {
    fn from(err: std::num::ParseIntError) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

/// Trait for types that can be converted into an Error.
pub trait IntoError {
    /// Converts this type into an Error.
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_size() {
        // Ensure Error stays at one word (size of pointer/Arc)
        let expected_size = core::mem::size_of::<usize>();
        assert_eq!(expected_size, core::mem::size_of::<Error>());
    }

    #[test]
    fn error_from_args() {
        let err = Error::from_args(format_args!("bad element: {}", "cache"));
        assert_eq!(err.to_string(), "bad element: cache");
    }

    #[test]
    fn error_chain_display() {
        let root = Error::invalid_mapping("Mapper's namespace cannot be empty");
        let top = err!("error parsing mapper document '{}'", "StudentMapper.xml");

        let chained = root.context(top);
        assert_eq!(
            chained.to_string(),
            "error parsing mapper document 'StudentMapper.xml': invalid mapping: Mapper's namespace cannot be empty"
        );
        assert!(chained.is_invalid_mapping());
        assert_eq!(
            chained.root().to_string(),
            "invalid mapping: Mapper's namespace cannot be empty"
        );
    }

    #[test]
    fn shared_consequent_is_rebuilt() {
        let top = err!("outer");
        let keep = top.clone();

        let chained = Error::incomplete("missing parent").context(top);
        assert_eq!(chained.to_string(), "outer: incomplete: missing parent");
        assert_eq!(keep.to_string(), "outer");
    }

    #[test]
    fn std_error_bridge() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let our_err: Error = io_err.into();
        assert!(our_err.to_string().contains("file not found"));
    }

    #[test]
    fn duplicate_id_display() {
        let err = Error::duplicate_id("Result Maps collection", "ns.studentMap");
        assert_eq!(
            err.to_string(),
            "Result Maps collection already contains value for ns.studentMap"
        );
        assert!(err.is_duplicate_id());
        assert!(!err.is_incomplete());
    }

    #[test]
    fn constructor_not_found_display() {
        let err = Error::constructor_not_found(
            "ns.studentMap",
            "com.kingdon.model.Student",
            &["id".to_string(), "nickname".to_string()],
        );
        assert_eq!(
            err.to_string(),
            "Error in result map 'ns.studentMap'. Failed to find a constructor in \
             'com.kingdon.model.Student' by arg names [id, nickname]"
        );
    }
}
