use super::Error;

/// Error when looking up an id that a table does not hold.
#[derive(Debug)]
pub(super) struct UnknownId {
    collection: Box<str>,
    id: Box<str>,
    reason: Reason,
}

#[derive(Debug)]
enum Reason {
    Missing,
    Pending,
    Ambiguous(Box<str>),
}

impl std::error::Error for UnknownId {}

impl core::fmt::Display for UnknownId {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &self.reason {
            Reason::Missing => write!(f, "{} does not contain value for {}", self.collection, self.id),
            Reason::Pending => write!(
                f,
                "{} does not contain value for {} (the element is still pending resolution)",
                self.collection, self.id
            ),
            Reason::Ambiguous(subject) => write!(
                f,
                "{} is ambiguous in {} (try using the full name including the namespace, or rename one of the entries)",
                subject, self.collection
            ),
        }
    }
}

impl Error {
    /// Creates an error for an id missing from the named table.
    pub fn unknown_id(collection: impl Into<String>, id: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownId(UnknownId {
            collection: collection.into().into(),
            id: id.into().into(),
            reason: Reason::Missing,
        }))
    }

    /// Creates an error for an id whose element is queued but not yet built.
    pub fn pending_id(collection: impl Into<String>, id: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownId(UnknownId {
            collection: collection.into().into(),
            id: id.into().into(),
            reason: Reason::Pending,
        }))
    }

    /// Creates an error for a short name claimed by more than one entry.
    pub fn ambiguous_id(
        collection: impl Into<String>,
        id: impl Into<String>,
        subject: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::UnknownId(UnknownId {
            collection: collection.into().into(),
            id: id.into().into(),
            reason: Reason::Ambiguous(subject.into().into()),
        }))
    }

    /// Returns `true` if this error is an unknown id error.
    pub fn is_unknown_id(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnknownId(_))
    }

    /// Returns `true` if this error is an ambiguous short-name lookup.
    pub fn is_ambiguous_id(&self) -> bool {
        matches!(
            self.kind(),
            super::ErrorKind::UnknownId(UnknownId {
                reason: Reason::Ambiguous(_),
                ..
            })
        )
    }
}
