use super::Error;

/// Error when an id is registered twice in the same table.
#[derive(Debug)]
pub(super) struct DuplicateId {
    collection: Box<str>,
    id: Box<str>,
}

impl std::error::Error for DuplicateId {}

impl core::fmt::Display for DuplicateId {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "{} already contains value for {}",
            self.collection, self.id
        )
    }
}

impl Error {
    /// Creates a duplicate id error for the named table.
    pub fn duplicate_id(collection: impl Into<String>, id: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::DuplicateId(DuplicateId {
            collection: collection.into().into(),
            id: id.into().into(),
        }))
    }

    /// Returns `true` if this error, or any error it wraps, is a duplicate id
    /// error.
    pub fn is_duplicate_id(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::DuplicateId(_)))
    }
}
