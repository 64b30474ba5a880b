use super::Error;

/// One deferred element that never resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedItem {
    /// What kind of element was deferred (`result map`, `cache-ref`, `statement`).
    pub kind: &'static str,

    /// The element id, or the referencing namespace for cache refs.
    pub id: String,

    /// The resource the element was declared in.
    pub resource: String,

    /// The deepest cause reported by the last attempt.
    pub reason: String,
}

/// Error listing every deferred element left once loading is finished.
#[derive(Debug)]
pub(super) struct Unresolved {
    items: Vec<UnresolvedItem>,
}

impl std::error::Error for Unresolved {}

impl core::fmt::Display for Unresolved {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{} incomplete element(s) never resolved", self.items.len())?;
        for item in &self.items {
            write!(
                f,
                "; {} '{}' in '{}': {}",
                item.kind, item.id, item.resource, item.reason
            )?;
        }
        Ok(())
    }
}

impl Error {
    /// Creates an error listing unresolved elements.
    pub fn unresolved(items: Vec<UnresolvedItem>) -> Error {
        Error::from(super::ErrorKind::Unresolved(Unresolved { items }))
    }

    /// Returns `true` if this error lists unresolved elements.
    pub fn is_unresolved(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Unresolved(_))
    }

    /// Returns the unresolved elements carried by this error, if any.
    pub fn unresolved_items(&self) -> &[UnresolvedItem] {
        match self.kind() {
            super::ErrorKind::Unresolved(err) => &err.items,
            _ => &[],
        }
    }
}
