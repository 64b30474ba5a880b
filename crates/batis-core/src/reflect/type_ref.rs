use std::sync::Arc;

/// The name of a type known to the [`TypeRegistry`](super::TypeRegistry).
///
/// Type references are cheap to clone and compare by name.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeRef(Arc<str>);

impl TypeRef {
    pub const OBJECT: &'static str = "Object";

    pub fn new(name: impl AsRef<str>) -> TypeRef {
        TypeRef(Arc::from(name.as_ref()))
    }

    /// The root type every mapping falls back to.
    pub fn object() -> TypeRef {
        TypeRef::new(Self::OBJECT)
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn is_object(&self) -> bool {
        &*self.0 == Self::OBJECT
    }
}

impl From<&str> for TypeRef {
    fn from(name: &str) -> TypeRef {
        TypeRef::new(name)
    }
}

impl From<String> for TypeRef {
    fn from(name: String) -> TypeRef {
        TypeRef(Arc::from(name))
    }
}

impl PartialEq<str> for TypeRef {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for TypeRef {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl core::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl core::fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "TypeRef({})", self.0)
    }
}

impl core::borrow::Borrow<str> for TypeRef {
    fn borrow(&self) -> &str {
        &self.0
    }
}
