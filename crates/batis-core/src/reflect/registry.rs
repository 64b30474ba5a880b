use super::{TypeDescriptor, TypeKind, TypeRef};
use crate::{Error, Result};
use indexmap::IndexMap;
use std::sync::Arc;

/// The statically registered table of known types.
///
/// Stands in for runtime reflection: everything the engine needs to know
/// about a target type (its kind, property types, and constructors) is
/// looked up here by name.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    types: IndexMap<TypeRef, Arc<TypeDescriptor>>,

    /// Lower-cased alias to type
    aliases: IndexMap<String, TypeRef>,
}

const SCALARS: &[(&str, &[&str])] = &[
    ("String", &["string"]),
    ("Byte", &["byte"]),
    ("Long", &["long"]),
    ("Short", &["short"]),
    ("Integer", &["int", "integer"]),
    ("Double", &["double"]),
    ("Float", &["float"]),
    ("Boolean", &["boolean"]),
    ("byte", &["_byte"]),
    ("long", &["_long"]),
    ("short", &["_short"]),
    ("int", &["_int", "_integer"]),
    ("double", &["_double"]),
    ("float", &["_float"]),
    ("boolean", &["_boolean"]),
    ("Date", &["date"]),
    ("BigDecimal", &["decimal", "bigdecimal"]),
    ("BigInteger", &["biginteger"]),
    ("ResultSet", &["resultset"]),
];

const CONTAINERS: &[(&str, TypeKind, &[&str])] = &[
    ("Object", TypeKind::Bean, &["object"]),
    ("Map", TypeKind::Map, &["map"]),
    ("HashMap", TypeKind::Map, &["hashmap"]),
    ("List", TypeKind::Collection, &["list"]),
    ("ArrayList", TypeKind::Collection, &["arraylist"]),
    ("Collection", TypeKind::Collection, &["collection"]),
    ("Iterator", TypeKind::Collection, &["iterator"]),
];

const CACHES: &[(&str, &str)] = &[
    ("PerpetualCache", "perpetual"),
    ("FifoCache", "fifo"),
    ("LruCache", "lru"),
    ("SoftCache", "soft"),
    ("WeakCache", "weak"),
];

impl TypeRegistry {
    /// Creates a registry holding the built-in types and aliases.
    pub fn new() -> TypeRegistry {
        let mut registry = TypeRegistry {
            types: IndexMap::new(),
            aliases: IndexMap::new(),
        };

        for (name, aliases) in SCALARS {
            registry.register(TypeDescriptor::scalar(*name));
            for alias in *aliases {
                registry.alias(alias, *name);
            }
        }

        for (name, kind, aliases) in CONTAINERS {
            registry.register(TypeDescriptor::new(*name, *kind));
            for alias in *aliases {
                registry.alias(alias, *name);
            }
        }

        for (name, alias) in CACHES {
            registry.register(TypeDescriptor::cache(*name));
            registry.alias(alias, *name);
        }

        registry
    }

    /// Registers a type, replacing any previous descriptor with the same name.
    pub fn register(&mut self, descriptor: TypeDescriptor) -> &mut Self {
        self.types
            .insert(descriptor.name.clone(), Arc::new(descriptor));
        self
    }

    /// Registers a case-insensitive alias for a type name.
    pub fn alias(&mut self, alias: &str, ty: impl Into<TypeRef>) -> &mut Self {
        self.aliases.insert(alias.to_lowercase(), ty.into());
        self
    }

    /// Resolves an alias or a registered type name.
    pub fn resolve(&self, name: &str) -> Result<TypeRef> {
        if let Some(ty) = self.aliases.get(&name.to_lowercase()) {
            return Ok(ty.clone());
        }

        self.types
            .get_key_value(name)
            .map(|(ty, _)| ty.clone())
            .ok_or_else(|| Error::unresolved_type(name))
    }

    /// Resolves an optional type attribute. Absent names resolve to `None`.
    pub fn resolve_opt(&self, name: Option<&str>) -> Result<Option<TypeRef>> {
        name.map(|name| self.resolve(name)).transpose()
    }

    pub fn get(&self, ty: &TypeRef) -> Option<&TypeDescriptor> {
        self.types.get(ty).map(|descriptor| &**descriptor)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn kind(&self, ty: &TypeRef) -> Option<TypeKind> {
        self.get(ty).map(|descriptor| descriptor.kind)
    }

    /// Type accepted when setting a possibly dotted property path on `ty`.
    ///
    /// Intermediate segments are followed through their getter types.
    pub fn setter_type(&self, ty: &TypeRef, path: &str) -> Option<TypeRef> {
        let descriptor = self.get(ty)?;

        match path.split_once('.') {
            None => descriptor.setter_type(path),
            Some((head, rest)) => {
                let child = descriptor
                    .getter_type(head)
                    .or_else(|| descriptor.setter_type(head))?;
                if descriptor.is_map() {
                    return Some(child);
                }
                self.setter_type(&child, rest)
            }
        }
    }

    pub fn has_setter(&self, ty: &TypeRef, path: &str) -> bool {
        self.setter_type(ty, path).is_some()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        TypeRegistry::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_are_case_insensitive() {
        let types = TypeRegistry::new();
        assert_eq!(types.resolve("LRU").unwrap(), "LruCache");
        assert_eq!(types.resolve("HashMap").unwrap(), "HashMap");
        assert_eq!(types.resolve("INT").unwrap(), "Integer");
        assert_eq!(types.resolve("_int").unwrap(), "int");
    }

    #[test]
    fn unknown_names_fail() {
        let err = TypeRegistry::new().resolve("com.x.Missing").unwrap_err();
        assert!(err.is_unresolved_type());
    }

    #[test]
    fn dotted_setter_paths() {
        let mut types = TypeRegistry::new();
        types
            .register(TypeDescriptor::bean("Teacher").property("name", "String"))
            .register(TypeDescriptor::bean("Student").property("headTeacher", "Teacher"));

        let student = TypeRef::new("Student");
        assert_eq!(
            types.setter_type(&student, "headTeacher.name"),
            Some(TypeRef::new("String"))
        );
        assert!(!types.has_setter(&student, "headTeacher.age"));
        assert!(types.has_setter(&TypeRef::new("HashMap"), "anything"));
    }
}
