use super::{property, TypeRef};
use crate::{Error, Result};
use indexmap::IndexMap;

/// Static description of one type: what it is, which properties it can be
/// populated through, and which constructors it declares.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    /// Name the type is registered under
    pub name: TypeRef,

    pub kind: TypeKind,

    /// Writable properties and their types
    pub setters: IndexMap<String, TypeRef>,

    /// Readable properties and their types
    pub getters: IndexMap<String, TypeRef>,

    /// Declared constructors, in declaration order
    pub constructors: Vec<Constructor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// A type populated through its properties or constructors
    Bean,

    /// A key/value container: every property name is writable as `Object`
    Map,

    /// A list-like container
    Collection,

    /// A single value read straight from a column
    Scalar,

    /// Converts between column values and values of another type
    TypeHandler,

    /// A cache implementation or decorator
    Cache,

    /// A mapper interface a namespace can be bound to
    Mapper,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Constructor {
    pub params: Vec<Param>,
}

/// One constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub ty: TypeRef,

    /// Name given by an explicit per-parameter tag. Always used when present.
    pub name_tag: Option<String>,

    /// Name preserved from the parameter declaration. Only used when the
    /// session opts into actual parameter names.
    pub actual_name: Option<String>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<TypeRef>, kind: TypeKind) -> TypeDescriptor {
        TypeDescriptor {
            name: name.into(),
            kind,
            setters: IndexMap::new(),
            getters: IndexMap::new(),
            constructors: vec![],
        }
    }

    pub fn bean(name: impl Into<TypeRef>) -> TypeDescriptor {
        TypeDescriptor::new(name, TypeKind::Bean)
    }

    pub fn map(name: impl Into<TypeRef>) -> TypeDescriptor {
        TypeDescriptor::new(name, TypeKind::Map)
    }

    pub fn collection(name: impl Into<TypeRef>) -> TypeDescriptor {
        TypeDescriptor::new(name, TypeKind::Collection)
    }

    pub fn scalar(name: impl Into<TypeRef>) -> TypeDescriptor {
        TypeDescriptor::new(name, TypeKind::Scalar)
    }

    pub fn type_handler(name: impl Into<TypeRef>) -> TypeDescriptor {
        TypeDescriptor::new(name, TypeKind::TypeHandler)
    }

    pub fn cache(name: impl Into<TypeRef>) -> TypeDescriptor {
        TypeDescriptor::new(name, TypeKind::Cache)
    }

    pub fn mapper(name: impl Into<TypeRef>) -> TypeDescriptor {
        TypeDescriptor::new(name, TypeKind::Mapper)
    }

    /// Declares a readable and writable property.
    pub fn property(mut self, name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        let name = name.into();
        let ty = ty.into();
        self.getters.insert(name.clone(), ty.clone());
        self.setters.insert(name, ty);
        self
    }

    /// Declares a property through its accessor name, e.g. `setFatherName`
    /// or `isHeadTeacher`.
    pub fn accessor(mut self, method: &str, ty: impl Into<TypeRef>) -> Result<Self> {
        let name = property::method_to_property(method)?;

        if property::is_setter(method) {
            self.setters.insert(name, ty.into());
        } else if property::is_getter(method) {
            self.getters.insert(name, ty.into());
        } else {
            return Err(Error::invalid_mapping(format!(
                "'{method}' on '{}' is not an accessor",
                self.name
            )));
        }

        Ok(self)
    }

    pub fn constructor(mut self, constructor: Constructor) -> Self {
        self.constructors.push(constructor);
        self
    }

    pub fn is_map(&self) -> bool {
        self.kind == TypeKind::Map
    }

    /// Type accepted by the named setter. Maps accept any name as `Object`.
    pub fn setter_type(&self, name: &str) -> Option<TypeRef> {
        if self.is_map() {
            return Some(TypeRef::object());
        }
        self.setters.get(name).cloned()
    }

    /// Type returned by the named getter. Maps return `Object` for any name.
    pub fn getter_type(&self, name: &str) -> Option<TypeRef> {
        if self.is_map() {
            return Some(TypeRef::object());
        }
        self.getters.get(name).cloned()
    }
}

impl Constructor {
    pub fn new() -> Constructor {
        Constructor::default()
    }

    /// Appends a parameter.
    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Appends a parameter that carries an explicit name tag.
    pub fn tagged(self, name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        self.param(Param::new(ty).tagged(name))
    }

    /// Appends a parameter whose declared name is preserved.
    pub fn named(self, name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        self.param(Param::new(ty).actual(name))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl Param {
    pub fn new(ty: impl Into<TypeRef>) -> Param {
        Param {
            ty: ty.into(),
            name_tag: None,
            actual_name: None,
        }
    }

    pub fn tagged(mut self, name: impl Into<String>) -> Self {
        self.name_tag = Some(name.into());
        self
    }

    pub fn actual(mut self, name: impl Into<String>) -> Self {
        self.actual_name = Some(name.into());
        self
    }
}
