mod descriptor;
pub use descriptor::{Constructor, Param, TypeDescriptor, TypeKind};

pub mod property;

mod registry;
pub use registry::TypeRegistry;

mod type_ref;
pub use type_ref::TypeRef;
