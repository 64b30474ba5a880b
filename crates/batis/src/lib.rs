//! Load sessions for mapper documents.
//!
//! A [`Session`] owns one [`Configuration`] for the lifetime of a load
//! session. Documents may be loaded in any order; references between them
//! are resolved as the documents they name arrive, and [`Session::finish`]
//! reports anything still unresolved.

pub mod session;
pub use session::Session;

pub use batis_core::{
    builder, mapping, reflect, registry, Configuration, Error, Resolution, Result, Settings,
    TypeDescriptor, TypeRef, TypeRegistry,
};
pub use batis_xml::Progress;
