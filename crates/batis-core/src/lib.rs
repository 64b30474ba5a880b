//! Mapping metadata and the resolution engine that builds it.
//!
//! Mapper documents are parsed elsewhere (see `batis-xml`); this crate holds
//! the resolved [`mapping`] structures, the session-scoped [`Configuration`]
//! registry, the static type table used instead of runtime reflection, and the
//! builders that turn declared elements into frozen [`mapping::ResultMap`]s.

mod error;
pub use error::{Error, IntoError, UnresolvedItem};

pub mod builder;

pub mod mapping;

pub mod reflect;
pub use reflect::{TypeDescriptor, TypeRef, TypeRegistry};

pub mod registry;
pub use registry::{Configuration, Settings};

mod resolution;
pub use resolution::Resolution;

pub mod xnode;
pub use xnode::XNode;

/// A Result type alias that uses batis' [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
