use super::{Discriminator, ResultMapping};
use crate::{builder::ResultMapBuilder, TypeRef};
use indexmap::IndexSet;
use std::sync::atomic::{AtomicBool, Ordering};

/// Resolved description of how one row shape maps onto one target type.
///
/// A result map is frozen once built. The only later change allowed is
/// [`ResultMap::force_nested_result_maps`], used when polymorphic case maps
/// turn out to have nested result maps of their own.
#[derive(Debug)]
pub struct ResultMap {
    pub(crate) id: String,
    pub(crate) ty: TypeRef,
    pub(crate) result_mappings: Vec<ResultMapping>,
    pub(crate) id_result_mappings: Vec<ResultMapping>,
    pub(crate) constructor_result_mappings: Vec<ResultMapping>,
    pub(crate) property_result_mappings: Vec<ResultMapping>,

    /// Upper-cased column names
    pub(crate) mapped_columns: IndexSet<String>,
    pub(crate) mapped_properties: IndexSet<String>,
    pub(crate) discriminator: Option<Discriminator>,
    pub(crate) has_nested_result_maps: AtomicBool,
    pub(crate) has_nested_queries: bool,
    pub(crate) auto_mapping: Option<bool>,
}

impl ResultMap {
    pub fn builder(
        id: impl Into<String>,
        ty: TypeRef,
        result_mappings: Vec<ResultMapping>,
    ) -> ResultMapBuilder {
        ResultMapBuilder::new(id, ty, result_mappings)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn ty(&self) -> &TypeRef {
        &self.ty
    }

    /// Every mapping, in declaration order.
    pub fn result_mappings(&self) -> &[ResultMapping] {
        &self.result_mappings
    }

    /// Mappings that identify a row. When no mapping is flagged as an id,
    /// every mapping is.
    pub fn id_result_mappings(&self) -> &[ResultMapping] {
        &self.id_result_mappings
    }

    /// Constructor arguments, in the matched constructor's parameter order.
    pub fn constructor_result_mappings(&self) -> &[ResultMapping] {
        &self.constructor_result_mappings
    }

    pub fn property_result_mappings(&self) -> &[ResultMapping] {
        &self.property_result_mappings
    }

    pub fn mapped_columns(&self) -> &IndexSet<String> {
        &self.mapped_columns
    }

    pub fn mapped_properties(&self) -> &IndexSet<String> {
        &self.mapped_properties
    }

    pub fn discriminator(&self) -> Option<&Discriminator> {
        self.discriminator.as_ref()
    }

    pub fn has_nested_result_maps(&self) -> bool {
        self.has_nested_result_maps.load(Ordering::Acquire)
    }

    pub fn has_nested_queries(&self) -> bool {
        self.has_nested_queries
    }

    pub fn auto_mapping(&self) -> Option<bool> {
        self.auto_mapping
    }

    pub fn force_nested_result_maps(&self) {
        self.has_nested_result_maps.store(true, Ordering::Release);
    }
}
