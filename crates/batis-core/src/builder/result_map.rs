use super::ConstructorResolver;
use crate::mapping::{Discriminator, ResultFlag, ResultMap, ResultMapping};
use crate::{Error, Result, TypeRef};
use indexmap::{IndexMap, IndexSet};
use std::sync::atomic::AtomicBool;

/// Assembles a [`ResultMap`] from a flat list of mappings.
#[derive(Debug)]
pub struct ResultMapBuilder {
    id: String,
    ty: TypeRef,
    result_mappings: Vec<ResultMapping>,
    discriminator: Option<Discriminator>,
    auto_mapping: Option<bool>,
}

impl ResultMapBuilder {
    pub fn new(id: impl Into<String>, ty: TypeRef, result_mappings: Vec<ResultMapping>) -> Self {
        ResultMapBuilder {
            id: id.into(),
            ty,
            result_mappings,
            discriminator: None,
            auto_mapping: None,
        }
    }

    pub fn discriminator(mut self, discriminator: Option<Discriminator>) -> Self {
        self.discriminator = discriminator;
        self
    }

    pub fn auto_mapping(mut self, auto_mapping: Option<bool>) -> Self {
        self.auto_mapping = auto_mapping;
        self
    }

    pub fn build(self, constructors: &ConstructorResolver<'_>) -> Result<ResultMap> {
        if self.id.is_empty() {
            return Err(Error::invalid_mapping("ResultMaps must have an id"));
        }

        let mut has_nested_queries = false;
        let mut has_nested_result_maps = false;
        let mut mapped_columns = IndexSet::new();
        let mut mapped_properties = IndexSet::new();
        let mut id_result_mappings = vec![];
        let mut constructor_result_mappings = vec![];
        let mut property_result_mappings = vec![];
        let mut constructor_arg_names = vec![];
        let mut declared_types = IndexMap::new();

        for mapping in &self.result_mappings {
            has_nested_queries |= mapping.nested_select_id.is_some();
            has_nested_result_maps |=
                mapping.nested_result_map_id.is_some() && mapping.result_set.is_none();

            if let Some(column) = &mapping.column {
                mapped_columns.insert(column.to_uppercase());
            } else {
                for composite in &mapping.composites {
                    if let Some(column) = &composite.column {
                        mapped_columns.insert(column.to_uppercase());
                    }
                }
            }

            if let Some(property) = &mapping.property {
                mapped_properties.insert(property.clone());
            }

            if mapping.has_flag(ResultFlag::Constructor) {
                constructor_result_mappings.push(mapping.clone());
                if let Some(property) = &mapping.property {
                    constructor_arg_names.push(property.clone());
                    if let Some(declared) = &mapping.declared_java_type {
                        declared_types.insert(property.clone(), declared.clone());
                    }
                }
            } else {
                property_result_mappings.push(mapping.clone());
            }

            if mapping.has_flag(ResultFlag::Id) {
                id_result_mappings.push(mapping.clone());
            }
        }

        if id_result_mappings.is_empty() {
            id_result_mappings = self.result_mappings.clone();
        }

        if !constructor_arg_names.is_empty() {
            let Some(actual_arg_names) =
                constructors.resolve(&self.id, &self.ty, &constructor_arg_names, &declared_types)
            else {
                return Err(Error::constructor_not_found(
                    &self.id,
                    self.ty.name(),
                    &constructor_arg_names,
                ));
            };

            // Unnamed arguments sort ahead of named ones.
            constructor_result_mappings.sort_by_key(|mapping| {
                mapping
                    .property
                    .as_ref()
                    .and_then(|property| actual_arg_names.iter().position(|name| name == property))
            });
        }

        Ok(ResultMap {
            id: self.id,
            ty: self.ty,
            result_mappings: self.result_mappings,
            id_result_mappings,
            constructor_result_mappings,
            property_result_mappings,
            mapped_columns,
            mapped_properties,
            discriminator: self.discriminator,
            has_nested_result_maps: AtomicBool::new(has_nested_result_maps),
            has_nested_queries,
            auto_mapping: self.auto_mapping,
        })
    }
}
