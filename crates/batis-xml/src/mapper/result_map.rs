use super::{required_attribute, XmlMapperBuilder};
use batis_core::builder::{
    infer_type, Case, CaseTarget, DiscriminatorResolver, DiscriminatorSpec, ElementKind,
    InferredType, InlineResultMaps, ResultMapSpec, ResultMappingSpec, TypeAttributes,
};
use batis_core::mapping::{Discriminator, JdbcType, ResultFlag, ResultMapping};
use batis_core::registry::ResultMapResolver;
use batis_core::{Error, Resolution, Result, TypeRef, XNode};

impl XmlMapperBuilder<'_> {
    pub(super) fn result_map_elements<'n>(
        &self,
        nodes: impl Iterator<Item = &'n XNode>,
    ) -> Result<()> {
        for node in nodes {
            self.result_map_element(node, &[], None)?;
        }
        Ok(())
    }

    /// Builds the result map declared by `node` and returns its id.
    ///
    /// A map waiting on its parent is queued for a later pass; its id is
    /// returned all the same so enclosing maps can refer to it.
    fn result_map_element(
        &self,
        node: &XNode,
        additional: &[ResultMapping],
        enclosing: Option<&TypeRef>,
    ) -> Result<String> {
        tracing::trace!(element = node.value_based_identifier(), "processing result map");

        let ty = self.element_type(node, enclosing)?;

        let mut result_mappings = additional.to_vec();
        let mut discriminator = None;

        for child in node.children() {
            match child.name() {
                "constructor" => self.constructor_element(child, &ty, &mut result_mappings)?,
                "discriminator" => {
                    discriminator = Some(self.discriminator_element(child, &ty, &result_mappings)?);
                }
                name => {
                    let flags = if name == "id" { vec![ResultFlag::Id] } else { vec![] };
                    result_mappings.push(self.build_result_mapping_from_node(child, &ty, flags)?);
                }
            }
        }

        let spec = ResultMapSpec {
            id: node
                .attribute("id")
                .unwrap_or(node.value_based_identifier())
                .to_string(),
            ty,
            extends: node.attribute("extends").map(str::to_string),
            discriminator,
            result_mappings,
            auto_mapping: node.bool_attribute("autoMapping")?,
        };

        match self.assistant.add_result_map(&spec)? {
            Resolution::Resolved(result_map) => Ok(result_map.id().to_string()),
            Resolution::Deferred(reason) => {
                let namespace = self.assistant.current_namespace()?;
                let id = self.assistant.apply_current_namespace(&spec.id, false)?;
                self.config.add_incomplete_result_map(
                    ResultMapResolver::new(&self.resource, namespace, id.clone(), spec),
                    reason,
                );
                Ok(id)
            }
        }
    }

    fn element_type(&self, node: &XNode, enclosing: Option<&TypeRef>) -> Result<TypeRef> {
        let attrs = TypeAttributes {
            ty: node.attribute("type"),
            of_type: node.attribute("ofType"),
            result_type: node.attribute("resultType"),
            java_type: node.attribute("javaType"),
            result_map: node.attribute("resultMap"),
            property: node.attribute("property"),
        };

        let kind = ElementKind::from_name(node.name());
        match infer_type(kind, &attrs, enclosing, self.config.types())? {
            InferredType::Resolved(ty) => Ok(ty),
            InferredType::Unresolved => Err(Error::invalid_mapping(format!(
                "could not determine the type of <{}> '{}' (line {})",
                node.name(),
                node.value_based_identifier(),
                node.line()
            ))),
        }
    }

    fn constructor_element(
        &self,
        node: &XNode,
        result_type: &TypeRef,
        result_mappings: &mut Vec<ResultMapping>,
    ) -> Result<()> {
        for arg in node.children() {
            let mut flags = vec![ResultFlag::Constructor];
            if arg.name() == "idArg" {
                flags.push(ResultFlag::Id);
            }
            result_mappings.push(self.build_result_mapping_from_node(arg, result_type, flags)?);
        }
        Ok(())
    }

    fn discriminator_element(
        &self,
        node: &XNode,
        result_type: &TypeRef,
        result_mappings: &[ResultMapping],
    ) -> Result<Discriminator> {
        let types = self.config.types();

        let spec = DiscriminatorSpec {
            column: node.attribute("column").map(str::to_string),
            java_type: types.resolve_opt(node.attribute("javaType"))?,
            jdbc_type: JdbcType::resolve(node.attribute("jdbcType"))?,
            type_handler: types.resolve_opt(node.attribute("typeHandler"))?,
        };

        let cases = node
            .children()
            .map(|child| -> Result<Case<&XNode>> {
                Ok(Case {
                    value: required_attribute(child, "value")?.to_string(),
                    target: match child.attribute("resultMap") {
                        Some(id) => CaseTarget::ResultMap(id.to_string()),
                        None => CaseTarget::Inline(child),
                    },
                })
            })
            .collect::<Result<Vec<_>>>()?;

        DiscriminatorResolver::new(&self.assistant).resolve(
            spec,
            &cases,
            result_type,
            result_mappings,
            &mut NestedResultMaps { builder: self },
        )
    }

    fn build_result_mapping_from_node(
        &self,
        node: &XNode,
        result_type: &TypeRef,
        flags: Vec<ResultFlag>,
    ) -> Result<ResultMapping> {
        let types = self.config.types();

        let property = if flags.contains(&ResultFlag::Constructor) {
            node.attribute("name")
        } else {
            node.attribute("property")
        };

        let nested_result_map = match node.attribute("resultMap") {
            Some(id) => Some(id.to_string()),
            None => self.process_nested_result_mappings(node, &[], result_type)?,
        };

        let spec = ResultMappingSpec {
            property: property.map(str::to_string),
            column: node.attribute("column").map(str::to_string),
            java_type: types.resolve_opt(node.attribute("javaType"))?,
            jdbc_type: JdbcType::resolve(node.attribute("jdbcType"))?,
            nested_select: node.attribute("select").map(str::to_string),
            nested_result_map,
            not_null_column: node.attribute("notNullColumn").map(str::to_string),
            column_prefix: node.attribute("columnPrefix").map(str::to_string),
            type_handler: types.resolve_opt(node.attribute("typeHandler"))?,
            flags,
            result_set: node.attribute("resultSet").map(str::to_string),
            foreign_column: node.attribute("foreignColumn").map(str::to_string),
            lazy: node.attribute("fetchType").map(|fetch_type| fetch_type == "lazy"),
        };

        self.assistant.build_result_mapping(result_type, spec)
    }

    /// Builds the anonymous result map of an `association`, `collection`, or
    /// `case` without a nested select.
    fn process_nested_result_mappings(
        &self,
        node: &XNode,
        result_mappings: &[ResultMapping],
        enclosing: &TypeRef,
    ) -> Result<Option<String>> {
        if !ElementKind::from_name(node.name()).is_nested() || node.attribute("select").is_some() {
            return Ok(None);
        }

        self.validate_collection(node, enclosing)?;
        self.result_map_element(node, result_mappings, Some(enclosing))
            .map(Some)
    }

    fn validate_collection(&self, node: &XNode, enclosing: &TypeRef) -> Result<()> {
        if node.name() != "collection"
            || node.attribute("resultMap").is_some()
            || node.attribute("javaType").is_some()
        {
            return Ok(());
        }

        let property = node.attribute("property").unwrap_or_default();
        if !self.config.types().has_setter(enclosing, property) {
            return Err(Error::invalid_mapping(format!(
                "Ambiguous collection type for property '{property}'. You must specify 'javaType' or 'resultMap'."
            )));
        }

        Ok(())
    }
}

/// Builds inline discriminator cases through the document builder.
struct NestedResultMaps<'b, 'a> {
    builder: &'b XmlMapperBuilder<'a>,
}

impl<'n> InlineResultMaps<&'n XNode> for NestedResultMaps<'_, '_> {
    fn build_inline(
        &mut self,
        node: &&'n XNode,
        accumulated: &[ResultMapping],
        enclosing: &TypeRef,
    ) -> Result<Option<String>> {
        self.builder
            .process_nested_result_mappings(node, accumulated, enclosing)
    }
}
