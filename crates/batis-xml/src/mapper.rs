mod cache;
mod parameter_map;
mod result_map;
mod sql;

use crate::{document, resolve_pending, Progress, XmlStatementBuilder};
use batis_core::builder::MapperBuilderAssistant;
use batis_core::reflect::TypeKind;
use batis_core::{err, Configuration, Error, Resolution, Result, TypeRef, XNode};
use std::sync::Arc;

/// Walks one `<mapper>` document and registers its elements.
#[derive(Debug)]
pub struct XmlMapperBuilder<'a> {
    config: &'a Configuration,
    assistant: MapperBuilderAssistant<'a>,
    resource: String,
    root: Arc<XNode>,
}

impl<'a> XmlMapperBuilder<'a> {
    /// Parses `source` as the document loaded from `resource`.
    pub fn new(config: &'a Configuration, resource: &str, source: &str) -> Result<Self> {
        let root = document::parse_document(source)
            .map_err(|cause| cause.context(err!("error parsing mapper document '{resource}'")))?;
        Ok(XmlMapperBuilder::from_node(config, resource, root))
    }

    /// Uses an element tree that was already parsed.
    pub fn from_node(config: &'a Configuration, resource: &str, root: XNode) -> Self {
        XmlMapperBuilder {
            config,
            assistant: MapperBuilderAssistant::new(config, resource),
            resource: resource.to_string(),
            root: Arc::new(root),
        }
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Registers the document's elements unless its resource was loaded
    /// before, then retries every queued element.
    pub fn parse(&mut self) -> Result<Progress> {
        if self.config.is_resource_loaded(&self.resource) {
            tracing::debug!(resource = %self.resource, "mapper document already loaded; skipping");
        } else {
            self.configuration_element().map_err(|cause| {
                cause.context(err!("error parsing mapper document '{}'", self.resource))
            })?;
            self.config.add_loaded_resource(&self.resource);
            self.bind_mapper_for_namespace();
            tracing::debug!(resource = %self.resource, "mapper document parsed");
        }

        resolve_pending(self.config)
    }

    fn configuration_element(&mut self) -> Result<()> {
        let root = self.root.clone();

        if root.name() != "mapper" {
            return Err(Error::invalid_mapping(format!(
                "expected a <mapper> root element, found <{}>",
                root.name()
            )));
        }

        let namespace = root.attribute("namespace").unwrap_or_default();
        if namespace.is_empty() {
            return Err(Error::invalid_mapping("Mapper's namespace cannot be empty"));
        }
        self.assistant.set_namespace(namespace)?;

        self.cache_ref_element(root.child("cache-ref"))?;
        self.cache_element(root.child("cache"))?;
        self.parameter_map_elements(root.children_named("parameterMap"))?;
        self.result_map_elements(root.children_named("resultMap"))?;
        self.sql_elements(root.children_named("sql").collect())?;
        self.statement_elements(
            root.children()
                .filter(|child| matches!(child.name(), "select" | "insert" | "update" | "delete"))
                .collect(),
        )
    }

    /// Statements are built once for the active database id, then once for
    /// untagged elements.
    fn statement_elements(&self, nodes: Vec<&XNode>) -> Result<()> {
        if let Some(database_id) = self.config.database_id() {
            self.statement_pass(&nodes, Some(database_id))?;
        }
        self.statement_pass(&nodes, None)
    }

    fn statement_pass(&self, nodes: &[&XNode], required_database_id: Option<&str>) -> Result<()> {
        for node in nodes {
            let statement = XmlStatementBuilder::new(
                &self.assistant,
                Arc::new((*node).clone()),
                required_database_id,
            )?;

            if let Resolution::Deferred(reason) = statement.parse_statement(self.config)? {
                self.config
                    .add_incomplete_statement(Arc::new(statement), reason);
            }
        }
        Ok(())
    }

    fn bind_mapper_for_namespace(&self) {
        let Ok(namespace) = self.assistant.current_namespace() else {
            return;
        };

        let ty = TypeRef::new(namespace);
        if self.config.types().kind(&ty) != Some(TypeKind::Mapper) {
            tracing::trace!(namespace, "no mapper type for namespace");
            return;
        }

        if !self.config.has_mapper(&ty) {
            self.config.add_loaded_resource(format!("namespace:{namespace}"));
            self.config.add_mapper(ty);
        }
    }
}

/// Reads an attribute the element cannot do without.
pub(crate) fn required_attribute<'n>(node: &'n XNode, name: &str) -> Result<&'n str> {
    node.attribute(name).ok_or_else(|| {
        Error::invalid_mapping(format!(
            "<{}> element requires a '{name}' attribute (line {})",
            node.name(),
            node.line()
        ))
    })
}
