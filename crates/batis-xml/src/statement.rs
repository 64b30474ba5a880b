use crate::include::IncludeExpander;
use crate::mapper::required_attribute;
use batis_core::builder::{MapperBuilderAssistant, StatementSpec};
use batis_core::mapping::StatementKind;
use batis_core::registry::PendingStatement;
use batis_core::{Configuration, Resolution, Result, XNode};
use std::sync::Arc;

/// Builds one `<select|insert|update|delete>` element.
///
/// Kept in the pending queue while its result maps, parameter map, included
/// fragments, or namespace cache are missing.
#[derive(Debug)]
pub struct XmlStatementBuilder {
    resource: String,
    namespace: String,
    id: String,
    node: Arc<XNode>,

    /// Database id this build is restricted to, `None` for the untagged pass
    required_database_id: Option<String>,
}

impl XmlStatementBuilder {
    pub fn new(
        assistant: &MapperBuilderAssistant<'_>,
        node: Arc<XNode>,
        required_database_id: Option<&str>,
    ) -> Result<XmlStatementBuilder> {
        let id = assistant.apply_current_namespace(required_attribute(&node, "id")?, false)?;

        Ok(XmlStatementBuilder {
            resource: assistant.resource().to_string(),
            namespace: assistant.current_namespace()?.to_string(),
            id,
            node,
            required_database_id: required_database_id.map(str::to_string),
        })
    }

    /// Registers the statement. Elements whose `databaseId` does not apply to
    /// this build are skipped and count as resolved.
    pub fn parse_statement(&self, config: &Configuration) -> Result<Resolution<()>> {
        let node = &self.node;
        let database_id = node.attribute("databaseId");

        if !self.database_id_matches(config, database_id) {
            tracing::trace!(id = %self.id, ?database_id, "statement skipped for database id");
            return Ok(Resolution::Resolved(()));
        }

        let mut assistant = MapperBuilderAssistant::new(config, &self.resource);
        assistant.set_namespace(&self.namespace)?;

        let kind = StatementKind::from_element(node.name())?;

        let sql = match IncludeExpander::new(&assistant).expand(node)? {
            Resolution::Resolved(sql) => sql,
            Resolution::Deferred(reason) => return Ok(Resolution::Deferred(reason)),
        };

        let types = config.types();
        let attribute = |name: &str| node.attribute(name).map(str::to_string);

        let spec = StatementSpec {
            id: required_attribute(node, "id")?.to_string(),
            kind,
            database_id: attribute("databaseId"),
            parameter_type: types.resolve_opt(node.attribute("parameterType"))?,
            parameter_map: attribute("parameterMap"),
            result_map: attribute("resultMap"),
            result_type: types.resolve_opt(node.attribute("resultType"))?,
            result_sets: attribute("resultSets"),
            key_property: attribute("keyProperty"),
            key_column: attribute("keyColumn"),
            timeout: node.parse_attribute("timeout")?,
            fetch_size: node.parse_attribute("fetchSize")?,
            flush_cache: node.bool_attribute("flushCache")?,
            use_cache: node.bool_attribute("useCache")?,
            result_ordered: node.bool_attribute("resultOrdered")?.unwrap_or(false),
            sql,
        };

        Ok(assistant.add_mapped_statement(spec)?.map(|_| ()))
    }

    fn database_id_matches(&self, config: &Configuration, database_id: Option<&str>) -> bool {
        match (self.required_database_id.as_deref(), database_id) {
            (Some(required), _) => database_id == Some(required),
            (None, Some(_)) => false,
            (None, None) => config
                .mapped_statement(&self.id)
                .map_or(true, |previous| previous.database_id.is_none()),
        }
    }
}

impl PendingStatement for XmlStatementBuilder {
    fn id(&self) -> &str {
        &self.id
    }

    fn resource(&self) -> &str {
        &self.resource
    }

    fn resolve(&self, config: &Configuration) -> Result<Resolution<()>> {
        self.parse_statement(config)
    }
}
