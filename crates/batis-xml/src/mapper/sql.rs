use super::{required_attribute, XmlMapperBuilder};
use batis_core::mapping::SqlFragment;
use batis_core::{Result, XNode};
use std::sync::Arc;

impl XmlMapperBuilder<'_> {
    /// Registers `<sql>` fragments. Fragments tagged with the active database
    /// id are taken first; an untagged fragment is only taken when no tagged
    /// one was.
    pub(super) fn sql_elements(&self, nodes: Vec<&XNode>) -> Result<()> {
        if let Some(database_id) = self.config.database_id() {
            self.sql_pass(&nodes, Some(database_id))?;
        }
        self.sql_pass(&nodes, None)
    }

    fn sql_pass(&self, nodes: &[&XNode], required_database_id: Option<&str>) -> Result<()> {
        for node in nodes {
            let database_id = node.attribute("databaseId");
            let id = self
                .assistant
                .apply_current_namespace(required_attribute(node, "id")?, false)?;

            if !self.fragment_matches(&id, database_id, required_database_id) {
                continue;
            }

            self.config.add_sql_fragment(SqlFragment {
                id,
                database_id: database_id.map(str::to_string),
                node: Arc::new((*node).clone()),
            })?;
        }
        Ok(())
    }

    fn fragment_matches(
        &self,
        id: &str,
        database_id: Option<&str>,
        required_database_id: Option<&str>,
    ) -> bool {
        match (required_database_id, database_id) {
            (Some(required), _) => database_id == Some(required),
            (None, Some(_)) => false,
            (None, None) => self
                .config
                .sql_fragment(id)
                .map_or(true, |previous| previous.database_id.is_none()),
        }
    }
}
