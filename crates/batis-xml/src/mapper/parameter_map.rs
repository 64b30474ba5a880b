use super::{required_attribute, XmlMapperBuilder};
use batis_core::builder::ParameterMappingSpec;
use batis_core::mapping::{JdbcType, ParameterMode};
use batis_core::{Result, TypeRef, XNode};

impl XmlMapperBuilder<'_> {
    /// Translates legacy `<parameterMap>` elements.
    pub(super) fn parameter_map_elements<'n>(
        &self,
        nodes: impl Iterator<Item = &'n XNode>,
    ) -> Result<()> {
        let types = self.config.types();

        for node in nodes {
            let id = required_attribute(node, "id")?;
            let ty = types
                .resolve_opt(node.attribute("type"))?
                .unwrap_or_else(TypeRef::object);

            let mut parameter_mappings = vec![];
            for parameter in node.children_named("parameter") {
                let spec = ParameterMappingSpec {
                    property: required_attribute(parameter, "property")?.to_string(),
                    java_type: types.resolve_opt(parameter.attribute("javaType"))?,
                    jdbc_type: JdbcType::resolve(parameter.attribute("jdbcType"))?,
                    result_map: parameter.attribute("resultMap").map(str::to_string),
                    mode: ParameterMode::resolve(parameter.attribute("mode"))?,
                    type_handler: types.resolve_opt(parameter.attribute("typeHandler"))?,
                    numeric_scale: parameter.parse_attribute("numericScale")?,
                };
                parameter_mappings.push(self.assistant.build_parameter_mapping(&ty, spec)?);
            }

            self.assistant.add_parameter_map(id, ty, parameter_mappings)?;
        }

        Ok(())
    }
}
