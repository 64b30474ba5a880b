use crate::mapper::required_attribute;
use batis_core::builder::MapperBuilderAssistant;
use batis_core::mapping::SqlText;
use batis_core::xnode::Content;
use batis_core::{Error, Resolution, Result, XNode};
use indexmap::IndexMap;

/// Expands `<include refid>` elements of a statement body into SQL text.
///
/// `${name}` placeholders inside included fragments are replaced by the
/// `<property>` values of the enclosing includes. The body is dynamic when
/// it still has placeholders or any other child element.
pub(crate) struct IncludeExpander<'a, 'c> {
    assistant: &'a MapperBuilderAssistant<'c>,
}

#[derive(Default)]
struct Expansion {
    text: String,
    dynamic: bool,

    /// Fragment ids currently being expanded
    stack: Vec<String>,
}

impl<'a, 'c> IncludeExpander<'a, 'c> {
    pub(crate) fn new(assistant: &'a MapperBuilderAssistant<'c>) -> Self {
        IncludeExpander { assistant }
    }

    pub(crate) fn expand(&self, node: &XNode) -> Result<Resolution<SqlText>> {
        let mut expansion = Expansion::default();

        if let Resolution::Deferred(reason) = self.walk(node, &IndexMap::new(), &mut expansion)? {
            return Ok(Resolution::Deferred(reason));
        }

        Ok(Resolution::Resolved(SqlText {
            text: expansion
                .text
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" "),
            dynamic: expansion.dynamic,
        }))
    }

    fn walk(
        &self,
        node: &XNode,
        variables: &IndexMap<String, String>,
        out: &mut Expansion,
    ) -> Result<Resolution<()>> {
        for content in node.contents() {
            let child = match content {
                Content::Text(text) => {
                    let text = substitute(text, variables);
                    out.dynamic |= text.contains("${");
                    out.text.push_str(&text);
                    out.text.push(' ');
                    continue;
                }
                Content::Element(child) => child,
            };

            match child.name() {
                "include" => {
                    if let Resolution::Deferred(reason) = self.include(child, variables, out)? {
                        return Ok(Resolution::Deferred(reason));
                    }
                }
                "selectKey" => {}
                _ => {
                    out.dynamic = true;
                    if let Resolution::Deferred(reason) = self.walk(child, variables, out)? {
                        return Ok(Resolution::Deferred(reason));
                    }
                }
            }
        }

        Ok(Resolution::Resolved(()))
    }

    fn include(
        &self,
        node: &XNode,
        variables: &IndexMap<String, String>,
        out: &mut Expansion,
    ) -> Result<Resolution<()>> {
        let refid = substitute(required_attribute(node, "refid")?, variables);
        let id = self.assistant.apply_current_namespace(&refid, true)?;

        let Some(fragment) = self.assistant.config().sql_fragment(&id) else {
            return Ok(Resolution::deferred(format!(
                "Could not find SQL statement to include with refid '{id}'"
            )));
        };

        if out.stack.contains(&id) {
            return Err(Error::invalid_mapping(format!(
                "circular include of SQL fragment '{id}'"
            )));
        }

        let mut scoped = variables.clone();
        let mut declared = vec![];
        for property in node.children_named("property") {
            let name = required_attribute(property, "name")?;
            if declared.contains(&name) {
                return Err(Error::invalid_mapping(format!(
                    "Variable {name} defined twice in the same include definition"
                )));
            }
            declared.push(name);

            let value = substitute(required_attribute(property, "value")?, variables);
            scoped.insert(name.to_string(), value);
        }

        out.stack.push(id);
        let resolution = self.walk(&fragment.node, &scoped, out)?;
        out.stack.pop();

        Ok(resolution)
    }
}

/// Replaces `${name}` placeholders that have a value; others are kept.
fn substitute(text: &str, variables: &IndexMap<String, String>) -> String {
    if variables.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start + 2..].find('}') else {
            break;
        };

        let name = &rest[start + 2..start + 2 + len];
        out.push_str(&rest[..start]);
        match variables.get(name) {
            Some(value) => out.push_str(value),
            None => out.push_str(&rest[start..start + 3 + len]),
        }
        rest = &rest[start + 3 + len..];
    }

    out.push_str(rest);
    out
}
