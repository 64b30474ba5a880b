//! Owned element tree for mapper documents.
//!
//! The syntax layer converts parsed XML into [`XNode`]s so elements can be
//! queued, shared across retry passes, and stored (for `<sql>` fragments)
//! without borrowing the source text.

use crate::{Error, Result};
use indexmap::IndexMap;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub struct XNode {
    name: String,
    attributes: IndexMap<String, String>,
    contents: Vec<Content>,

    /// 1-based source line, or 0 when built in code
    line: u32,

    /// Path-derived identifier, see [`XNode::value_based_identifier`]
    identifier: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Element(XNode),
    Text(String),
}

impl XNode {
    pub fn new(name: impl Into<String>) -> XNode {
        let name = name.into();
        XNode {
            identifier: segment(&name, None),
            name,
            attributes: IndexMap::new(),
            contents: vec![],
            line: 0,
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: XNode) -> Self {
        self.contents.push(Content::Element(child));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.contents.push(Content::Text(text.into()));
        self
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = line;
        self
    }

    /// Recomputes the value-based identifiers of this node and its
    /// descendants, treating this node as the document root.
    pub fn index_identifiers(&mut self) {
        let own = segment(&self.name, self.identifying_value().as_deref());
        self.index_under(own);
    }

    /// Siblings sharing a segment get their occurrence number appended,
    /// e.g. a second `case[1]` becomes `case[1][2]`.
    fn index_under(&mut self, identifier: String) {
        self.identifier = identifier;

        let mut seen = IndexMap::<String, usize>::new();
        for content in &mut self.contents {
            if let Content::Element(child) = content {
                let own = segment(&child.name, child.identifying_value().as_deref());
                let count = seen.entry(own.clone()).or_default();
                *count += 1;

                let own = match *count {
                    1 => own,
                    n => format!("{own}[{n}]"),
                };
                child.index_under(format!("{}_{own}", self.identifier));
            }
        }
    }

    fn identifying_value(&self) -> Option<String> {
        self.attribute("id")
            .or_else(|| self.attribute("value"))
            .or_else(|| self.attribute("property"))
            .map(|value| value.replace('.', "_"))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    /// Identifier derived from the element path from the document root, e.g.
    /// `mapper_resultMap[studentMap]_collection[teachers]`.
    pub fn value_based_identifier(&self) -> &str {
        &self.identifier
    }

    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn attribute_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.attribute(name).unwrap_or(default)
    }

    /// Parses an attribute, naming the element and attribute on failure.
    pub fn parse_attribute<T>(&self, name: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: core::fmt::Display,
    {
        let Some(raw) = self.attribute(name) else {
            return Ok(None);
        };

        raw.trim().parse().map(Some).map_err(|err| {
            Error::invalid_mapping(format!(
                "invalid value '{raw}' for attribute '{name}' on <{}> (line {}): {err}",
                self.name, self.line
            ))
        })
    }

    pub fn bool_attribute(&self, name: &str) -> Result<Option<bool>> {
        self.parse_attribute(name)
    }

    pub fn contents(&self) -> &[Content] {
        &self.contents
    }

    /// Child elements, in document order.
    pub fn children(&self) -> impl Iterator<Item = &XNode> {
        self.contents.iter().filter_map(|content| match content {
            Content::Element(child) => Some(child),
            Content::Text(_) => None,
        })
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XNode> {
        self.children().filter(move |child| child.name == name)
    }

    /// First child element with the given name.
    pub fn child(&self, name: &str) -> Option<&XNode> {
        self.children().find(|child| child.name == name)
    }

    /// Collects `name`/`value` attribute pairs of the child elements.
    pub fn children_as_properties(&self) -> IndexMap<String, String> {
        self.children()
            .filter_map(|child| {
                let name = child.attribute("name")?;
                let value = child.attribute("value")?;
                Some((name.to_string(), value.to_string()))
            })
            .collect()
    }

    /// Concatenated text of this element and its descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for content in &self.contents {
            match content {
                Content::Text(text) => out.push_str(text),
                Content::Element(child) => child.collect_text(out),
            }
        }
    }
}

fn segment(name: &str, value: Option<&str>) -> String {
    match value {
        Some(value) => format!("{name}[{value}]"),
        None => name.to_string(),
    }
}
