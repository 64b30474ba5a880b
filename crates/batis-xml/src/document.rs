use batis_core::{Error, Result, XNode};
use roxmltree::{Document, Node, ParsingOptions};

/// Parses XML source into an owned element tree with value-based
/// identifiers indexed from the root element.
///
/// Document type declarations are accepted but not fetched.
pub fn parse_document(source: &str) -> Result<XNode> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };

    let document = Document::parse_with_options(source, options).map_err(Error::xml)?;

    let mut root = convert(&document, document.root_element());
    root.index_identifiers();
    Ok(root)
}

fn convert(document: &Document<'_>, node: Node<'_, '_>) -> XNode {
    let line = document.text_pos_at(node.range().start).row;

    let mut element = node
        .attributes()
        .fold(XNode::new(node.tag_name().name()), |element, attribute| {
            element.with_attribute(attribute.name(), attribute.value())
        })
        .with_line(line);

    for child in node.children() {
        if child.is_element() {
            element = element.with_child(convert(document, child));
        } else if child.is_text() {
            element = element.with_text(child.text().unwrap_or_default());
        }
    }

    element
}
