//! Parsing of catalog fragment markup into element subtrees
//!
//! A fragment is a sequence of sibling elements without a root of its own
//! (e.g. `<rect .../><line .../>`). It is wrapped in a synthetic parent for
//! parsing and the parent is discarded afterwards.

use crate::error::FragmentError;

use super::node::{Element, Node, VectorNode, SVG_NAMESPACE};

const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";
const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Parse fragment markup into a list of top-level nodes
///
/// `entry` is the catalog id of the fragment and only used for error reporting.
/// Whitespace-only text between elements is dropped.
pub fn parse_fragment(entry: &str, markup: &str) -> Result<Vec<Node>, FragmentError> {
    let prefix = format!(
        r#"<fragment xmlns="{}" xmlns:xlink="{}">"#,
        SVG_NAMESPACE, XLINK_NAMESPACE
    );
    let wrapped = format!("{}{}</fragment>", prefix, markup);

    let doc = roxmltree::Document::parse(&wrapped).map_err(|e| {
        let pos = e.pos();
        let absolute = char_offset(&wrapped, pos.row as usize, pos.col as usize);
        let offset = absolute
            .saturating_sub(prefix.chars().count())
            .min(markup.chars().count());
        FragmentError {
            entry: entry.to_string(),
            markup: markup.to_string(),
            offset,
            message: e.to_string(),
        }
    })?;

    Ok(convert_children(doc.root_element(), false))
}

/// Elements whose whitespace-only character data is significant
const TEXT_CONTENT_TAGS: [&str; 3] = ["text", "tspan", "textPath"];

/// Convert the children of `parent`
///
/// Whitespace-only text is kept when `preserve` is set or when it sits in
/// mixed content next to other character data. Between plain elements it is
/// indentation and is dropped.
fn convert_children(parent: roxmltree::Node<'_, '_>, preserve: bool) -> Vec<Node> {
    let mixed = parent
        .children()
        .any(|c| c.is_text() && c.text().is_some_and(|t| !t.trim().is_empty()));

    let mut nodes = Vec::new();
    for child in parent.children() {
        if child.is_element() {
            nodes.push(Node::Element(convert_element(child, preserve)));
        } else if child.is_text() {
            match child.text() {
                Some(text) if preserve || mixed || !text.trim().is_empty() => {
                    nodes.push(Node::Text(text.to_string()))
                }
                _ => {}
            }
        } else if child.is_comment() {
            nodes.push(Node::Comment(child.text().unwrap_or_default().to_string()));
        } else if let Some(pi) = child.pi() {
            nodes.push(Node::ProcessingInstruction {
                target: pi.target.to_string(),
                value: pi.value.map(str::to_string),
            });
        }
    }
    nodes
}

fn convert_element(node: roxmltree::Node<'_, '_>, inherited: bool) -> Element {
    let tag = node.tag_name().name();
    let mut element = Element::new(tag);
    for attr in node.attributes() {
        let name = match attr.namespace() {
            Some(XLINK_NAMESPACE) => format!("xlink:{}", attr.name()),
            Some(XML_NAMESPACE) => format!("xml:{}", attr.name()),
            _ => attr.name().to_string(),
        };
        element.set_attribute(&name, attr.value().to_string());
    }

    let preserve = match node.attribute((XML_NAMESPACE, "space")) {
        Some("preserve") => true,
        Some("default") => false,
        _ => inherited || TEXT_CONTENT_TAGS.contains(&tag),
    };
    element.children = convert_children(node, preserve);
    element
}

/// Convert a 1-based row/column position into a character offset
fn char_offset(text: &str, row: usize, col: usize) -> usize {
    let mut offset = 0;
    for (i, line) in text.split('\n').enumerate() {
        if i + 1 == row {
            return offset + col.saturating_sub(1);
        }
        offset += line.chars().count() + 1;
    }
    offset
}
