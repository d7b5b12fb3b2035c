//! Serialization of vector documents to SVG markup

use crate::document::{Element, Node, VectorDocument};

use super::SvgConfig;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#;

/// Write elements to a string, optionally indented
struct SvgWriter<'a> {
    config: &'a SvgConfig,
    out: String,
}

impl<'a> SvgWriter<'a> {
    fn new(config: &'a SvgConfig) -> Self {
        Self {
            config,
            out: String::new(),
        }
    }

    fn newline(&mut self) {
        if self.config.pretty_print {
            self.out.push('\n');
        }
    }

    fn indent(&mut self, depth: usize) {
        if self.config.pretty_print {
            self.out.push_str(&"  ".repeat(depth));
        }
    }

    fn open_tag(&mut self, element: &Element) {
        self.out.push('<');
        self.out.push_str(&element.tag);
        for (name, value) in element.attributes() {
            self.out
                .push_str(&format!(r#" {}="{}""#, name, escape_xml(value)));
        }
    }

    /// Write an element on its own line, children indented below it
    ///
    /// Elements that contain text are written on a single line so that no
    /// whitespace is added to their character data.
    fn write_block(&mut self, element: &Element, depth: usize) {
        self.indent(depth);
        let has_text = element.children.iter().any(|c| matches!(c, Node::Text(_)));
        if has_text || element.children.is_empty() {
            self.write_inline(element);
            self.newline();
            return;
        }

        self.open_tag(element);
        self.out.push('>');
        self.newline();
        for child in &element.children {
            match child {
                Node::Element(e) => self.write_block(e, depth + 1),
                other => {
                    self.indent(depth + 1);
                    self.write_node(other);
                    self.newline();
                }
            }
        }
        self.indent(depth);
        self.out.push_str(&format!("</{}>", element.tag));
        self.newline();
    }

    /// Write an element and its subtree without any added whitespace
    fn write_inline(&mut self, element: &Element) {
        self.open_tag(element);
        if element.children.is_empty() {
            self.out.push_str("/>");
            return;
        }
        self.out.push('>');
        for child in &element.children {
            self.write_node(child);
        }
        self.out.push_str(&format!("</{}>", element.tag));
    }

    fn write_node(&mut self, node: &Node) {
        match node {
            Node::Element(e) => self.write_inline(e),
            Node::Text(t) => self.out.push_str(&escape_xml(t)),
            Node::Comment(c) => self.out.push_str(&format!("<!--{}-->", c)),
            Node::ProcessingInstruction { target, value } => match value {
                Some(v) => self.out.push_str(&format!("<?{} {}?>", target, v)),
                None => self.out.push_str(&format!("<?{}?>", target)),
            },
        }
    }

    fn finish(mut self) -> String {
        if self.config.pretty_print && self.out.ends_with('\n') {
            self.out.pop();
        }
        self.out
    }
}

/// Serialize a document to SVG markup
pub fn serialize(doc: &VectorDocument, config: &SvgConfig) -> String {
    let mut writer = SvgWriter::new(config);

    if config.standalone {
        writer.out.push_str(XML_DECLARATION);
        writer.newline();
    }

    writer.write_block(doc.root(), 0);
    writer.finish()
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
