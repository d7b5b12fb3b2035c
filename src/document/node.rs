//! Vector document tree

/// Namespace declared on every document root
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Format version declared on every document root
pub const SVG_VERSION: &str = "1.1";

/// Capabilities a tree node needs so it can be rewritten in place
///
/// Transforms such as scaling work against this trait rather than against
/// [`Element`] directly.
pub trait VectorNode {
    /// Get an attribute value by exact name
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Set an attribute, replacing the value if it is already present
    fn set_attribute(&mut self, name: &str, value: String);

    /// Element children in document order
    fn children_mut(&mut self) -> Box<dyn Iterator<Item = &mut Self> + '_>;
}

/// A child of an element
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    /// Character data, unescaped
    Text(String),
    /// Comment body without the `<!--` `-->` delimiters
    Comment(String),
    ProcessingInstruction {
        target: String,
        value: Option<String>,
    },
}

/// An element with ordered attributes and ordered children
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element without attributes or children
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: vec![],
            children: vec![],
        }
    }

    /// Add an attribute (builder form of [`VectorNode::set_attribute`])
    pub fn with_attribute(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attribute(name, value.into());
        self
    }

    /// Add a child element
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Attributes in insertion order
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|(k, _)| k == name)
    }

    /// Iterate over element children, skipping text
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| match c {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Number of elements in this subtree, including self
    pub fn element_count(&self) -> usize {
        1 + self.elements().map(Element::element_count).sum::<usize>()
    }

    /// Mutable pre-order walk over every element of the subtree
    pub fn walk_mut(&mut self, f: &mut impl FnMut(&mut Element)) {
        f(self);
        for child in self.children.iter_mut() {
            if let Node::Element(e) = child {
                e.walk_mut(f);
            }
        }
    }
}

impl VectorNode for Element {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn set_attribute(&mut self, name: &str, value: String) {
        match self.attributes.iter_mut().find(|(k, _)| k == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    fn children_mut(&mut self) -> Box<dyn Iterator<Item = &mut Self> + '_> {
        Box::new(self.children.iter_mut().filter_map(|c| match c {
            Node::Element(e) => Some(e),
            _ => None,
        }))
    }
}

/// A complete vector document: an `svg` root with a declared canvas size
#[derive(Debug, Clone, PartialEq)]
pub struct VectorDocument {
    root: Element,
}

impl VectorDocument {
    /// Create an empty document whose canvas is `width` x `height`
    pub fn new(width: f64, height: f64) -> Self {
        let root = Element::new("svg")
            .with_attribute("version", SVG_VERSION)
            .with_attribute("xmlns", SVG_NAMESPACE)
            .with_attribute("width", width.to_string())
            .with_attribute("height", height.to_string());
        Self { root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Declared canvas width, as written on the root
    pub fn width(&self) -> Option<&str> {
        self.root.attribute("width")
    }

    /// Declared canvas height, as written on the root
    pub fn height(&self) -> Option<&str> {
        self.root.attribute("height")
    }

    /// Append a subtree under the root
    pub fn append(&mut self, child: Node) {
        self.root.children.push(child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_root() {
        let doc = VectorDocument::new(200.0, 100.0);
        let root = doc.root();
        assert_eq!(root.tag, "svg");
        assert_eq!(root.attribute("version"), Some("1.1"));
        assert_eq!(root.attribute("xmlns"), Some(SVG_NAMESPACE));
        assert_eq!(doc.width(), Some("200"));
        assert_eq!(doc.height(), Some("100"));
        assert!(root.children.is_empty());
    }

    #[test]
    fn test_fractional_canvas_size() {
        let doc = VectorDocument::new(200.5, 100.0);
        assert_eq!(doc.width(), Some("200.5"));
    }

    #[test]
    fn test_set_attribute_keeps_position() {
        let mut el = Element::new("rect")
            .with_attribute("x", "1")
            .with_attribute("y", "2");
        el.set_attribute("x", "10".to_string());
        let attrs: Vec<_> = el.attributes().collect();
        assert_eq!(attrs, vec![("x", "10"), ("y", "2")]);
    }

    #[test]
    fn test_element_count_skips_text() {
        let el = Element::new("g")
            .with_child(Element::new("rect"))
            .with_child(Element::new("g").with_child(Element::new("circle")));
        let mut el = el;
        el.children.push(Node::Text("label".to_string()));
        assert_eq!(el.element_count(), 4);
        assert_eq!(el.children_mut().count(), 2);
    }

    #[test]
    fn test_walk_mut_visits_all() {
        let mut el = Element::new("g")
            .with_child(Element::new("rect"))
            .with_child(Element::new("g").with_child(Element::new("circle")));
        let mut tags = vec![];
        el.walk_mut(&mut |e| tags.push(e.tag.clone()));
        assert_eq!(tags, vec!["g", "rect", "g", "circle"]);
    }
}
