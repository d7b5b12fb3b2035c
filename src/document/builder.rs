//! Composition of base sign, mission overlay and palette into one document

use log::debug;

use crate::catalog::{CatalogEntry, ColorSpec, SymbolCatalog};
use crate::error::FragmentError;
use crate::sign::SignRequest;
use crate::SignError;

use super::fragment::parse_fragment;
use super::node::{Element, VectorDocument, VectorNode};

/// Result of resolving and composing a request against the catalog
#[derive(Debug, Clone)]
pub struct Composition<'a> {
    pub document: VectorDocument,
    pub base: &'a CatalogEntry,
    pub mission: Option<&'a CatalogEntry>,
    pub colors: &'a ColorSpec,
}

/// Builds unscaled sign documents from catalog entries
#[derive(Debug, Clone, Copy)]
pub struct DocumentBuilder<'a> {
    catalog: &'a SymbolCatalog,
}

impl<'a> DocumentBuilder<'a> {
    pub fn new(catalog: &'a SymbolCatalog) -> Self {
        Self { catalog }
    }

    /// Resolve the request's names in the catalog and compose the document
    ///
    /// Lookups happen before any parsing, so an unknown name never yields a
    /// partial document.
    pub fn build(&self, request: &SignRequest) -> Result<Composition<'a>, SignError> {
        let base = self.catalog.base_sign(&request.base_sign)?;
        let mission = match &request.mission {
            Some(name) => Some(self.catalog.mission(name)?),
            None => None,
        };
        let colors = self.catalog.colors(&request.color)?;

        let document = build(base, mission, colors)?;
        Ok(Composition {
            document,
            base,
            mission,
            colors,
        })
    }
}

/// Compose a document sized to `base` from the base and mission fragments
///
/// Children are appended base first, then mission. Empty `fill` and `stroke`
/// attributes are filled in from `colors`.
pub fn build(
    base: &CatalogEntry,
    mission: Option<&CatalogEntry>,
    colors: &ColorSpec,
) -> Result<VectorDocument, FragmentError> {
    let mut doc = VectorDocument::new(base.intrinsic_width, base.intrinsic_height);

    for entry in std::iter::once(base).chain(mission) {
        let nodes = parse_fragment(&entry.id, &entry.fragment_markup)?;
        debug!(
            "entry '{}': {} top-level nodes from {} bytes",
            entry.id,
            nodes.len(),
            entry.fragment_markup.len()
        );
        for node in nodes {
            doc.append(node);
        }
    }

    let replaced = substitute_placeholders(doc.root_mut(), colors);
    debug!("substituted {} colour placeholders", replaced);

    Ok(doc)
}

/// Replace empty `fill` with the palette fill and empty `stroke` with the border colour
///
/// Returns the number of attributes rewritten.
pub fn substitute_placeholders(root: &mut Element, colors: &ColorSpec) -> usize {
    let mut replaced = 0;
    root.walk_mut(&mut |el| {
        for (name, color) in [("fill", &colors.fill), ("stroke", &colors.border)] {
            if el.attribute(name) == Some("") {
                el.set_attribute(name, color.clone());
                replaced += 1;
            }
        }
    });
    replaced
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Node;
    use pretty_assertions::assert_eq;

    fn entry(id: &str, width: f64, height: f64, svg: &str) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            names: vec![id.to_string()],
            intrinsic_width: width,
            intrinsic_height: height,
            fragment_markup: svg.to_string(),
        }
    }

    fn blue() -> ColorSpec {
        ColorSpec {
            name: "blau".to_string(),
            fill: "#0000FF".to_string(),
            border: "#FFFFFF".to_string(),
            line: "#FFFFFF".to_string(),
            organisation: "THW".to_string(),
        }
    }

    fn tags(doc: &VectorDocument) -> Vec<String> {
        doc.root().elements().map(|e| e.tag.clone()).collect()
    }

    #[test]
    fn test_build_sizes_root_to_base() {
        let base = entry("1", 200.0, 100.0, r#"<rect x="4" y="4"/>"#);
        let doc = build(&base, None, &blue()).unwrap();
        assert_eq!(doc.width(), Some("200"));
        assert_eq!(doc.height(), Some("100"));
        assert_eq!(doc.root().attribute("version"), Some("1.1"));
        assert_eq!(tags(&doc), vec!["rect"]);
    }

    #[test]
    fn test_build_appends_mission_after_base() {
        let base = entry("1", 200.0, 100.0, r#"<rect x="4"/><line x1="1"/>"#);
        let mission = entry("m1", 200.0, 100.0, r#"<circle r="5"/>"#);
        let doc = build(&base, Some(&mission), &blue()).unwrap();
        assert_eq!(tags(&doc), vec!["rect", "line", "circle"]);
    }

    #[test]
    fn test_substitutes_only_empty_fill_and_stroke() {
        let base = entry(
            "1",
            200.0,
            100.0,
            r##"<rect fill="" stroke=""/><circle fill="#FF0000" stroke="none" color=""/>"##,
        );
        let doc = build(&base, None, &blue()).unwrap();
        let els: Vec<_> = doc.root().elements().collect();
        assert_eq!(els[0].attribute("fill"), Some("#0000FF"));
        assert_eq!(els[0].attribute("stroke"), Some("#FFFFFF"));
        assert_eq!(els[1].attribute("fill"), Some("#FF0000"));
        assert_eq!(els[1].attribute("stroke"), Some("none"));
        assert_eq!(els[1].attribute("color"), Some(""));
    }

    #[test]
    fn test_substitution_reaches_nested_nodes() {
        let base = entry("1", 10.0, 10.0, r#"<g><g><path d="M1,1" fill=""/></g></g>"#);
        let mut doc = build(&base, None, &blue()).unwrap();
        let mut fills = vec![];
        doc.root_mut()
            .walk_mut(&mut |e| fills.extend(e.attribute("fill").map(str::to_string)));
        assert_eq!(fills, vec!["#0000FF".to_string()]);
    }

    #[test]
    fn test_substitution_does_not_add_attributes() {
        let base = entry("1", 10.0, 10.0, r#"<rect x="1"/>"#);
        let doc = build(&base, None, &blue()).unwrap();
        let rect = doc.root().elements().next().unwrap();
        assert!(!rect.has_attribute("fill"));
        assert!(!rect.has_attribute("stroke"));
    }

    #[test]
    fn test_malformed_mission_fails() {
        let base = entry("1", 10.0, 10.0, r#"<rect x="1"/>"#);
        let mission = entry("m9", 10.0, 10.0, r#"<g>"#);
        let err = build(&base, Some(&mission), &blue()).unwrap_err();
        assert_eq!(err.entry, "m9");
    }

    #[test]
    fn test_text_children_survive() {
        let base = entry("1", 10.0, 10.0, r#"<text x="1">THW</text>"#);
        let doc = build(&base, None, &blue()).unwrap();
        let text = doc.root().elements().next().unwrap();
        assert_eq!(text.children, vec![Node::Text("THW".to_string())]);
    }

    #[test]
    fn test_builder_resolves_request() {
        let catalog = SymbolCatalog::default();
        let request = SignRequest::new("Taktische Einheit", "blau", 400.0).with_mission("Sprengen");
        let composition = DocumentBuilder::new(&catalog).build(&request).unwrap();
        assert_eq!(composition.base.id, "1");
        assert_eq!(composition.mission.map(|m| m.id.as_str()), Some("m1"));
        assert_eq!(composition.colors.organisation, "THW");
        assert_eq!(composition.document.width(), Some("200"));
    }

    #[test]
    fn test_builder_unknown_names() {
        let catalog = SymbolCatalog::default();
        let builder = DocumentBuilder::new(&catalog);

        let request = SignRequest::new("Raumschiff", "blau", 400.0);
        assert!(matches!(
            builder.build(&request),
            Err(SignError::CatalogResolution(_))
        ));

        let request = SignRequest::new("Person", "lila", 400.0);
        assert!(matches!(
            builder.build(&request),
            Err(SignError::CatalogResolution(_))
        ));

        let request = SignRequest::new("Person", "rot", 400.0).with_mission("Zaubern");
        assert!(matches!(
            builder.build(&request),
            Err(SignError::CatalogResolution(_))
        ));
    }
}
