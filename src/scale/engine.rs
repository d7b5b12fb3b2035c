//! Uniform rescaling of a document tree

use log::debug;

use crate::document::{VectorDocument, VectorNode};

use super::coords::{leading_int, scale_coordinate_list, CoordinateError};

/// Attributes holding a single length, scaled with rounding
pub const SIMPLE_ATTRIBUTES: [&str; 14] = [
    "width",
    "height",
    "stroke-width",
    "x",
    "y",
    "x1",
    "y1",
    "x2",
    "y2",
    "rx",
    "ry",
    "cx",
    "cy",
    "r",
];

/// Attributes holding a list of coordinate pairs, scaled with truncation
pub const COORDINATE_ATTRIBUTES: [&str; 2] = ["d", "points"];

/// Scale a whole document by `factor`, including the root canvas size
pub fn scale(mut doc: VectorDocument, factor: f64) -> Result<VectorDocument, CoordinateError> {
    let rewritten = scale_node(doc.root_mut(), factor)?;
    debug!("scaled by {}: {} attributes rewritten", factor, rewritten);
    Ok(doc)
}

/// Scale a node and all its descendants in place
///
/// Simple attributes are rewritten to `round(v * factor)` where `v` is the
/// leading integer of the value; values that are not positive are left alone.
/// Attributes are only ever rewritten, never added or removed. Returns the
/// number of rewritten attributes.
pub fn scale_node<N: VectorNode>(node: &mut N, factor: f64) -> Result<usize, CoordinateError> {
    let mut rewritten = 0;

    for name in SIMPLE_ATTRIBUTES {
        let value = match node.attribute(name).and_then(leading_int) {
            Some(v) if v > 0 => v,
            _ => continue,
        };
        let scaled = (value as f64 * factor).round() as i64;
        node.set_attribute(name, scaled.to_string());
        rewritten += 1;
    }

    for name in COORDINATE_ATTRIBUTES {
        let scaled = match node.attribute(name) {
            Some(value) => scale_coordinate_list(name, value, factor)?,
            None => continue,
        };
        node.set_attribute(name, scaled);
        rewritten += 1;
    }

    for child in node.children_mut() {
        rewritten += scale_node(child, factor)?;
    }

    Ok(rewritten)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Element, Node};
    use pretty_assertions::assert_eq;

    fn attrs(el: &Element) -> Vec<(String, String)> {
        el.attributes()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_circle_doubled() {
        let mut el = Element::new("circle")
            .with_attribute("cx", "50")
            .with_attribute("cy", "25")
            .with_attribute("r", "10");
        assert_eq!(scale_node(&mut el, 2.0).unwrap(), 3);
        assert_eq!(el.attribute("cx"), Some("100"));
        assert_eq!(el.attribute("cy"), Some("50"));
        assert_eq!(el.attribute("r"), Some("20"));
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        let mut el = Element::new("rect")
            .with_attribute("x", "5")
            .with_attribute("y", "3")
            .with_attribute("width", "7");
        scale_node(&mut el, 0.5).unwrap();
        assert_eq!(el.attribute("x"), Some("3"));
        assert_eq!(el.attribute("y"), Some("2"));
        assert_eq!(el.attribute("width"), Some("4"));
    }

    #[test]
    fn test_zero_and_negative_untouched() {
        let mut el = Element::new("line")
            .with_attribute("x1", "0")
            .with_attribute("y1", "-10")
            .with_attribute("x2", "auto")
            .with_attribute("y2", "10");
        assert_eq!(scale_node(&mut el, 3.0).unwrap(), 1);
        assert_eq!(el.attribute("x1"), Some("0"));
        assert_eq!(el.attribute("y1"), Some("-10"));
        assert_eq!(el.attribute("x2"), Some("auto"));
        assert_eq!(el.attribute("y2"), Some("30"));
    }

    #[test]
    fn test_fractional_value_uses_integer_part() {
        let mut el = Element::new("rect").with_attribute("stroke-width", "2.5");
        scale_node(&mut el, 2.0).unwrap();
        assert_eq!(el.attribute("stroke-width"), Some("4"));
    }

    #[test]
    fn test_non_target_attributes_untouched() {
        let mut el = Element::new("rect")
            .with_attribute("id", "12")
            .with_attribute("fill", "#000")
            .with_attribute("X", "10")
            .with_attribute("x", "10")
            .with_attribute("opacity", "1");
        scale_node(&mut el, 2.0).unwrap();
        assert_eq!(
            attrs(&el),
            vec![
                ("id".to_string(), "12".to_string()),
                ("fill".to_string(), "#000".to_string()),
                ("X".to_string(), "10".to_string()),
                ("x".to_string(), "20".to_string()),
                ("opacity".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_never_adds_attributes() {
        let mut el = Element::new("g").with_child(Element::new("rect"));
        assert_eq!(scale_node(&mut el, 2.0).unwrap(), 0);
        assert!(attrs(&el).is_empty());
        assert!(attrs(el.elements().next().unwrap()).is_empty());
    }

    #[test]
    fn test_scales_nested_nodes() {
        let polygon = Element::new("polygon").with_attribute("points", "10,20 30,40");
        let mut el = Element::new("g").with_child(Element::new("g").with_child(polygon));
        scale_node(&mut el, 2.0).unwrap();
        let inner = el.elements().next().unwrap().elements().next().unwrap();
        assert_eq!(inner.attribute("points"), Some("20,40 60,80"));
    }

    #[test]
    fn test_document_scaled_with_root() {
        let mut doc = VectorDocument::new(200.0, 100.0);
        doc.append(Node::Element(
            Element::new("path").with_attribute("d", "M10,10 L20,20"),
        ));
        let doc = scale(doc, 2.0).unwrap();
        assert_eq!(doc.width(), Some("400"));
        assert_eq!(doc.height(), Some("200"));
        let path = doc.root().elements().next().unwrap();
        assert_eq!(path.attribute("d"), Some("M20,20 L40,40"));
    }

    #[test]
    fn test_identity_factor() {
        let mut el = Element::new("polygon")
            .with_attribute("points", "1,2  3,4")
            .with_attribute("stroke-width", "6");
        scale_node(&mut el, 1.0).unwrap();
        assert_eq!(el.attribute("points"), Some("1,2 3,4"));
        assert_eq!(el.attribute("stroke-width"), Some("6"));
    }

    #[test]
    fn test_invalid_coordinates_abort() {
        let mut doc = VectorDocument::new(10.0, 10.0);
        doc.append(Node::Element(
            Element::new("polyline").with_attribute("points", "100,200,300"),
        ));
        let err = scale(doc, 2.0).unwrap_err();
        assert_eq!(err.block, "100,200,300");
    }

    #[test]
    fn test_repeated_scaling_compounds() {
        let mut el = Element::new("circle").with_attribute("r", "10");
        scale_node(&mut el, 2.0).unwrap();
        scale_node(&mut el, 2.0).unwrap();
        assert_eq!(el.attribute("r"), Some("40"));
    }
}
