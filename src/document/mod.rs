//! Vector document model and composition
//!
//! This module holds the element tree that signs are assembled into, the
//! parser for catalog fragments, and the builder that puts a base sign, an
//! optional mission and a palette together.

pub mod builder;
pub mod fragment;
pub mod node;

pub use builder::{build, Composition, DocumentBuilder};
pub use fragment::parse_fragment;
pub use node::{Element, Node, VectorDocument, VectorNode, SVG_NAMESPACE, SVG_VERSION};
