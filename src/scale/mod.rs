//! Scaling engine
//!
//! Multiplies every scale-sensitive attribute of a document by one factor.
//! Simple lengths round half away from zero while coordinate lists truncate
//! toward zero.

pub mod coords;
pub mod engine;

pub use coords::{scale_coordinate_list, CoordinateError};
pub use engine::{scale, scale_node, COORDINATE_ATTRIBUTES, SIMPLE_ATTRIBUTES};
