//! Output of finished sign documents
//!
//! This module serializes a document to SVG markup and hands markup to a
//! rasterizer for bitmap formats.

pub mod config;
pub mod raster;
pub mod svg;

pub use config::{RasterConfig, SvgConfig};
pub use raster::{
    OutputFormat, RasterError, RasterFormat, Rasterizer, ResvgRasterizer, UnsupportedFormat,
};
pub use svg::serialize;
