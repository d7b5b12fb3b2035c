//! Tactical Signs - rendering of emergency-services tactical map symbols
//!
//! A sign is composed from a base-sign fragment, an optional mission overlay
//! and a colour palette taken from a [`SymbolCatalog`], scaled uniformly to a
//! requested pixel width, and written out as SVG or a bitmap.
//!
//! # Example
//!
//! ```rust
//! use tactical_signs::{render_sign, SignRequest, SymbolCatalog};
//!
//! let catalog = SymbolCatalog::default();
//! let request = SignRequest::new("Taktische Einheit", "blau", 400.0).with_mission("Sprengen");
//! let svg = render_sign(&catalog, &request, "svg").unwrap();
//! assert!(String::from_utf8(svg).unwrap().contains(r#"width="400""#));
//! ```

pub mod catalog;
pub mod document;
pub mod error;
pub mod renderer;
pub mod scale;
pub mod sign;

pub use catalog::{CatalogEntry, CatalogError, ColorSpec, LookupError, LookupKind, SymbolCatalog};
pub use document::{DocumentBuilder, Element, Node, VectorDocument, VectorNode};
pub use error::FragmentError;
pub use renderer::{
    OutputFormat, RasterConfig, RasterError, RasterFormat, Rasterizer, ResvgRasterizer, SvgConfig,
    UnsupportedFormat,
};
pub use scale::CoordinateError;
pub use sign::{SignRequest, TacticalSign};

use thiserror::Error;

/// Errors that can occur while producing a sign
///
/// Every variant is terminal for the request that raised it.
#[derive(Debug, Error)]
pub enum SignError {
    /// A name is not present in the catalog
    #[error("catalog resolution failed: {0}")]
    CatalogResolution(#[from] LookupError),

    /// A catalog fragment is not well-formed markup
    #[error("{0}")]
    MalformedFragment(#[from] FragmentError),

    /// A `d` or `points` block is not a 2-D coordinate pair
    #[error("invalid coordinates: {0}")]
    InvalidCoordinate(#[from] CoordinateError),

    /// The requested output format is unknown
    #[error("{0}")]
    UnsupportedFormat(#[from] UnsupportedFormat),

    /// The rasterizer failed
    #[error("rasterization failed: {0}")]
    Rasterization(#[from] RasterError),
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Bitmap output configuration
    pub raster: RasterConfig,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Set the raster configuration
    pub fn with_raster(mut self, config: RasterConfig) -> Self {
        self.raster = config;
        self
    }
}

/// Render a sign in `format` with default configuration
///
/// `format` is one of `svg`, `png`, `jpg`, `jpeg` or `gif` (any case).
pub fn render_sign(
    catalog: &SymbolCatalog,
    request: &SignRequest,
    format: &str,
) -> Result<Vec<u8>, SignError> {
    render_sign_with_config(catalog, request, format, &RenderConfig::default())
}

/// Render a sign in `format` with custom configuration
///
/// # Example
///
/// ```rust
/// use tactical_signs::{render_sign_with_config, RenderConfig, SignRequest, SvgConfig, SymbolCatalog};
///
/// let config = RenderConfig::new().with_svg(SvgConfig::new().with_pretty_print(false));
/// let request = SignRequest::new("Person", "rot", 100.0);
/// let svg = render_sign_with_config(&SymbolCatalog::default(), &request, "svg", &config).unwrap();
/// assert!(!String::from_utf8(svg).unwrap().contains("\n  <"));
/// ```
pub fn render_sign_with_config(
    catalog: &SymbolCatalog,
    request: &SignRequest,
    format: &str,
    config: &RenderConfig,
) -> Result<Vec<u8>, SignError> {
    // Reject the format before doing any work
    let format: OutputFormat = format.parse()?;

    let sign = TacticalSign::compose(catalog, request)?;
    let rasterizer = ResvgRasterizer::new(config.raster.clone());
    sign.output(format, &config.svg, &rasterizer)
}
