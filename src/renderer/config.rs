//! Configuration for SVG serialization and rasterization

/// Configuration options for SVG output
#[derive(Debug, Clone)]
pub struct SvgConfig {
    /// Whether to include the XML declaration
    pub standalone: bool,

    /// Whether to format output with one element per line and indentation
    pub pretty_print: bool,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            standalone: true,
            pretty_print: true,
        }
    }
}

impl SvgConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether output is standalone
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }
}

/// Configuration options for bitmap output
#[derive(Debug, Clone)]
pub struct RasterConfig {
    /// Keep PNG output transparent instead of flattening onto `background`
    pub transparent_png: bool,

    /// JPEG quality (1-100)
    pub jpeg_quality: u8,

    /// RGB background for formats without alpha
    pub background: [u8; 3],
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            transparent_png: true,
            jpeg_quality: 80,
            background: [255, 255, 255],
        }
    }
}

impl RasterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transparent_png(mut self, transparent: bool) -> Self {
        self.transparent_png = transparent;
        self
    }

    /// Set the JPEG quality, clamped to 1-100
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    pub fn with_background(mut self, rgb: [u8; 3]) -> Self {
        self.background = rgb;
        self
    }
}
