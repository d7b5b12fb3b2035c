//! Output formats and conversion of SVG markup to bitmaps
//!
//! Bitmap conversion sits behind the [`Rasterizer`] trait. The crate ships
//! [`ResvgRasterizer`], which renders with resvg and encodes with the `image`
//! crate.

use std::fmt;
use std::str::FromStr;

use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, Frame, ImageEncoder, RgbImage};
use log::debug;
use resvg::{tiny_skia, usvg};
use thiserror::Error;

use super::RasterConfig;

/// Bitmap formats handed to a rasterizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterFormat {
    Png,
    Jpeg,
    Gif,
}

impl RasterFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            RasterFormat::Png => "image/png",
            RasterFormat::Jpeg => "image/jpeg",
            RasterFormat::Gif => "image/gif",
        }
    }
}

impl fmt::Display for RasterFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RasterFormat::Png => write!(f, "png"),
            RasterFormat::Jpeg => write!(f, "jpeg"),
            RasterFormat::Gif => write!(f, "gif"),
        }
    }
}

/// Requested output: the markup itself or a bitmap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Raster(RasterFormat),
}

impl OutputFormat {
    /// MIME type of the produced bytes
    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Svg => "image/svg+xml",
            OutputFormat::Raster(raster) => raster.content_type(),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Svg => write!(f, "svg"),
            OutputFormat::Raster(raster) => write!(f, "{}", raster),
        }
    }
}

/// An output format name that is not supported
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported image format '{0}', supported formats are: gif, jpg, jpeg, png, svg")]
pub struct UnsupportedFormat(pub String);

impl FromStr for OutputFormat {
    type Err = UnsupportedFormat;

    /// Parse a format name, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "svg" => Ok(OutputFormat::Svg),
            "png" => Ok(OutputFormat::Raster(RasterFormat::Png)),
            "jpg" | "jpeg" => Ok(OutputFormat::Raster(RasterFormat::Jpeg)),
            "gif" => Ok(OutputFormat::Raster(RasterFormat::Gif)),
            _ => Err(UnsupportedFormat(s.to_string())),
        }
    }
}

/// Errors reported by a rasterizer
#[derive(Error, Debug)]
pub enum RasterError {
    #[error("failed to parse SVG for rasterization: {0}")]
    Parse(#[from] usvg::Error),

    #[error("cannot allocate a {width}x{height} bitmap")]
    Allocation { width: u32, height: u32 },

    #[error("failed to encode {format}: {message}")]
    Encode {
        format: RasterFormat,
        message: String,
    },
}

impl RasterError {
    fn encode(format: RasterFormat, err: impl fmt::Display) -> Self {
        Self::Encode {
            format,
            message: err.to_string(),
        }
    }
}

/// Converts SVG markup to an encoded bitmap of the given pixel size
pub trait Rasterizer {
    fn rasterize(
        &self,
        markup: &str,
        format: RasterFormat,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, RasterError>;
}

/// Rasterizer backed by resvg
#[derive(Debug, Clone, Default)]
pub struct ResvgRasterizer {
    config: RasterConfig,
}

impl ResvgRasterizer {
    pub fn new(config: RasterConfig) -> Self {
        Self { config }
    }

    fn render(
        &self,
        markup: &str,
        width: u32,
        height: u32,
    ) -> Result<tiny_skia::Pixmap, RasterError> {
        let tree = usvg::Tree::from_str(markup, &usvg::Options::default())?;
        let mut pixmap =
            tiny_skia::Pixmap::new(width, height).ok_or(RasterError::Allocation { width, height })?;

        // stretch the declared canvas onto the requested bitmap size
        let size = tree.size();
        let transform = tiny_skia::Transform::from_scale(
            width as f32 / size.width(),
            height as f32 / size.height(),
        );
        resvg::render(&tree, transform, &mut pixmap.as_mut());
        Ok(pixmap)
    }

    /// Composite the premultiplied pixmap onto the background colour
    fn flatten(&self, pixmap: &tiny_skia::Pixmap) -> Vec<u8> {
        let [br, bg, bb] = self.config.background;
        let over = |c: u8, a: u8, b: u8| -> u8 {
            (c as u16 + (b as u16 * (255 - a as u16) + 127) / 255).min(255) as u8
        };
        let mut rgb = Vec::with_capacity(pixmap.pixels().len() * 3);
        for p in pixmap.pixels() {
            let a = p.alpha();
            rgb.push(over(p.red(), a, br));
            rgb.push(over(p.green(), a, bg));
            rgb.push(over(p.blue(), a, bb));
        }
        rgb
    }

    fn flattened_image(
        &self,
        pixmap: &tiny_skia::Pixmap,
        format: RasterFormat,
    ) -> Result<RgbImage, RasterError> {
        RgbImage::from_raw(pixmap.width(), pixmap.height(), self.flatten(pixmap))
            .ok_or_else(|| RasterError::encode(format, "bitmap size mismatch"))
    }
}

impl Rasterizer for ResvgRasterizer {
    fn rasterize(
        &self,
        markup: &str,
        format: RasterFormat,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, RasterError> {
        debug!("rasterizing {}x{} {}", width, height, format);
        let pixmap = self.render(markup, width, height)?;
        let mut out = Vec::new();

        match format {
            RasterFormat::Png if self.config.transparent_png => {
                out = pixmap.encode_png().map_err(|e| RasterError::encode(format, e))?;
            }
            RasterFormat::Png => {
                let rgb = self.flattened_image(&pixmap, format)?;
                PngEncoder::new(&mut out)
                    .write_image(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
                    .map_err(|e| RasterError::encode(format, e))?;
            }
            RasterFormat::Jpeg => {
                let rgb = self.flattened_image(&pixmap, format)?;
                JpegEncoder::new_with_quality(&mut out, self.config.jpeg_quality)
                    .write_image(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
                    .map_err(|e| RasterError::encode(format, e))?;
            }
            RasterFormat::Gif => {
                let rgba = image::DynamicImage::ImageRgb8(self.flattened_image(&pixmap, format)?)
                    .into_rgba8();
                GifEncoder::new(&mut out)
                    .encode_frame(Frame::new(rgba))
                    .map_err(|e| RasterError::encode(format, e))?;
            }
        }

        Ok(out)
    }
}
