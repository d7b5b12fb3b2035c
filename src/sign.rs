//! Sign requests and composed, scaled signs

use log::info;

use crate::catalog::{ColorSpec, SymbolCatalog};
use crate::document::{DocumentBuilder, VectorDocument};
use crate::renderer::{serialize, OutputFormat, Rasterizer, SvgConfig};
use crate::scale::scale;
use crate::SignError;

/// What to draw and how wide the result should be
#[derive(Debug, Clone, PartialEq)]
pub struct SignRequest {
    /// Name of the base sign (any of its catalog names)
    pub base_sign: String,
    /// Optional mission overlay drawn on top of the base sign
    pub mission: Option<String>,
    /// Palette name
    pub color: String,
    /// Requested output width in pixels; height follows the sign's aspect ratio
    pub target_width: f64,
}

impl SignRequest {
    pub fn new(base_sign: impl Into<String>, color: impl Into<String>, target_width: f64) -> Self {
        Self {
            base_sign: base_sign.into(),
            mission: None,
            color: color.into(),
            target_width,
        }
    }

    pub fn with_mission(mut self, mission: impl Into<String>) -> Self {
        self.mission = Some(mission.into());
        self
    }
}

/// A sign composed from the catalog and scaled to the requested width
#[derive(Debug, Clone)]
pub struct TacticalSign {
    document: VectorDocument,
    intrinsic_width: f64,
    intrinsic_height: f64,
    factor: f64,
    colors: ColorSpec,
}

impl TacticalSign {
    /// Resolve, compose and scale a sign
    pub fn compose(catalog: &SymbolCatalog, request: &SignRequest) -> Result<Self, SignError> {
        let composition = DocumentBuilder::new(catalog).build(request)?;
        let base = composition.base;
        let factor = request.target_width / base.intrinsic_width;
        let document = scale(composition.document, factor)?;

        info!(
            "composed '{}'{} in '{}' at factor {:.3}",
            request.base_sign,
            request
                .mission
                .as_deref()
                .map(|m| format!(" + '{}'", m))
                .unwrap_or_default(),
            request.color,
            factor
        );

        Ok(Self {
            document,
            intrinsic_width: base.intrinsic_width,
            intrinsic_height: base.intrinsic_height,
            factor,
            colors: composition.colors.clone(),
        })
    }

    pub fn document(&self) -> &VectorDocument {
        &self.document
    }

    /// Requested width divided by the base sign's intrinsic width
    pub fn scale_factor(&self) -> f64 {
        self.factor
    }

    /// Intrinsic width / height, rounded to three decimals
    pub fn ratio(&self) -> f64 {
        (self.intrinsic_width / self.intrinsic_height * 1000.0).round() / 1000.0
    }

    /// Output size in whole pixels
    pub fn output_size(&self) -> (u32, u32) {
        (
            (self.intrinsic_width * self.factor).round() as u32,
            (self.intrinsic_height * self.factor).round() as u32,
        )
    }

    /// Palette the sign was drawn with
    pub fn colors(&self) -> &ColorSpec {
        &self.colors
    }

    pub fn to_svg(&self, config: &SvgConfig) -> String {
        serialize(&self.document, config)
    }

    /// Produce the encoded output in `format`
    ///
    /// SVG output is the serialized markup; bitmap formats are delegated to
    /// `rasterizer` at [`output_size`](Self::output_size).
    pub fn output(
        &self,
        format: OutputFormat,
        config: &SvgConfig,
        rasterizer: &dyn Rasterizer,
    ) -> Result<Vec<u8>, SignError> {
        let markup = self.to_svg(config);
        match format {
            OutputFormat::Svg => Ok(markup.into_bytes()),
            OutputFormat::Raster(raster) => {
                let (width, height) = self.output_size();
                Ok(rasterizer.rasterize(&markup, raster, width, height)?)
            }
        }
    }
}
