//! Image export port trait.

use crate::domain::error::TradecheckError;

/// A region handed to the rasterizer: rendered markup plus a background hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRegion {
    pub markup: String,
    pub background: &'static str,
}

/// Port for turning a rendered region into an encoded raster image.
pub trait ExportPort {
    fn rasterize(&self, region: &RenderRegion) -> Result<Vec<u8>, TradecheckError>;
}
