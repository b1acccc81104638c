//! Rasterizer port: turns the vector banner into a fixed-size PNG.

use std::path::Path;

use crate::error::AnnotateError;

/// Parameters for one rasterization.
#[derive(Debug, Clone, Copy)]
pub struct RasterRequest<'a> {
    /// Vector source.
    pub svg: &'a Path,
    /// Raster destination.
    pub png: &'a Path,
    /// Target width in pixels.
    pub width: u32,
    /// Target height in pixels.
    pub height: u32,
    /// Render density in DPI.
    pub density: u32,
}

/// Converts an SVG into a PNG of exactly the requested size.
pub trait Rasterizer {
    /// Render `request.svg` into `request.png`.
    ///
    /// # Errors
    ///
    /// Returns [`AnnotateError::RasterizeFailed`] if rendering fails.
    fn rasterize(&self, request: &RasterRequest<'_>) -> Result<(), AnnotateError>;
}
