//! Error types for the raster pipeline

use thiserror::Error;

/// Validation failures raised by the raster core.
///
/// All of these are construction-time errors: once a `Gradient`, `Polygon`
/// or render target has been accepted, the pixel loops themselves cannot fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RasterError {
    /// Polygon or ellipse that cannot be rasterized
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Gradient stop table that breaks ordering or boundary rules
    #[error("Invalid gradient: {0}")]
    InvalidGradient(String),

    /// Non-positive target size, scale factor or reference size
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

/// Result type for raster operations
pub type Result<T> = std::result::Result<T, RasterError>;
