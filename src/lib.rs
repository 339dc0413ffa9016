//! Anti-aliased icon rendering from vector shapes.
//!
//! Shapes are rasterized hard-edged onto a supersampled canvas, painted with
//! solid colors or radial gradients, and filtered down to each target size.

pub mod canvas;
pub mod catalog;
pub mod color;
pub mod compositor;
pub mod error;
pub mod geometry;
pub mod gradient;
pub mod output;
pub mod raster;
pub mod scene;
pub mod supersample;

pub use canvas::Canvas;
pub use color::Color;
pub use compositor::{paint_gradient, paint_solid, CompositeMode, RadialFill};
pub use error::{RasterError, Result};
pub use geometry::{PixelRect, Point, Polygon, Rect};
pub use gradient::{Gradient, GradientStop};
pub use raster::{rasterize_ellipse, rasterize_polygon, rasterize_rect, Mask};
pub use scene::{Fill, RadialSpec, Scene, Shape};
pub use supersample::{DownsampleFilter, RenderConfig, Supersampler};
