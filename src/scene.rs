//! Scene descriptions
//!
//! A scene is an ordered list of filled shapes in a square reference space,
//! optionally over a solid background. Scenes come from the built-in catalog
//! or from JSON files such as:
//!
//! ```json
//! {
//!   "reference_size": 512,
//!   "shapes": [
//!     { "kind": "polygon", "points": [[52, 428], [87, 463], [328, 230], [293, 195]],
//!       "fill": { "solid": "#000000" } },
//!     { "kind": "star", "center": [370, 145], "outer_radius": 115, "inner_radius": 40,
//!       "fill": { "radial": { "stops": [
//!         { "offset": 0.0, "color": "#9333ea" },
//!         { "offset": 0.7, "color": "#c026d3" },
//!         { "offset": 1.0, "color": "#f59e0b" } ] } } }
//!   ]
//! }
//! ```

use crate::canvas::Canvas;
use crate::color::Color;
use crate::compositor::{paint_gradient, paint_solid, CompositeMode, RadialFill};
use crate::error::Result;
use crate::geometry::{PixelRect, Point, Polygon, Rect};
use crate::gradient::Gradient;
use crate::raster::{
    polygon_mask, rasterize_ellipse_clipped, rasterize_polygon_clipped, rasterize_rect_clipped,
    Mask,
};
use crate::supersample::{RenderConfig, Supersampler, DEFAULT_REFERENCE_SIZE};
use anyhow::Context;
use log::debug;
use serde::Deserialize;
use std::path::Path;

fn default_reference_size() -> f64 {
    DEFAULT_REFERENCE_SIZE
}

fn default_tips() -> u32 {
    5
}

fn default_start_angle() -> f64 {
    90.0
}

/// How a shape's covered pixels are colored
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fill {
    Solid(Color),
    Radial(RadialSpec),
}

/// Radial gradient in reference space.
///
/// `center` defaults to the shape's center and `outer_radius` to the
/// distance from that center to the farthest point of the shape.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RadialSpec {
    pub stops: Gradient,
    #[serde(default)]
    pub center: Option<Point>,
    #[serde(default)]
    pub outer_radius: Option<f64>,
}

/// A filled shape in reference coordinates
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Polygon {
        points: Vec<Point>,
        fill: Fill,
    },
    Rect {
        rect: Rect,
        fill: Fill,
    },
    Ellipse {
        rect: Rect,
        fill: Fill,
    },
    Star {
        center: Point,
        outer_radius: f64,
        inner_radius: f64,
        #[serde(default = "default_tips")]
        tips: u32,
        /// Angle of the first tip in degrees, counter-clockwise from +x
        #[serde(default = "default_start_angle")]
        start_angle: f64,
        fill: Fill,
    },
}

impl Shape {
    pub fn polygon(points: &[(f64, f64)], fill: Fill) -> Self {
        Shape::Polygon {
            points: points.iter().map(|&p| Point::from(p)).collect(),
            fill,
        }
    }

    pub fn rect(x0: f64, y0: f64, x1: f64, y1: f64, fill: Fill) -> Self {
        Shape::Rect {
            rect: Rect::new(x0, y0, x1, y1),
            fill,
        }
    }

    pub fn ellipse(x0: f64, y0: f64, x1: f64, y1: f64, fill: Fill) -> Self {
        Shape::Ellipse {
            rect: Rect::new(x0, y0, x1, y1),
            fill,
        }
    }

    pub fn star(
        center: (f64, f64),
        outer_radius: f64,
        inner_radius: f64,
        tips: u32,
        start_angle: f64,
        fill: Fill,
    ) -> Self {
        Shape::Star {
            center: Point::from(center),
            outer_radius,
            inner_radius,
            tips,
            start_angle,
            fill,
        }
    }

    pub fn fill(&self) -> &Fill {
        match self {
            Shape::Polygon { fill, .. }
            | Shape::Rect { fill, .. }
            | Shape::Ellipse { fill, .. }
            | Shape::Star { fill, .. } => fill,
        }
    }

    /// Rasterize in canvas pixel space, sampling only inside `clip`, and
    /// return the default gradient center and radius alongside the mask
    fn rasterize(&self, scale: f64, clip: PixelRect) -> Result<(PixelRect, Mask, Point, f64)> {
        let clip = Some(clip);
        match self {
            Shape::Polygon { points, .. } => {
                let scaled: Vec<Point> = points.iter().map(|p| p.scaled(scale)).collect();
                let (bbox, mask) = rasterize_polygon_clipped(&scaled, clip)?;
                let center = centroid(&scaled);
                let radius = farthest_vertex(&scaled, center);
                Ok((bbox, mask, center, radius))
            }
            Shape::Rect { rect, .. } => {
                let rect = rect.scaled(scale);
                let (bbox, mask) = rasterize_rect_clipped(rect, clip)?;
                let center = rect.center();
                Ok((bbox, mask, center, rect.width().hypot(rect.height()) / 2.0))
            }
            Shape::Ellipse { rect, .. } => {
                let rect = rect.scaled(scale);
                let (bbox, mask) = rasterize_ellipse_clipped(rect, clip)?;
                let radius = rect.width().max(rect.height()) / 2.0;
                Ok((bbox, mask, rect.center(), radius))
            }
            Shape::Star {
                center,
                outer_radius,
                inner_radius,
                tips,
                start_angle,
                ..
            } => {
                let star = Polygon::star(
                    center.scaled(scale),
                    outer_radius * scale,
                    inner_radius * scale,
                    *tips,
                    *start_angle,
                )?;
                let (bbox, mask) = polygon_mask(&star, clip)?;
                Ok((bbox, mask, center.scaled(scale), outer_radius * scale))
            }
        }
    }

    /// Rasterize and paint this shape onto `canvas`
    pub fn draw(&self, canvas: &mut Canvas, scale: f64, mode: CompositeMode) -> Result<()> {
        let (bbox, mask, shape_center, shape_radius) = self.rasterize(scale, canvas.bounds())?;
        match self.fill() {
            Fill::Solid(color) => paint_solid(canvas, bbox, &mask, *color, mode),
            Fill::Radial(spec) => {
                let center = spec.center.map(|c| c.scaled(scale)).unwrap_or(shape_center);
                let outer_radius = match spec.outer_radius {
                    Some(radius) => radius * scale,
                    None => shape_radius + center.distance_to(shape_center),
                };
                let fill = RadialFill::new(center, outer_radius, spec.stops.clone());
                paint_gradient(canvas, bbox, &mask, &fill, mode);
            }
        }
        Ok(())
    }
}

fn centroid(points: &[Point]) -> Point {
    let n = points.len().max(1) as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point::new(sx / n, sy / n)
}

fn farthest_vertex(points: &[Point], center: Point) -> f64 {
    points
        .iter()
        .map(|p| p.distance_to(center))
        .fold(0.0, f64::max)
}

/// An icon design: background plus shapes painted in order
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    #[serde(default)]
    pub name: Option<String>,
    /// Side length of the design space the shapes are authored in
    #[serde(default = "default_reference_size")]
    pub reference_size: f64,
    /// Painted over the whole canvas before any shape
    #[serde(default)]
    pub background: Option<Color>,
    pub shapes: Vec<Shape>,
}

impl Scene {
    pub fn new(reference_size: f64) -> Self {
        Self {
            name: None,
            reference_size,
            background: None,
            shapes: Vec::new(),
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shapes.push(shape);
        self
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Failed to parse scene JSON")
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene file {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Invalid scene file {}", path.display()))
    }

    /// Paint the scene onto a canvas already scaled by `base_scale`
    pub fn draw(&self, canvas: &mut Canvas, base_scale: f64, mode: CompositeMode) -> Result<()> {
        debug!(
            "Drawing {} shape(s) at base scale {base_scale:.4}",
            self.shapes.len()
        );
        if let Some(background) = self.background {
            canvas.fill(background);
        }
        for shape in &self.shapes {
            shape.draw(canvas, base_scale, mode)?;
        }
        Ok(())
    }

    /// Render at `size` pixels square.
    ///
    /// The scene's own reference size takes precedence over the one in
    /// `config`.
    pub fn render(&self, size: u32, config: &RenderConfig) -> Result<Canvas> {
        let config = config.with_reference_size(self.reference_size);
        Supersampler::new(config)
            .render(size, |canvas, base_scale| self.draw(canvas, base_scale, config.mode))
    }
}
