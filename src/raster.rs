//! Shape rasterization into binary coverage masks
//!
//! Every pixel is sampled once at its center, `(px + 0.5, py + 0.5)`. The
//! resulting masks are hard-edged; smoothing happens later when the
//! supersampled canvas is downsampled.

use crate::canvas::MAX_PIXELS;
use crate::error::{RasterError, Result};
use crate::geometry::{PixelRect, Point, Polygon, Rect};

/// Mask value for a covered pixel
pub const COVERED: u8 = 255;

/// Binary coverage buffer laid over a [`PixelRect`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Mask {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Coverage at mask-local `(col, row)`; 0 outside the mask
    pub fn get(&self, col: usize, row: usize) -> u8 {
        if col < self.width && row < self.height {
            self.data[row * self.width + col]
        } else {
            0
        }
    }

    pub fn is_covered(&self, col: usize, row: usize) -> bool {
        self.get(col, row) == COVERED
    }

    fn set(&mut self, col: usize, row: usize, value: u8) {
        if col < self.width && row < self.height {
            self.data[row * self.width + col] = value;
        }
    }

    /// Number of covered pixels
    pub fn coverage(&self) -> usize {
        self.data.iter().filter(|&&v| v == COVERED).count()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

fn sample_box(bbox: PixelRect, mut inside: impl FnMut(Point) -> bool) -> Result<Mask> {
    match bbox.pixel_count() {
        Some(pixels) if pixels <= MAX_PIXELS => {}
        _ => {
            return Err(RasterError::InvalidGeometry(format!(
                "shape box {}x{} exceeds the {MAX_PIXELS} pixel limit",
                bbox.width(),
                bbox.height()
            )))
        }
    }

    let mut mask = Mask::new(bbox.width(), bbox.height());
    for row in 0..mask.height() {
        let y = (bbox.y0 + row as i64) as f64 + 0.5;
        for col in 0..mask.width() {
            let x = (bbox.x0 + col as i64) as f64 + 0.5;
            if inside(Point::new(x, y)) {
                mask.set(col, row, COVERED);
            }
        }
    }
    Ok(mask)
}

fn clipped(bbox: PixelRect, clip: Option<PixelRect>) -> PixelRect {
    match clip {
        Some(clip) => bbox.intersect(&clip),
        None => bbox,
    }
}

/// Even-odd mask of an already validated polygon.
///
/// With a `clip` box only pixels inside it are sampled; the returned box is
/// the clipped one.
pub fn polygon_mask(polygon: &Polygon, clip: Option<PixelRect>) -> Result<(PixelRect, Mask)> {
    let (min_x, min_y, max_x, max_y) = polygon.bounds();
    let bbox = clipped(PixelRect::enclosing(min_x, min_y, max_x, max_y), clip);
    let mask = sample_box(bbox, |p| polygon.contains(p))?;
    Ok((bbox, mask))
}

/// Rasterize a polygon given as raw vertices.
///
/// Fails with `InvalidGeometry` for fewer than three points, any other
/// vertex list [`Polygon::new`] rejects, or a box too large to allocate.
pub fn rasterize_polygon(points: &[Point]) -> Result<(PixelRect, Mask)> {
    rasterize_polygon_clipped(points, None)
}

pub fn rasterize_polygon_clipped(
    points: &[Point],
    clip: Option<PixelRect>,
) -> Result<(PixelRect, Mask)> {
    let polygon = Polygon::new(points.to_vec())?;
    polygon_mask(&polygon, clip)
}

/// Rasterize the ellipse inscribed in `rect`
pub fn rasterize_ellipse(rect: Rect) -> Result<(PixelRect, Mask)> {
    rasterize_ellipse_clipped(rect, None)
}

pub fn rasterize_ellipse_clipped(rect: Rect, clip: Option<PixelRect>) -> Result<(PixelRect, Mask)> {
    if !rect.is_finite() || rect.width() <= 0.0 || rect.height() <= 0.0 {
        return Err(RasterError::InvalidGeometry(format!(
            "ellipse box [{}, {}, {}, {}] has no area",
            rect.x0, rect.y0, rect.x1, rect.y1
        )));
    }

    let center = rect.center();
    let rx = rect.width() / 2.0;
    let ry = rect.height() / 2.0;
    let bbox = clipped(PixelRect::enclosing(rect.x0, rect.y0, rect.x1, rect.y1), clip);
    let mask = sample_box(bbox, |p| {
        let nx = (p.x - center.x) / rx;
        let ny = (p.y - center.y) / ry;
        nx * nx + ny * ny <= 1.0
    })?;
    Ok((bbox, mask))
}

/// Rasterize an axis-aligned rectangle
pub fn rasterize_rect(rect: Rect) -> Result<(PixelRect, Mask)> {
    rasterize_rect_clipped(rect, None)
}

pub fn rasterize_rect_clipped(rect: Rect, clip: Option<PixelRect>) -> Result<(PixelRect, Mask)> {
    if !rect.is_finite() {
        return Err(RasterError::InvalidGeometry(format!(
            "rectangle [{}, {}, {}, {}] is not finite",
            rect.x0, rect.y0, rect.x1, rect.y1
        )));
    }
    let polygon = rect.to_polygon()?;
    polygon_mask(&polygon, clip)
}
