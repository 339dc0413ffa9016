//! Vector geometry in reference design space
//!
//! Shapes are authored in an abstract square coordinate system (for example
//! 0..512) and scaled into canvas pixels right before rasterization.

use crate::error::{RasterError, Result};
use serde::Deserialize;
use std::f64::consts::PI;

/// Most tips a star outline may have
pub const MAX_STAR_TIPS: u32 = 1024;

/// A point in reference design space
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(from = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    pub fn distance_to(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Point::new(x, y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

/// Axis-aligned rectangle given by two corners.
///
/// Corners are normalized on construction so `x0 <= x1` and `y0 <= y1`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "[f64; 4]")]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn center(&self) -> Point {
        Point::new((self.x0 + self.x1) / 2.0, (self.y0 + self.y1) / 2.0)
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Rect::new(
            self.x0 * factor,
            self.y0 * factor,
            self.x1 * factor,
            self.y1 * factor,
        )
    }

    pub fn is_finite(&self) -> bool {
        [self.x0, self.y0, self.x1, self.y1]
            .iter()
            .all(|v| v.is_finite())
    }

    /// The rectangle as a clockwise four-corner polygon
    pub fn to_polygon(&self) -> Result<Polygon> {
        Polygon::new(vec![
            Point::new(self.x0, self.y0),
            Point::new(self.x1, self.y0),
            Point::new(self.x1, self.y1),
            Point::new(self.x0, self.y1),
        ])
    }
}

impl From<[f64; 4]> for Rect {
    fn from([x0, y0, x1, y1]: [f64; 4]) -> Self {
        Rect::new(x0, y0, x1, y1)
    }
}

/// Integer pixel box, half-open: covers `x0..x1` by `y0..y1`.
///
/// May reach outside a canvas; painters clip against canvas bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub x0: i64,
    pub y0: i64,
    pub x1: i64,
    pub y1: i64,
}

impl PixelRect {
    /// Round a real-valued extent outward to whole pixels
    pub fn enclosing(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            x0: min_x.floor() as i64,
            y0: min_y.floor() as i64,
            x1: max_x.ceil() as i64,
            y1: max_y.ceil() as i64,
        }
    }

    pub fn width(&self) -> usize {
        self.x1.saturating_sub(self.x0).max(0) as usize
    }

    pub fn height(&self) -> usize {
        self.y1.saturating_sub(self.y0).max(0) as usize
    }

    /// Number of pixels covered, `None` if it does not fit in `usize`
    pub fn pixel_count(&self) -> Option<usize> {
        self.width().checked_mul(self.height())
    }

    /// Overlap of two boxes; empty boxes have zero width or height
    pub fn intersect(&self, other: &PixelRect) -> PixelRect {
        PixelRect {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        }
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }
}

/// Closed polygon with at least three vertices.
///
/// The last vertex connects back to the first. Consecutive vertices
/// (including last/first) never coincide.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Result<Self> {
        if points.len() < 3 {
            return Err(RasterError::InvalidGeometry(format!(
                "polygon needs at least 3 points, got {}",
                points.len()
            )));
        }

        if let Some(bad) = points.iter().find(|p| !p.is_finite()) {
            return Err(RasterError::InvalidGeometry(format!(
                "polygon point ({}, {}) is not finite",
                bad.x, bad.y
            )));
        }

        for (i, point) in points.iter().enumerate() {
            let next = points[(i + 1) % points.len()];
            if *point == next {
                return Err(RasterError::InvalidGeometry(format!(
                    "polygon points {} and {} coincide at ({}, {})",
                    i,
                    (i + 1) % points.len(),
                    point.x,
                    point.y
                )));
            }
        }

        Ok(Self { points })
    }

    /// Star outline alternating between `outer_radius` tips and
    /// `inner_radius` notches.
    ///
    /// Vertex `i` sits at angle `start_angle_degrees + i * 180 / tips`,
    /// measured counter-clockwise on screen (y grows downward), so a start
    /// angle of 90 puts the first tip straight up.
    pub fn star(
        center: Point,
        outer_radius: f64,
        inner_radius: f64,
        tips: u32,
        start_angle_degrees: f64,
    ) -> Result<Self> {
        if !(2..=MAX_STAR_TIPS).contains(&tips) {
            return Err(RasterError::InvalidGeometry(format!(
                "star needs between 2 and {MAX_STAR_TIPS} tips, got {tips}"
            )));
        }
        let radii_ok = outer_radius.is_finite()
            && inner_radius.is_finite()
            && outer_radius > 0.0
            && inner_radius > 0.0;
        if !radii_ok || !start_angle_degrees.is_finite() {
            return Err(RasterError::InvalidGeometry(format!(
                "star radii must be positive (outer {outer_radius}, inner {inner_radius})"
            )));
        }

        let start = start_angle_degrees.to_radians();
        let step = PI / tips as f64;
        let vertices = tips.checked_mul(2).ok_or_else(|| {
            RasterError::InvalidGeometry(format!("star with {tips} tips has too many vertices"))
        })?;
        let points = (0..vertices)
            .map(|i| {
                let angle = start + i as f64 * step;
                let r = if i % 2 == 0 { outer_radius } else { inner_radius };
                Point::new(center.x + r * angle.cos(), center.y - r * angle.sin())
            })
            .collect();

        Polygon::new(points)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Uniformly scaled copy; `factor` must be positive and finite
    pub fn scaled(&self, factor: f64) -> Self {
        debug_assert!(factor > 0.0 && factor.is_finite());
        Self {
            points: self.points.iter().map(|p| p.scaled(factor)).collect(),
        }
    }

    /// Tight real-valued bounds as `(min_x, min_y, max_x, max_y)`
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        self.points.iter().fold(
            (f64::MAX, f64::MAX, f64::MIN, f64::MIN),
            |(min_x, min_y, max_x, max_y), p| {
                (min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y))
            },
        )
    }

    /// Even-odd containment test of a single sample point
    pub fn contains(&self, sample: Point) -> bool {
        let mut inside = false;
        let mut j = self.points.len() - 1;
        for i in 0..self.points.len() {
            let a = self.points[i];
            let b = self.points[j];
            if (a.y > sample.y) != (b.y > sample.y) {
                let crossing_x = a.x + (sample.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if sample.x < crossing_x {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}

impl TryFrom<Vec<Point>> for Polygon {
    type Error = RasterError;

    fn try_from(points: Vec<Point>) -> Result<Self> {
        Polygon::new(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Polygon {
        Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 10.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_polygon_requires_three_points() {
        let err = Polygon::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]).unwrap_err();
        assert!(matches!(err, RasterError::InvalidGeometry(_)));
    }

    #[test]
    fn test_polygon_rejects_coincident_neighbours() {
        let err = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(0.0, 4.0),
        ])
        .unwrap_err();
        assert!(matches!(err, RasterError::InvalidGeometry(_)));

        // closing edge counts too
        let err = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(0.0, 0.0),
        ])
        .unwrap_err();
        assert!(matches!(err, RasterError::InvalidGeometry(_)));
    }

    #[test]
    fn test_polygon_rejects_nan() {
        let err = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(f64::NAN, 0.0),
            Point::new(0.0, 4.0),
        ])
        .unwrap_err();
        assert!(matches!(err, RasterError::InvalidGeometry(_)));
    }

    #[test]
    fn test_contains_even_odd() {
        let tri = triangle();
        assert!(tri.contains(Point::new(5.5, 5.5)));
        assert!(!tri.contains(Point::new(0.5, 9.5)));
        assert!(!tri.contains(Point::new(11.0, 1.0)));
    }

    #[test]
    fn test_star_vertices() {
        let star = Polygon::star(Point::new(100.0, 100.0), 50.0, 20.0, 4, 90.0).unwrap();
        assert_eq!(star.len(), 8);

        // first tip points straight up
        let tip = star.points()[0];
        assert!((tip.x - 100.0).abs() < 1e-9);
        assert!((tip.y - 50.0).abs() < 1e-9);

        // first notch sits at 135 degrees on the inner radius
        let notch = star.points()[1];
        assert!((notch.distance_to(Point::new(100.0, 100.0)) - 20.0).abs() < 1e-9);
        assert!(notch.x < 100.0 && notch.y < 100.0);
    }

    #[test]
    fn test_star_rejects_bad_parameters() {
        assert!(Polygon::star(Point::default(), 10.0, 5.0, 1, 90.0).is_err());
        assert!(Polygon::star(Point::default(), 0.0, 5.0, 5, 90.0).is_err());
        assert!(Polygon::star(Point::default(), 10.0, -1.0, 5, 90.0).is_err());
    }

    #[test]
    fn test_star_rejects_huge_tip_counts() {
        for tips in [MAX_STAR_TIPS + 1, 3_000_000_000, u32::MAX] {
            let err = Polygon::star(Point::default(), 10.0, 5.0, tips, 90.0).unwrap_err();
            assert!(matches!(err, RasterError::InvalidGeometry(_)), "{tips}");
        }
        let star = Polygon::star(Point::default(), 10.0, 5.0, MAX_STAR_TIPS, 90.0).unwrap();
        assert_eq!(star.len(), MAX_STAR_TIPS as usize * 2);
    }

    #[test]
    fn test_pixel_rect_rounds_outward() {
        let rect = PixelRect::enclosing(0.4, -1.2, 9.1, 10.0);
        assert_eq!(rect, PixelRect { x0: 0, y0: -2, x1: 10, y1: 10 });
        assert_eq!(rect.width(), 10);
        assert_eq!(rect.height(), 12);
    }

    #[test]
    fn test_pixel_rect_extremes() {
        // saturated float conversions must not overflow the subtraction
        let huge = PixelRect::enclosing(-1e300, -1e300, 1e300, 1e300);
        assert_eq!(huge.width(), i64::MAX as usize);
        assert_eq!(huge.pixel_count(), None);

        let canvas = PixelRect { x0: 0, y0: 0, x1: 64, y1: 64 };
        assert_eq!(huge.intersect(&canvas), canvas);

        let off = PixelRect { x0: 100, y0: 100, x1: 120, y1: 120 }.intersect(&canvas);
        assert_eq!(off.width(), 0);
        assert_eq!(off.pixel_count(), Some(0));
    }

    #[test]
    fn test_rect_normalizes_corners() {
        let rect = Rect::new(10.0, 8.0, 2.0, 4.0);
        assert_eq!(rect, Rect::new(2.0, 4.0, 10.0, 8.0));
        assert_eq!(rect.center(), Point::new(6.0, 6.0));
    }

    #[test]
    fn test_bounds_and_scale() {
        let tri = triangle().scaled(2.0);
        assert_eq!(tri.bounds(), (0.0, 0.0, 20.0, 20.0));
    }
}
