//! Multi-stop color gradients
//!
//! A [`Gradient`] maps a normalized position in `[0, 1]` to a color by
//! linear interpolation between its stops. Radial fills feed it the distance
//! of each pixel from the gradient center.

use crate::color::Color;
use crate::error::{RasterError, Result};
use serde::Deserialize;

/// A color anchored at a position along the gradient axis
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Color,
}

impl GradientStop {
    pub const fn new(offset: f64, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Validated stop table.
///
/// Offsets are finite, strictly increasing, start at exactly 0.0 and end at
/// exactly 1.0. Evaluation never fails once a gradient exists.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Vec<GradientStop>")]
pub struct Gradient {
    stops: Vec<GradientStop>,
}

impl Gradient {
    pub fn new(stops: Vec<GradientStop>) -> Result<Self> {
        if stops.len() < 2 {
            return Err(RasterError::InvalidGradient(format!(
                "gradient needs at least 2 stops, got {}",
                stops.len()
            )));
        }

        if let Some(stop) = stops
            .iter()
            .find(|s| !s.offset.is_finite() || !(0.0..=1.0).contains(&s.offset))
        {
            return Err(RasterError::InvalidGradient(format!(
                "stop offset {} is outside [0, 1]",
                stop.offset
            )));
        }

        if stops[0].offset != 0.0 {
            return Err(RasterError::InvalidGradient(format!(
                "first stop must be at 0.0, found {}",
                stops[0].offset
            )));
        }
        if stops[stops.len() - 1].offset != 1.0 {
            return Err(RasterError::InvalidGradient(format!(
                "last stop must be at 1.0, found {}",
                stops[stops.len() - 1].offset
            )));
        }

        if let Some(pair) = stops.windows(2).find(|w| w[1].offset <= w[0].offset) {
            return Err(RasterError::InvalidGradient(format!(
                "stop offsets must strictly increase ({} then {})",
                pair[0].offset, pair[1].offset
            )));
        }

        Ok(Self { stops })
    }

    /// Two-stop gradient from `from` at 0.0 to `to` at 1.0
    pub fn linear(from: Color, to: Color) -> Self {
        Self {
            stops: vec![GradientStop::new(0.0, from), GradientStop::new(1.0, to)],
        }
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Color at `distance` along an axis of length `max_distance`.
    ///
    /// The ratio is clamped to `[0, 1]`; a non-positive `max_distance`
    /// yields the first stop.
    pub fn evaluate(&self, distance: f64, max_distance: f64) -> Color {
        let ratio = if max_distance > 0.0 && max_distance.is_finite() {
            distance / max_distance
        } else {
            0.0
        };
        let t = if ratio.is_nan() {
            0.0
        } else {
            ratio.clamp(0.0, 1.0)
        };
        self.color_at(t)
    }

    /// Color at normalized position `t`, which must already be in `[0, 1]`
    pub fn color_at(&self, t: f64) -> Color {
        let first = &self.stops[0];
        let last = &self.stops[self.stops.len() - 1];
        if t <= first.offset {
            return first.color;
        }
        if t >= last.offset {
            return last.color;
        }

        for pair in self.stops.windows(2) {
            let (lo, hi) = (&pair[0], &pair[1]);
            if t == lo.offset {
                return lo.color;
            }
            if t == hi.offset {
                return hi.color;
            }
            if t < hi.offset {
                let frac = (t - lo.offset) / (hi.offset - lo.offset);
                return lerp_color(lo.color, hi.color, frac);
            }
        }

        last.color
    }
}

impl TryFrom<Vec<GradientStop>> for Gradient {
    type Error = RasterError;

    fn try_from(stops: Vec<GradientStop>) -> Result<Self> {
        Gradient::new(stops)
    }
}

/// Per-channel linear interpolation, truncated toward zero
fn lerp_color(from: Color, to: Color, frac: f64) -> Color {
    let channel = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac) as u8;
    Color::rgba(
        channel(from.r, to.r),
        channel(from.g, to.g),
        channel(from.b, to.b),
        channel(from.a, to.a),
    )
}
