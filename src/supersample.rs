//! Supersampled rendering
//!
//! Shapes are drawn hard-edged onto a canvas `scale_factor` times larger than
//! the requested icon, which is then filtered down to the target size. The
//! downsample is the only place partially transparent edge pixels come from.

use crate::canvas::{Canvas, MAX_PIXELS};
use crate::compositor::CompositeMode;
use crate::error::{RasterError, Result};
use image::{imageops::FilterType, ImageBuffer, Rgba, RgbaImage};
use log::debug;
use serde::Deserialize;

type Rgba16Image = ImageBuffer<Rgba<u16>, Vec<u16>>;

/// Reference design space used by the app icon family
pub const DEFAULT_REFERENCE_SIZE: f64 = 512.0;

/// Supersampling factor applied when none is configured
pub const DEFAULT_SCALE_FACTOR: u32 = 2;

/// Resampling filter used to shrink the internal canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DownsampleFilter {
    /// Windowed sinc, three lobes
    #[default]
    Lanczos3,
    /// Exact average of each `scale_factor` x `scale_factor` block
    Box,
}

/// Knobs shared by every render in a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Side length of the square design space shapes are authored in
    pub reference_size: f64,
    /// Internal canvas is `target_size * scale_factor` pixels square
    pub scale_factor: u32,
    pub filter: DownsampleFilter,
    pub mode: CompositeMode,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            reference_size: DEFAULT_REFERENCE_SIZE,
            scale_factor: DEFAULT_SCALE_FACTOR,
            filter: DownsampleFilter::default(),
            mode: CompositeMode::default(),
        }
    }
}

impl RenderConfig {
    pub fn with_reference_size(mut self, reference_size: f64) -> Self {
        self.reference_size = reference_size;
        self
    }

    pub fn with_scale_factor(mut self, scale_factor: u32) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    pub fn with_filter(mut self, filter: DownsampleFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_mode(mut self, mode: CompositeMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Renders one icon per call through the allocate/draw/downsample pipeline
#[derive(Debug, Clone, Default)]
pub struct Supersampler {
    config: RenderConfig,
}

impl Supersampler {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render a `target_size` square icon.
    ///
    /// `draw` receives the oversized canvas and the factor mapping reference
    /// coordinates to its pixels. Any error it returns aborts the render.
    pub fn render<F>(&self, target_size: u32, draw: F) -> Result<Canvas>
    where
        F: FnOnce(&mut Canvas, f64) -> Result<()>,
    {
        let RenderConfig {
            reference_size,
            scale_factor,
            filter,
            ..
        } = self.config;

        if target_size == 0 {
            return Err(RasterError::InvalidDimensions(
                "target size must be positive".to_string(),
            ));
        }
        if scale_factor == 0 {
            return Err(RasterError::InvalidDimensions(
                "scale factor must be positive".to_string(),
            ));
        }
        if !reference_size.is_finite() || reference_size <= 0.0 {
            return Err(RasterError::InvalidDimensions(format!(
                "reference size must be positive, got {reference_size}"
            )));
        }
        let canvas_size = target_size.checked_mul(scale_factor).ok_or_else(|| {
            RasterError::InvalidDimensions(format!(
                "{target_size}px at {scale_factor}x overflows the canvas size"
            ))
        })?;

        if (canvas_size as u64).pow(2) > MAX_PIXELS as u64 {
            return Err(RasterError::InvalidDimensions(format!(
                "{canvas_size}px canvas exceeds the {MAX_PIXELS} pixel limit"
            )));
        }

        let base_scale = canvas_size as f64 / reference_size;
        debug!(
            "Rendering {target_size}px icon on {canvas_size}px canvas (base scale {base_scale:.4}, {filter:?})"
        );

        let mut canvas = Canvas::new(canvas_size, canvas_size);
        draw(&mut canvas, base_scale)?;

        if scale_factor == 1 {
            return Ok(canvas);
        }

        let output = match filter {
            DownsampleFilter::Lanczos3 => downsample_lanczos(canvas.as_image(), target_size),
            DownsampleFilter::Box => downsample_box(canvas.as_image(), scale_factor),
        };
        Ok(Canvas::from_image(output))
    }
}

/// One-shot render with the default filter and compositing mode
pub fn render<F>(target_size: u32, scale_factor: u32, reference_size: f64, draw: F) -> Result<Canvas>
where
    F: FnOnce(&mut Canvas, f64) -> Result<()>,
{
    let config = RenderConfig::default()
        .with_scale_factor(scale_factor)
        .with_reference_size(reference_size);
    Supersampler::new(config).render(target_size, draw)
}

/// Lanczos resize on premultiplied 16-bit pixels.
///
/// Filtering straight alpha would pull the black of transparent pixels into
/// shape edges.
fn downsample_lanczos(source: &RgbaImage, target_size: u32) -> RgbaImage {
    let premultiplied = Rgba16Image::from_fn(source.width(), source.height(), |x, y| {
        let [r, g, b, a] = source.get_pixel(x, y).0;
        let a = a as u32;
        // c * a / 255 rescaled from 8 to 16 bits: c * a * 257 / 255
        let channel = |c: u8| ((c as u32 * a * 257 + 127) / 255) as u16;
        Rgba([channel(r), channel(g), channel(b), (a * 257) as u16])
    });

    let resized = image::imageops::resize(
        &premultiplied,
        target_size,
        target_size,
        FilterType::Lanczos3,
    );

    RgbaImage::from_fn(target_size, target_size, |x, y| {
        let [r, g, b, a] = resized.get_pixel(x, y).0;
        if a == 0 {
            return Rgba([0, 0, 0, 0]);
        }
        let alpha = a as f64;
        let unpremultiply = |c: u16| ((c as f64 / alpha).min(1.0) * 255.0).round() as u8;
        Rgba([
            unpremultiply(r),
            unpremultiply(g),
            unpremultiply(b),
            (alpha / 257.0).round() as u8,
        ])
    })
}

/// Area-average each `factor` x `factor` block, weighting color by alpha
fn downsample_box(source: &RgbaImage, factor: u32) -> RgbaImage {
    let target_w = source.width() / factor;
    let target_h = source.height() / factor;
    let samples = (factor * factor) as u64;

    RgbaImage::from_fn(target_w, target_h, |tx, ty| {
        let mut sums = [0u64; 4];
        for sy in ty * factor..(ty + 1) * factor {
            for sx in tx * factor..(tx + 1) * factor {
                let [r, g, b, a] = source.get_pixel(sx, sy).0;
                let a = a as u64;
                sums[0] += r as u64 * a;
                sums[1] += g as u64 * a;
                sums[2] += b as u64 * a;
                sums[3] += a;
            }
        }
        if sums[3] == 0 {
            return Rgba([0, 0, 0, 0]);
        }
        // rounded integer division keeps the filter exact for uniform blocks
        let color = |sum: u64| ((sum + sums[3] / 2) / sums[3]) as u8;
        Rgba([
            color(sums[0]),
            color(sums[1]),
            color(sums[2]),
            ((sums[3] + samples / 2) / samples) as u8,
        ])
    })
}
