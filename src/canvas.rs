//! Owned RGBA pixel buffer
//!
//! All pixel access goes through signed, bounds-checked accessors so shape
//! boxes that hang off the edge can be clipped without special casing.

use crate::color::Color;
use crate::geometry::PixelRect;
use image::{Rgba, RgbaImage};

/// Largest pixel buffer, canvas or mask, the renderer will allocate
pub const MAX_PIXELS: usize = 1 << 28;

/// Width x height RGBA buffer, freshly allocated fully transparent
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The whole canvas as a pixel box
    pub fn bounds(&self) -> PixelRect {
        PixelRect {
            x0: 0,
            y0: 0,
            x1: self.width() as i64,
            y1: self.height() as i64,
        }
    }

    fn index(&self, x: i64, y: i64) -> Option<(u32, u32)> {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            None
        } else {
            Some((x as u32, y as u32))
        }
    }

    /// Pixel at `(x, y)`, or `None` outside the canvas
    pub fn get(&self, x: i64, y: i64) -> Option<Color> {
        self.index(x, y)
            .map(|(x, y)| Color::from(*self.image.get_pixel(x, y)))
    }

    /// Overwrite the pixel at `(x, y)`; returns `false` when out of bounds.
    pub fn set(&mut self, x: i64, y: i64, color: Color) -> bool {
        match self.index(x, y) {
            Some((x, y)) => {
                self.image.put_pixel(x, y, Rgba::from(color));
                true
            }
            None => false,
        }
    }

    /// Fill every pixel with `color`
    pub fn fill(&mut self, color: Color) {
        let pixel = Rgba::from(color);
        for p in self.image.pixels_mut() {
            *p = pixel;
        }
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Raw RGBA bytes, row-major
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_canvas_is_transparent() {
        let canvas = Canvas::new(4, 3);
        assert_eq!(canvas.width(), 4);
        assert_eq!(canvas.height(), 3);
        assert!(canvas.as_raw().iter().all(|&b| b == 0));
        assert_eq!(canvas.bounds(), PixelRect { x0: 0, y0: 0, x1: 4, y1: 3 });
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut canvas = Canvas::new(2, 2);
        assert!(!canvas.set(-1, 0, Color::WHITE));
        assert!(!canvas.set(2, 0, Color::WHITE));
        assert!(!canvas.set(0, 2, Color::WHITE));
        assert_eq!(canvas.get(5, 5), None);
        assert!(canvas.set(1, 1, Color::WHITE));
        assert_eq!(canvas.get(1, 1), Some(Color::WHITE));
    }

    #[test]
    fn test_fill() {
        let mut canvas = Canvas::new(3, 3);
        canvas.fill(Color::rgb(0, 128, 255));
        assert_eq!(canvas.get(2, 2), Some(Color::rgb(0, 128, 255)));
    }
}
