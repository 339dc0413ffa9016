use serde::Deserialize;
use std::str::FromStr;

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "ColorSpec")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_array(channels: [u8; 4]) -> Self {
        Self::rgba(channels[0], channels[1], channels[2], channels[3])
    }

    /// Parse a CSS color string such as `#0080ff`, `rgb(0, 128, 255)` or `white`.
    pub fn parse_css(input: &str) -> Option<Self> {
        css_color::Srgb::from_str(input).ok().map(|color| {
            Color::rgba(
                (color.red * 255.).round() as u8,
                (color.green * 255.).round() as u8,
                (color.blue * 255.).round() as u8,
                (color.alpha * 255.).round() as u8,
            )
        })
    }
}

impl From<[u8; 4]> for Color {
    fn from(channels: [u8; 4]) -> Self {
        Color::from_array(channels)
    }
}

impl From<Color> for image::Rgba<u8> {
    fn from(color: Color) -> Self {
        image::Rgba(color.to_array())
    }
}

impl From<image::Rgba<u8>> for Color {
    fn from(pixel: image::Rgba<u8>) -> Self {
        Color::from_array(pixel.0)
    }
}

/// Accepted spellings of a color in scene files
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorSpec {
    Css(String),
    Rgb([u8; 3]),
    Rgba([u8; 4]),
}

impl TryFrom<ColorSpec> for Color {
    type Error = String;

    fn try_from(spec: ColorSpec) -> Result<Self, Self::Error> {
        match spec {
            ColorSpec::Css(text) => {
                Color::parse_css(&text).ok_or_else(|| format!("unrecognized color: {text}"))
            }
            ColorSpec::Rgb([r, g, b]) => Ok(Color::rgb(r, g, b)),
            ColorSpec::Rgba(channels) => Ok(Color::from_array(channels)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(Color::parse_css("#0080ff"), Some(Color::rgb(0, 128, 255)));
        assert_eq!(Color::parse_css("#fff"), Some(Color::WHITE));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(Color::parse_css("not-a-color"), None);
    }

    #[test]
    fn test_deserialize_spellings() {
        let colors: Vec<Color> =
            serde_json::from_str(r##"["#000000", [147, 51, 234], [30, 30, 50, 128]]"##).unwrap();
        assert_eq!(colors[0], Color::BLACK);
        assert_eq!(colors[1], Color::rgb(147, 51, 234));
        assert_eq!(colors[2], Color::rgba(30, 30, 50, 128));
    }

    #[test]
    fn test_deserialize_rejects_garbage() {
        let result: Result<Color, _> = serde_json::from_str(r#""sparkly""#);
        assert!(result.is_err());
    }
}
