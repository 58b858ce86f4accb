//! Colors and fills - what a drawable region is painted with
//!
//! The compositing itself happens outside this crate; the only thing layout
//! needs to know about a fill is whether it forces an alpha-capable surface.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Invalid hex color: {0}")]
    InvalidHexColor(String),
}

/// RGBA color, components in the 0.0-1.0 range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    pub const TRANSPARENT: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: f32::from(r) / 255.0,
            g: f32::from(g) / 255.0,
            b: f32::from(b) / 255.0,
            a: f32::from(a) / 255.0,
        }
    }

    /// Parse `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA`.
    pub fn from_hex(hex: &str) -> Result<Self, ParseError> {
        let digits = hex.trim_start_matches('#');
        let invalid = || ParseError::InvalidHexColor(hex.to_string());

        let nibble = |index: usize| -> Result<u8, ParseError> {
            let byte = digits.as_bytes()[index];
            match byte {
                b'0'..=b'9' => Ok(byte - b'0'),
                b'a'..=b'f' => Ok(byte - b'a' + 10),
                b'A'..=b'F' => Ok(byte - b'A' + 10),
                _ => Err(invalid()),
            }
        };
        let byte = |index: usize| -> Result<u8, ParseError> {
            Ok(nibble(index * 2)? * 16 + nibble(index * 2 + 1)?)
        };

        match digits.len() {
            3 => Ok(Self::rgb(nibble(0)? * 17, nibble(1)? * 17, nibble(2)? * 17)),
            4 => Ok(Self::rgba(
                nibble(0)? * 17,
                nibble(1)? * 17,
                nibble(2)? * 17,
                nibble(3)? * 17,
            )),
            6 => Ok(Self::rgb(byte(0)?, byte(1)?, byte(2)?)),
            8 => Ok(Self::rgba(byte(0)?, byte(1)?, byte(2)?, byte(3)?)),
            _ => Err(invalid()),
        }
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }
}

/// Direction a gradient runs in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// What to paint a region with.
///
/// The renderer interprets this; the core only consults
/// [`Fill::requires_alpha`] when choosing a surface format.
#[derive(Clone, Debug, PartialEq)]
pub enum Fill {
    Solid(Color),
    LinearGradient {
        stops: Vec<Color>,
        direction: Direction,
    },
}

impl Fill {
    /// Whether compositing this fill needs an alpha channel.
    pub fn requires_alpha(&self) -> bool {
        match self {
            Fill::Solid(color) => !color.is_opaque(),
            Fill::LinearGradient { stops, .. } => stops.iter().any(|stop| !stop.is_opaque()),
        }
    }
}

impl From<Color> for Fill {
    fn from(color: Color) -> Self {
        Fill::Solid(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        let color = Color::from_hex("#264f78").unwrap();
        assert!((color.r - 0x26 as f32 / 255.0).abs() < 1e-6);
        assert!((color.g - 0x4f as f32 / 255.0).abs() < 1e-6);
        assert!((color.b - 0x78 as f32 / 255.0).abs() < 1e-6);
        assert!(color.is_opaque());

        let short = Color::from_hex("#fff").unwrap();
        assert_eq!(short, Color::WHITE);

        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#zzzzzz").is_err());
    }

    #[test]
    fn test_fill_requires_alpha() {
        assert!(!Fill::from(Color::BLACK).requires_alpha());
        assert!(Fill::from(Color::rgba(0, 0, 0, 128)).requires_alpha());

        let gradient = Fill::LinearGradient {
            stops: vec![Color::WHITE, Color::rgba(255, 255, 255, 0)],
            direction: Direction::Down,
        };
        assert!(gradient.requires_alpha());
    }
}
