use serde::{Deserialize, Serialize};

/// RGB color, components in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Horizontal direction a fade overlay becomes transparent towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeDirection {
    /// Opaque at the left edge, clear towards the right.
    LeftToRight,
    /// Opaque at the right edge, clear towards the left.
    RightToLeft,
}

/// Untextured geometry drawn by the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    /// Solid filled rectangle.
    Fill,
    /// Rectangle outline with the given stroke width.
    Outline { thickness: f32 },
    /// Horizontal alpha gradient, used to mask strip entry and exit.
    Fade { direction: FadeDirection },
}

/// Shape component: how an entity without a texture appears.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeComponent {
    pub kind: ShapeKind,
    pub color: Color,
    pub alpha: f32,
}

impl ShapeComponent {
    pub fn fill(color: Color) -> Self {
        Self { kind: ShapeKind::Fill, color, alpha: 1.0 }
    }

    pub fn outline(color: Color, thickness: f32) -> Self {
        Self { kind: ShapeKind::Outline { thickness }, color, alpha: 1.0 }
    }

    pub fn fade(color: Color, direction: FadeDirection) -> Self {
        Self { kind: ShapeKind::Fade { direction }, color, alpha: 1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_decode() {
        let gold = Color::from_hex(0xffd700);
        assert_eq!(gold.r, 1.0);
        assert!((gold.g - 215.0 / 255.0).abs() < 1e-6);
        assert_eq!(gold.b, 0.0);
    }
}
