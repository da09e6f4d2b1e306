//! Colors used by the layer styles and the opaque page fallback
//!
//! Values are display (gamma-encoded) values, the way the page itself
//! specifies them. Convert with [`Color::to_linear`] before writing into an
//! sRGB render target.

/// RGBA color with components in [0, 1]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub const fn transparent() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// From 8-bit display values
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Decode the sRGB transfer curve; alpha is unchanged
    pub fn to_linear(self) -> Self {
        fn decode(x: f32) -> f32 {
            if x <= 0.04045 {
                x / 12.92
            } else {
                ((x + 0.055) / 1.055).powf(2.4)
            }
        }

        Self::new(decode(self.r), decode(self.g), decode(self.b), self.a)
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    /// Component-wise mix, `t = 0` gives `self`
    pub fn mix(self, other: Color, t: f32) -> Self {
        let lerp = |a: f32, b: f32| a + (b - a) * t;
        Self::new(
            lerp(self.r, other.r),
            lerp(self.g, other.g),
            lerp(self.b, other.b),
            lerp(self.a, other.a),
        )
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Page background colors, used when the surface cannot be composited
/// transparently over whatever sits behind the window.
pub mod page {
    use super::Color;

    /// `#0a0a0a`
    pub fn dark() -> Color {
        Color::from_rgb8(10, 10, 10)
    }

    /// `#ffffff`
    pub fn light() -> Color {
        Color::from_rgb8(255, 255, 255)
    }
}
