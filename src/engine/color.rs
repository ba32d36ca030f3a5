// Colours used by the mesh, grid and toolbar.
// Stored as linear 0..1 floats; converted to 8-bit only at the painter.

/// RGBA color for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba8(r, g, b, 255)
    }

    pub const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Linear blend: `t = 0` gives `self`, `t = 1` gives `other`.
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

pub const BACKGROUND: Color = Color::rgb8(0, 0, 20);
pub const SHADE: Color = Color::rgb8(0, 0, 0);
pub const BLUE: Color = Color::rgb8(64, 95, 237);
pub const GREEN: Color = Color::rgb8(28, 173, 123);
pub const ORANGE: Color = Color::rgb8(255, 165, 0);
pub const GRID_FILL: Color = Color::rgba8(0, 0, 255, 40);
pub const GRID_LINE: Color = Color::rgba8(80, 80, 40, 60);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_hits_both_ends_and_clamps() {
        assert_eq!(GREEN.lerp(SHADE, 0.0), GREEN);
        assert_eq!(GREEN.lerp(SHADE, 1.0), SHADE);
        assert_eq!(GREEN.lerp(SHADE, 3.0), SHADE);
    }

    #[test]
    fn rgba8_survives_conversion() {
        assert_eq!(ORANGE.to_rgba8(), [255, 165, 0, 255]);
        assert_eq!(GRID_FILL.to_rgba8(), [0, 0, 255, 40]);
    }
}
