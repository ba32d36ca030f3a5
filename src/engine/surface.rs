// The drawing capability the engine renders through.
// Coordinates are screen offsets from the viewport centre (y pointing down).

use glam::Vec2;
use super::color::Color;

pub trait RenderSurface {
    /// Filled polygon with an outline; triangles and quads in practice.
    fn draw_polygon(&mut self, points: &[Vec2], fill: Color, stroke: Color);
    fn draw_line(&mut self, a: Vec2, b: Vec2, color: Color, thickness: f32);
    /// Filled disc of the given radius.
    fn draw_point(&mut self, p: Vec2, radius: f32, color: Color);
}

/// One captured call on a `RecordingSurface`.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Polygon { points: Vec<Vec2>, fill: Color, stroke: Color },
    Line { a: Vec2, b: Vec2, color: Color, thickness: f32 },
    Point { p: Vec2, radius: f32, color: Color },
}

/// Records draw calls instead of painting them. Used for headless checks of
/// draw order.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn polygons(&self) -> impl Iterator<Item = &[Vec2]> + '_ {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Polygon { points, .. } => Some(points.as_slice()),
            _ => None,
        })
    }
}

impl RenderSurface for RecordingSurface {
    fn draw_polygon(&mut self, points: &[Vec2], fill: Color, stroke: Color) {
        self.calls.push(DrawCall::Polygon { points: points.to_vec(), fill, stroke });
    }

    fn draw_line(&mut self, a: Vec2, b: Vec2, color: Color, thickness: f32) {
        self.calls.push(DrawCall::Line { a, b, color, thickness });
    }

    fn draw_point(&mut self, p: Vec2, radius: f32, color: Color) {
        self.calls.push(DrawCall::Point { p, radius, color });
    }
}
