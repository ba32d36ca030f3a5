// Drawable mesh parts built on top of points: edges and faces.
//
// Both reference their points by index into the list they were built from
// (control nodes or the current AffinePoint generation), and cache screen
// geometry and depth in update(). Depth grows away from the viewer, so parts
// are drawn in decreasing depth order.

use glam::{Vec2, Vec3};
use super::color::{Color, SHADE};
use super::point::{AffinePoint, Vertex};
use super::surface::RenderSurface;
use super::vector;

// ============================================================================
// EDGE
// ============================================================================

/// Edges are pulled toward the viewer by thickness / EDGE_DEPTH_DIVISOR, so a
/// line lying on a face at equal depth is drawn over it.
pub const EDGE_DEPTH_DIVISOR: f32 = 8.0;

#[derive(Debug, Clone)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
    pub color: Color,
    pub thickness: f32,
    ends: [Vec2; 2],
    depth: f32,
}

impl Edge {
    pub fn new(a: usize, b: usize, color: Color, thickness: f32) -> Self {
        Self {
            a,
            b,
            color,
            thickness,
            ends: [Vec2::ZERO; 2],
            depth: 0.0,
        }
    }

    /// `verts` must be the list `a` and `b` index into.
    pub fn update<V: Vertex>(&mut self, verts: &[V]) {
        let (va, vb) = (&verts[self.a], &verts[self.b]);
        self.ends = [va.screen(), vb.screen()];
        self.depth = 0.5 * (va.view_position().z + vb.view_position().z)
            - self.thickness / EDGE_DEPTH_DIVISOR;
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        surface.draw_line(self.ends[0], self.ends[1], self.color, self.thickness);
    }
}

// ============================================================================
// FACE
// ============================================================================

#[derive(Debug, Clone)]
pub struct Face {
    /// 3 or 4 indices into the current AffinePoint list.
    pub corners: Vec<usize>,
    pub color: Color,
    shaded: Color,
    normal: Option<Vec3>,
    depth: Option<f32>,
    screen: Vec<Vec2>,
}

impl Face {
    pub fn new(corners: Vec<usize>, color: Color) -> Self {
        let n = corners.len();
        Self {
            corners,
            color,
            shaded: color,
            normal: None,
            depth: None,
            screen: vec![Vec2::ZERO; n],
        }
    }

    /// Recompute normal, diffuse shade and depth.
    ///
    /// `light` is a unit direction in camera space. The normal comes from the
    /// first three corners taken as (screen x, screen y, camera-space z), so
    /// the sign of its z is the winding of the projected polygon. A face wound
    /// away from the viewer (normal z >= 0), or whose corners are collinear,
    /// gets no depth and is skipped when drawing.
    pub fn update(&mut self, points: &[AffinePoint], light: Vec3) {
        for (s, &i) in self.screen.iter_mut().zip(&self.corners) {
            *s = points[i].screen();
        }

        let projected = |k: usize| {
            let p = &points[self.corners[k]];
            p.screen().extend(p.view_position().z)
        };
        self.normal = vector::normalize(vector::plane_normal(projected(0), projected(1), projected(2)));

        match self.normal {
            Some(n) => {
                let darkness = 1.0 - vector::dot(light, n).clamp(0.0, 1.0);
                self.shaded = self.color.lerp(SHADE, darkness);
                self.depth = if n.z < 0.0 {
                    let sum: f32 = self.corners.iter().map(|&i| points[i].view_position().z).sum();
                    Some(sum / self.corners.len() as f32)
                } else {
                    None
                };
            }
            None => {
                self.shaded = self.color;
                self.depth = None;
            }
        }
    }

    pub fn normal(&self) -> Option<Vec3> {
        self.normal
    }

    pub fn shaded(&self) -> Color {
        self.shaded
    }

    /// `None` while culled.
    pub fn depth(&self) -> Option<f32> {
        self.depth
    }

    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        surface.draw_polygon(&self.screen, self.shaded, self.shaded);
    }
}
