// Reference grid under the mesh.
//
// A flat square of `squares` x `squares` cells in the xz plane at height y.
// It is not part of the depth-sorted parts list: the viewer draws it either
// before or after the whole mesh depending on which side of it faces the camera.

use glam::{Vec2, Vec3};
use super::camera::Camera;
use super::color::{GRID_FILL, GRID_LINE};
use super::config::GridConfig;
use super::surface::RenderSurface;
use super::vector;

pub struct Grid {
    pub config: GridConfig,
    /// Node (row, col) lives at index row * (squares + 1) + col.
    nodes: Vec<Vec3>,
    lines: Vec<(usize, usize)>,
    /// Wound so the plane normal points toward -y, the side the mesh sits on.
    corners: [Vec3; 4],
}

impl Grid {
    pub fn new(config: GridConfig) -> Self {
        let mut grid = Self {
            config,
            nodes: Vec::new(),
            lines: Vec::new(),
            corners: [Vec3::ZERO; 4],
        };
        grid.reset();
        grid
    }

    /// Rebuild nodes and lines from the config.
    pub fn reset(&mut self) {
        let n = self.config.squares;
        let half = n as f32 / 2.0;
        self.nodes.clear();
        self.lines.clear();

        for row in 0..=n {
            let z = (row as f32 - half) * self.config.size;
            for col in 0..=n {
                let x = (col as f32 - half) * self.config.size;
                let p = self.nodes.len();
                self.nodes.push(Vec3::new(x, self.config.y, z));
                if col > 0 {
                    self.lines.push((p, p - 1));
                }
                if row > 0 {
                    self.lines.push((p, p - n - 1));
                }
            }
        }

        self.corners = [
            self.nodes[0],
            self.nodes[n],
            self.nodes[(n + 1) * (n + 1) - 1],
            self.nodes[(n + 1) * n],
        ];
    }

    pub fn nodes(&self) -> &[Vec3] {
        &self.nodes
    }

    pub fn lines(&self) -> &[(usize, usize)] {
        &self.lines
    }

    /// Camera-space normal of the grid plane (not normalised).
    pub fn orientation(&self, camera: &Camera) -> Vec3 {
        let c = self.corners.map(|p| camera.camera_space(p));
        vector::plane_normal(c[0], c[1], c[2])
    }

    /// True when the mesh side of the grid faces the viewer, i.e. the grid
    /// lies behind the mesh and must be drawn first.
    pub fn behind_mesh(&self, camera: &Camera) -> bool {
        self.orientation(camera).z < 0.0
    }

    pub fn draw(&self, surface: &mut dyn RenderSurface, camera: &Camera) {
        let quad: Vec<Vec2> = self.corners.iter().map(|&p| camera.project(p)).collect();
        surface.draw_polygon(&quad, GRID_FILL, GRID_FILL);

        let screen: Vec<Vec2> = self.nodes.iter().map(|&p| camera.project(p)).collect();
        for &(a, b) in &self.lines {
            surface.draw_line(screen[a], screen[b], GRID_LINE, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::camera::Axis;
    use crate::engine::surface::{DrawCall, RecordingSurface};

    #[test]
    fn grid_has_every_cell_edge_once() {
        let grid = Grid::new(GridConfig { squares: 2, size: 10.0, y: 5.0 });
        assert_eq!(grid.nodes().len(), 9);
        // (n + 1) rows of n horizontal lines plus the same vertically.
        assert_eq!(grid.lines().len(), 12);
        assert_eq!(grid.nodes()[0], Vec3::new(-10.0, 5.0, -10.0));
        assert_eq!(grid.nodes()[8], Vec3::new(10.0, 5.0, 10.0));
    }

    #[test]
    fn grid_behind_mesh_when_seen_from_above() {
        let grid = Grid::new(GridConfig::default());
        let mut camera = Camera::default();
        camera.rotate(Axis::X, 15.0);
        assert!(grid.behind_mesh(&camera));

        camera.rotate(Axis::X, -30.0);
        assert!(!grid.behind_mesh(&camera));
    }

    #[test]
    fn draw_emits_backdrop_then_lines() {
        let grid = Grid::new(GridConfig { squares: 1, size: 10.0, y: 0.0 });
        let mut surface = RecordingSurface::new();
        grid.draw(&mut surface, &Camera::default());
        assert_eq!(surface.calls.len(), 1 + 4);
        assert!(matches!(surface.calls[0], DrawCall::Polygon { .. }));
        assert!(surface.calls[1..].iter().all(|c| matches!(c, DrawCall::Line { .. })));
    }
}
