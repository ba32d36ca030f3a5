// Viewer tunables. Everything the viewer reads at start-up or per frame lives
// here, with defaults matching the shipped look and feel.

use glam::Vec3;
use super::color::{self, Color};
use super::shapes::ShapeKind;

/// Colours and sizes of the drawable mesh parts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshStyle {
    /// Diameter of a control node on screen; also the pick distance (radius = half).
    pub node_size: f32,
    pub node_color: Color,
    pub control_edge_thickness: f32,
    pub control_edge_color: Color,
    /// Diameter of a subdivision point on screen.
    pub point_size: f32,
    pub point_color: Color,
    pub edge_thickness: f32,
    pub edge_color: Color,
    pub face_color: Color,
}

impl Default for MeshStyle {
    fn default() -> Self {
        Self {
            node_size: 10.0,
            node_color: color::ORANGE,
            control_edge_thickness: 1.0,
            control_edge_color: color::BLUE,
            point_size: 8.0,
            point_color: color::GREEN,
            edge_thickness: 2.0,
            edge_color: color::GREEN,
            face_color: color::GREEN,
        }
    }
}

/// Flat reference grid in the xz plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    /// Squares along each side.
    pub squares: usize,
    /// Side length of one square in world units.
    pub size: f32,
    /// Height of the plane (y grows down the screen, so positive is below the mesh).
    pub y: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { squares: 20, size: 80.0, y: 100.0 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Perspective focal length in world units.
    pub focal_length: f32,
    /// Light direction in camera space; normalised before use.
    pub light: Vec3,
    /// split() is declined when it would take the point count above this.
    pub max_points: usize,
    /// Degrees per arrow-key press.
    pub key_step_degrees: f32,
    /// Initial rotation about Y, then X, in degrees.
    pub initial_yaw: f32,
    pub initial_pitch: f32,
    /// Split + average rounds applied to the starter cage.
    pub initial_subdivisions: u32,
    pub shape: ShapeKind,
    /// Bob the top of the cage up and down, one step per frame.
    pub animate: bool,
    /// Peak vertical offset of the bob in world units.
    pub bob_amplitude: f32,
    pub bob_degrees_per_frame: f32,
    pub grid: GridConfig,
    pub style: MeshStyle,
    pub background: Color,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            focal_length: 1200.0,
            light: Vec3::new(0.5, -0.2, -2.0),
            max_points: 2000,
            key_step_degrees: 3.0,
            initial_yaw: 30.0,
            initial_pitch: 15.0,
            initial_subdivisions: 3,
            shape: ShapeKind::Cuboid,
            animate: false,
            bob_amplitude: 20.0,
            bob_degrees_per_frame: 10.0,
            grid: GridConfig::default(),
            style: MeshStyle::default(),
            background: color::BACKGROUND,
        }
    }
}
