// Per-view context handed to every update and draw call: the camera, which
// layers are shown, and the light.

use glam::Vec3;
use super::camera::Camera;

/// Toggleable layers, in toolbar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    ControlPoints,
    ControlArms,
    SubdivisionPoints,
    Edges,
    Fill,
    Grid,
}

impl Layer {
    pub const ALL: [Layer; 6] = [
        Layer::ControlPoints,
        Layer::ControlArms,
        Layer::SubdivisionPoints,
        Layer::Edges,
        Layer::Fill,
        Layer::Grid,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Layer::ControlPoints => "Control points",
            Layer::ControlArms => "Control arms",
            Layer::SubdivisionPoints => "Subdivision points",
            Layer::Edges => "Edges",
            Layer::Fill => "Fill",
            Layer::Grid => "Grid",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    pub control_points: bool,
    pub control_arms: bool,
    pub subdivision_points: bool,
    pub edges: bool,
    pub fill: bool,
    pub grid: bool,
}

impl Default for Visibility {
    fn default() -> Self {
        Self {
            control_points: false,
            control_arms: false,
            subdivision_points: false,
            edges: false,
            fill: true,
            grid: true,
        }
    }
}

impl Visibility {
    pub fn get_mut(&mut self, layer: Layer) -> &mut bool {
        match layer {
            Layer::ControlPoints => &mut self.control_points,
            Layer::ControlArms => &mut self.control_arms,
            Layer::SubdivisionPoints => &mut self.subdivision_points,
            Layer::Edges => &mut self.edges,
            Layer::Fill => &mut self.fill,
            Layer::Grid => &mut self.grid,
        }
    }

    pub fn get(&self, layer: Layer) -> bool {
        let mut copy = *self;
        *copy.get_mut(layer)
    }
}

#[derive(Debug, Clone)]
pub struct Scene {
    pub camera: Camera,
    pub visibility: Visibility,
    /// Unit direction toward the light, in camera space.
    light: Vec3,
}

impl Scene {
    pub fn new(camera: Camera, light: Vec3) -> Self {
        let mut scene = Self {
            camera,
            visibility: Visibility::default(),
            light: Vec3::NEG_Z,
        };
        scene.set_light(light);
        scene
    }

    pub fn light(&self) -> Vec3 {
        self.light
    }

    /// A zero vector leaves the current light untouched.
    pub fn set_light(&mut self, direction: Vec3) {
        if let Some(unit) = direction.try_normalize() {
            self.light = unit;
        } else {
            log::warn!("ignoring zero-length light direction");
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Camera::default(), Vec3::NEG_Z)
    }
}
