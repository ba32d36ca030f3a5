// Points of the cage and of its subdivisions.
//
// ControlNode: a vertex of the original, user-editable cage.
// AffinePoint: a weighted combination of control nodes (see weights.rs).
// Both cache their camera-space and screen positions; update/recompute must run
// after any drag or camera change and before depth sorting.

use glam::{Vec2, Vec3};
use super::camera::Camera;
use super::error::MeshError;
use super::weights::WeightMap;

/// Something an Edge or Face can be built on.
pub trait Vertex {
    /// Position after the camera rotation, before the perspective divide.
    fn view_position(&self) -> Vec3;
    /// Projected position, relative to the viewport centre.
    fn screen(&self) -> Vec2;
}

// ============================================================================
// CONTROL NODE
// ============================================================================

#[derive(Debug, Clone)]
pub struct ControlNode {
    pub position: Vec3,
    view: Vec3,
    screen: Vec2,
}

impl ControlNode {
    pub fn new(position: Vec3, camera: &Camera) -> Self {
        let mut node = Self {
            position,
            view: Vec3::ZERO,
            screen: Vec2::ZERO,
        };
        node.update(camera);
        node
    }

    pub fn update(&mut self, camera: &Camera) {
        self.view = camera.camera_space(self.position);
        self.screen = camera.perspective(self.view);
    }

    pub fn depth(&self) -> f32 {
        self.view.z
    }
}

impl Vertex for ControlNode {
    fn view_position(&self) -> Vec3 { self.view }
    fn screen(&self) -> Vec2 { self.screen }
}

// ============================================================================
// AFFINE POINT
// ============================================================================

/// Added to a subdivision point's depth so it sorts just behind a control
/// node drawn at the same spot.
const POINT_DEPTH_BIAS: f32 = 0.01;

#[derive(Debug, Clone)]
pub struct AffinePoint {
    /// Index of this point in the current generation's point list.
    pub id: usize,
    weights: WeightMap,
    position: Vec3,
    view: Vec3,
    screen: Vec2,
}

impl AffinePoint {
    /// The map has already been validated by WeightMap; positions are filled
    /// in by the first recompute().
    pub fn new(id: usize, weights: WeightMap) -> Self {
        Self {
            id,
            weights,
            position: Vec3::ZERO,
            view: Vec3::ZERO,
            screen: Vec2::ZERO,
        }
    }

    /// Built straight from (node, weight) pairs, failing on a malformed map.
    pub fn from_pairs(
        id: usize,
        pairs: impl IntoIterator<Item = (usize, f32)>,
    ) -> Result<Self, MeshError> {
        Ok(Self::new(id, WeightMap::new(pairs)?))
    }

    pub fn weights(&self) -> &WeightMap {
        &self.weights
    }

    /// World position as of the last recompute().
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn recompute(&mut self, nodes: &[ControlNode], camera: &Camera) -> Result<(), MeshError> {
        self.position = self.weights.resolve(nodes, |n| n.position)?;
        self.view = camera.camera_space(self.position);
        self.screen = camera.perspective(self.view);
        Ok(())
    }

    pub fn depth(&self) -> f32 {
        self.view.z + POINT_DEPTH_BIAS
    }
}

impl Vertex for AffinePoint {
    fn view_position(&self) -> Vec3 { self.view }
    fn screen(&self) -> Vec2 { self.screen }
}
