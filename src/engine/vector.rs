// Small vector helpers on top of glam.
// glam already covers the arithmetic; these keep the plane-normal convention
// used by face shading and culling in one place.

use glam::Vec3;

/// Unit vector in the direction of `v`, or `None` for a zero-length input.
pub fn normalize(v: Vec3) -> Option<Vec3> {
    v.try_normalize()
}

pub fn subtract(a: Vec3, b: Vec3) -> Vec3 {
    a - b
}

pub fn dot(a: Vec3, b: Vec3) -> f32 {
    a.dot(b)
}

/// Un-normalized normal of the plane through three points.
///
/// Uses `(p0 - p1) × (p0 - p2)`, so a loop wound clockwise on screen
/// (y pointing down) yields a normal with negative z, i.e. facing the viewer.
pub fn plane_normal(p0: Vec3, p1: Vec3, p2: Vec3) -> Vec3 {
    subtract(p0, p1).cross(subtract(p0, p2))
}
