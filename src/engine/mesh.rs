// Cage description and face topology.
//
// Two layers:
//   Shape:    the caller's plain coordinate / index tables (see shapes.rs)
//   Topology: validated face loops over the *current* point list
//
// Index k in a Topology means "the k-th AffinePoint of the current generation".
// After a split the same k names a different point, so a Topology is only ever
// paired with the point list it was built alongside.

use glam::Vec3;
use super::error::MeshError;

// ============================================================================
// EDGE IDENTITY
// ============================================================================

/// Canonical key for an undirected edge: always (min, max).
/// This ensures (a,b) and (b,a) map to the same entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize, pub usize);

impl EdgeId {
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b { EdgeId(a, b) } else { EdgeId(b, a) }
    }
}

// ============================================================================
// SHAPE
// ============================================================================

/// Initial cage: control-node coordinates and face loops over them.
/// Faces use the same winding throughout so culling is consistent.
#[derive(Debug, Clone, Default)]
pub struct Shape {
    pub nodes: Vec<Vec3>,
    pub faces: Vec<Vec<usize>>,
}

impl Shape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return its index.
    pub fn add_node(&mut self, pos: Vec3) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(pos);
        idx
    }

    /// Add a face by node indices.
    pub fn add_face(&mut self, indices: Vec<usize>) {
        self.faces.push(indices);
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
}

// ============================================================================
// TOPOLOGY
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Topology {
    faces: Vec<Vec<usize>>,
}

impl Topology {
    /// Validate loops against a point list of `point_count` entries.
    pub fn new(faces: Vec<Vec<usize>>, point_count: usize) -> Result<Self, MeshError> {
        for (fi, face) in faces.iter().enumerate() {
            if !(3..=4).contains(&face.len()) {
                return Err(MeshError::FaceDegree { face: fi, degree: face.len() });
            }
            if let Some(&index) = face.iter().find(|&&i| i >= point_count) {
                return Err(MeshError::FaceIndex { face: fi, index, count: point_count });
            }
        }
        Ok(Self { faces })
    }

    pub fn faces(&self) -> &[Vec<usize>] {
        &self.faces
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Every boundary edge of every face, deduplicated, in first-seen order.
    /// Shared edges between neighbouring faces appear once.
    pub fn edges(&self) -> Vec<EdgeId> {
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for face in &self.faces {
            let n = face.len();
            for (i, &a) in face.iter().enumerate() {
                let id = EdgeId::new(a, face[(i + 1) % n]);
                if seen.insert(id) {
                    out.push(id);
                }
            }
        }
        out
    }
}
