// Invariant violations raised while building or refining the cage.
// All of these are programming errors in the caller's data: they abort the
// operation that hit them and leave the wireframe as it was.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    #[error("weight map is empty")]
    EmptyWeights,
    #[error("weights sum to {0}, expected 1")]
    WeightSum(f32),
    #[error("face {face} has {degree} corners, only triangles and quads are supported")]
    FaceDegree { face: usize, degree: usize },
    #[error("face {face} refers to point {index}, but only {count} points exist")]
    FaceIndex { face: usize, index: usize, count: usize },
    #[error("edge refers to point {index}, but only {count} points exist")]
    EdgeIndex { index: usize, count: usize },
    #[error("no midpoint was created for edge ({0}, {1})")]
    MissingEdge(usize, usize),
    #[error("weight refers to control node {index}, but only {count} nodes exist")]
    MissingControlNode { index: usize, count: usize },
}
