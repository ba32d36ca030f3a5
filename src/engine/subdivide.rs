// Catmull-Clark-style refinement carried out in weight space.
//
// The classic scheme computes edge points, face points and moved vertices
// from positions in one pass. Here it is split in two independent steps that
// only touch weight maps:
//
//   split():   topological refinement: a midpoint per edge, a centre per face,
//              every n-gon replaced by n quads. Old points keep their weights.
//   average(): smoothing: every point becomes the mean of itself and its
//              edge neighbours.
//
// Both are pure functions from one generation to the next. Because only weights
// are combined, each new point stays an affine combination of the original
// control nodes and follows any later drag of the cage.
//
// Counts for a closed all-quad cage (V points, E edges, F faces):
//   split: V + E + F points, 4F faces, 2E + 4F edges
// Cube verification:
//   Level 0:  8 points,  6 faces,  12 edges
//   Level 1: 26 points, 24 faces,  48 edges
//   Level 2: 98 points, 96 faces, 192 edges

use std::collections::HashMap;
use super::error::MeshError;
use super::mesh::{EdgeId, Topology};
use super::weights::WeightMap;

/// One complete level of derived geometry: point weights (point i has id i),
/// drawable edges between points, and the face loops over them.
#[derive(Debug, Clone)]
pub struct Generation {
    pub weights: Vec<WeightMap>,
    pub edges: Vec<(usize, usize)>,
    pub topology: Topology,
}

impl Generation {
    /// Level 0: one point sitting on each control node, edges straight from the faces.
    pub fn base(topology: &Topology, node_count: usize) -> Self {
        Self {
            weights: (0..node_count).map(WeightMap::identity).collect(),
            edges: topology.edges().into_iter().map(|EdgeId(a, b)| (a, b)).collect(),
            topology: topology.clone(),
        }
    }

    pub fn point_count(&self) -> usize { self.weights.len() }
}

fn check_edge(edge: (usize, usize), count: usize) -> Result<(), MeshError> {
    for index in [edge.0, edge.1] {
        if index >= count {
            return Err(MeshError::EdgeIndex { index, count });
        }
    }
    Ok(())
}

// ============================================================================
// SPLIT
// ============================================================================

/// Insert a midpoint on every edge and a centre in every face.
///
/// New point ids: midpoint of edge i is `n + i`, centre of face f is `n + E + f`.
/// Each face `[c0 .. ck-1]` becomes k quads `[ci, mid(ci, ci+1), centre, mid(ci-1, ci)]`,
/// so the winding of the source face is kept.
pub fn split(current: &Generation) -> Result<Generation, MeshError> {
    let n = current.point_count();
    let mut weights = current.weights.clone();
    let mut edges = Vec::with_capacity(current.edges.len() * 2);
    let mut midpoint_of: HashMap<EdgeId, usize> = HashMap::with_capacity(current.edges.len());

    // ---- Edge midpoints --------------------------------------------------
    for &(u, v) in &current.edges {
        check_edge((u, v), n)?;
        let mid = WeightMap::average([&current.weights[u], &current.weights[v]])?;
        let m = weights.len();
        weights.push(mid);
        edges.push((u, m));
        edges.push((v, m));
        midpoint_of.insert(EdgeId::new(u, v), m);
    }

    // ---- Face centres and the quads around them --------------------------
    let mut faces = Vec::with_capacity(current.topology.face_count() * 4);
    for face in current.topology.faces() {
        let k = face.len();
        let mids = (0..k)
            .map(|j| {
                let id = EdgeId::new(face[j], face[(j + 1) % k]);
                midpoint_of.get(&id).copied().ok_or(MeshError::MissingEdge(id.0, id.1))
            })
            .collect::<Result<Vec<usize>, MeshError>>()?;

        let centre_weights = WeightMap::average(mids.iter().map(|&m| &weights[m]))?;
        let centre = weights.len();
        weights.push(centre_weights);

        for &m in &mids {
            edges.push((centre, m));
        }
        for j in 0..k {
            faces.push(vec![face[j], mids[j], centre, mids[(j + k - 1) % k]]);
        }
    }

    let topology = Topology::new(faces, weights.len())?;
    Ok(Generation { weights, edges, topology })
}

// ============================================================================
// AVERAGE
// ============================================================================

/// New weights for every point: the uniform mean of its own weights and those
/// of its edge neighbours. Reads only the snapshot it is given, so the result
/// does not depend on point or edge order.
pub fn average(weights: &[WeightMap], edges: &[(usize, usize)]) -> Result<Vec<WeightMap>, MeshError> {
    let n = weights.len();
    let mut neighbours: Vec<Vec<usize>> = vec![vec![]; n];
    for &(a, b) in edges {
        check_edge((a, b), n)?;
        neighbours[a].push(b);
        neighbours[b].push(a);
    }

    neighbours
        .iter()
        .enumerate()
        .map(|(i, adj)| {
            WeightMap::average(std::iter::once(&weights[i]).chain(adj.iter().map(|&j| &weights[j])))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::shapes;
    use crate::engine::weights::WEIGHT_TOLERANCE;

    fn cube() -> Generation {
        let shape = shapes::cuboid(glam::Vec3::ZERO, glam::Vec3::ONE);
        let topology = Topology::new(shape.faces.clone(), shape.node_count()).unwrap();
        Generation::base(&topology, shape.node_count())
    }

    fn assert_affine(g: &Generation) {
        for (i, w) in g.weights.iter().enumerate() {
            assert!((w.sum() - 1.0).abs() < WEIGHT_TOLERANCE, "point {i} sums to {}", w.sum());
        }
    }

    #[test]
    fn cube_counts_follow_quad_refinement() {
        let g0 = cube();
        assert_eq!((g0.point_count(), g0.edges.len(), g0.topology.face_count()), (8, 12, 6));

        let g1 = split(&g0).unwrap();
        assert_eq!((g1.point_count(), g1.edges.len(), g1.topology.face_count()), (26, 48, 24));

        let g2 = split(&g1).unwrap();
        assert_eq!((g2.point_count(), g2.edges.len(), g2.topology.face_count()), (98, 192, 96));
        assert_affine(&g2);
    }

    #[test]
    fn split_shares_midpoints_and_builds_quads() {
        let g1 = split(&cube()).unwrap();
        assert!(g1.topology.faces().iter().all(|f| f.len() == 4));

        // Midpoint of edge 0 has id 8 and sits halfway between its ends.
        let (u, v) = cube().edges[0];
        assert_eq!(g1.weights[8].get(u), 0.5);
        assert_eq!(g1.weights[8].get(v), 0.5);

        // Each midpoint is shared by two quads on either side of its edge.
        for m in 8..20 {
            let uses = g1.topology.faces().iter().filter(|f| f.contains(&m)).count();
            assert_eq!(uses, 4, "midpoint {m}");
        }
        // Each centre by exactly its four quads.
        for c in 20..26 {
            let uses = g1.topology.faces().iter().filter(|f| f[2] == c).count();
            assert_eq!(uses, 4, "centre {c}");
        }
    }

    #[test]
    fn triangle_splits_into_three_quads() {
        let topology = Topology::new(vec![vec![0, 1, 2]], 3).unwrap();
        let g1 = split(&Generation::base(&topology, 3)).unwrap();
        assert_eq!(g1.point_count(), 3 + 3 + 1);
        assert_eq!(g1.topology.face_count(), 3);
        let centre = &g1.weights[6];
        for i in 0..3 {
            assert!((centre.get(i) - 1.0 / 3.0).abs() < 1e-6);
        }
        assert_eq!(g1.topology.faces()[0], vec![0, 3, 6, 5]);
    }

    #[test]
    fn split_reports_face_edge_missing_from_edge_list() {
        let topology = Topology::new(vec![vec![0, 1, 2]], 3).unwrap();
        let mut g = Generation::base(&topology, 3);
        g.edges.pop();
        assert!(matches!(split(&g), Err(MeshError::MissingEdge(_, _))));

        g.edges.push((0, 42));
        assert_eq!(split(&g).unwrap_err(), MeshError::EdgeIndex { index: 42, count: 3 });
    }

    #[test]
    fn average_reads_old_weights_only() {
        // Path 0 - 1 - 2.
        let weights: Vec<WeightMap> = (0..3).map(WeightMap::identity).collect();
        let edges = [(0, 1), (1, 2)];
        let out = average(&weights, &edges).unwrap();

        assert!((out[0].get(0) - 0.5).abs() < 1e-6);
        assert!((out[0].get(1) - 0.5).abs() < 1e-6);
        // Had point 0 been overwritten first, point 1 would see node 0 at 1/6.
        for i in 0..3 {
            assert!((out[1].get(i) - 1.0 / 3.0).abs() < 1e-6);
        }

        let reversed = average(&weights, &[(2, 1), (1, 0)]).unwrap();
        for (a, b) in out.iter().zip(&reversed) {
            for i in 0..3 {
                assert!((a.get(i) - b.get(i)).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn isolated_point_keeps_its_weights() {
        let weights = vec![WeightMap::identity(0), WeightMap::identity(1)];
        let out = average(&weights, &[]).unwrap();
        assert_eq!(out, weights);
    }

    #[test]
    fn repeated_subdivision_stays_affine() {
        let mut g = cube();
        for _ in 0..3 {
            g = split(&g).unwrap();
            g.weights = average(&g.weights, &g.edges).unwrap();
            assert_affine(&g);
        }
        assert_eq!(g.point_count(), 386);
    }
}
