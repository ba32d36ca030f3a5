// Starter cages.
//
// Only initial topology data: a cuboid and two square tori (one all-quad, one
// with triangular corners so the mixed triangle/quad path gets exercised).
// All loops are wound so that, viewed from outside with y pointing down the
// screen, the face normal from vector::plane_normal points out of the solid.

use glam::Vec3;
use super::mesh::Shape;

/// Which starter cage to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Cuboid,
    SquareTorus,
    SquareTorusBevelled,
}

impl ShapeKind {
    pub fn build(self) -> Shape {
        match self {
            ShapeKind::Cuboid => cuboid(Vec3::new(-120.0, -120.0, -100.0), Vec3::splat(240.0)),
            ShapeKind::SquareTorus => square_torus(Vec3::ZERO, 100.0, 100.0),
            ShapeKind::SquareTorusBevelled => square_torus_bevelled(Vec3::ZERO, 100.0, 100.0),
        }
    }
}

// ============================================================================
// CUBOID
// ============================================================================

/// Axis-aligned box with one corner at `origin` and extents `size`.
///
/// Node layout (bit 2 = +x, bit 1 = +y, bit 0 = +z):
///   0: (x,   y,   z  )   4: (x+w, y,   z  )
///   1: (x,   y,   z+d)   5: (x+w, y,   z+d)
///   2: (x,   y+h, z  )   6: (x+w, y+h, z  )
///   3: (x,   y+h, z+d)   7: (x+w, y+h, z+d)
pub fn cuboid(origin: Vec3, size: Vec3) -> Shape {
    let mut shape = Shape::new();
    for i in 0..8 {
        let bit = |b: usize| if i & b != 0 { 1.0 } else { 0.0 };
        shape.add_node(origin + size * Vec3::new(bit(4), bit(2), bit(1)));
    }

    shape.add_face(vec![0, 1, 3, 2]); // -x
    shape.add_face(vec![4, 6, 7, 5]); // +x
    shape.add_face(vec![0, 4, 5, 1]); // -y
    shape.add_face(vec![0, 2, 6, 4]); // -z
    shape.add_face(vec![1, 5, 7, 3]); // +z
    shape.add_face(vec![2, 3, 7, 6]); // +y
    shape
}

// ============================================================================
// SQUARE TORI
// ============================================================================

// Join two parallel rings of nodes (`top` and `top + offset`) with side quads.
fn stitch_ring(shape: &mut Shape, ring: &[usize], offset: usize) {
    let n = ring.len();
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        shape.add_face(vec![a, b, b + offset, a + offset]);
    }
}

/// Square ring: a 4x4 grid of nodes with the centre square removed,
/// duplicated at two depths `d` apart. `r` is the hole width.
pub fn square_torus(centre: Vec3, d: f32, r: f32) -> Shape {
    let (d2, r2) = (d / 2.0, r / 2.0);
    let coords = [-r2 - d, -r2, r2, r2 + d];

    let mut shape = Shape::new();
    for z in [centre.z - d2, centre.z + d2] {
        for &y in &coords {
            for &x in &coords {
                shape.add_node(Vec3::new(centre.x + x, centre.y + y, z));
            }
        }
    }

    // Grid index = 4 * row + column; every cell except the hole.
    // Listed as seen from the back layer, so the front layer is reversed.
    let cells: [[usize; 4]; 8] = [
        [0, 1, 5, 4], [1, 2, 6, 5], [2, 3, 7, 6],
        [4, 5, 9, 8], [6, 7, 11, 10],
        [8, 9, 13, 12], [9, 10, 14, 13], [10, 11, 15, 14],
    ];
    for f in cells {
        shape.add_face(f.iter().rev().copied().collect());
    }
    for f in cells {
        shape.add_face(f.iter().map(|&i| i + 16).collect());
    }

    stitch_ring(&mut shape, &[0, 1, 2, 3, 7, 11, 15, 14, 13, 12, 8, 4], 16);
    stitch_ring(&mut shape, &[5, 9, 10, 6], 16);
    shape
}

/// Like `square_torus` but with the four outer corners cut off,
/// leaving triangles where the corner squares were.
pub fn square_torus_bevelled(centre: Vec3, d: f32, r: f32) -> Shape {
    let (d2, r2) = (d / 2.0, r / 2.0);

    // 12 nodes per layer: the 4x4 grid without its corners.
    let layer: [(f32, f32); 12] = [
        (-r2, -r2 - d), (r2, -r2 - d),
        (-r2 - d, -r2), (-r2, -r2), (r2, -r2), (r2 + d, -r2),
        (-r2 - d, r2), (-r2, r2), (r2, r2), (r2 + d, r2),
        (-r2, r2 + d), (r2, r2 + d),
    ];

    let mut shape = Shape::new();
    for z in [centre.z - d2, centre.z + d2] {
        for &(x, y) in &layer {
            shape.add_node(Vec3::new(centre.x + x, centre.y + y, z));
        }
    }

    let front: [&[usize]; 8] = [
        &[0, 2, 3], &[0, 3, 4, 1], &[1, 4, 5],
        &[2, 6, 7, 3], &[4, 8, 9, 5],
        &[6, 10, 7], &[7, 10, 11, 8], &[8, 11, 9],
    ];
    for f in front {
        shape.add_face(f.to_vec());
    }
    for f in front {
        shape.add_face(f.iter().rev().map(|&i| i + 12).collect());
    }

    stitch_ring(&mut shape, &[0, 1, 5, 9, 11, 10, 6, 2], 12);
    stitch_ring(&mut shape, &[3, 7, 8, 4], 12);
    shape
}
