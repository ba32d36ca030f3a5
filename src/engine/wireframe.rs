// The editable subdivision mesh.
//
// Owns the control cage (nodes + original topology) and exactly one current
// generation of derived geometry: AffinePoints, display edges and faces.
// Structural operations (split / average / undivide / reset) build the next
// generation off to the side and swap it in only once it is complete, so a
// failing operation leaves the previous generation in place.
//
// Per frame: mutate (drag, rotate) → update() → draw().
// update() recomputes every cached screen position and depth, then re-sorts the
// part list back to front.

use std::cmp::Ordering;
use glam::{Vec2, Vec3};
use super::config::MeshStyle;
use super::entities::{Edge, Face};
use super::error::MeshError;
use super::mesh::{EdgeId, Shape, Topology};
use super::point::{AffinePoint, ControlNode, Vertex};
use super::scene::{Scene, Visibility};
use super::subdivide::{self, Generation};
use super::surface::RenderSurface;

/// One entry of the draw list, by index into the owning collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    ControlNode(usize),
    ControlEdge(usize),
    Point(usize),
    Face(usize),
    Edge(usize),
}

// Farther (larger depth) first; undrawable parts last.
fn back_to_front(a: Option<f32>, b: Option<f32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub struct Wireframe {
    original_nodes: Vec<Vec3>,
    original_topology: Topology,
    style: MeshStyle,

    nodes: Vec<ControlNode>,
    control_edges: Vec<Edge>,

    topology: Topology,
    points: Vec<AffinePoint>,
    edges: Vec<Edge>,
    faces: Vec<Face>,

    parts: Vec<Part>,
    /// Splits applied since the last undivide/reset.
    level: u32,
}

impl Wireframe {
    /// Validate the cage and build level 0 with parts collected for the
    /// scene's current visibility.
    pub fn new(shape: &Shape, style: MeshStyle, scene: &Scene) -> Result<Self, MeshError> {
        let topology = Topology::new(shape.faces.clone(), shape.node_count())?;
        let mut wireframe = Self {
            original_nodes: shape.nodes.clone(),
            original_topology: topology.clone(),
            style,
            nodes: Vec::new(),
            control_edges: Vec::new(),
            topology,
            points: Vec::new(),
            edges: Vec::new(),
            faces: Vec::new(),
            parts: Vec::new(),
            level: 0,
        };
        wireframe.reset(scene)?;
        Ok(wireframe)
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn nodes(&self) -> &[ControlNode] { &self.nodes }
    pub fn control_edges(&self) -> &[Edge] { &self.control_edges }
    pub fn points(&self) -> &[AffinePoint] { &self.points }
    pub fn edges(&self) -> &[Edge] { &self.edges }
    pub fn faces(&self) -> &[Face] { &self.faces }
    pub fn topology(&self) -> &Topology { &self.topology }
    pub fn parts(&self) -> &[Part] { &self.parts }
    pub fn level(&self) -> u32 { self.level }

    pub fn point_count(&self) -> usize { self.points.len() }
    pub fn face_count(&self) -> usize { self.faces.len() }

    /// Point count the next split() would produce: one per edge and per face.
    pub fn point_count_after_split(&self) -> usize {
        self.points.len() + self.edges.len() + self.faces.len()
    }

    /// `None` for parts that are not drawn this frame.
    pub fn part_depth(&self, part: Part) -> Option<f32> {
        match part {
            Part::ControlNode(i) => Some(self.nodes[i].depth()),
            Part::ControlEdge(i) => Some(self.control_edges[i].depth()),
            Part::Point(i) => Some(self.points[i].depth()),
            Part::Face(i) => self.faces[i].depth(),
            Part::Edge(i) => Some(self.edges[i].depth()),
        }
    }

    // ------------------------------------------------------------------------
    // Structural operations
    // ------------------------------------------------------------------------

    /// Restore the cage to its original coordinates and drop all subdivision.
    pub fn reset(&mut self, scene: &Scene) -> Result<(), MeshError> {
        self.nodes = self.original_nodes.iter()
            .map(|&p| ControlNode::new(p, &scene.camera))
            .collect();
        self.control_edges = self.original_topology.edges().into_iter()
            .map(|EdgeId(a, b)| {
                Edge::new(a, b, self.style.control_edge_color, self.style.control_edge_thickness)
            })
            .collect();
        self.undivide(scene)
    }

    /// Back to level 0 on the current (possibly dragged) cage.
    pub fn undivide(&mut self, scene: &Scene) -> Result<(), MeshError> {
        let base = Generation::base(&self.original_topology, self.nodes.len());
        self.install(base, scene)?;
        self.level = 0;
        log::info!("undivided: {} points, {} faces", self.points.len(), self.faces.len());
        Ok(())
    }

    /// Insert edge midpoints and face centres; every face becomes quads.
    pub fn split(&mut self, scene: &Scene) -> Result<(), MeshError> {
        let next = subdivide::split(&self.snapshot())?;
        self.install(next, scene)?;
        self.level += 1;
        log::info!(
            "split to level {}: {} points, {} edges, {} faces",
            self.level, self.points.len(), self.edges.len(), self.faces.len()
        );
        Ok(())
    }

    /// Move every point to the mean of itself and its neighbours (in weight space).
    pub fn average(&mut self, scene: &Scene) -> Result<(), MeshError> {
        let old: Vec<_> = self.points.iter().map(|p| p.weights().clone()).collect();
        let pairs: Vec<_> = self.edges.iter().map(|e| (e.a, e.b)).collect();
        let weights = subdivide::average(&old, &pairs)?;

        let mut points = Vec::with_capacity(weights.len());
        for (id, w) in weights.into_iter().enumerate() {
            let mut p = AffinePoint::new(id, w);
            p.recompute(&self.nodes, &scene.camera)?;
            points.push(p);
        }
        self.points = points;
        log::info!("averaged {} points", self.points.len());
        self.update(scene)
    }

    fn snapshot(&self) -> Generation {
        Generation {
            weights: self.points.iter().map(|p| p.weights().clone()).collect(),
            edges: self.edges.iter().map(|e| (e.a, e.b)).collect(),
            topology: self.topology.clone(),
        }
    }

    // Replace points, display edges and faces with a new generation.
    // Everything is built and recomputed before any field is touched.
    fn install(&mut self, next: Generation, scene: &Scene) -> Result<(), MeshError> {
        let mut points = Vec::with_capacity(next.weights.len());
        for (id, w) in next.weights.into_iter().enumerate() {
            let mut p = AffinePoint::new(id, w);
            p.recompute(&self.nodes, &scene.camera)?;
            points.push(p);
        }

        let edges: Vec<Edge> = next.edges.iter()
            .map(|&(a, b)| Edge::new(a, b, self.style.edge_color, self.style.edge_thickness))
            .collect();
        let faces: Vec<Face> = next.topology.faces().iter()
            .map(|corners| Face::new(corners.clone(), self.style.face_color))
            .collect();

        self.points = points;
        self.edges = edges;
        self.faces = faces;
        self.topology = next.topology;
        self.collect_parts(&scene.visibility);
        self.update(scene)
    }

    // ------------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------------

    /// Shift one control node in world space. Call update() afterwards.
    pub fn move_node(&mut self, index: usize, delta: Vec3) {
        if let Some(node) = self.nodes.get_mut(index) {
            node.position += delta;
        }
    }

    /// First control node within `radius` of a screen position.
    pub fn node_at(&self, screen: Vec2, radius: f32) -> Option<usize> {
        self.nodes.iter().position(|n| n.screen().distance(screen) <= radius)
    }

    // ------------------------------------------------------------------------
    // Per-frame
    // ------------------------------------------------------------------------

    /// Rebuild the draw list from the enabled layers.
    pub fn collect_parts(&mut self, visibility: &Visibility) {
        self.parts.clear();
        if visibility.control_points {
            self.parts.extend((0..self.nodes.len()).map(Part::ControlNode));
        }
        if visibility.control_arms {
            self.parts.extend((0..self.control_edges.len()).map(Part::ControlEdge));
        }
        if visibility.subdivision_points {
            self.parts.extend((0..self.points.len()).map(Part::Point));
        }
        if visibility.fill {
            self.parts.extend((0..self.faces.len()).map(Part::Face));
        }
        if visibility.edges {
            self.parts.extend((0..self.edges.len()).map(Part::Edge));
        }
        self.sort_parts();
    }

    /// Recompute all cached geometry for the current cage and camera, then re-sort.
    pub fn update(&mut self, scene: &Scene) -> Result<(), MeshError> {
        let camera = &scene.camera;
        for node in &mut self.nodes {
            node.update(camera);
        }
        for edge in &mut self.control_edges {
            edge.update(&self.nodes);
        }
        for point in &mut self.points {
            point.recompute(&self.nodes, camera)?;
        }
        for edge in &mut self.edges {
            edge.update(&self.points);
        }
        let light = scene.light();
        for face in &mut self.faces {
            face.update(&self.points, light);
        }
        self.sort_parts();
        Ok(())
    }

    // Stable, so parts at equal depth keep their previous relative order.
    fn sort_parts(&mut self) {
        let mut parts = std::mem::take(&mut self.parts);
        parts.sort_by(|&a, &b| back_to_front(self.part_depth(a), self.part_depth(b)));
        self.parts = parts;
    }

    /// Painter's algorithm over the sorted part list; culled parts are skipped.
    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        for &part in &self.parts {
            if self.part_depth(part).is_none() {
                continue;
            }
            match part {
                Part::ControlNode(i) => {
                    surface.draw_point(self.nodes[i].screen(), self.style.node_size * 0.5, self.style.node_color);
                }
                Part::ControlEdge(i) => self.control_edges[i].draw(surface),
                Part::Point(i) => {
                    surface.draw_point(self.points[i].screen(), self.style.point_size * 0.5, self.style.point_color);
                }
                Part::Face(i) => self.faces[i].draw(surface),
                Part::Edge(i) => self.edges[i].draw(surface),
            }
        }
    }
}
