// Interaction glue between the window and the mesh.
//
// The Viewer owns the scene, the wireframe and the grid, and turns toolbar
// actions and pointer/key events into camera rotations, node drags and
// structural rebuilds. Every event handler leaves the wireframe updated and
// sorted, so frame() only has to paint.

use glam::{Vec2, Vec3};
use winit::keyboard::KeyCode;
use super::camera::{Axis, Camera};
use super::config::ViewerConfig;
use super::error::MeshError;
use super::grid::Grid;
use super::scene::{Scene, Visibility};
use super::surface::RenderSurface;
use super::wireframe::Wireframe;

/// Structural operations exposed on the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Split,
    Average,
    Subdivide,
    Undivide,
    Reset,
    ResetView,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Split,
        Action::Average,
        Action::Subdivide,
        Action::Undivide,
        Action::Reset,
        Action::ResetView,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Action::Split => "Split",
            Action::Average => "Average",
            Action::Subdivide => "Subdivide",
            Action::Undivide => "Undivide",
            Action::Reset => "Reset",
            Action::ResetView => "Reset view",
        }
    }
}

pub struct Viewer {
    pub scene: Scene,
    wireframe: Wireframe,
    grid: Grid,
    config: ViewerConfig,
    /// Control node being dragged, if any.
    selected: Option<usize>,
    /// Cage nodes lifted by the bob: those at the cage's minimum y.
    top_nodes: Vec<usize>,
    frame: u64,
    /// Vertical offset currently applied to `top_nodes`.
    bob_offset: f32,
}

impl Viewer {
    pub fn new(config: ViewerConfig) -> Result<Self, MeshError> {
        let mut camera = Camera::new(config.focal_length);
        camera.rotate(Axis::Y, config.initial_yaw);
        camera.rotate(Axis::X, config.initial_pitch);
        let scene = Scene::new(camera, config.light);

        let shape = config.shape.build();
        let wireframe = Wireframe::new(&shape, config.style, &scene)?;
        let grid = Grid::new(config.grid);

        let top = shape.nodes.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        let top_nodes = shape.nodes.iter().enumerate()
            .filter(|(_, p)| p.y == top)
            .map(|(i, _)| i)
            .collect();

        let mut viewer = Self {
            scene,
            wireframe,
            grid,
            config,
            selected: None,
            top_nodes,
            frame: 0,
            bob_offset: 0.0,
        };
        for _ in 0..viewer.config.initial_subdivisions {
            if !viewer.subdivide()? {
                break;
            }
        }
        Ok(viewer)
    }

    pub fn wireframe(&self) -> &Wireframe {
        &self.wireframe
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn animating(&self) -> bool {
        self.config.animate
    }

    pub fn set_animate(&mut self, animate: bool) {
        if animate != self.config.animate {
            log::info!("animation {}", if animate { "on" } else { "off" });
            self.config.animate = animate;
        }
    }

    // ========================================================================
    // Structural actions
    // ========================================================================

    /// Returns false, changing nothing, when the result would exceed the
    /// configured point ceiling.
    pub fn split(&mut self) -> Result<bool, MeshError> {
        let predicted = self.wireframe.point_count_after_split();
        if predicted > self.config.max_points {
            log::warn!(
                "split declined: {} points would exceed the limit of {}",
                predicted, self.config.max_points
            );
            return Ok(false);
        }
        self.wireframe.split(&self.scene)?;
        Ok(true)
    }

    pub fn average(&mut self) -> Result<(), MeshError> {
        self.wireframe.average(&self.scene)
    }

    /// Split then average. Declined as a whole when the split is.
    pub fn subdivide(&mut self) -> Result<bool, MeshError> {
        if !self.split()? {
            return Ok(false);
        }
        self.average()?;
        Ok(true)
    }

    pub fn undivide(&mut self) -> Result<(), MeshError> {
        self.wireframe.undivide(&self.scene)
    }

    /// Original cage, no subdivision, fresh grid. The camera is left alone.
    pub fn reset(&mut self) -> Result<(), MeshError> {
        self.selected = None;
        self.frame = 0;
        self.bob_offset = 0.0;
        self.grid.reset();
        self.wireframe.reset(&self.scene)
    }

    /// Back to the start-up view angle. The mesh is left alone.
    pub fn reset_view(&mut self) -> Result<(), MeshError> {
        let camera = &mut self.scene.camera;
        camera.reset();
        camera.rotate(Axis::Y, self.config.initial_yaw);
        camera.rotate(Axis::X, self.config.initial_pitch);
        self.wireframe.update(&self.scene)
    }

    pub fn apply(&mut self, action: Action) -> Result<(), MeshError> {
        match action {
            Action::Split => self.split().map(|_| ()),
            Action::Average => self.average(),
            Action::Subdivide => self.subdivide().map(|_| ()),
            Action::Undivide => self.undivide(),
            Action::Reset => self.reset(),
            Action::ResetView => self.reset_view(),
        }
    }

    /// Rebuilds the part list only when a layer actually changed.
    pub fn set_visibility(&mut self, visibility: Visibility) {
        if visibility == self.scene.visibility {
            return;
        }
        self.scene.visibility = visibility;
        if !visibility.control_points {
            self.selected = None;
        }
        self.wireframe.collect_parts(&self.scene.visibility);
    }

    // ========================================================================
    // Pointer and keys
    // ========================================================================

    /// `pos` is relative to the viewport centre.
    pub fn on_pointer_down(&mut self, pos: Vec2) {
        self.selected = if self.scene.visibility.control_points {
            self.wireframe.node_at(pos, self.config.style.node_size * 0.5)
        } else {
            None
        };
        if let Some(i) = self.selected {
            log::debug!("selected control node {i}");
        }
    }

    /// Drags the selected node in world x/y, or rotates the camera when
    /// nothing is selected.
    pub fn on_pointer_drag(&mut self, delta: Vec2) -> Result<(), MeshError> {
        match self.selected {
            Some(i) => self.wireframe.move_node(i, Vec3::new(delta.x, delta.y, 0.0)),
            None => {
                self.scene.camera.rotate(Axis::Y, delta.x);
                self.scene.camera.rotate(Axis::X, delta.y);
            }
        }
        self.wireframe.update(&self.scene)
    }

    pub fn on_pointer_up(&mut self) {
        self.selected = None;
    }

    /// Arrow keys nudge the camera, Home resets it. Other keys are ignored.
    pub fn on_key(&mut self, key: KeyCode) -> Result<(), MeshError> {
        let step = self.config.key_step_degrees;
        let (axis, degrees) = match key {
            KeyCode::Home => return self.reset_view(),
            KeyCode::ArrowLeft => (Axis::Y, -step),
            KeyCode::ArrowRight => (Axis::Y, step),
            KeyCode::ArrowUp => (Axis::X, step),
            KeyCode::ArrowDown => (Axis::X, -step),
            _ => return Ok(()),
        };
        self.scene.camera.rotate(axis, degrees);
        self.wireframe.update(&self.scene)
    }

    // ========================================================================
    // Animation
    // ========================================================================

    /// Advance the bob by one frame. The top nodes sit at
    /// `amplitude * sin(frame * step)` from where they were put, so drags
    /// made while animating are kept.
    pub fn tick(&mut self) -> Result<(), MeshError> {
        if !self.config.animate {
            return Ok(());
        }
        self.frame += 1;
        let angle = (self.frame as f32 * self.config.bob_degrees_per_frame).to_radians();
        let offset = angle.sin() * self.config.bob_amplitude;
        let delta = Vec3::new(0.0, offset - self.bob_offset, 0.0);
        for &i in &self.top_nodes {
            self.wireframe.move_node(i, delta);
        }
        self.bob_offset = offset;
        self.wireframe.update(&self.scene)
    }

    // ========================================================================
    // Drawing
    // ========================================================================

    /// Paint one frame: the grid goes under the mesh when the mesh side of it
    /// faces the viewer, over it otherwise.
    pub fn frame(&self, surface: &mut dyn RenderSurface) {
        let show_grid = self.scene.visibility.grid;
        let grid_first = self.grid.behind_mesh(&self.scene.camera);

        if show_grid && grid_first {
            self.grid.draw(surface, &self.scene.camera);
        }
        self.wireframe.draw(surface);
        if show_grid && !grid_first {
            self.grid.draw(surface, &self.scene.camera);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::color::{GRID_FILL, GRID_LINE};
    use crate::engine::surface::{DrawCall, RecordingSurface};
    use crate::engine::point::Vertex;

    fn flat_viewer() -> Viewer {
        Viewer::new(ViewerConfig { initial_subdivisions: 0, ..ViewerConfig::default() }).unwrap()
    }

    fn is_grid_call(call: &DrawCall) -> bool {
        match call {
            DrawCall::Polygon { fill, .. } => *fill == GRID_FILL,
            DrawCall::Line { color, .. } => *color == GRID_LINE,
            DrawCall::Point { .. } => false,
        }
    }

    #[test]
    fn starts_with_three_subdivisions() {
        let viewer = Viewer::new(ViewerConfig::default()).unwrap();
        assert_eq!(viewer.wireframe().level(), 3);
        assert_eq!(viewer.wireframe().point_count(), 386);
    }

    #[test]
    fn split_is_declined_past_the_ceiling() {
        let mut viewer = Viewer::new(ViewerConfig {
            initial_subdivisions: 0,
            max_points: 100,
            ..ViewerConfig::default()
        })
        .unwrap();
        assert!(viewer.split().unwrap()); // 26
        assert!(viewer.split().unwrap()); // 98
        assert!(!viewer.split().unwrap());
        assert_eq!(viewer.wireframe().point_count(), 98);
        assert_eq!(viewer.wireframe().level(), 2);
        assert!(!viewer.subdivide().unwrap());
    }

    #[test]
    fn initial_rounds_stop_at_the_ceiling() {
        let viewer = Viewer::new(ViewerConfig {
            initial_subdivisions: 10,
            ..ViewerConfig::default()
        })
        .unwrap();
        assert_eq!(viewer.wireframe().level(), 4);
        assert_eq!(viewer.wireframe().point_count(), 1538);
    }

    #[test]
    fn drag_without_selection_rotates_the_camera() {
        let mut viewer = flat_viewer();
        let mut expected = viewer.scene.camera.clone();
        expected.rotate(Axis::Y, 4.0);
        expected.rotate(Axis::X, -2.0);

        viewer.on_pointer_down(Vec2::new(10_000.0, 10_000.0));
        assert_eq!(viewer.selected(), None);
        viewer.on_pointer_drag(Vec2::new(4.0, -2.0)).unwrap();
        assert!(viewer.scene.camera.orientation().abs_diff_eq(expected.orientation(), 1e-5));
    }

    #[test]
    fn nodes_are_picked_only_when_shown() {
        let mut viewer = flat_viewer();
        let target = viewer.wireframe().nodes()[2].screen();

        viewer.on_pointer_down(target);
        assert_eq!(viewer.selected(), None);

        let mut visibility = viewer.scene.visibility;
        visibility.control_points = true;
        viewer.set_visibility(visibility);
        viewer.on_pointer_down(target);
        assert_eq!(viewer.selected(), Some(2));

        let start = viewer.wireframe().nodes()[2].position;
        viewer.on_pointer_drag(Vec2::new(3.0, -2.0)).unwrap();
        assert_eq!(viewer.wireframe().nodes()[2].position, start + Vec3::new(3.0, -2.0, 0.0));

        viewer.on_pointer_up();
        assert_eq!(viewer.selected(), None);
    }

    #[test]
    fn arrow_keys_nudge_by_the_step() {
        let mut viewer = flat_viewer();
        let start = viewer.scene.camera.orientation();

        viewer.on_key(KeyCode::ArrowRight).unwrap();
        viewer.on_key(KeyCode::ArrowLeft).unwrap();
        assert!(viewer.scene.camera.orientation().abs_diff_eq(start, 1e-5));

        viewer.on_key(KeyCode::KeyQ).unwrap();
        assert_eq!(viewer.scene.camera.orientation(), start);

        viewer.on_key(KeyCode::ArrowUp).unwrap();
        let mut expected = viewer.scene.camera.clone();
        expected.rotate(Axis::X, -3.0);
        assert!(expected.orientation().abs_diff_eq(start, 1e-5));
    }

    #[test]
    fn reset_drops_subdivision_and_drags() {
        let mut viewer = Viewer::new(ViewerConfig::default()).unwrap();
        let original = viewer.wireframe().nodes()[0].position;
        viewer.wireframe.move_node(0, Vec3::new(20.0, 0.0, 0.0));
        viewer.apply(Action::Reset).unwrap();
        assert_eq!(viewer.wireframe().nodes()[0].position, original);
        assert_eq!(viewer.wireframe().level(), 0);
        assert_eq!(viewer.wireframe().point_count(), 8);
    }

    #[test]
    fn reset_view_restores_the_start_up_angle() {
        let mut viewer = flat_viewer();
        let start = viewer.scene.camera.orientation();
        let depths: Vec<_> = viewer.wireframe().faces().iter().map(|f| f.depth()).collect();

        viewer.on_pointer_drag(Vec2::new(25.0, -12.0)).unwrap();
        viewer.on_key(KeyCode::ArrowUp).unwrap();
        assert!(!viewer.scene.camera.orientation().abs_diff_eq(start, 1e-3));

        viewer.apply(Action::ResetView).unwrap();
        assert!(viewer.scene.camera.orientation().abs_diff_eq(start, 1e-5));
        let after: Vec<_> = viewer.wireframe().faces().iter().map(|f| f.depth()).collect();
        assert_eq!(after.iter().filter(|d| d.is_some()).count(), depths.iter().filter(|d| d.is_some()).count());

        viewer.on_key(KeyCode::ArrowLeft).unwrap();
        viewer.on_key(KeyCode::Home).unwrap();
        assert!(viewer.scene.camera.orientation().abs_diff_eq(start, 1e-5));
    }

    #[test]
    fn tick_is_still_unless_animating() {
        let mut viewer = flat_viewer();
        let before: Vec<Vec3> = viewer.wireframe().points().iter().map(|p| p.position()).collect();
        viewer.tick().unwrap();
        let after: Vec<Vec3> = viewer.wireframe().points().iter().map(|p| p.position()).collect();
        assert_eq!(after, before);
    }

    #[test]
    fn one_tick_lifts_points_by_their_top_weight() {
        let mut viewer = Viewer::new(ViewerConfig {
            initial_subdivisions: 1,
            animate: true,
            ..ViewerConfig::default()
        })
        .unwrap();
        assert_eq!(viewer.top_nodes, vec![0, 1, 4, 5]);

        let before: Vec<Vec3> = viewer.wireframe().points().iter().map(|p| p.position()).collect();
        let weights: Vec<_> = viewer.wireframe().points().iter().map(|p| p.weights().clone()).collect();
        viewer.tick().unwrap();

        let delta = Vec3::new(0.0, 10f32.to_radians().sin() * 20.0, 0.0);
        for (i, p) in viewer.wireframe().points().iter().enumerate() {
            let top: f32 = [0, 1, 4, 5].iter().map(|&n| weights[i].get(n)).sum();
            assert!(p.position().abs_diff_eq(before[i] + delta * top, 1e-3), "point {i}");
        }
        assert_eq!(viewer.wireframe().nodes()[2].position, Vec3::new(-120.0, 120.0, -100.0));
    }

    #[test]
    fn bob_follows_a_sine_and_reset_clears_it() {
        let mut viewer = Viewer::new(ViewerConfig {
            initial_subdivisions: 0,
            animate: true,
            ..ViewerConfig::default()
        })
        .unwrap();
        for _ in 0..9 {
            viewer.tick().unwrap();
        }
        // 90 degrees in: the full amplitude.
        assert!((viewer.wireframe().nodes()[0].position.y - (-100.0)).abs() < 1e-3);

        viewer.reset().unwrap();
        assert_eq!(viewer.wireframe().nodes()[0].position.y, -120.0);
        viewer.set_animate(false);
        viewer.tick().unwrap();
        assert_eq!(viewer.wireframe().nodes()[0].position.y, -120.0);
    }

    #[test]
    fn grid_is_painted_under_the_mesh_when_seen_from_above() {
        let viewer = flat_viewer();
        assert!(viewer.grid().behind_mesh(&viewer.scene.camera));

        let mut surface = RecordingSurface::new();
        viewer.frame(&mut surface);
        let grid_calls = 1 + viewer.grid().lines().len();
        assert!(surface.calls[..grid_calls].iter().all(is_grid_call));
        assert!(surface.calls[grid_calls..].iter().all(|c| !is_grid_call(c)));
        assert!(surface.calls.len() > grid_calls);
    }

    #[test]
    fn grid_is_painted_over_the_mesh_when_seen_from_below() {
        let mut viewer = flat_viewer();
        viewer.scene.camera.rotate(Axis::X, -40.0);
        viewer.wireframe.update(&viewer.scene).unwrap();
        assert!(!viewer.grid().behind_mesh(&viewer.scene.camera));

        let mut surface = RecordingSurface::new();
        viewer.frame(&mut surface);
        let grid_calls = 1 + viewer.grid().lines().len();
        let split = surface.calls.len() - grid_calls;
        assert!(surface.calls[split..].iter().all(is_grid_call));
        assert!(surface.calls[..split].iter().all(|c| !is_grid_call(c)));
    }

    #[test]
    fn hidden_grid_is_not_painted() {
        let mut viewer = flat_viewer();
        let mut visibility = viewer.scene.visibility;
        visibility.grid = false;
        viewer.set_visibility(visibility);

        let mut surface = RecordingSurface::new();
        viewer.frame(&mut surface);
        assert!(!surface.calls.iter().any(is_grid_call));
    }
}
