// Orbit-free "turntable" camera for the cage viewer.
//
// Camera model:
//   - A 3x3 orientation matrix; its columns are where the world X/Y/Z axes end up
//   - Rotations are applied on the left, so every nudge is about a fixed screen axis
//     and repeated small nudges accumulate into an arbitrary free rotation
//   - A fixed focal length for a simple perspective divide (no near plane, no clipping)

use glam::{Mat3, Vec2, Vec3};

/// Axis of an elementary rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Accumulated orientation. Private: only changed through rotate()/reset().
    orientation: Mat3,

    /// Distance from the eye to the projection plane, in world units.
    /// Points at camera-space z = 0 project at scale 1.
    pub focal_length: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(1200.0)
    }
}

impl Camera {
    pub fn new(focal_length: f32) -> Self {
        Self {
            orientation: Mat3::IDENTITY,
            focal_length,
        }
    }

    pub fn orientation(&self) -> Mat3 {
        self.orientation
    }

    /// Back to the identity orientation.
    pub fn reset(&mut self) {
        self.orientation = Mat3::IDENTITY;
        log::debug!("camera reset");
    }

    /// Left-multiply the orientation by a rotation of `degrees` about `axis`.
    pub fn rotate(&mut self, axis: Axis, degrees: f32) {
        let theta = degrees.to_radians();
        let r = match axis {
            Axis::X => Mat3::from_rotation_x(theta),
            Axis::Y => Mat3::from_rotation_y(theta),
            Axis::Z => Mat3::from_rotation_z(theta),
        };
        self.orientation = r * self.orientation;
        log::debug!("camera rotated {:?} by {:.1}°", axis, degrees);
    }

    /// World point → camera space (rotation only, no perspective).
    pub fn camera_space(&self, p: Vec3) -> Vec3 {
        self.orientation * p
    }

    /// Perspective divide of a point that is already in camera space.
    /// Values with z <= -focal_length are allowed to diverge.
    pub fn perspective(&self, c: Vec3) -> Vec2 {
        let s = self.focal_length / (c.z + self.focal_length);
        Vec2::new(c.x * s, c.y * s)
    }

    /// World point → screen offset from the viewport centre.
    pub fn project(&self, p: Vec3) -> Vec2 {
        self.perspective(self.camera_space(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_camera_only_applies_perspective() {
        let cam = Camera::new(1200.0);
        assert_eq!(cam.project(Vec3::ZERO), Vec2::ZERO);
        let s = cam.project(Vec3::new(100.0, 50.0, 1200.0));
        assert!((s.x - 50.0).abs() < 1e-4);
        assert!((s.y - 25.0).abs() < 1e-4);
    }

    #[test]
    fn rotations_do_not_commute() {
        let mut a = Camera::default();
        a.rotate(Axis::Y, 30.0);
        a.rotate(Axis::X, 15.0);

        let mut b = Camera::default();
        b.rotate(Axis::X, 15.0);
        b.rotate(Axis::Y, 30.0);

        assert!(!a.orientation().abs_diff_eq(b.orientation(), 1e-4));
    }

    #[test]
    fn small_rotations_accumulate() {
        let mut stepped = Camera::default();
        for _ in 0..30 {
            stepped.rotate(Axis::Y, 3.0);
        }
        let mut once = Camera::default();
        once.rotate(Axis::Y, 90.0);
        assert!(stepped.orientation().abs_diff_eq(once.orientation(), 1e-4));

        // A quarter turn about Y carries +X onto -Z.
        let c = once.camera_space(Vec3::X);
        assert!(c.abs_diff_eq(Vec3::NEG_Z, 1e-5));
    }

    #[test]
    fn camera_space_exposes_depth() {
        let mut cam = Camera::default();
        cam.rotate(Axis::X, 90.0);
        // +Y rotates onto +Z: straight into the screen.
        let c = cam.camera_space(Vec3::new(0.0, 10.0, 0.0));
        assert!((c.z - 10.0).abs() < 1e-4);
        let s = cam.project(Vec3::new(0.0, 10.0, 0.0));
        assert!(s.length() < 1e-3);
    }

    struct Capture;

    static RECORDS: std::sync::Mutex<Vec<(log::Level, String)>> = std::sync::Mutex::new(Vec::new());

    impl log::Log for Capture {
        fn enabled(&self, _: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            if record.target().ends_with("engine::camera") {
                if let Ok(mut records) = RECORDS.lock() {
                    records.push((record.level(), record.args().to_string()));
                }
            }
        }

        fn flush(&self) {}
    }

    #[test]
    fn camera_changes_log_at_debug() {
        log::set_logger(&Capture).unwrap();
        log::set_max_level(log::LevelFilter::Trace);

        let mut cam = Camera::default();
        cam.rotate(Axis::Y, 12.0);
        cam.reset();

        let records = RECORDS.lock().unwrap();
        assert!(records.iter().any(|(_, msg)| msg.starts_with("camera rotated")));
        assert!(records.iter().any(|(_, msg)| msg == "camera reset"));
        assert!(records.iter().all(|(level, _)| *level == log::Level::Debug));
    }
}
