use serde::Serialize;

use crate::geom::{EulerAngles, Point3, Vec3};

/// A sampled frame on a path: position plus orientation basis.
///
/// `forward`, `right` and `normal` are always derived from `rotation`; build
/// frames through [`PathPoint::new`] so the three stay consistent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PathPoint {
    pub position: Point3,
    pub rotation: EulerAngles,
    pub forward: Vec3,
    pub right: Vec3,
    pub normal: Vec3,
}

impl PathPoint {
    #[must_use]
    pub fn new(position: Point3, rotation: EulerAngles) -> Self {
        let basis = rotation.rotation();
        Self {
            position,
            rotation,
            forward: basis.apply_vec(Vec3::Z),
            right: basis.apply_vec(Vec3::X),
            normal: basis.apply_vec(Vec3::Y),
        }
    }

    #[must_use]
    pub fn from_euler(x: f64, y: f64, z: f64, pitch: f64, yaw: f64, roll: f64) -> Self {
        Self::new(Point3::new(x, y, z), EulerAngles::new(pitch, yaw, roll))
    }
}

impl Default for PathPoint {
    fn default() -> Self {
        Self::new(Point3::ORIGIN, EulerAngles::IDENTITY)
    }
}
