//! Small value types shared by the path evaluator and the corridor builder.
//!
//! World axes: +X right, +Y up, +Z forward. Angles on [`EulerAngles`] are in
//! degrees; [`Transform`] constructors take radians.

use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::Serialize;

/// Direction or offset in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// Local right axis.
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    /// World up axis.
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    /// Local forward axis.
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    #[must_use]
    pub const fn dot(self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[must_use]
    pub const fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    #[must_use]
    pub const fn length_squared(self) -> f64 {
        self.dot(self)
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Unit vector in the same direction; `None` for zero or non-finite input.
    #[must_use]
    pub fn normalized(self) -> Option<Self> {
        let len = self.length();
        (len.is_finite() && len > 0.0).then(|| Self::new(self.x / len, self.y / len, self.z / len))
    }

    /// Same vector with the vertical component dropped.
    #[must_use]
    pub const fn flattened(self) -> Self {
        Self::new(self.x, 0.0, self.z)
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, scale: f64) -> Self {
        Self::new(self.x * scale, self.y * scale, self.z * scale)
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;
    fn div(self, scale: f64) -> Self {
        Self::new(self.x / scale, self.y / scale, self.z / scale)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// Location in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Offset from `rhs` to `self`.
    #[must_use]
    pub const fn sub_point(self, rhs: Self) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }

    #[must_use]
    pub fn lerp(self, rhs: Self, t: f64) -> Self {
        Self::new(
            self.x + (rhs.x - self.x) * t,
            self.y + (rhs.y - self.y) * t,
            self.z + (rhs.z - self.z) * t,
        )
    }

    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        self.sub_point(other).length()
    }
}

impl Add<Vec3> for Point3 {
    type Output = Self;
    fn add(self, v: Vec3) -> Self {
        Self::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }
}

impl Sub<Vec3> for Point3 {
    type Output = Self;
    fn sub(self, v: Vec3) -> Self {
        Self::new(self.x - v.x, self.y - v.y, self.z - v.z)
    }
}

impl Sub for Point3 {
    type Output = Vec3;
    fn sub(self, rhs: Self) -> Vec3 {
        self.sub_point(rhs)
    }
}

/// Row-major 3x3 rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    m: [[f64; 3]; 3],
}

impl Transform {
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Rotation about the right axis; positive angles tip +Z towards -Y.
    #[must_use]
    pub fn rotate_x(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            m: [[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]],
        }
    }

    /// Rotation about the up axis; positive angles turn +Z towards +X.
    #[must_use]
    pub fn rotate_y(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            m: [[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]],
        }
    }

    /// Rotation about the forward axis; positive angles lift +X towards +Y.
    #[must_use]
    pub fn rotate_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            m: [[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// `self * other`: `other` is applied first.
    #[must_use]
    pub fn compose(self, other: Self) -> Self {
        let mut m = [[0.0; 3]; 3];
        for (i, row) in m.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = self.m[i][0] * other.m[0][j]
                    + self.m[i][1] * other.m[1][j]
                    + self.m[i][2] * other.m[2][j];
            }
        }
        Self { m }
    }

    #[must_use]
    pub fn apply_vec(self, v: Vec3) -> Vec3 {
        let [r0, r1, r2] = self.m;
        Vec3::new(
            r0[0] * v.x + r0[1] * v.y + r0[2] * v.z,
            r1[0] * v.x + r1[1] * v.y + r1[2] * v.z,
            r2[0] * v.x + r2[1] * v.y + r2[2] * v.z,
        )
    }
}

impl Mul for Transform {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.compose(rhs)
    }
}

/// Orientation as pitch/yaw/roll in degrees.
///
/// Roll is applied first, then pitch, then yaw (`Ry(yaw) * Rx(pitch) *
/// Rz(roll)`), so yaw always turns about the world up axis regardless of the
/// current pitch or roll.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct EulerAngles {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

impl EulerAngles {
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(pitch: f64, yaw: f64, roll: f64) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Heading-only orientation with the same yaw.
    #[must_use]
    pub const fn heading(self) -> Self {
        Self::new(0.0, self.yaw, 0.0)
    }

    /// Component-wise interpolation; angles are not wrapped.
    #[must_use]
    pub fn lerp(self, rhs: Self, t: f64) -> Self {
        Self::new(
            self.pitch + (rhs.pitch - self.pitch) * t,
            self.yaw + (rhs.yaw - self.yaw) * t,
            self.roll + (rhs.roll - self.roll) * t,
        )
    }

    #[must_use]
    pub fn rotation(self) -> Transform {
        Transform::rotate_y(self.yaw.to_radians())
            * Transform::rotate_x(self.pitch.to_radians())
            * Transform::rotate_z(self.roll.to_radians())
    }

    #[must_use]
    pub fn forward(self) -> Vec3 {
        self.rotation().apply_vec(Vec3::Z)
    }

    #[must_use]
    pub fn right(self) -> Vec3 {
        self.rotation().apply_vec(Vec3::X)
    }

    #[must_use]
    pub fn up(self) -> Vec3 {
        self.rotation().apply_vec(Vec3::Y)
    }
}

/// Axis-aligned bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BBox {
    pub min: Point3,
    pub max: Point3,
}

impl BBox {
    #[must_use]
    pub fn from_points(points: impl IntoIterator<Item = Point3>) -> Option<Self> {
        points.into_iter().fold(None, |bbox, p| {
            Some(match bbox {
                None => Self { min: p, max: p },
                Some(Self { min, max }) => Self {
                    min: Point3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z)),
                    max: Point3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z)),
                },
            })
        })
    }
}

/// Epsilon used for degenerate-length and zero-area checks.
///
/// - `Tolerance::default_geom()`: segment validity and sampling (1e-9)
/// - `Tolerance::ZERO_LENGTH`: triangle areas (1e-12)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub eps: f64,
}

impl Tolerance {
    pub const DEFAULT: Self = Self { eps: 1e-9 };
    pub const ZERO_LENGTH: Self = Self { eps: 1e-12 };

    #[must_use]
    pub const fn default_geom() -> Self {
        Self::DEFAULT
    }

    #[must_use]
    pub const fn eps_squared(self) -> f64 {
        self.eps * self.eps
    }

    /// `eps` scaled by `span`, never tighter than `eps` itself.
    #[must_use]
    pub fn relative_to(self, span: f64) -> f64 {
        self.eps * span.abs().max(1.0)
    }

    /// NaN, negative and near-zero lengths are all degenerate.
    #[must_use]
    pub fn is_degenerate_length(self, len: f64) -> bool {
        len.is_nan() || len <= self.eps
    }
}
