use serde::Serialize;

use crate::geom::Tolerance;

/// Slope limit in degrees; a segment at or beyond it cannot be traversed.
pub const MAX_SLOPE: f64 = 90.0;
/// Corner turn limit in degrees, both directions.
pub const MAX_ANGLE: f64 = 180.0;
/// Banking limit in degrees.
pub const MAX_BANK: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Straight,
    Corner,
}

/// One typed piece of a path.
///
/// Fields are only reachable through the setters, which sanitize and clamp:
/// non-finite values become `0`, `slope` is kept in `[-90, 90]`, `angle` in
/// `[-180, 180]`, `bank` in `[0, 90]`, `distance` and `radius` are never
/// negative. Type-specific fields of the other kind are stored but ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    kind: SegmentKind,
    slope: f64,
    tilt: f64,
    distance: f64,
    radius: f64,
    angle: f64,
    bank: f64,
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

impl Segment {
    #[must_use]
    pub fn straight(slope: f64, tilt: f64, distance: f64) -> Self {
        let mut segment = Self::empty(SegmentKind::Straight);
        segment.set_slope(slope);
        segment.set_tilt(tilt);
        segment.set_distance(distance);
        segment
    }

    #[must_use]
    pub fn corner(slope: f64, tilt: f64, radius: f64, angle: f64, bank: f64) -> Self {
        let mut segment = Self::empty(SegmentKind::Corner);
        segment.set_slope(slope);
        segment.set_tilt(tilt);
        segment.set_radius(radius);
        segment.set_angle(angle);
        segment.set_bank(bank);
        segment
    }

    const fn empty(kind: SegmentKind) -> Self {
        Self {
            kind,
            slope: 0.0,
            tilt: 0.0,
            distance: 0.0,
            radius: 0.0,
            angle: 0.0,
            bank: 0.0,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> SegmentKind {
        self.kind
    }

    /// Target pitch at the end of the segment, in degrees.
    #[must_use]
    pub const fn slope(&self) -> f64 {
        self.slope
    }

    /// Target roll at the end of the segment, in degrees.
    #[must_use]
    pub const fn tilt(&self) -> f64 {
        self.tilt
    }

    #[must_use]
    pub const fn distance(&self) -> f64 {
        self.distance
    }

    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// Signed turn in degrees; positive turns right.
    #[must_use]
    pub const fn angle(&self) -> f64 {
        self.angle
    }

    #[must_use]
    pub const fn bank(&self) -> f64 {
        self.bank
    }

    pub fn set_slope(&mut self, slope: f64) -> &mut Self {
        self.slope = finite_or_zero(slope).clamp(-MAX_SLOPE, MAX_SLOPE);
        self
    }

    pub fn set_tilt(&mut self, tilt: f64) -> &mut Self {
        self.tilt = finite_or_zero(tilt);
        self
    }

    pub fn set_distance(&mut self, distance: f64) -> &mut Self {
        self.distance = finite_or_zero(distance).max(0.0);
        self
    }

    pub fn set_radius(&mut self, radius: f64) -> &mut Self {
        self.radius = finite_or_zero(radius).max(0.0);
        self
    }

    pub fn set_angle(&mut self, angle: f64) -> &mut Self {
        self.angle = finite_or_zero(angle).clamp(-MAX_ANGLE, MAX_ANGLE);
        self
    }

    pub fn set_bank(&mut self, bank: f64) -> &mut Self {
        self.bank = finite_or_zero(bank).clamp(0.0, MAX_BANK);
        self
    }

    /// Whether the segment contributes any length.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid_with_tolerance(Tolerance::default_geom())
    }

    #[must_use]
    pub fn is_valid_with_tolerance(&self, tol: Tolerance) -> bool {
        if self.slope.abs() >= MAX_SLOPE - tol.eps {
            return false;
        }
        match self.kind {
            SegmentKind::Straight => !tol.is_degenerate_length(self.distance),
            SegmentKind::Corner => {
                !tol.is_degenerate_length(self.radius) && self.angle.abs() > tol.eps
            }
        }
    }

    /// Arc length of the segment; `0` when invalid.
    #[must_use]
    pub fn length(&self) -> f64 {
        if !self.is_valid() {
            return 0.0;
        }
        match self.kind {
            SegmentKind::Straight => self.distance,
            SegmentKind::Corner => self.radius * self.angle.to_radians().abs(),
        }
    }
}
