//! Per-segment frame evaluation.
//!
//! Both segment kinds interpolate orientation linearly from the start frame
//! towards a target orientation and share the same vertical profile: the
//! gradient moves linearly from `tan(start pitch)` to `tan(slope)`, so the
//! drop is its integral over the travelled horizontal distance.

use std::f64::consts::PI;

use crate::geom::{EulerAngles, Transform, Vec3};

use super::point::PathPoint;
use super::segment::{Segment, SegmentKind};

fn clamp01(rate: f64) -> f64 {
    if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 1.0) }
}

/// Vertical drop after travelling `rate` of `length` while the gradient moves
/// from `tan(start_pitch)` to `tan(end_pitch)` (degrees, positive is down).
#[must_use]
pub fn vertical_drop(start_pitch: f64, end_pitch: f64, rate: f64, length: f64) -> f64 {
    let v0 = start_pitch.to_radians().tan();
    let v1 = end_pitch.to_radians().tan();
    (v0 * rate + 0.5 * (v1 - v0) * rate * rate) * length
}

/// Frame reached after traversing `rate` (clamped to `[0, 1]`) of `segment`
/// from `start`. Invalid segments return `start` unchanged.
#[must_use]
pub fn evaluate_segment(start: &PathPoint, segment: &Segment, rate: f64) -> PathPoint {
    if !segment.is_valid() {
        return *start;
    }
    let rate = clamp01(rate);
    match segment.kind() {
        SegmentKind::Straight => evaluate_straight(start, segment, rate),
        SegmentKind::Corner => evaluate_corner(start, segment, rate),
    }
}

fn evaluate_straight(start: &PathPoint, segment: &Segment, rate: f64) -> PathPoint {
    let target = EulerAngles::new(segment.slope(), start.rotation.yaw, segment.tilt());
    let rotation = start.rotation.lerp(target, rate);

    let heading = start.rotation.heading().forward();
    let horizontal = heading * (segment.distance() * rate);
    let down = vertical_drop(start.rotation.pitch, segment.slope(), rate, segment.distance());

    PathPoint::new(start.position + horizontal - Vec3::Y * down, rotation)
}

fn evaluate_corner(start: &PathPoint, segment: &Segment, rate: f64) -> PathPoint {
    let angle = segment.angle();
    let radius = segment.radius();

    let target = EulerAngles::new(segment.slope(), start.rotation.yaw + angle, segment.tilt());
    let mut rotation = start.rotation.lerp(target, rate);
    // Half-sine banking, leaning into the turn.
    rotation.roll -= (rate * PI).sin() * segment.bank() * angle / 180.0;

    let pivot = Vec3::X * (angle.signum() * radius);
    let arm = Transform::rotate_y(angle.to_radians() * rate).apply_vec(-pivot);
    let local = pivot + arm;
    let horizontal = start.rotation.heading().rotation().apply_vec(local);

    let arc = radius * angle.to_radians().abs();
    let down = vertical_drop(start.rotation.pitch, segment.slope(), rate, arc);

    PathPoint::new(start.position + horizontal - Vec3::Y * down, rotation)
}
