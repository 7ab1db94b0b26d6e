use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geom::Point3;
use crate::path::{Path, PathPoint, Segment};

fn mixed_path() -> Path {
    let mut path = Path::new();
    path.append_straight(0.0, 0.0, 10.0);
    path.append_corner(0.0, 0.0, 10.0, 90.0, 15.0);
    path.append_straight(5.0, 10.0, 4.0);
    path.append_corner(-5.0, 0.0, 6.0, -120.0, 30.0);
    path
}

#[test]
fn total_distance_is_sum_of_segment_lengths() {
    let path = mixed_path();
    let expected: f64 = path.segments().iter().map(Segment::length).sum();
    let manual = 10.0 + 10.0 * 90f64.to_radians() + 4.0 + 6.0 * 120f64.to_radians();

    assert!((path.total_distance() - expected).abs() < 1e-12);
    assert!((path.total_distance() - manual).abs() < 1e-9);

    // Query order does not matter.
    let fresh = mixed_path();
    let _ = fresh.point_at(0.7);
    assert_eq!(fresh.total_distance(), path.total_distance());
}

#[test]
fn endpoints_match_breakpoints() {
    let path = mixed_path();
    let total = path.total_distance();
    let last = path.point_at_index(path.segment_count());

    assert_eq!(path.point_at_distance(0.0), path.start_point());
    assert_eq!(path.point_at(0.0), path.start_point());
    assert_eq!(path.point_at_distance(total), last);
    assert_eq!(path.point_at(1.0), last);
    assert_eq!(path.point_at_distance(total * 3.0), last);
    assert_eq!(path.point_at_distance(-5.0), path.start_point());
}

#[test]
fn boundaries_return_cached_breakpoints() {
    let path = mixed_path();
    for index in 0..path.segment_count() {
        let distance = path.segment_start_distance(index).expect("segment exists");
        assert_eq!(path.point_at_distance(distance), path.point_at_index(index));
    }
    assert_eq!(path.breakpoint_count(), path.segment_count() + 1);
    assert_eq!(path.point_at_index(99), path.point_at_index(path.segment_count()));
    assert!(path.segment_start_distance(path.segment_count()).is_none());
}

#[test]
fn single_straight_midpoint() {
    let mut path = Path::new();
    path.append_straight(0.0, 0.0, 10.0);

    let mid = path.point_at(0.5);
    assert!(mid.position.distance_to(Point3::new(0.0, 0.0, 5.0)) < 1e-12);
    assert_eq!(mid.rotation, path.start_point().rotation);
}

#[test]
fn single_quarter_corner_end() {
    let mut path = Path::new();
    path.append_corner(0.0, 0.0, 10.0, 90.0, 0.0);

    let end = path.point_at(1.0);
    assert!(end.position.distance_to(Point3::new(10.0, 0.0, 10.0)) < 1e-9);
    assert!((end.rotation.yaw - 90.0).abs() < 1e-12);
}

#[test]
fn degenerate_segments_keep_the_start_point() {
    let start = PathPoint::from_euler(1.0, 2.0, 3.0, 0.0, 30.0, 0.0);
    let mut path = Path::with_start(start);
    path.append_straight(0.0, 0.0, 0.0);
    path.append_corner(0.0, 0.0, 0.0, 90.0, 0.0);

    assert_eq!(path.total_distance(), 0.0);
    assert_eq!(path.point_at(1.0), start);
    assert_eq!(path.point_at(0.5), start);
}

#[test]
fn empty_path_answers_with_start() {
    let path = Path::new();
    assert_eq!(path.total_distance(), 0.0);
    assert_eq!(path.point_at(0.5), path.start_point());
    assert_eq!(path.point_at_index(3), path.start_point());
    assert!(path.segment_at_distance(1.0).is_none());
    assert_eq!(path.sample_points(1.0).len(), 1);
}

#[test]
fn zero_length_segments_in_between_are_skipped() {
    let mut path = Path::new();
    path.append_straight(0.0, 0.0, 4.0);
    path.append_straight(0.0, 0.0, 0.0);
    path.append_straight(0.0, 0.0, 4.0);

    assert_eq!(path.segment_at_distance(4.0), Some((2, 0.0)));
    assert_eq!(path.segment_at_distance(6.0), Some((2, 0.5)));
    assert_eq!(path.segment_at_distance(100.0), Some((2, 1.0)));
    let point = path.point_at_distance(6.0);
    assert!(point.position.distance_to(Point3::new(0.0, 0.0, 6.0)) < 1e-12);
}

#[test]
fn straight_runs_preserve_distance() {
    let mut path = Path::with_start(PathPoint::from_euler(0.0, 0.0, 0.0, 0.0, 35.0, 0.0));
    path.append_straight(0.0, 0.0, 7.0);
    path.append_straight(0.0, 10.0, 3.0);

    let total = path.total_distance();
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..64 {
        let a = rng.random_range(0.0..total);
        let b = rng.random_range(0.0..total);
        let (d1, d2) = if a < b { (a, b) } else { (b, a) };
        let p1 = path.point_at_distance(d1).position;
        let p2 = path.point_at_distance(d2).position;
        assert!((p1.distance_to(p2) - (d2 - d1)).abs() < 1e-9);
    }
}

#[test]
fn corner_chords_never_exceed_arc_length() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..16 {
        let mut path = Path::new();
        let radius = rng.random_range(0.5..50.0);
        let angle = rng.random_range(-180.0..180.0);
        let bank = rng.random_range(0.0..90.0);
        path.append_corner(0.0, 0.0, radius, angle, bank);

        let total = path.total_distance();
        for _ in 0..16 {
            let a = rng.random_range(0.0..=total);
            let b = rng.random_range(0.0..=total);
            let (d1, d2) = if a < b { (a, b) } else { (b, a) };
            let chord = path
                .point_at_distance(d1)
                .position
                .distance_to(path.point_at_distance(d2).position);
            assert!(chord <= d2 - d1 + 1e-9, "chord {chord} > arc {}", d2 - d1);
        }
    }
}

#[test]
fn positions_are_continuous_across_boundaries() {
    let path = mixed_path();
    for index in 1..path.segment_count() {
        let boundary = path.segment_start_distance(index).expect("segment exists");
        let before = path.point_at_distance(boundary - 1e-7).position;
        let at = path.point_at_distance(boundary).position;
        assert!(before.distance_to(at) < 1e-6);
    }
}

#[test]
fn cache_refreshes_once_per_version() {
    let mut path = mixed_path();
    let _ = path.total_distance();
    let _ = path.point_at(0.25);
    let _ = path.point_at_index(2);
    assert_eq!(path.cache_stats().refreshes, 1);
    // point_at queries the total first, so four queries in all.
    assert_eq!(path.cache_stats().queries, 4);
    assert_eq!(path.cache_stats().hit_rate(), 0.75);

    path.append_straight(0.0, 0.0, 1.0);
    let _ = path.total_distance();
    let _ = path.point_at(0.9);
    assert_eq!(path.cache_stats().refreshes, 2);
    assert!(path.cache_stats().hit_rate() < 0.75);

    assert_eq!(path.clone().cache_stats().hit_rate(), 0.0);
}

#[test]
fn mutations_bump_version() {
    let mut path = Path::new();
    let v0 = path.version();
    path.append_straight(0.0, 0.0, 1.0);
    let v1 = path.version();
    assert!(v1 > v0);

    assert!(path.segment_mut(5).is_none());
    assert_eq!(path.version(), v1);

    let before = path.total_distance();
    path.segment_mut(0).expect("segment exists").set_distance(3.0);
    assert!(path.version() > v1);
    assert_eq!(before, 1.0);
    assert_eq!(path.total_distance(), 3.0);

    let v2 = path.version();
    path.set_start(PathPoint::from_euler(0.0, 5.0, 0.0, 0.0, 0.0, 0.0));
    assert!(path.version() > v2);
    assert_eq!(path.point_at(1.0).position, Point3::new(0.0, 5.0, 3.0));
}

#[test]
fn append_returns_the_new_segment_for_chaining() {
    let mut path = Path::new();
    path.append_corner(0.0, 0.0, 5.0, 45.0, 0.0).set_bank(12.0);
    assert_eq!(path.segment(0).map(Segment::bank), Some(12.0));
}

#[test]
fn insert_and_remove_segments() {
    let mut path = Path::new();
    path.append_straight(0.0, 0.0, 1.0);
    path.append_straight(0.0, 0.0, 3.0);
    path.insert_segment(1, Segment::straight(0.0, 0.0, 2.0));
    path.insert_segment(99, Segment::straight(0.0, 0.0, 4.0));

    let distances: Vec<f64> = path.segments().iter().map(Segment::distance).collect();
    assert_eq!(distances, vec![1.0, 2.0, 3.0, 4.0]);
    assert_eq!(path.total_distance(), 10.0);

    let removed = path.remove_segment(0).expect("segment exists");
    assert_eq!(removed.distance(), 1.0);
    assert!(path.remove_segment(10).is_none());
    assert_eq!(path.total_distance(), 9.0);

    path.clear();
    assert_eq!(path.segment_count(), 0);
    assert_eq!(path.total_distance(), 0.0);
}

#[test]
fn clones_get_a_fresh_identity() {
    let path = mixed_path();
    let copy = path.clone();
    assert_ne!(copy.id(), path.id());
    assert_ne!(copy.stamp(), path.stamp());
    assert_eq!(copy.segments(), path.segments());
    assert_eq!(copy.point_at(0.6), path.point_at(0.6));
}

#[test]
fn sample_points_cover_start_and_end() {
    let mut path = Path::new();
    path.append_straight(0.0, 0.0, 5.5);

    let samples = path.sample_points(2.0);
    assert_eq!(samples.len(), 4);
    assert_eq!(samples[0], path.start_point());
    assert_eq!(*samples.last().expect("non-empty"), path.point_at(1.0));

    assert!(path.sample_points(0.0).is_empty());
    assert!(path.sample_points(f64::NAN).is_empty());
    assert!(path.sample_points(1e-300).is_empty());
}
