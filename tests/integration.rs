use course_engine::Engine;
use course_engine::corridor::{Corridor, CorridorOptions, build_corridor_mesh};
use course_engine::geom::{Point3, triangle_normal};
use course_engine::parse::course_xml;
use course_engine::path::{Path, PathPoint, Segment};

const S_CURVE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/courses/s_curve.xml"
));

fn assert_point_close(a: Point3, b: Point3, tol: f64) {
    assert!(a.distance_to(b) < tol, "expected {b:?}, got {a:?}");
}

#[test]
fn engine_initializes() {
    let engine = Engine::new();
    assert!(engine.is_initialized());
    assert_eq!(engine.segment_count(), 0);
    assert_eq!(engine.total_distance(), 0.0);
}

#[test]
fn fixture_course_builds_a_clean_corridor() {
    let course = course_xml::parse_str(S_CURVE).expect("parse s_curve");
    assert_eq!(course.path.segment_count(), 4);

    let expected = 6.0 + 2.0 * 12.0 * 75f64.to_radians() + 4.0;
    assert!((course.path.total_distance() - expected).abs() < 1e-9);
    assert_eq!(course.path.start_point().position, Point3::new(0.0, 2.0, 0.0));

    let (mesh, diag) = build_corridor_mesh(&course.path, &course.corridor).expect("build corridor");
    mesh.validate().expect("valid mesh");
    assert_eq!(diag.non_manifold_edge_count, 0);
    assert_eq!(diag.degenerate_triangle_count, 0);
    assert!(!diag.has_warnings(), "{}", diag.summary());
    assert_eq!(mesh.groups.floor.len(), diag.floor_triangle_count * 3);
    assert_eq!(mesh.groups.walls.end, mesh.indices.len());

    for triangle in mesh.groups.floor.start / 3..mesh.groups.floor.end / 3 {
        let normal = triangle_normal(&mesh, triangle).expect("floor triangle");
        assert!(normal.y > 0.5, "floor triangle {triangle} faces {normal:?}");
    }
}

#[test]
fn engine_loads_and_rebuilds_fixture() {
    let mut engine = Engine::new();
    engine.load_course(S_CURVE).expect("load course");
    assert_eq!(engine.segment_count(), 4);
    assert_eq!(engine.corridor_options().center_edge_count, 1);

    assert_eq!(engine.rebuild().ok(), Some(true));
    let vertices = engine.corridor().mesh().vertex_count();
    assert!(vertices > 0);

    engine.set_wall_width(0.0);
    assert_eq!(engine.rebuild().ok(), Some(true));
    assert!(engine.corridor().mesh().vertex_count() < vertices);

    engine.set_width(0.0);
    assert_eq!(engine.rebuild().ok(), Some(true));
    assert!(engine.corridor().mesh().is_empty());
}

#[test]
fn total_distance_matches_segment_lengths_in_any_query_order() {
    let mut path = Path::new();
    path.append_straight(3.0, 0.0, 7.5);
    path.append_corner(0.0, 4.0, 5.0, -120.0, 25.0);
    path.append_corner(-2.0, 0.0, 9.0, 45.0, 0.0);
    path.append_straight(0.0, 0.0, 2.0);

    let expected = 7.5 + 5.0 * 120f64.to_radians() + 9.0 * 45f64.to_radians() + 2.0;

    let before = path.point_at(0.3);
    assert!((path.total_distance() - expected).abs() < 1e-9);
    let after = path.point_at(0.3);
    assert_eq!(before, after);

    let twin = path.clone();
    assert!((twin.total_distance() - expected).abs() < 1e-9);
}

#[test]
fn endpoints_match_start_and_last_breakpoint() {
    let mut path = Path::with_start(PathPoint::from_euler(1.0, 0.0, -2.0, 0.0, 30.0, 0.0));
    path.append_straight(0.0, 0.0, 4.0);
    path.append_corner(5.0, 0.0, 6.0, 70.0, 10.0);

    assert_eq!(path.point_at_distance(0.0), path.start_point());
    let total = path.total_distance();
    let end = path.point_at_distance(total);
    assert_eq!(end, path.point_at(1.0));
    assert_eq!(end, path.point_at_index(path.segment_count()));
}

#[test]
fn straight_half_point_and_quarter_corner() {
    let mut straight = Path::new();
    straight.append_straight(0.0, 0.0, 10.0);
    let half = straight.point_at(0.5);
    assert_point_close(half.position, Point3::new(0.0, 0.0, 5.0), 1e-12);
    assert_eq!(half.rotation, straight.start_point().rotation);

    let mut corner = Path::new();
    corner.append_corner(0.0, 0.0, 10.0, 90.0, 0.0);
    let end = corner.point_at(1.0);
    assert_point_close(end.position, Point3::new(10.0, 0.0, 10.0), 1e-9);
    assert!((end.rotation.yaw - 90.0).abs() < 1e-9);
}

#[test]
fn chords_never_exceed_arc_length() {
    let mut path = Path::new();
    path.append_straight(0.0, 0.0, 5.0);
    path.append_corner(0.0, 0.0, 4.0, 160.0, 20.0);
    path.append_straight(0.0, 0.0, 5.0);

    let total = path.total_distance();
    let steps = 64;
    for i in 0..steps {
        let d1 = total * f64::from(i) / f64::from(steps);
        let d2 = total * f64::from(i + 1) / f64::from(steps);
        let chord = path
            .point_at_distance(d1)
            .position
            .distance_to(path.point_at_distance(d2).position);
        assert!(chord <= d2 - d1 + 1e-9, "chord {chord} over span {}", d2 - d1);
    }

    let a = path.point_at_distance(1.0).position;
    let b = path.point_at_distance(4.0).position;
    assert!((a.distance_to(b) - 3.0).abs() < 1e-9);
}

#[test]
fn degenerate_segments_leave_the_frame_unchanged() {
    for segment in [Segment::straight(0.0, 0.0, 0.0), Segment::corner(0.0, 0.0, 0.0, 90.0, 0.0)] {
        let mut path = Path::with_start(PathPoint::from_euler(2.0, 1.0, 3.0, 0.0, 45.0, 0.0));
        path.push_segment(segment);
        assert_eq!(path.total_distance(), 0.0);
        assert_eq!(path.point_at(1.0), path.start_point());
    }
}

#[test]
fn corridor_over_five_units_has_six_rows() {
    let mut path = Path::new();
    path.append_straight(0.0, 0.0, 5.0);
    let options = CorridorOptions {
        width: 2.0,
        unit_distance: 1.0,
        wall_height: 0.0,
        ..CorridorOptions::default()
    };

    let (mesh, diag) = build_corridor_mesh(&path, &options).expect("build");
    assert_eq!(diag.row_count, 6);
    assert_eq!(diag.floor_triangle_count, 10);
    assert_eq!(mesh.groups.floor, 0..30);
    assert_eq!(mesh.groups.walls, 30..mesh.indices.len());
}

#[test]
fn identical_rebuilds_are_byte_identical() {
    let course = course_xml::parse_str(S_CURVE).expect("parse s_curve");
    let mut corridor = Corridor::new(course.corridor);
    corridor.rebuild(Some(&course.path)).expect("first build");
    let first = corridor.mesh().clone();
    corridor.rebuild(Some(&course.path)).expect("second build");

    let bits = |values: &[f64]| values.iter().map(|v| v.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(first.positions_flat()), bits(corridor.mesh().positions_flat()));
    assert_eq!(bits(first.normals_flat()), bits(corridor.mesh().normals_flat()));
    assert_eq!(first.indices, corridor.mesh().indices);
}

#[test]
fn degenerate_corridor_inputs_yield_empty_buffers() {
    let mut path = Path::new();
    path.append_straight(0.0, 0.0, 5.0);

    let mut corridor = Corridor::new(CorridorOptions { width: -1.0, ..CorridorOptions::default() });
    corridor.rebuild(Some(&path)).expect("no error for bad width");
    assert_eq!(corridor.mesh().vertex_count(), 0);
    assert!(corridor.mesh().indices.is_empty());

    corridor.set_width(2.0);
    corridor.set_unit_distance(0.0);
    corridor.rebuild(Some(&path)).expect("no error for bad step");
    assert!(corridor.mesh().is_empty());

    corridor.set_unit_distance(1.0);
    corridor.rebuild(None).expect("no error without a path");
    assert!(corridor.mesh().is_empty());
}
