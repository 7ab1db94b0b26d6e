//! Walls, top lips and end caps.
//!
//! Every part owns its vertices so normals stay flat per part. Bands are two
//! vertices per row (`[first, second]`) joined by a quad strip and face
//! `forward x (second - first)` unless reversed.

use crate::geom::{MeshBuffers, Point3, Vec3, push_quad, triangulate_strip};

use super::floor::FloorEdge;
use super::options::CorridorCaps;
use super::sampling::SampleRow;

/// `[bottom, top]` of the four wall faces at one row.
#[derive(Debug, Clone, Copy)]
struct WallRow {
    inner_left: [Point3; 2],
    inner_right: [Point3; 2],
    outer_left: [Point3; 2],
    outer_right: [Point3; 2],
    lateral: Vec3,
    up: Vec3,
    forward: Vec3,
}

impl WallRow {
    fn new(row: &SampleRow, edge: &FloorEdge, height: f64, thickness: f64) -> Self {
        let rise = row.frame.normal * height;
        let push = edge.lateral * thickness;
        let outer_left = edge.left - push;
        let outer_right = edge.right + push;
        Self {
            inner_left: [edge.left, edge.left + rise],
            inner_right: [edge.right, edge.right + rise],
            outer_left: [outer_left, outer_left + rise],
            outer_right: [outer_right, outer_right + rise],
            lateral: edge.lateral,
            up: row.frame.normal,
            forward: row.frame.forward,
        }
    }
}

/// Emits one two-column band and its strip.
fn emit_band(
    buffers: &mut MeshBuffers,
    rows: &[SampleRow],
    walls: &[WallRow],
    reverse: bool,
    band: impl Fn(&WallRow) -> ([Point3; 2], Vec3),
) {
    let base = buffers.next_index();
    for (row, wall) in rows.iter().zip(walls) {
        let ([first, second], normal) = band(wall);
        buffers.push_vertex(first, normal, [0.0, row.distance]);
        buffers.push_vertex(second, normal, [1.0, row.distance]);
    }
    triangulate_strip(&mut buffers.indices, base, walls.len(), 2, reverse);
}

/// Emits one cap quad `a..d` (left bottom, right bottom, left top, right top).
fn emit_cap(buffers: &mut MeshBuffers, corners: [Point3; 4], normal: Vec3, reverse: bool) {
    let [a, b, c, d] = corners;
    let ia = buffers.push_vertex(a, normal, [0.0, 0.0]);
    let ib = buffers.push_vertex(b, normal, [1.0, 0.0]);
    let ic = buffers.push_vertex(c, normal, [0.0, 1.0]);
    let id = buffers.push_vertex(d, normal, [1.0, 1.0]);
    push_quad(&mut buffers.indices, ia, ib, ic, id, reverse);
}

fn emit_caps_at(buffers: &mut MeshBuffers, wall: &WallRow, start: bool) {
    let normal = if start { -wall.forward } else { wall.forward };
    emit_cap(
        buffers,
        [wall.outer_left[0], wall.inner_left[0], wall.outer_left[1], wall.inner_left[1]],
        normal,
        start,
    );
    emit_cap(
        buffers,
        [wall.inner_right[0], wall.outer_right[0], wall.inner_right[1], wall.outer_right[1]],
        normal,
        start,
    );
}

/// Emits inner walls, and with `thickness > eps` outer walls, lips and caps.
pub(crate) fn emit_walls(
    buffers: &mut MeshBuffers,
    rows: &[SampleRow],
    edges: &[FloorEdge],
    height: f64,
    thickness: Option<f64>,
    caps: CorridorCaps,
) {
    let walls: Vec<WallRow> = rows
        .iter()
        .zip(edges)
        .map(|(row, edge)| WallRow::new(row, edge, height, thickness.unwrap_or(0.0)))
        .collect();

    // Inner walls face the corridor.
    emit_band(buffers, rows, &walls, true, |w| (w.inner_left, w.lateral));
    emit_band(buffers, rows, &walls, false, |w| (w.inner_right, -w.lateral));

    if thickness.is_none() {
        return;
    }

    emit_band(buffers, rows, &walls, false, |w| (w.outer_left, -w.lateral));
    emit_band(buffers, rows, &walls, true, |w| (w.outer_right, w.lateral));

    emit_band(buffers, rows, &walls, false, |w| {
        ([w.outer_left[1], w.inner_left[1]], w.up)
    });
    emit_band(buffers, rows, &walls, false, |w| {
        ([w.inner_right[1], w.outer_right[1]], w.up)
    });

    if let (true, Some(first)) = (caps.start, walls.first()) {
        emit_caps_at(buffers, first, true);
    }
    if let (true, Some(last)) = (caps.end, walls.last()) {
        emit_caps_at(buffers, last, false);
    }
}

/// Vertices [`emit_walls`] adds for `rows` rows.
pub(crate) const fn wall_vertex_count(rows: usize, double: bool, caps: CorridorCaps) -> usize {
    if !double {
        return rows * 2 * 2;
    }
    let cap_ends = caps.start as usize + caps.end as usize;
    rows * 2 * 6 + cap_ends * 2 * 4
}
