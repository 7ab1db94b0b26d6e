use crate::geom::{MeshBuffers, Point3, Vec3, triangulate_strip};

use super::options::WallNormalMode;
use super::sampling::SampleRow;

/// Outer floor vertices of one row and the lateral direction derived from
/// them, used to attach walls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FloorEdge {
    pub(crate) left: Point3,
    pub(crate) right: Point3,
    /// Unit vector pointing from the left edge towards the right edge.
    pub(crate) lateral: Vec3,
}

fn lateral_direction(left: Point3, right: Point3, row: &SampleRow, mode: WallNormalMode) -> Vec3 {
    let across = right.sub_point(left);
    let across = match mode {
        WallNormalMode::FloorEdge => across,
        WallNormalMode::Horizontal => across.flattened(),
    };
    across.normalized().unwrap_or(row.frame.right)
}

/// Emits `rows x columns` floor vertices (row-major) and the quad strip
/// between them. Returns the per-row edge data.
pub(crate) fn emit_floor(
    buffers: &mut MeshBuffers,
    rows: &[SampleRow],
    width: f64,
    columns: usize,
    mode: WallNormalMode,
) -> Vec<FloorEdge> {
    let base = buffers.next_index();
    let half = width * 0.5;
    let last_column = (columns - 1) as f64;
    let mut edges = Vec::with_capacity(rows.len());

    for row in rows {
        let center = row.frame.position;
        let left = center - row.frame.right * half;
        let right = center + row.frame.right * half;

        for column in 0..columns {
            let u = column as f64 / last_column;
            buffers.push_vertex(left.lerp(right, u), row.frame.normal, [u, row.distance]);
        }

        edges.push(FloorEdge {
            left,
            right,
            lateral: lateral_direction(left, right, row, mode),
        });
    }

    triangulate_strip(&mut buffers.indices, base, rows.len(), columns, false);
    edges
}
