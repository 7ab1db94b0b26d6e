use std::collections::HashMap;
use std::ops::Range;

use serde::Serialize;

use super::{BBox, Point3, Tolerance, Vec3};

/// Index ranges of the two drawable groups of a corridor mesh.
///
/// Both ranges index into [`GeomMesh::indices`] and are contiguous: the floor
/// is always emitted first, everything else (walls, lips, caps) follows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MeshGroups {
    pub floor: Range<usize>,
    pub walls: Range<usize>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeomMesh {
    pub positions: Vec<[f64; 3]>,
    pub normals: Vec<[f64; 3]>,
    pub uvs: Vec<[f64; 2]>,
    pub indices: Vec<u32>,
    pub groups: MeshGroups,
}

impl GeomMesh {
    /// An empty mesh: no vertices, no indices, empty groups.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() && self.indices.is_empty()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Floor triangle indices.
    #[must_use]
    pub fn floor_indices(&self) -> &[u32] {
        self.indices.get(self.groups.floor.clone()).unwrap_or(&[])
    }

    /// Wall, lip and cap triangle indices.
    #[must_use]
    pub fn wall_indices(&self) -> &[u32] {
        self.indices.get(self.groups.walls.clone()).unwrap_or(&[])
    }

    #[must_use]
    pub fn position(&self, index: u32) -> Option<Point3> {
        self.positions
            .get(index as usize)
            .map(|p| Point3::new(p[0], p[1], p[2]))
    }

    /// Axis-aligned bounds of all vertices, `None` for an empty mesh.
    #[must_use]
    pub fn bounds(&self) -> Option<BBox> {
        BBox::from_points(self.positions.iter().map(|p| Point3::new(p[0], p[1], p[2])))
    }

    /// Returns true if any vertex position contains NaN or Inf values.
    #[must_use]
    pub fn has_invalid_vertices(&self) -> bool {
        self.positions
            .iter()
            .any(|p| !p[0].is_finite() || !p[1].is_finite() || !p[2].is_finite())
    }

    /// Returns true if all vertex indices are within bounds.
    #[must_use]
    pub fn has_valid_indices(&self) -> bool {
        let n = self.positions.len() as u32;
        self.indices.iter().all(|&i| i < n)
    }

    /// Returns true if the groups cover the index buffer back to back.
    #[must_use]
    pub fn has_valid_groups(&self) -> bool {
        let MeshGroups { floor, walls } = &self.groups;
        floor.start == 0
            && floor.end == walls.start
            && walls.end == self.indices.len()
            && floor.len() % 3 == 0
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.indices.len() % 3 != 0 {
            return Err("mesh indices are not a triangle list (len % 3 != 0)".to_string());
        }
        if self.has_invalid_vertices() {
            return Err("mesh has invalid vertex coordinates (NaN/Inf)".to_string());
        }
        if !self.has_valid_indices() {
            return Err("mesh has out-of-bounds vertex indices".to_string());
        }
        if self.normals.len() != self.positions.len() || self.uvs.len() != self.positions.len() {
            return Err("mesh attribute buffers do not match vertex count".to_string());
        }
        if !self.has_valid_groups() {
            return Err("mesh groups do not partition the index buffer".to_string());
        }
        Ok(())
    }

    /// Returns the position buffer as a flat slice: `[x0, y0, z0, x1, y1, z1, ...]`.
    ///
    /// Zero-copy view for hosts that expect packed numeric buffers.
    #[must_use]
    pub fn positions_flat(&self) -> &[f64] {
        flatten_f64_array_slice::<3>(&self.positions)
    }

    /// Returns the normal buffer as a flat slice.
    #[must_use]
    pub fn normals_flat(&self) -> &[f64] {
        flatten_f64_array_slice::<3>(&self.normals)
    }

    /// Returns the UV buffer as a flat slice: `[u0, v0, u1, v1, ...]`.
    #[must_use]
    pub fn uvs_flat(&self) -> &[f64] {
        flatten_f64_array_slice::<2>(&self.uvs)
    }
}

fn flatten_f64_array_slice<const N: usize>(data: &[[f64; N]]) -> &[f64] {
    let count = data.len().checked_mul(N).unwrap_or(0);
    let ptr = data.as_ptr().cast::<f64>();
    // SAFETY: `[[f64; N]]` is stored contiguously, and we compute the element count as `len * N`.
    unsafe { std::slice::from_raw_parts(ptr, count) }
}

/// Append-only vertex/index accumulator used while a mesh is being emitted.
#[derive(Debug, Default)]
pub(crate) struct MeshBuffers {
    positions: Vec<[f64; 3]>,
    normals: Vec<[f64; 3]>,
    uvs: Vec<[f64; 2]>,
    pub(crate) indices: Vec<u32>,
}

impl MeshBuffers {
    pub(crate) fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
            uvs: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    /// Index the next pushed vertex will get.
    pub(crate) fn next_index(&self) -> u32 {
        self.positions.len() as u32
    }

    pub(crate) fn push_vertex(&mut self, position: Point3, normal: Vec3, uv: [f64; 2]) -> u32 {
        let index = self.next_index();
        self.positions.push(position.to_array());
        self.normals.push(normal.to_array());
        self.uvs.push(uv);
        index
    }

    pub(crate) fn finish(self, floor_index_count: usize) -> GeomMesh {
        let index_count = self.indices.len();
        let floor_end = floor_index_count.min(index_count);
        GeomMesh {
            positions: self.positions,
            normals: self.normals,
            uvs: self.uvs,
            indices: self.indices,
            groups: MeshGroups {
                floor: 0..floor_end,
                walls: floor_end..index_count,
            },
        }
    }
}

/// Counts open (one adjacent triangle) and non-manifold (more than two) edges.
pub(crate) fn count_edge_topology(indices: &[u32]) -> (usize, usize) {
    let mut edge_counts: HashMap<(u32, u32), u32> = HashMap::new();

    for tri in indices.chunks_exact(3) {
        let i0 = tri[0];
        let i1 = tri[1];
        let i2 = tri[2];

        if i0 == i1 || i1 == i2 || i0 == i2 {
            continue;
        }

        let edges = [(i0, i1), (i1, i2), (i2, i0)];
        for (ea, eb) in edges {
            let (lo, hi) = if ea <= eb { (ea, eb) } else { (eb, ea) };
            *edge_counts.entry((lo, hi)).or_insert(0) += 1;
        }
    }

    let mut open_edge_count = 0usize;
    let mut non_manifold_edge_count = 0usize;
    for count in edge_counts.into_values() {
        if count == 1 {
            open_edge_count += 1;
        } else if count > 2 {
            non_manifold_edge_count += 1;
        }
    }

    (open_edge_count, non_manifold_edge_count)
}

/// Counts triangles whose area is zero within `tol` (or not finite).
pub(crate) fn count_degenerate_triangles(mesh: &GeomMesh, tol: Tolerance) -> usize {
    mesh.indices
        .chunks_exact(3)
        .filter(|tri| {
            let (Some(a), Some(b), Some(c)) =
                (mesh.position(tri[0]), mesh.position(tri[1]), mesh.position(tri[2]))
            else {
                return true;
            };
            let area2 = b.sub_point(a).cross(c.sub_point(a)).length_squared();
            !area2.is_finite() || area2 <= tol.eps_squared()
        })
        .count()
}

/// Geometric normal `(b - a) x (c - a)` of one triangle, unnormalized.
#[must_use]
pub fn triangle_normal(mesh: &GeomMesh, triangle: usize) -> Option<Vec3> {
    let tri = mesh.indices.get(triangle * 3..triangle * 3 + 3)?;
    let a = mesh.position(tri[0])?;
    let b = mesh.position(tri[1])?;
    let c = mesh.position(tri[2])?;
    Some(b.sub_point(a).cross(c.sub_point(a)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::triangulation::triangulate_strip;

    fn grid_mesh(rows: usize, columns: usize) -> GeomMesh {
        let mut buffers = MeshBuffers::default();
        for row in 0..rows {
            for col in 0..columns {
                buffers.push_vertex(
                    Point3::new(col as f64, 0.0, row as f64),
                    Vec3::Y,
                    [col as f64, row as f64],
                );
            }
        }
        triangulate_strip(&mut buffers.indices, 0, rows, columns, false);
        let floor = buffers.indices.len();
        buffers.finish(floor)
    }

    #[test]
    fn grid_mesh_validates_and_faces_up() {
        let mesh = grid_mesh(3, 2);
        mesh.validate().expect("valid mesh");
        assert_eq!(mesh.triangle_count(), 4);
        assert_eq!(mesh.floor_indices().len(), 12);
        assert!(mesh.wall_indices().is_empty());
        for t in 0..mesh.triangle_count() {
            let n = triangle_normal(&mesh, t).expect("triangle");
            assert!(n.y > 0.0, "triangle {t} faces {n:?}");
        }
    }

    #[test]
    fn edge_topology_of_single_quad() {
        let mesh = grid_mesh(2, 2);
        let (open, non_manifold) = count_edge_topology(&mesh.indices);
        assert_eq!(open, 4);
        assert_eq!(non_manifold, 0);
    }

    #[test]
    fn flat_views_have_packed_lengths() {
        let mesh = grid_mesh(2, 3);
        assert_eq!(mesh.positions_flat().len(), mesh.vertex_count() * 3);
        assert_eq!(mesh.normals_flat().len(), mesh.vertex_count() * 3);
        assert_eq!(mesh.uvs_flat().len(), mesh.vertex_count() * 2);
        assert_eq!(mesh.positions_flat()[3], 1.0);
    }

    #[test]
    fn bounds_cover_all_vertices() {
        let mesh = grid_mesh(4, 3);
        let bounds = mesh.bounds().expect("non-empty");
        assert_eq!(bounds.min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(bounds.max, Point3::new(2.0, 0.0, 3.0));
        assert!(GeomMesh::empty().bounds().is_none());
    }

    #[test]
    fn collapsed_triangles_are_counted() {
        let mut buffers = MeshBuffers::default();
        for _ in 0..4 {
            buffers.push_vertex(Point3::ORIGIN, Vec3::Y, [0.0, 0.0]);
        }
        triangulate_strip(&mut buffers.indices, 0, 2, 2, false);
        let mesh = buffers.finish(6);
        assert_eq!(count_degenerate_triangles(&mesh, Tolerance::ZERO_LENGTH), 2);
    }
}
