use crate::geom::{
    GeomMesh, GeomMetrics, MeshBuffers, MeshDiagnostics, TimingBucket, Tolerance,
    count_degenerate_triangles, count_edge_topology, strip_triangle_count,
};
use crate::path::{Path, PathStamp};

use super::floor::emit_floor;
use super::options::{CorridorCaps, CorridorOptions, WallNormalMode};
use super::sampling::sample_path;
use super::walls::{emit_walls, wall_vertex_count};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CorridorError {
    #[error("invalid corridor configuration: {0}")]
    InvalidConfiguration(String),
    #[error("corridor needs {rows} sample rows, limit is {limit}")]
    SampleLimitExceeded { rows: usize, limit: usize },
    #[error("corridor needs {vertices} vertices, more than 32-bit indices can address")]
    VertexLimitExceeded { vertices: usize },
}

fn empty_with_warning(warning: &str) -> (GeomMesh, MeshDiagnostics) {
    log::debug!("corridor: {warning}");
    let mut diagnostics = MeshDiagnostics::new();
    diagnostics.add_warning(warning);
    (GeomMesh::empty(), diagnostics)
}

/// Builds the corridor mesh for `path`.
///
/// A degenerate width or unit distance, or a path shorter than one row,
/// yields an empty mesh with a warning. Non-finite options and oversized
/// sampling are errors.
pub fn build_corridor_mesh(
    path: &Path,
    options: &CorridorOptions,
) -> Result<(GeomMesh, MeshDiagnostics), CorridorError> {
    options.validate()?;

    let tol = Tolerance::default_geom();
    if tol.is_degenerate_length(options.width) {
        return Ok(empty_with_warning("corridor width is degenerate; mesh left empty"));
    }
    if tol.is_degenerate_length(options.unit_distance) {
        return Ok(empty_with_warning("unit distance is degenerate; mesh left empty"));
    }

    let mut metrics = GeomMetrics::default();
    metrics.begin();

    let rows = metrics.time(TimingBucket::Sampling, || sample_path(path, options.unit_distance))?;
    if rows.len() < 2 {
        return Ok(empty_with_warning("path is shorter than one sample row; mesh left empty"));
    }

    let walls = !tol.is_degenerate_length(options.wall_height);
    let thickness = (walls && !tol.is_degenerate_length(options.wall_width))
        .then_some(options.wall_width);

    let columns = options.floor_columns();
    let floor_vertices = rows.len() * columns;
    let wall_vertices = if walls {
        wall_vertex_count(rows.len(), thickness.is_some(), options.caps)
    } else {
        0
    };
    let vertex_count = floor_vertices + wall_vertices;
    if vertex_count > u32::MAX as usize {
        return Err(CorridorError::VertexLimitExceeded { vertices: vertex_count });
    }

    let floor_index_count = strip_triangle_count(rows.len(), columns) * 3;
    let mut buffers = MeshBuffers::with_capacity(vertex_count, floor_index_count + wall_vertices * 3);

    let edges = metrics.time(TimingBucket::Floor, || {
        emit_floor(&mut buffers, &rows, options.width, columns, options.wall_normal)
    });
    if walls {
        metrics.time(TimingBucket::Walls, || {
            emit_walls(&mut buffers, &rows, &edges, options.wall_height, thickness, options.caps);
        });
    }

    let mesh = buffers.finish(floor_index_count);

    let mut diagnostics = metrics.time(TimingBucket::Diagnostics, || {
        let (open_edge_count, non_manifold_edge_count) = count_edge_topology(&mesh.indices);
        MeshDiagnostics {
            row_count: rows.len(),
            vertex_count: mesh.vertex_count(),
            triangle_count: mesh.triangle_count(),
            floor_triangle_count: mesh.groups.floor.len() / 3,
            wall_triangle_count: mesh.groups.walls.len() / 3,
            open_edge_count,
            non_manifold_edge_count,
            degenerate_triangle_count: count_degenerate_triangles(&mesh, Tolerance::ZERO_LENGTH),
            ..MeshDiagnostics::default()
        }
    });
    if diagnostics.degenerate_triangle_count > 0 {
        diagnostics.add_warning(format!(
            "mesh has {} degenerate triangles",
            diagnostics.degenerate_triangle_count
        ));
    }
    if diagnostics.non_manifold_edge_count > 0 {
        diagnostics.add_warning("mesh has non-manifold edges");
    }
    diagnostics.timing = metrics.end();

    Ok((mesh, diagnostics))
}

/// Corridor mesh kept in sync with a path and a set of options.
///
/// The corridor never owns the path. It remembers the stamp of the path it
/// was last built from and rebuilds when the stamp or its own options change.
#[derive(Debug, Clone)]
pub struct Corridor {
    options: CorridorOptions,
    mesh: GeomMesh,
    diagnostics: MeshDiagnostics,
    seen: Option<PathStamp>,
    dirty: bool,
    rebuild_count: u64,
}

impl Default for Corridor {
    fn default() -> Self {
        Self::new(CorridorOptions::default())
    }
}

impl Corridor {
    #[must_use]
    pub fn new(options: CorridorOptions) -> Self {
        Self {
            options,
            mesh: GeomMesh::empty(),
            diagnostics: MeshDiagnostics::new(),
            seen: None,
            dirty: true,
            rebuild_count: 0,
        }
    }

    #[must_use]
    pub const fn options(&self) -> &CorridorOptions {
        &self.options
    }

    #[must_use]
    pub const fn mesh(&self) -> &GeomMesh {
        &self.mesh
    }

    #[must_use]
    pub const fn diagnostics(&self) -> &MeshDiagnostics {
        &self.diagnostics
    }

    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[must_use]
    pub const fn rebuild_count(&self) -> u64 {
        self.rebuild_count
    }

    /// Stamp of the path used by the last rebuild.
    #[must_use]
    pub const fn last_path_stamp(&self) -> Option<PathStamp> {
        self.seen
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Replaces the options; marks the corridor dirty only on a real change.
    pub fn set_options(&mut self, options: CorridorOptions) {
        if options != self.options {
            self.options = options;
            self.dirty = true;
        }
    }

    pub fn set_unit_distance(&mut self, unit_distance: f64) {
        self.set_options(CorridorOptions { unit_distance, ..self.options });
    }

    pub fn set_width(&mut self, width: f64) {
        self.set_options(CorridorOptions { width, ..self.options });
    }

    pub fn set_wall_height(&mut self, wall_height: f64) {
        self.set_options(CorridorOptions { wall_height, ..self.options });
    }

    pub fn set_wall_width(&mut self, wall_width: f64) {
        self.set_options(CorridorOptions { wall_width, ..self.options });
    }

    pub fn set_center_edge_count(&mut self, center_edge_count: usize) {
        self.set_options(CorridorOptions { center_edge_count, ..self.options });
    }

    pub fn set_wall_normal(&mut self, wall_normal: WallNormalMode) {
        self.set_options(CorridorOptions { wall_normal, ..self.options });
    }

    pub fn set_caps(&mut self, caps: CorridorCaps) {
        self.set_options(CorridorOptions { caps, ..self.options });
    }

    /// Rebuilds when the options changed or `path` is not the path (or
    /// version) the current mesh was built from. Returns whether a rebuild
    /// happened.
    pub fn rebuild_if_dirty(&mut self, path: Option<&Path>) -> Result<bool, CorridorError> {
        let stamp = path.map(Path::stamp);
        if !self.dirty && stamp == self.seen {
            return Ok(false);
        }
        self.rebuild(path)?;
        Ok(true)
    }

    /// Unconditional rebuild. On error the mesh is left empty.
    pub fn rebuild(&mut self, path: Option<&Path>) -> Result<(), CorridorError> {
        self.seen = path.map(Path::stamp);
        self.dirty = false;
        self.rebuild_count += 1;

        let result = match path {
            Some(path) => build_corridor_mesh(path, &self.options),
            None => Ok(empty_with_warning("no path attached; mesh left empty")),
        };

        match result {
            Ok((mesh, diagnostics)) => {
                log::debug!("corridor rebuild #{}: {}", self.rebuild_count, diagnostics.summary());
                self.mesh = mesh;
                self.diagnostics = diagnostics;
                Ok(())
            }
            Err(err) => {
                log::warn!("corridor rebuild #{} failed: {err}", self.rebuild_count);
                self.mesh = GeomMesh::empty();
                self.diagnostics = MeshDiagnostics::new();
                self.diagnostics.add_warning(err.to_string());
                Err(err)
            }
        }
    }
}
