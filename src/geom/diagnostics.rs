//! Mesh diagnostics for corridor rebuilds.
//!
//! Diagnostics are collected after every rebuild and describe the emitted
//! buffers without modifying them: counts per drawable group, edge topology
//! and degenerate triangles. The corridor mesh is an open surface, so open
//! edges are expected; non-manifold edges are not.
//!
//! ```ignore
//! corridor.rebuild_if_dirty(Some(&path))?;
//! let diag = corridor.diagnostics();
//! println!("{}", diag.summary());
//! ```

use std::fmt;

use serde::Serialize;

use super::metrics::GeomTimingReport;

/// Diagnostics returned alongside every corridor mesh.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct MeshDiagnostics {
    /// Number of path samples (cross-section rows).
    pub row_count: usize,

    /// Total number of vertices in the mesh.
    pub vertex_count: usize,

    /// Total number of triangles in the mesh.
    pub triangle_count: usize,

    /// Triangles in the floor group.
    pub floor_triangle_count: usize,

    /// Triangles in the wall group (walls, lips and caps).
    pub wall_triangle_count: usize,

    /// Edges with exactly one adjacent triangle.
    pub open_edge_count: usize,

    /// Edges with more than two adjacent triangles.
    ///
    /// Each corridor part owns its own vertices, so anything above zero points
    /// at an indexing bug rather than at the input path.
    pub non_manifold_edge_count: usize,

    /// Zero-area triangles, e.g. where a corner radius is smaller than half
    /// the corridor width and the inner edge folds onto itself.
    ///
    /// These are reported, never removed, so the index layout stays stable.
    pub degenerate_triangle_count: usize,

    /// Optional timing breakdown (feature `corridor_metrics`, non-WASM only).
    pub timing: Option<GeomTimingReport>,

    /// Human-readable notes about degraded rebuilds.
    ///
    /// Examples:
    /// - "corridor width is degenerate; mesh left empty"
    /// - "mesh has degenerate triangles"
    pub warnings: Vec<String>,
}

impl MeshDiagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no edge is shared by more than two triangles.
    #[must_use]
    pub fn is_manifold(&self) -> bool {
        self.non_manifold_edge_count == 0
    }

    /// Returns `true` if the rebuild produced no geometry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0 && self.triangle_count == 0
    }

    /// Returns `true` if no issues were detected.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.non_manifold_edge_count == 0
            && self.degenerate_triangle_count == 0
            && self.warnings.is_empty()
    }

    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Returns a short summary string suitable for logging.
    ///
    /// Format: `"R:{rows} V:{vertices} T:{floor}+{walls} [issues...]"`
    #[must_use]
    pub fn summary(&self) -> String {
        let mut parts = vec![format!(
            "R:{} V:{} T:{}+{}",
            self.row_count, self.vertex_count, self.floor_triangle_count, self.wall_triangle_count
        )];

        if self.open_edge_count > 0 {
            parts.push(format!("open:{}", self.open_edge_count));
        }
        if self.non_manifold_edge_count > 0 {
            parts.push(format!("non-manifold:{}", self.non_manifold_edge_count));
        }
        if self.degenerate_triangle_count > 0 {
            parts.push(format!("degenerate:{}", self.degenerate_triangle_count));
        }
        if !self.warnings.is_empty() {
            parts.push(format!("warnings:{}", self.warnings.len()));
        }

        parts.join(" ")
    }
}

impl fmt::Display for MeshDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Corridor Diagnostics:")?;
        writeln!(f, "  Rows: {}", self.row_count)?;
        writeln!(f, "  Vertices: {}", self.vertex_count)?;
        writeln!(
            f,
            "  Triangles: {} (floor {}, walls {})",
            self.triangle_count, self.floor_triangle_count, self.wall_triangle_count
        )?;
        writeln!(f, "  Open edges: {}", self.open_edge_count)?;

        if self.non_manifold_edge_count > 0 {
            writeln!(f, "  Non-manifold edges: {}", self.non_manifold_edge_count)?;
        }
        if self.degenerate_triangle_count > 0 {
            writeln!(f, "  Degenerate triangles: {}", self.degenerate_triangle_count)?;
        }

        if let Some(timing) = &self.timing {
            writeln!(f, "  Timing: {:.3} ms", timing.total_ms())?;
        }

        if !self.warnings.is_empty() {
            writeln!(f, "  Warnings:")?;
            for warning in &self.warnings {
                writeln!(f, "    - {warning}")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty_and_clean() {
        let diag = MeshDiagnostics::new();
        assert!(diag.is_empty());
        assert!(diag.is_clean());
        assert!(diag.is_manifold());
    }

    #[test]
    fn test_summary_lists_issues() {
        let mut diag = MeshDiagnostics {
            row_count: 6,
            vertex_count: 12,
            triangle_count: 10,
            floor_triangle_count: 10,
            open_edge_count: 12,
            degenerate_triangle_count: 2,
            ..MeshDiagnostics::default()
        };
        diag.add_warning("mesh has degenerate triangles");

        let summary = diag.summary();
        assert!(summary.starts_with("R:6 V:12 T:10+0"));
        assert!(summary.contains("open:12"));
        assert!(summary.contains("degenerate:2"));
        assert!(summary.contains("warnings:1"));
        assert!(!diag.is_clean());
    }
}
