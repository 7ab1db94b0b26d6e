//! Text snapshots and OBJ export of corridor meshes.
//!
//! Snapshots list the path breakpoints, the options, the diagnostics and the
//! full vertex/index buffers, one record per line. Floats are quantized to
//! [`SNAPSHOT_QUANTIZE`] so tiny platform differences do not show up as diffs.

use std::fmt::Write as _;
use std::io::{self, Write};

use crate::geom::{GeomMesh, MeshDiagnostics};
use crate::path::Path;

use super::options::CorridorOptions;

pub const SNAPSHOT_QUANTIZE: f64 = 1e-6;
const SNAPSHOT_DECIMALS: usize = 6;

/// Unix line endings with exactly one trailing newline.
#[must_use]
pub fn normalize_snapshot_text(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n");
    if normalized.ends_with('\n') {
        normalized
    } else {
        format!("{normalized}\n")
    }
}

fn quantize_f64(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let q = (value / SNAPSHOT_QUANTIZE).round() * SNAPSHOT_QUANTIZE;
    // Folds -0.0 into 0.0.
    if q == 0.0 { 0.0 } else { q }
}

fn write_values_line(out: &mut String, prefix: &str, values: &[f64]) {
    out.push_str(prefix);
    for value in values {
        let _ = write!(out, " {:.SNAPSHOT_DECIMALS$}", quantize_f64(*value));
    }
    out.push('\n');
}

fn write_path(out: &mut String, path: &Path) {
    let _ = writeln!(out, "path.segment_count {}", path.segment_count());
    write_values_line(out, "path.total_distance", &[path.total_distance()]);
    for index in 0..=path.segment_count() {
        let frame = path.point_at_index(index);
        let p = frame.position;
        let r = frame.rotation;
        write_values_line(
            out,
            &format!("path.breakpoint.{index}"),
            &[p.x, p.y, p.z, r.pitch, r.yaw, r.roll],
        );
    }
}

fn write_options(out: &mut String, options: &CorridorOptions) {
    write_values_line(out, "options.unit_distance", &[options.unit_distance]);
    write_values_line(out, "options.width", &[options.width]);
    write_values_line(out, "options.wall_height", &[options.wall_height]);
    write_values_line(out, "options.wall_width", &[options.wall_width]);
    let _ = writeln!(out, "options.center_edge_count {}", options.center_edge_count);
    let _ = writeln!(out, "options.wall_normal {}", options.wall_normal);
    let _ = writeln!(out, "options.caps {} {}", options.caps.start, options.caps.end);
}

fn write_diagnostics(out: &mut String, diag: &MeshDiagnostics) {
    let _ = writeln!(out, "diag.row_count {}", diag.row_count);
    let _ = writeln!(out, "diag.vertex_count {}", diag.vertex_count);
    let _ = writeln!(out, "diag.triangle_count {}", diag.triangle_count);
    let _ = writeln!(out, "diag.floor_triangle_count {}", diag.floor_triangle_count);
    let _ = writeln!(out, "diag.wall_triangle_count {}", diag.wall_triangle_count);
    let _ = writeln!(out, "diag.open_edge_count {}", diag.open_edge_count);
    let _ = writeln!(out, "diag.non_manifold_edge_count {}", diag.non_manifold_edge_count);
    let _ = writeln!(out, "diag.degenerate_triangle_count {}", diag.degenerate_triangle_count);
    let _ = writeln!(out, "diag.warning_count {}", diag.warnings.len());
    for (idx, warning) in diag.warnings.iter().enumerate() {
        let _ = writeln!(out, "diag.warning.{idx} {warning}");
    }
}

fn write_mesh(out: &mut String, mesh: &GeomMesh) {
    let groups = &mesh.groups;
    let _ = writeln!(out, "mesh.group.floor {} {}", groups.floor.start, groups.floor.end);
    let _ = writeln!(out, "mesh.group.walls {} {}", groups.walls.start, groups.walls.end);

    let _ = writeln!(out, "mesh.positions {}", mesh.positions.len());
    for p in &mesh.positions {
        write_values_line(out, "p", p);
    }

    let _ = writeln!(out, "mesh.indices {}", mesh.indices.len());
    for tri in mesh.indices.chunks_exact(3) {
        let _ = writeln!(out, "i {} {} {}", tri[0], tri[1], tri[2]);
    }

    let _ = writeln!(out, "mesh.uvs {}", mesh.uvs.len());
    for uv in &mesh.uvs {
        write_values_line(out, "uv", uv);
    }

    let _ = writeln!(out, "mesh.normals {}", mesh.normals.len());
    for n in &mesh.normals {
        write_values_line(out, "n", n);
    }
}

/// Snapshot of one corridor build, named `name`.
#[must_use]
pub fn corridor_snapshot(
    name: &str,
    path: &Path,
    options: &CorridorOptions,
    mesh: &GeomMesh,
    diagnostics: &MeshDiagnostics,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# course-engine corridor v1");
    let _ = writeln!(out, "op {name}");
    let _ = writeln!(out, "quantize {SNAPSHOT_QUANTIZE:.1e}");
    write_path(&mut out, path);
    write_options(&mut out, options);
    write_diagnostics(&mut out, diagnostics);
    write_mesh(&mut out, mesh);
    normalize_snapshot_text(&out)
}

/// Writes `mesh` as a Wavefront OBJ object with `floor` and `walls` groups.
pub fn write_obj(w: &mut impl Write, mesh: &GeomMesh, name: &str) -> io::Result<()> {
    writeln!(w, "# course-engine corridor_cli")?;
    writeln!(w, "o {name}")?;

    for p in &mesh.positions {
        writeln!(w, "v {} {} {}", p[0], p[1], p[2])?;
    }
    for uv in &mesh.uvs {
        writeln!(w, "vt {} {}", uv[0], uv[1])?;
    }
    for n in &mesh.normals {
        writeln!(w, "vn {} {} {}", n[0], n[1], n[2])?;
    }

    for (group, indices) in [("floor", mesh.floor_indices()), ("walls", mesh.wall_indices())] {
        if indices.is_empty() {
            continue;
        }
        writeln!(w, "g {group}")?;
        for tri in indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] + 1, tri[1] + 1, tri[2] + 1];
            writeln!(w, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corridor::build_corridor_mesh;

    #[test]
    fn quantized_values_fold_negative_zero() {
        let mut out = String::new();
        write_values_line(&mut out, "v", &[-1e-9, 0.1 + 0.2, -2.5]);
        assert_eq!(out, "v 0.000000 0.300000 -2.500000\n");
    }

    #[test]
    fn normalize_adds_single_trailing_newline() {
        assert_eq!(normalize_snapshot_text("a\r\nb"), "a\nb\n");
        assert_eq!(normalize_snapshot_text("a\n"), "a\n");
    }

    #[test]
    fn snapshot_header_and_sections() {
        let mut path = Path::new();
        path.append_straight(0.0, 0.0, 2.0);
        let options = CorridorOptions { wall_height: 0.0, ..CorridorOptions::default() };
        let (mesh, diag) = build_corridor_mesh(&path, &options).expect("build");

        let snap = corridor_snapshot("short", &path, &options, &mesh, &diag);
        let lines: Vec<&str> = snap.lines().collect();
        assert_eq!(&lines[..3], &["# course-engine corridor v1", "op short", "quantize 1.0e-6"]);
        assert!(lines.contains(&"path.breakpoint.1 0.000000 0.000000 2.000000 0.000000 0.000000 0.000000"));
        assert!(lines.contains(&"diag.row_count 3"));
        assert!(lines.contains(&"mesh.group.floor 0 12"));
        assert!(lines.contains(&"i 0 2 1"));
        assert_eq!(lines.iter().filter(|line| line.starts_with("p ")).count(), 6);
    }

    #[test]
    fn obj_groups_use_one_based_indices() {
        let mut path = Path::new();
        path.append_straight(0.0, 0.0, 1.0);
        let (mesh, _) = build_corridor_mesh(&path, &CorridorOptions::default()).expect("build");

        let mut bytes = Vec::new();
        write_obj(&mut bytes, &mesh, "unit").expect("write obj");
        let text = String::from_utf8(bytes).expect("utf8");

        assert!(text.starts_with("# course-engine corridor_cli\no unit\n"));
        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), mesh.vertex_count());
        assert_eq!(text.lines().filter(|l| l.starts_with("f ")).count(), mesh.triangle_count());
        assert!(text.contains("g floor\nf 1/1/1 3/3/3 2/2/2\n"));
        assert!(text.contains("g walls\n"));
    }
}
