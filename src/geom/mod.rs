mod core;
mod diagnostics;
mod mesh;
mod metrics;
mod triangulation;

pub use self::core::{BBox, EulerAngles, Point3, Tolerance, Transform, Vec3};
pub use diagnostics::MeshDiagnostics;
pub use mesh::{GeomMesh, MeshGroups, triangle_normal};
pub use metrics::{GeomMetrics, GeomTimingReport, TimingBucket};
pub use triangulation::{push_quad, strip_triangle_count, triangulate_strip};

pub(crate) use mesh::{MeshBuffers, count_degenerate_triangles, count_edge_topology};
