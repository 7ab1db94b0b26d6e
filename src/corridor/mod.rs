//! Corridor mesh generation along a [`Path`](crate::path::Path).
//!
//! The path is sampled into cross-section rows every `unit_distance`. Each
//! row contributes a floor line (two edge vertices plus optional interior
//! columns) and, when enabled, wall, lip and cap vertices. Floor triangles
//! come first in the index buffer, everything else follows; the two ranges
//! are exposed as [`MeshGroups`](crate::geom::MeshGroups).
//!
//! ```ignore
//! let mut corridor = Corridor::new(CorridorOptions { width: 6.0, ..Default::default() });
//! corridor.rebuild_if_dirty(Some(&path))?;
//! let floor = corridor.mesh().floor_indices();
//! ```

mod builder;
mod floor;
mod options;
mod sampling;
mod scenarios;
mod snapshot;
mod walls;

pub use builder::{Corridor, CorridorError, build_corridor_mesh};
pub use options::{CorridorCaps, CorridorOptions, MAX_CENTER_EDGES, WallNormalMode};
pub use sampling::{SampleRow, sample_path};
pub use scenarios::Scenario;
pub use snapshot::{SNAPSHOT_QUANTIZE, corridor_snapshot, normalize_snapshot_text, write_obj};
