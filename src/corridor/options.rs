use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::CorridorError;

/// Upper bound on interior floor columns.
pub const MAX_CENTER_EDGES: usize = 1024;

/// How the lateral wall direction is derived from the floor edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WallNormalMode {
    /// Right-most minus left-most floor vertex; follows slope and roll.
    #[default]
    FloorEdge,
    /// The floor-edge direction projected onto the ground plane.
    Horizontal,
}

impl WallNormalMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FloorEdge => "floor-edge",
            Self::Horizontal => "horizontal",
        }
    }
}

impl fmt::Display for WallNormalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WallNormalMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "floor-edge" | "flooredge" | "floor" => Ok(Self::FloorEdge),
            "horizontal" | "flat" => Ok(Self::Horizontal),
            other => Err(format!("unknown wall normal mode `{other}`")),
        }
    }
}

/// Which ends of a double wall get a closing cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorridorCaps {
    pub start: bool,
    pub end: bool,
}

impl CorridorCaps {
    pub const NONE: Self = Self { start: false, end: false };
    pub const START: Self = Self { start: true, end: false };
    pub const END: Self = Self { start: false, end: true };
    pub const BOTH: Self = Self { start: true, end: true };
}

impl Default for CorridorCaps {
    fn default() -> Self {
        Self::BOTH
    }
}

/// Options for corridor mesh generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorridorOptions {
    /// Distance between consecutive cross-section rows.
    pub unit_distance: f64,
    /// Floor width, centered on the path.
    pub width: f64,
    /// Wall height along the frame normal; `<= eps` disables walls.
    pub wall_height: f64,
    /// Wall thickness; `> eps` adds outer walls, top lips and caps.
    pub wall_width: f64,
    /// Interior floor columns between the two edges.
    pub center_edge_count: usize,
    pub wall_normal: WallNormalMode,
    pub caps: CorridorCaps,
}

impl Default for CorridorOptions {
    fn default() -> Self {
        Self {
            unit_distance: 1.0,
            width: 4.0,
            wall_height: 1.0,
            wall_width: 0.0,
            center_edge_count: 0,
            wall_normal: WallNormalMode::default(),
            caps: CorridorCaps::default(),
        }
    }
}

impl CorridorOptions {
    /// Vertices per floor row.
    #[must_use]
    pub const fn floor_columns(&self) -> usize {
        self.center_edge_count + 2
    }

    /// Rejects values no rebuild can make sense of. Degenerate but finite
    /// sizes are not errors; they produce an empty mesh or skip walls.
    pub fn validate(&self) -> Result<(), CorridorError> {
        let fields = [
            ("unit distance", self.unit_distance),
            ("width", self.width),
            ("wall height", self.wall_height),
            ("wall width", self.wall_width),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(CorridorError::InvalidConfiguration(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        if self.center_edge_count > MAX_CENTER_EDGES {
            return Err(CorridorError::InvalidConfiguration(format!(
                "center edge count {} exceeds {MAX_CENTER_EDGES}",
                self.center_edge_count
            )));
        }
        Ok(())
    }
}
