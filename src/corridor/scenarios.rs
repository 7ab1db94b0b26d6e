//! Built-in corridor setups used by the CLI and the golden snapshots.

use crate::path::Path;

use super::options::{CorridorCaps, CorridorOptions, WallNormalMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// Floor only, no walls.
    StraightFloor,
    /// Straight, 90 degree corner, straight; single walls.
    QuarterCorner,
    /// Banked 180 degree turn with thick walls and both caps.
    BankedHairpin,
    /// Two opposite banked corners, interior floor columns.
    DoubleWallSCurve,
    /// Climbing, tilted straight with horizontal wall normals and an end cap.
    SlopedRamp,
}

impl Scenario {
    pub const ALL: &'static [Scenario] = &[
        Scenario::StraightFloor,
        Scenario::QuarterCorner,
        Scenario::BankedHairpin,
        Scenario::DoubleWallSCurve,
        Scenario::SlopedRamp,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Scenario::StraightFloor => "straight_floor",
            Scenario::QuarterCorner => "quarter_corner",
            Scenario::BankedHairpin => "banked_hairpin",
            Scenario::DoubleWallSCurve => "double_wall_s_curve",
            Scenario::SlopedRamp => "sloped_ramp",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Scenario::ALL.iter().copied().find(|scenario| scenario.name() == name)
    }

    /// Path and corridor options of the scenario.
    #[must_use]
    pub fn build(self) -> (Path, CorridorOptions) {
        let mut path = Path::new();
        let options = match self {
            Scenario::StraightFloor => {
                path.append_straight(0.0, 0.0, 10.0);
                CorridorOptions { width: 4.0, wall_height: 0.0, ..CorridorOptions::default() }
            }
            Scenario::QuarterCorner => {
                path.append_straight(0.0, 0.0, 4.0);
                path.append_corner(0.0, 0.0, 8.0, 90.0, 0.0);
                path.append_straight(0.0, 0.0, 4.0);
                CorridorOptions::default()
            }
            Scenario::BankedHairpin => {
                path.append_straight(0.0, 0.0, 3.0);
                path.append_corner(0.0, 0.0, 6.0, 180.0, 30.0);
                path.append_straight(0.0, 0.0, 3.0);
                CorridorOptions { unit_distance: 0.5, wall_width: 0.25, ..CorridorOptions::default() }
            }
            Scenario::DoubleWallSCurve => {
                path.append_corner(0.0, 0.0, 10.0, 60.0, 10.0);
                path.append_corner(0.0, 0.0, 10.0, -60.0, 10.0);
                CorridorOptions {
                    width: 5.0,
                    wall_height: 1.5,
                    wall_width: 0.3,
                    center_edge_count: 2,
                    caps: CorridorCaps::BOTH,
                    ..CorridorOptions::default()
                }
            }
            Scenario::SlopedRamp => {
                path.append_straight(-15.0, 10.0, 6.0);
                path.append_straight(0.0, 0.0, 4.0);
                CorridorOptions {
                    wall_width: 0.2,
                    wall_normal: WallNormalMode::Horizontal,
                    caps: CorridorCaps::END,
                    ..CorridorOptions::default()
                }
            }
        };
        (path, options)
    }
}
