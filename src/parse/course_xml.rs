//! Reader for course XML documents.
//!
//! ```xml
//! <course>
//!   <start x="0" y="0" z="0" pitch="0" yaw="0" roll="0"/>
//!   <corridor unit-distance="1" width="4" wall-height="1" wall-width="0.25"
//!             center-edges="0" wall-normal="floor-edge" start-cap="true" end-cap="true"/>
//!   <segments>
//!     <straight slope="0" tilt="0" distance="10"/>
//!     <corner slope="0" tilt="0" radius="10" angle="90" bank="15"/>
//!   </segments>
//! </course>
//! ```
//!
//! Missing attributes fall back to zero (start frame, segments) or to
//! [`CorridorOptions::default`]. Segment values go through the regular
//! setters, so out-of-range values are clamped rather than rejected.

use quick_xml::de::from_str;
use serde::Deserialize;
use thiserror::Error;

use crate::corridor::{CorridorCaps, CorridorOptions, WallNormalMode};
use crate::path::{Path, PathPoint, Segment};

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Debug, Error)]
pub enum ParseError {
    /// The document is not well-formed or does not match the course layout.
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::DeError),
    /// The document parsed but describes something unusable.
    #[error("invalid course: {0}")]
    Course(String),
}

/// A parsed course: the path plus the corridor settings to build along it.
#[derive(Debug, Clone)]
pub struct Course {
    pub path: Path,
    pub corridor: CorridorOptions,
}

/// Parses a `<course>` document.
pub fn parse_str(input: &str) -> ParseResult<Course> {
    let body = strip_xml_preamble(input);
    if !body.starts_with("<course") {
        return Err(ParseError::Course("expected a <course> root element".to_owned()));
    }

    let document: CourseDocument = from_str(input)?;
    log::debug!(
        "course document: {} segments, corridor settings {}",
        document.segments.items.len(),
        if document.corridor.is_some() { "present" } else { "defaulted" }
    );

    let start = document.start.unwrap_or_default().into_point();
    let mut path = Path::with_start(start);
    for item in document.segments.items {
        path.push_segment(item.into_segment());
    }

    let corridor = match document.corridor {
        Some(corridor) => corridor.into_options()?,
        None => CorridorOptions::default(),
    };

    Ok(Course { path, corridor })
}

fn strip_xml_preamble(input: &str) -> &str {
    let trimmed = input.trim_start_matches(|c: char| c == '\u{feff}' || c.is_whitespace());
    if let Some(rest) = trimmed.strip_prefix("<?xml") {
        if let Some(idx) = rest.find("?>") {
            return rest[idx + 2..].trim_start();
        }
    }
    trimmed
}

#[derive(Debug, Deserialize)]
struct CourseDocument {
    #[serde(default)]
    start: Option<XmlStart>,
    #[serde(default)]
    corridor: Option<XmlCorridor>,
    segments: XmlSegments,
}

#[derive(Debug, Default, Deserialize)]
struct XmlStart {
    #[serde(default, rename = "@x")]
    x: f64,
    #[serde(default, rename = "@y")]
    y: f64,
    #[serde(default, rename = "@z")]
    z: f64,
    #[serde(default, rename = "@pitch")]
    pitch: f64,
    #[serde(default, rename = "@yaw")]
    yaw: f64,
    #[serde(default, rename = "@roll")]
    roll: f64,
}

impl XmlStart {
    fn into_point(self) -> PathPoint {
        PathPoint::from_euler(self.x, self.y, self.z, self.pitch, self.yaw, self.roll)
    }
}

#[derive(Debug, Deserialize)]
struct XmlCorridor {
    #[serde(default, rename = "@unit-distance")]
    unit_distance: Option<f64>,
    #[serde(default, rename = "@width")]
    width: Option<f64>,
    #[serde(default, rename = "@wall-height")]
    wall_height: Option<f64>,
    #[serde(default, rename = "@wall-width")]
    wall_width: Option<f64>,
    #[serde(default, rename = "@center-edges")]
    center_edges: Option<usize>,
    #[serde(default, rename = "@wall-normal")]
    wall_normal: Option<String>,
    #[serde(default, rename = "@start-cap")]
    start_cap: Option<bool>,
    #[serde(default, rename = "@end-cap")]
    end_cap: Option<bool>,
}

impl XmlCorridor {
    fn into_options(self) -> ParseResult<CorridorOptions> {
        let defaults = CorridorOptions::default();
        let wall_normal = match self.wall_normal.as_deref() {
            Some(name) => name.parse::<WallNormalMode>().map_err(ParseError::Course)?,
            None => defaults.wall_normal,
        };
        Ok(CorridorOptions {
            unit_distance: self.unit_distance.unwrap_or(defaults.unit_distance),
            width: self.width.unwrap_or(defaults.width),
            wall_height: self.wall_height.unwrap_or(defaults.wall_height),
            wall_width: self.wall_width.unwrap_or(defaults.wall_width),
            center_edge_count: self.center_edges.unwrap_or(defaults.center_edge_count),
            wall_normal,
            caps: CorridorCaps {
                start: self.start_cap.unwrap_or(defaults.caps.start),
                end: self.end_cap.unwrap_or(defaults.caps.end),
            },
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct XmlSegments {
    #[serde(default, rename = "$value")]
    items: Vec<XmlSegment>,
}

#[derive(Debug, Deserialize)]
enum XmlSegment {
    #[serde(rename = "straight")]
    Straight(XmlStraight),
    #[serde(rename = "corner")]
    Corner(XmlCorner),
}

#[derive(Debug, Deserialize)]
struct XmlStraight {
    #[serde(default, rename = "@slope")]
    slope: f64,
    #[serde(default, rename = "@tilt")]
    tilt: f64,
    #[serde(default, rename = "@distance")]
    distance: f64,
}

#[derive(Debug, Deserialize)]
struct XmlCorner {
    #[serde(default, rename = "@slope")]
    slope: f64,
    #[serde(default, rename = "@tilt")]
    tilt: f64,
    #[serde(default, rename = "@radius")]
    radius: f64,
    #[serde(default, rename = "@angle")]
    angle: f64,
    #[serde(default, rename = "@bank")]
    bank: f64,
}

impl XmlSegment {
    fn into_segment(self) -> Segment {
        match self {
            Self::Straight(s) => Segment::straight(s.slope, s.tilt, s.distance),
            Self::Corner(c) => Segment::corner(c.slope, c.tilt, c.radius, c.angle, c.bank),
        }
    }
}
