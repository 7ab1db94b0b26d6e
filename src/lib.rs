#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod corridor;
pub mod geom;
pub mod parse;
pub mod path;

use std::fmt;

use corridor::{Corridor, CorridorCaps, CorridorOptions, WallNormalMode};
use path::{Path, PathPoint, Segment};
use serde::Serialize;
use wasm_bindgen::prelude::*;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            // no-op fallback when panic hook is disabled
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    // A second `initialize` keeps the logger that is already installed.
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // no-op fallback when debug logs are disabled
}

#[derive(Debug, Serialize)]
struct PointExport {
    position: [f64; 3],
    /// `[pitch, yaw, roll]` in degrees.
    rotation: [f64; 3],
    forward: [f64; 3],
    right: [f64; 3],
    normal: [f64; 3],
}

impl From<PathPoint> for PointExport {
    fn from(point: PathPoint) -> Self {
        Self {
            position: point.position.to_array(),
            rotation: [point.rotation.pitch, point.rotation.yaw, point.rotation.roll],
            forward: point.forward.to_array(),
            right: point.right.to_array(),
            normal: point.normal.to_array(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SegmentExport {
    kind: &'static str,
    slope: f64,
    tilt: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    angle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bank: Option<f64>,
    length: f64,
    valid: bool,
}

impl From<&Segment> for SegmentExport {
    fn from(segment: &Segment) -> Self {
        let corner = matches!(segment.kind(), path::SegmentKind::Corner);
        Self {
            kind: if corner { "corner" } else { "straight" },
            slope: segment.slope(),
            tilt: segment.tilt(),
            distance: (!corner).then(|| segment.distance()),
            radius: corner.then(|| segment.radius()),
            angle: corner.then(|| segment.angle()),
            bank: corner.then(|| segment.bank()),
            length: segment.length(),
            valid: segment.is_valid(),
        }
    }
}

/// Flat buffers ready for a `BufferGeometry`: three floats per position and
/// normal, two per uv, and `[start, end)` index ranges for the two groups.
#[derive(Debug, Serialize)]
struct MeshExport<'a> {
    positions: &'a [f64],
    normals: &'a [f64],
    uvs: &'a [f64],
    indices: &'a [u32],
    floor: [usize; 2],
    walls: [usize; 2],
}

/// Public entry point for consumers.
#[wasm_bindgen]
pub struct Engine {
    initialized: bool,
    path: Path,
    corridor: Corridor,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Engine {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Engine {
        Engine {
            initialized: true,
            path: Path::new(),
            corridor: Corridor::default(),
        }
    }

    /// Whether the engine went through its minimal setup.
    #[wasm_bindgen]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Replaces the path and the corridor settings with a course document.
    ///
    /// On a parse error the current course is left untouched.
    #[wasm_bindgen]
    pub fn load_course(&mut self, xml: &str) -> Result<(), JsValue> {
        let course = parse::parse_str(xml).map_err(to_js_error)?;
        log::debug!(
            "loaded course: {} segments, {:.3} units",
            course.path.segment_count(),
            course.path.total_distance()
        );
        self.path = course.path;
        self.corridor.set_options(course.corridor);
        Ok(())
    }

    /// Sets the frame the first segment starts from.
    #[wasm_bindgen]
    pub fn set_start(&mut self, x: f64, y: f64, z: f64, pitch: f64, yaw: f64, roll: f64) {
        self.path
            .set_start(PathPoint::from_euler(x, y, z, pitch, yaw, roll));
    }

    /// Appends a straight segment and returns its index.
    #[wasm_bindgen]
    pub fn append_straight(&mut self, slope: f64, tilt: f64, distance: f64) -> usize {
        self.path.append_straight(slope, tilt, distance);
        self.path.segment_count() - 1
    }

    /// Appends a corner segment and returns its index.
    #[wasm_bindgen]
    pub fn append_corner(
        &mut self,
        slope: f64,
        tilt: f64,
        radius: f64,
        angle: f64,
        bank: f64,
    ) -> usize {
        self.path.append_corner(slope, tilt, radius, angle, bank);
        self.path.segment_count() - 1
    }

    /// Overwrites the shared fields of a segment. Values that do not apply
    /// to the segment's kind are stored but ignored by evaluation.
    #[wasm_bindgen]
    #[allow(clippy::too_many_arguments)]
    pub fn update_segment(
        &mut self,
        index: usize,
        slope: f64,
        tilt: f64,
        distance: f64,
        radius: f64,
        angle: f64,
        bank: f64,
    ) -> Result<(), JsValue> {
        let segment = self
            .path
            .segment_mut(index)
            .ok_or_else(|| js_error(&format!("segment {index} does not exist")))?;
        segment
            .set_slope(slope)
            .set_tilt(tilt)
            .set_distance(distance)
            .set_radius(radius)
            .set_angle(angle)
            .set_bank(bank);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn remove_segment(&mut self, index: usize) -> Result<(), JsValue> {
        self.path
            .remove_segment(index)
            .map(|_| ())
            .ok_or_else(|| js_error(&format!("segment {index} does not exist")))
    }

    /// Removes every segment; the start frame is kept.
    #[wasm_bindgen]
    pub fn clear_segments(&mut self) {
        self.path.clear();
    }

    #[wasm_bindgen]
    pub fn segment_count(&self) -> usize {
        self.path.segment_count()
    }

    #[wasm_bindgen]
    pub fn total_distance(&self) -> f64 {
        self.path.total_distance()
    }

    #[wasm_bindgen]
    pub fn get_segments(&self) -> Result<JsValue, JsValue> {
        let segments: Vec<SegmentExport> =
            self.path.segments().iter().map(SegmentExport::from).collect();
        serde_wasm_bindgen::to_value(&segments).map_err(to_js_error)
    }

    /// Frame at an arc-length distance, clamped to the path.
    #[wasm_bindgen]
    pub fn point_at_distance(&self, distance: f64) -> Result<JsValue, JsValue> {
        let point = PointExport::from(self.path.point_at_distance(distance));
        serde_wasm_bindgen::to_value(&point).map_err(to_js_error)
    }

    /// Frame at a normalized progress in `[0, 1]`.
    #[wasm_bindgen]
    pub fn point_at(&self, rate: f64) -> Result<JsValue, JsValue> {
        let point = PointExport::from(self.path.point_at(rate));
        serde_wasm_bindgen::to_value(&point).map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn set_unit_distance(&mut self, unit_distance: f64) {
        self.corridor.set_unit_distance(unit_distance);
    }

    #[wasm_bindgen]
    pub fn set_width(&mut self, width: f64) {
        self.corridor.set_width(width);
    }

    #[wasm_bindgen]
    pub fn set_wall_height(&mut self, wall_height: f64) {
        self.corridor.set_wall_height(wall_height);
    }

    #[wasm_bindgen]
    pub fn set_wall_width(&mut self, wall_width: f64) {
        self.corridor.set_wall_width(wall_width);
    }

    #[wasm_bindgen]
    pub fn set_center_edge_count(&mut self, count: u32) {
        self.corridor.set_center_edge_count(count as usize);
    }

    /// Accepts `"floor-edge"` or `"horizontal"`.
    #[wasm_bindgen]
    pub fn set_wall_normal(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode = mode.trim().parse::<WallNormalMode>().map_err(|err| js_error(&err))?;
        self.corridor.set_wall_normal(mode);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn set_caps(&mut self, start: bool, end: bool) {
        self.corridor.set_caps(CorridorCaps { start, end });
    }

    /// Rebuilds the corridor when the path or the options changed.
    ///
    /// Returns `true` when new geometry was produced.
    #[wasm_bindgen]
    pub fn rebuild(&mut self) -> Result<bool, JsValue> {
        self.corridor
            .rebuild_if_dirty(Some(&self.path))
            .map_err(to_js_error)
    }

    /// Mesh buffers of the last rebuild.
    #[wasm_bindgen]
    pub fn get_mesh(&self) -> Result<JsValue, JsValue> {
        if self.corridor.last_path_stamp().is_none() {
            return Err(js_error("corridor has not been built yet"));
        }

        let mesh = self.corridor.mesh();
        let export = MeshExport {
            positions: mesh.positions_flat(),
            normals: mesh.normals_flat(),
            uvs: mesh.uvs_flat(),
            indices: &mesh.indices,
            floor: [mesh.groups.floor.start, mesh.groups.floor.end],
            walls: [mesh.groups.walls.start, mesh.groups.walls.end],
        };
        serde_wasm_bindgen::to_value(&export).map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn get_diagnostics(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.corridor.diagnostics())
            .map_err(to_js_error)
    }

    /// One-line description of the last rebuild.
    #[wasm_bindgen]
    pub fn mesh_summary(&self) -> String {
        self.corridor.diagnostics().summary()
    }
}

impl Engine {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn corridor(&self) -> &Corridor {
        &self.corridor
    }

    pub fn corridor_options(&self) -> CorridorOptions {
        *self.corridor.options()
    }
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        wasm_bindgen::JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        JsValue::NULL
    }
}
