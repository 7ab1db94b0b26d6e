use crate::geom::Tolerance;
use crate::path::{MAX_SAMPLE_ROWS, Path, PathPoint, planned_row_count, sample_distances};

use super::CorridorError;

/// One cross-section of the corridor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRow {
    /// Distance along the path; also the V texture coordinate.
    pub distance: f64,
    pub frame: PathPoint,
}

/// Samples `path` every `unit_distance`, ending with a row at the total
/// distance even when the step does not divide it.
pub fn sample_path(path: &Path, unit_distance: f64) -> Result<Vec<SampleRow>, CorridorError> {
    if !unit_distance.is_finite() || Tolerance::default_geom().is_degenerate_length(unit_distance)
    {
        return Err(CorridorError::InvalidConfiguration(format!(
            "unit distance must be finite and > 0, got {unit_distance}"
        )));
    }

    let total = path.total_distance();
    if !total.is_finite() {
        return Err(CorridorError::InvalidConfiguration(format!(
            "path length is not finite ({total})"
        )));
    }

    let planned = planned_row_count(total, unit_distance);
    if planned > MAX_SAMPLE_ROWS as f64 {
        return Err(CorridorError::SampleLimitExceeded {
            rows: planned as usize,
            limit: MAX_SAMPLE_ROWS,
        });
    }

    Ok(sample_distances(total, unit_distance)
        .into_iter()
        .enumerate()
        .map(|(index, distance)| {
            let frame = path.point_at_distance(distance);
            log::trace!(
                "row {index} at {distance:.4}: ({:.4}, {:.4}, {:.4})",
                frame.position.x,
                frame.position.y,
                frame.position.z
            );
            SampleRow { distance, frame }
        })
        .collect())
}
