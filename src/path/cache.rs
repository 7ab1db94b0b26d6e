use serde::Serialize;

use super::evaluate::evaluate_segment;
use super::point::PathPoint;
use super::segment::Segment;

/// Counters for the lazily rebuilt breakpoint cache.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PathCacheStats {
    /// Queries answered, including those that triggered a refresh.
    pub queries: u64,
    /// Times the breakpoints were recomputed.
    pub refreshes: u64,
}

impl PathCacheStats {
    #[must_use]
    pub const fn hits(&self) -> u64 {
        self.queries.saturating_sub(self.refreshes)
    }

    /// Returns the hit rate as a fraction (0.0 to 1.0).
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        if self.queries == 0 {
            0.0
        } else {
            self.hits() as f64 / self.queries as f64
        }
    }
}

/// Breakpoints and cumulative distances for one path version.
#[derive(Debug, Clone)]
pub(crate) struct PathCache {
    pub(crate) version: u64,
    /// `segments + 1` frames; entry `i` is the start of segment `i`.
    pub(crate) breakpoints: Vec<PathPoint>,
    /// `segments + 1` running distances; entry `i` is where segment `i` starts.
    pub(crate) offsets: Vec<f64>,
}

impl PathCache {
    pub(crate) fn build(start: &PathPoint, segments: &[Segment], version: u64) -> Self {
        let mut breakpoints = Vec::with_capacity(segments.len() + 1);
        let mut offsets = Vec::with_capacity(segments.len() + 1);
        let mut frame = *start;
        let mut travelled = 0.0;

        breakpoints.push(frame);
        offsets.push(travelled);
        for segment in segments {
            frame = evaluate_segment(&frame, segment, 1.0);
            travelled += segment.length();
            breakpoints.push(frame);
            offsets.push(travelled);
        }

        Self { version, breakpoints, offsets }
    }

    pub(crate) fn total(&self) -> f64 {
        self.offsets.last().copied().unwrap_or(0.0)
    }

    pub(crate) fn last_breakpoint(&self) -> PathPoint {
        self.breakpoints.last().copied().unwrap_or_default()
    }

    /// Segment containing `distance` and the local rate within it.
    ///
    /// Distances at or before the start resolve to `(0, 0.0)`; distances at
    /// or past the end resolve to the last segment at rate `1.0`. Boundaries
    /// resolve to the start of the following segment.
    pub(crate) fn locate(&self, distance: f64) -> Option<(usize, f64)> {
        let segment_count = self.offsets.len().saturating_sub(1);
        if segment_count == 0 {
            return None;
        }
        let distance = if distance.is_nan() { 0.0 } else { distance };
        if distance <= 0.0 {
            return Some((0, 0.0));
        }
        for index in 0..segment_count {
            let begin = self.offsets[index];
            let end = self.offsets[index + 1];
            if distance < end {
                let rate = (distance - begin) / (end - begin);
                return Some((index, if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 1.0) }));
            }
        }
        Some((segment_count - 1, 1.0))
    }
}
