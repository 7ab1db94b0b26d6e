use std::cell::{Cell, RefCell};
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::geom::Tolerance;

use super::cache::{PathCache, PathCacheStats};
use super::evaluate::evaluate_segment;
use super::point::PathPoint;
use super::sampling::{MAX_SAMPLE_ROWS, planned_row_count, sample_distances};
use super::segment::Segment;

static NEXT_PATH_ID: AtomicU64 = AtomicU64::new(1);

fn next_path_id() -> u64 {
    NEXT_PATH_ID.fetch_add(1, Ordering::Relaxed)
}

/// Identity and revision of a path, used by dependents for change detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PathStamp {
    pub id: u64,
    pub version: u64,
}

/// Ordered segments following a start frame.
///
/// Every mutation bumps `version`; breakpoints are recomputed lazily on the
/// next query whose cached version differs. The cache lives behind
/// `RefCell`, so a `Path` is `!Sync` and queries must not be shared across
/// threads without external synchronization.
#[derive(Debug)]
pub struct Path {
    id: u64,
    start: PathPoint,
    segments: Vec<Segment>,
    version: u64,
    cache: RefCell<Option<PathCache>>,
    stats: Cell<PathCacheStats>,
}

impl Default for Path {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Path {
    /// Clones segments and start frame under a fresh id.
    fn clone(&self) -> Self {
        Self {
            id: next_path_id(),
            start: self.start,
            segments: self.segments.clone(),
            version: self.version,
            cache: RefCell::new(None),
            stats: Cell::new(PathCacheStats::default()),
        }
    }
}

impl Path {
    #[must_use]
    pub fn new() -> Self {
        Self::with_start(PathPoint::default())
    }

    #[must_use]
    pub fn with_start(start: PathPoint) -> Self {
        Self {
            id: next_path_id(),
            start,
            segments: Vec::new(),
            version: 0,
            cache: RefCell::new(None),
            stats: Cell::new(PathCacheStats::default()),
        }
    }

    // ─── Identity ───────────────────────────────────────────────────────────

    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    #[must_use]
    pub const fn stamp(&self) -> PathStamp {
        PathStamp { id: self.id, version: self.version }
    }

    #[must_use]
    pub fn cache_stats(&self) -> PathCacheStats {
        self.stats.get()
    }

    fn touch(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    // ─── Authoring ──────────────────────────────────────────────────────────

    pub fn set_start(&mut self, start: PathPoint) {
        self.start = start;
        self.touch();
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    /// Mutable access to one segment. Counts as a mutation even if the caller
    /// ends up not changing anything.
    pub fn segment_mut(&mut self, index: usize) -> Option<&mut Segment> {
        if index >= self.segments.len() {
            return None;
        }
        self.touch();
        self.segments.get_mut(index)
    }

    pub fn push_segment(&mut self, segment: Segment) -> &mut Segment {
        let index = self.segments.len();
        self.insert_segment(index, segment)
    }

    pub fn append_straight(&mut self, slope: f64, tilt: f64, distance: f64) -> &mut Segment {
        self.push_segment(Segment::straight(slope, tilt, distance))
    }

    pub fn append_corner(
        &mut self,
        slope: f64,
        tilt: f64,
        radius: f64,
        angle: f64,
        bank: f64,
    ) -> &mut Segment {
        self.push_segment(Segment::corner(slope, tilt, radius, angle, bank))
    }

    /// Inserts `segment` before `index`; indices past the end append.
    pub fn insert_segment(&mut self, index: usize, segment: Segment) -> &mut Segment {
        let index = index.min(self.segments.len());
        self.segments.insert(index, segment);
        self.touch();
        &mut self.segments[index]
    }

    pub fn remove_segment(&mut self, index: usize) -> Option<Segment> {
        if index >= self.segments.len() {
            return None;
        }
        let removed = self.segments.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.segments.clear();
        self.touch();
    }

    // ─── Queries ────────────────────────────────────────────────────────────

    fn with_cache<R>(&self, f: impl FnOnce(&PathCache) -> R) -> R {
        let mut slot = self.cache.borrow_mut();
        if slot.as_ref().is_some_and(|cache| cache.version != self.version) {
            *slot = None;
        }

        let mut refreshed = false;
        let cache = slot.get_or_insert_with(|| {
            refreshed = true;
            PathCache::build(&self.start, &self.segments, self.version)
        });

        let mut stats = self.stats.get();
        stats.queries += 1;
        if refreshed {
            stats.refreshes += 1;
            log::debug!(
                "path {} v{}: {} breakpoints, total distance {:.4}",
                self.id,
                self.version,
                cache.breakpoints.len(),
                cache.total()
            );
        }
        self.stats.set(stats);

        f(cache)
    }

    #[must_use]
    pub fn start_point(&self) -> PathPoint {
        self.start
    }

    /// Sum of all segment lengths.
    #[must_use]
    pub fn total_distance(&self) -> f64 {
        self.with_cache(PathCache::total)
    }

    /// Number of cached breakpoints (`segment_count() + 1`).
    #[must_use]
    pub fn breakpoint_count(&self) -> usize {
        self.with_cache(|cache| cache.breakpoints.len())
    }

    /// Frame at `distance` along the path.
    ///
    /// Distances at or before the start return the start frame, distances at
    /// or past the end return the last breakpoint. Segment boundaries return
    /// cached breakpoints exactly.
    #[must_use]
    pub fn point_at_distance(&self, distance: f64) -> PathPoint {
        self.with_cache(|cache| match cache.locate(distance) {
            None => cache.last_breakpoint(),
            Some((index, rate)) if rate <= 0.0 => cache.breakpoints[index],
            Some((index, rate)) if rate >= 1.0 => cache.breakpoints[index + 1],
            Some((index, rate)) => {
                evaluate_segment(&cache.breakpoints[index], &self.segments[index], rate)
            }
        })
    }

    /// Frame at normalized progress `rate` (`0` start, `1` end).
    #[must_use]
    pub fn point_at(&self, rate: f64) -> PathPoint {
        let total = self.total_distance();
        self.point_at_distance(rate * total)
    }

    /// Breakpoint `index`, clamped to `0..=segment_count()`.
    #[must_use]
    pub fn point_at_index(&self, index: usize) -> PathPoint {
        self.with_cache(|cache| {
            let last = cache.breakpoints.len().saturating_sub(1);
            cache.breakpoints.get(index.min(last)).copied().unwrap_or(self.start)
        })
    }

    /// Segment containing `distance` and the local rate in `[0, 1]`.
    ///
    /// A distance on a boundary resolves to the start of the next segment;
    /// `None` for a path without segments.
    #[must_use]
    pub fn segment_at_distance(&self, distance: f64) -> Option<(usize, f64)> {
        self.with_cache(|cache| cache.locate(distance))
    }

    /// Distance along the path where segment `index` begins.
    #[must_use]
    pub fn segment_start_distance(&self, index: usize) -> Option<f64> {
        if index >= self.segments.len() {
            return None;
        }
        self.with_cache(|cache| cache.offsets.get(index).copied())
    }

    /// Frames every `step` along the path, plus one at the very end when the
    /// step does not divide the total. Empty for a non-positive or
    /// non-finite step.
    #[must_use]
    pub fn sample_points(&self, step: f64) -> Vec<PathPoint> {
        if !step.is_finite() || Tolerance::default_geom().is_degenerate_length(step) {
            return Vec::new();
        }
        let total = self.total_distance();
        if planned_row_count(total, step) > MAX_SAMPLE_ROWS as f64 {
            log::warn!("path {}: sampling step {step} is too fine for length {total}", self.id);
            return Vec::new();
        }
        sample_distances(total, step)
            .into_iter()
            .map(|distance| self.point_at_distance(distance))
            .collect()
    }
}
