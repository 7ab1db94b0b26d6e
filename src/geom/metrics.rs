//! Opt-in timing hooks for corridor rebuilds.
//!
//! Timing is only collected when the `corridor_metrics` feature is enabled and
//! the target is not WASM (`std::time::Instant` is unavailable there). In every
//! other configuration the calls compile to plain closure invocations.
//!
//! ```ignore
//! let mut metrics = GeomMetrics::default();
//! metrics.begin();
//! let rows = metrics.time(TimingBucket::Sampling, || sample_path(&path, 1.0));
//! if let Some(report) = metrics.end() {
//!     println!("sampling: {} ns", report.sampling_ns);
//! }
//! ```

use serde::Serialize;

/// Phases of a corridor rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimingBucket {
    /// Path queries at every sample distance.
    Sampling,
    /// Floor vertices and quad strip.
    Floor,
    /// Walls, top lips and end caps.
    Walls,
    /// Edge topology and degenerate triangle counting.
    Diagnostics,
}

/// Cumulative nanoseconds per rebuild phase.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct GeomTimingReport {
    pub sampling_ns: u64,
    pub floor_ns: u64,
    pub walls_ns: u64,
    pub diagnostics_ns: u64,
}

impl GeomTimingReport {
    /// Returns the total time across all buckets in nanoseconds.
    #[must_use]
    pub fn total_ns(&self) -> u64 {
        self.sampling_ns
            .saturating_add(self.floor_ns)
            .saturating_add(self.walls_ns)
            .saturating_add(self.diagnostics_ns)
    }

    /// Returns the total time in milliseconds (for display purposes).
    #[must_use]
    pub fn total_ms(&self) -> f64 {
        self.total_ns() as f64 / 1_000_000.0
    }
}

/// Accumulator for timing a rebuild.
///
/// When the `corridor_metrics` feature is disabled (or on WASM), all methods
/// are no-ops and [`end`](Self::end) returns `None`.
#[derive(Debug, Default)]
pub struct GeomMetrics {
    #[cfg(all(feature = "corridor_metrics", not(target_arch = "wasm32")))]
    report: GeomTimingReport,
}

impl GeomMetrics {
    /// Resets all timing counters to zero.
    pub fn begin(&mut self) {
        #[cfg(all(feature = "corridor_metrics", not(target_arch = "wasm32")))]
        {
            self.report = GeomTimingReport::default();
        }
    }

    /// Returns the accumulated timing report, or `None` if metrics are disabled.
    #[must_use]
    pub fn end(&self) -> Option<GeomTimingReport> {
        #[cfg(all(feature = "corridor_metrics", not(target_arch = "wasm32")))]
        {
            Some(self.report.clone())
        }
        #[cfg(not(all(feature = "corridor_metrics", not(target_arch = "wasm32"))))]
        {
            None
        }
    }

    /// Times the execution of `f` and accumulates the elapsed time in `bucket`.
    pub fn time<R>(&mut self, bucket: TimingBucket, f: impl FnOnce() -> R) -> R {
        #[cfg(all(feature = "corridor_metrics", not(target_arch = "wasm32")))]
        {
            let start = std::time::Instant::now();
            let result = f();
            let nanos = start.elapsed().as_nanos().min(u128::from(u64::MAX)) as u64;
            self.add_to_bucket(bucket, nanos);
            result
        }

        #[cfg(not(all(feature = "corridor_metrics", not(target_arch = "wasm32"))))]
        {
            let _ = bucket;
            f()
        }
    }

    #[cfg(all(feature = "corridor_metrics", not(target_arch = "wasm32")))]
    fn add_to_bucket(&mut self, bucket: TimingBucket, nanos: u64) {
        let slot = match bucket {
            TimingBucket::Sampling => &mut self.report.sampling_ns,
            TimingBucket::Floor => &mut self.report.floor_ns,
            TimingBucket::Walls => &mut self.report.walls_ns,
            TimingBucket::Diagnostics => &mut self.report.diagnostics_ns,
        };
        *slot = slot.saturating_add(nanos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_report_total() {
        let report = GeomTimingReport {
            sampling_ns: 1000,
            floor_ns: 2000,
            walls_ns: 3000,
            ..GeomTimingReport::default()
        };
        assert_eq!(report.total_ns(), 6000);
        assert!((report.total_ms() - 0.006).abs() < 1e-9);
    }

    #[test]
    fn test_time_returns_closure_result() {
        let mut metrics = GeomMetrics::default();
        metrics.begin();
        let result = metrics.time(TimingBucket::Floor, || 42);
        assert_eq!(result, 42);
    }

    #[cfg(not(all(feature = "corridor_metrics", not(target_arch = "wasm32"))))]
    #[test]
    fn test_disabled_metrics_report_nothing() {
        let mut metrics = GeomMetrics::default();
        metrics.begin();
        metrics.time(TimingBucket::Sampling, || ());
        assert!(metrics.end().is_none());
    }
}
