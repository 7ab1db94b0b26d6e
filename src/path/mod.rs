//! Segment-based path model and evaluator.
//!
//! A [`Path`] is a start frame followed by [`Segment`]s. Queries walk the
//! segments using cached breakpoints (the frame at every segment boundary)
//! and evaluate the one segment that contains the requested distance.
//!
//! ```ignore
//! let mut path = Path::new();
//! path.append_straight(0.0, 0.0, 10.0);
//! path.append_corner(0.0, 0.0, 10.0, 90.0, 15.0);
//! let mid = path.point_at(0.5);
//! ```

mod cache;
mod evaluate;
mod evaluator;
mod point;
mod sampling;
mod segment;

pub use cache::PathCacheStats;
pub use evaluate::{evaluate_segment, vertical_drop};
pub use evaluator::{Path, PathStamp};
pub use point::PathPoint;
pub use sampling::MAX_SAMPLE_ROWS;
pub use segment::{MAX_ANGLE, MAX_BANK, MAX_SLOPE, Segment, SegmentKind};

pub(crate) use sampling::{planned_row_count, sample_distances};

#[cfg(test)]
mod tests;
