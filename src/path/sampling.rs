use crate::geom::Tolerance;

/// Upper bound on rows produced by one sampling pass.
pub const MAX_SAMPLE_ROWS: usize = 1 << 20;

/// Number of rows [`sample_distances`] would produce, as a float so absurd
/// step/total ratios can be rejected before anything is allocated.
///
/// Expects a finite `total >= 0` and a finite `step > 0`.
pub(crate) fn planned_row_count(total: f64, step: f64) -> f64 {
    let tol = Tolerance::default_geom().relative_to(total);
    let regular = ((total + tol) / step).floor() + 1.0;
    let last = (regular - 1.0) * step;
    if last < total - tol { regular + 1.0 } else { regular }
}

/// Sample distances `0, step, 2*step, ...` up to `total` (with tolerance),
/// plus a final sample at exactly `total` when the regular grid falls short.
pub(crate) fn sample_distances(total: f64, step: f64) -> Vec<f64> {
    let tol = Tolerance::default_geom().relative_to(total);
    let capacity = planned_row_count(total, step).min(MAX_SAMPLE_ROWS as f64) as usize;
    let mut distances = Vec::with_capacity(capacity);

    let mut index = 0usize;
    loop {
        let distance = index as f64 * step;
        if distance > total + tol {
            break;
        }
        distances.push(distance.min(total));
        index += 1;
    }

    if distances.last().is_some_and(|&last| last < total - tol) {
        distances.push(total);
    }
    distances
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_multiple_has_no_tail() {
        let distances = sample_distances(5.0, 1.0);
        assert_eq!(distances, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(planned_row_count(5.0, 1.0), 6.0);
    }

    #[test]
    fn short_grid_gets_final_row_at_total() {
        let distances = sample_distances(5.5, 2.0);
        assert_eq!(distances, vec![0.0, 2.0, 4.0, 5.5]);
        assert_eq!(planned_row_count(5.5, 2.0), 4.0);
    }

    #[test]
    fn rounding_noise_does_not_add_a_row() {
        // 0.1 * 3 overshoots 0.3 by one ulp.
        let distances = sample_distances(0.3, 0.1);
        assert_eq!(distances.len(), 4);
        assert_eq!(*distances.last().unwrap(), 0.3);
    }

    #[test]
    fn zero_total_yields_single_row() {
        assert_eq!(sample_distances(0.0, 1.0), vec![0.0]);
        assert_eq!(planned_row_count(0.0, 1.0), 1.0);
    }
}
