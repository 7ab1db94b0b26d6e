//! Index generation for row-major quad strips.
//!
//! Every helper emits quads as two triangles in the same order:
//! `(a, b, c)` and `(c, b, d)`, where `a`/`c` are consecutive vertices of the
//! previous row and `b`/`d` the matching vertices of the current row. With
//! rows advancing along +Z and columns along +X the front face points +Y
//! (`(b - a) x (c - a)`). `reverse` flips every triangle.

/// Appends one quad (two triangles) to `indices`.
pub fn push_quad(indices: &mut Vec<u32>, a: u32, b: u32, c: u32, d: u32, reverse: bool) {
    if reverse {
        indices.extend_from_slice(&[a, c, b]);
        indices.extend_from_slice(&[c, d, b]);
    } else {
        indices.extend_from_slice(&[a, b, c]);
        indices.extend_from_slice(&[c, b, d]);
    }
}

/// Connects `row_count` rows of `columns` vertices each, stored row-major from
/// `base`, with a quad strip.
///
/// Emits `(row_count - 1) * (columns - 1) * 2` triangles; fewer than two rows
/// or columns emit nothing.
pub fn triangulate_strip(
    indices: &mut Vec<u32>,
    base: u32,
    row_count: usize,
    columns: usize,
    reverse: bool,
) {
    if row_count < 2 || columns < 2 {
        return;
    }

    indices.reserve(strip_triangle_count(row_count, columns) * 3);
    let stride = columns as u32;
    for row in 1..row_count as u32 {
        let prev = base + (row - 1) * stride;
        let cur = base + row * stride;
        for col in 0..stride - 1 {
            push_quad(
                indices,
                prev + col,
                cur + col,
                prev + col + 1,
                cur + col + 1,
                reverse,
            );
        }
    }
}

/// Triangle count produced by [`triangulate_strip`].
#[must_use]
pub const fn strip_triangle_count(row_count: usize, columns: usize) -> usize {
    if row_count < 2 || columns < 2 {
        0
    } else {
        (row_count - 1) * (columns - 1) * 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_matches_row_pattern() {
        let mut indices = Vec::new();
        triangulate_strip(&mut indices, 0, 2, 2, false);
        // prev row = [0, 1], current row = [2, 3]
        assert_eq!(indices, vec![0, 2, 1, 1, 2, 3]);
    }

    #[test]
    fn strip_respects_base_and_columns() {
        let mut indices = Vec::new();
        triangulate_strip(&mut indices, 10, 3, 3, false);
        assert_eq!(indices.len(), strip_triangle_count(3, 3) * 3);
        assert_eq!(indices.len(), 8 * 3);
        assert_eq!(&indices[..6], &[10, 13, 11, 11, 13, 14]);
        assert_eq!(*indices.iter().max().unwrap(), 18);
    }

    #[test]
    fn reverse_flips_each_triangle() {
        let mut forward = Vec::new();
        let mut reversed = Vec::new();
        push_quad(&mut forward, 0, 1, 2, 3, false);
        push_quad(&mut reversed, 0, 1, 2, 3, true);

        for (f, r) in forward.chunks_exact(3).zip(reversed.chunks_exact(3)) {
            assert_eq!(f[0], r[0]);
            assert_eq!(f[1], r[2]);
            assert_eq!(f[2], r[1]);
        }
    }

    #[test]
    fn short_strips_emit_nothing() {
        let mut indices = Vec::new();
        triangulate_strip(&mut indices, 0, 1, 4, false);
        triangulate_strip(&mut indices, 0, 5, 1, false);
        assert!(indices.is_empty());
        assert_eq!(strip_triangle_count(1, 4), 0);
    }
}
