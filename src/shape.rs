//! Anti-diagonal coordinate transform.
//!
//! The rectangular DP grid has rows `0..=dominant_len` and columns
//! `0..=secondary_len`. Line `L` holds every cell with `row + col == L`,
//! ordered by increasing column. With `dominant_len >= secondary_len` the line
//! lengths grow by one up to `secondary_len + 1`, stay flat while the line
//! crosses the full width, then shrink back to one.

/// Geometry of the folded table for one normalized sequence pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagonalShape {
    dominant_len: usize,
    secondary_len: usize,
}

impl DiagonalShape {
    /// # Panics
    /// Panics if `secondary_len > dominant_len`; the pair must be normalized first.
    pub fn new(dominant_len: usize, secondary_len: usize) -> Self {
        assert!(
            dominant_len >= secondary_len,
            "dominant sequence must not be shorter than the secondary one"
        );
        Self {
            dominant_len,
            secondary_len,
        }
    }

    #[inline]
    pub fn dominant_len(&self) -> usize {
        self.dominant_len
    }

    #[inline]
    pub fn secondary_len(&self) -> usize {
        self.secondary_len
    }

    /// Number of anti-diagonal lines, `dominant_len + secondary_len + 1`.
    #[inline]
    pub fn num_lines(&self) -> usize {
        self.dominant_len + self.secondary_len + 1
    }

    /// Longest line length, reached on the plateau.
    #[inline]
    pub fn max_line_len(&self) -> usize {
        self.secondary_len + 1
    }

    /// Total number of cells, identical to the rectangular grid.
    ///
    /// Returns `None` on overflow.
    pub fn cell_count(&self) -> Option<usize> {
        (self.dominant_len.checked_add(1)?).checked_mul(self.secondary_len.checked_add(1)?)
    }

    /// Number of cells on `line`.
    #[inline]
    pub fn line_len(&self, line: usize) -> usize {
        debug_assert!(line < self.num_lines(), "line {line} out of range");
        if line <= self.secondary_len {
            line + 1
        } else if line <= self.dominant_len {
            self.secondary_len + 1
        } else {
            self.secondary_len + 1 - (line - self.dominant_len)
        }
    }

    /// Column of the cell at position 0 of `line`.
    #[inline]
    pub fn first_col(&self, line: usize) -> usize {
        line.saturating_sub(self.dominant_len)
    }

    /// Row index (into the dominant sequence) of `(line, pos)`.
    #[inline]
    pub fn row_of(&self, line: usize, pos: usize) -> usize {
        line - self.first_col(line) - pos
    }

    /// Column index (into the secondary sequence) of `(line, pos)`.
    #[inline]
    pub fn col_of(&self, line: usize, pos: usize) -> usize {
        self.first_col(line) + pos
    }

    /// Position on `line` of the cell in column `col`.
    #[inline]
    pub fn pos_of(&self, line: usize, col: usize) -> usize {
        col - self.first_col(line)
    }
}

#[cfg(test)]
mod tests {
    use super::DiagonalShape;

    #[test]
    fn profile_grows_plateaus_and_shrinks() {
        let shape = DiagonalShape::new(5, 3);
        let lens: Vec<usize> = (0..shape.num_lines()).map(|l| shape.line_len(l)).collect();
        assert_eq!(lens, vec![1, 2, 3, 4, 4, 4, 3, 2, 1]);
    }

    #[test]
    fn square_grid_has_single_peak() {
        let shape = DiagonalShape::new(3, 3);
        let lens: Vec<usize> = (0..shape.num_lines()).map(|l| shape.line_len(l)).collect();
        assert_eq!(lens, vec![1, 2, 3, 4, 3, 2, 1]);
    }

    #[test]
    fn empty_secondary_gives_unit_lines() {
        let shape = DiagonalShape::new(4, 0);
        assert_eq!(shape.num_lines(), 5);
        for line in 0..shape.num_lines() {
            assert_eq!(shape.line_len(line), 1);
            assert_eq!(shape.col_of(line, 0), 0);
            assert_eq!(shape.row_of(line, 0), line);
        }
    }

    #[test]
    fn coordinates_visit_every_cell_once() {
        let shape = DiagonalShape::new(6, 4);
        let mut seen = vec![vec![false; 5]; 7];
        for line in 0..shape.num_lines() {
            for pos in 0..shape.line_len(line) {
                let (i, j) = (shape.row_of(line, pos), shape.col_of(line, pos));
                assert_eq!(i + j, line);
                assert!(!seen[i][j], "cell ({i},{j}) visited twice");
                seen[i][j] = true;
                assert_eq!(shape.pos_of(line, j), pos);
            }
        }
        assert!(seen.iter().flatten().all(|&v| v));
    }

    #[test]
    fn pivot_lines_agree_between_branches() {
        let shape = DiagonalShape::new(7, 3);
        assert_eq!(shape.line_len(3), 4);
        assert_eq!(shape.line_len(7), 4);
        assert_eq!(shape.first_col(7), 0);
        assert_eq!(shape.first_col(8), 1);
        assert_eq!(shape.row_of(8, 0), 7);
    }

    #[test]
    #[should_panic]
    fn rejects_unnormalized_pair() {
        let _ = DiagonalShape::new(2, 3);
    }
}
