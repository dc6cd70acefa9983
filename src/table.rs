//! Diagonal-indexed DP storage.
//!
//! A [`FoldedTable`] keeps every anti-diagonal line in one contiguous arena
//! with an offset per line, instead of one heap row per line. Line capacities
//! are only computed for the first half of the lines; the second half mirrors
//! them, since `line_len(L) == line_len(M - 1 - L)`.

use crate::error::LcsError;
use crate::shape::DiagonalShape;

/// A single DP value: the LCS length of the prefixes addressed by a cell.
pub type Cell = u32;

/// The two lines a diagonal depends on, borrowed read-only.
///
/// `prev1` is line `line - 1` and `prev2` is line `line - 2`; both are empty
/// for lines 0 and 1, whose cells are all on the zero boundary.
#[derive(Debug, Clone, Copy)]
pub struct Predecessors<'a> {
    pub line: usize,
    pub prev1: &'a [Cell],
    pub prev2: &'a [Cell],
}

impl<'a> Predecessors<'a> {
    pub fn new(line: usize, prev1: &'a [Cell], prev2: &'a [Cell]) -> Self {
        Self { line, prev1, prev2 }
    }

    /// Predecessors of line 0 or 1.
    pub fn boundary(line: usize) -> Self {
        debug_assert!(line < 2);
        Self {
            line,
            prev1: &[],
            prev2: &[],
        }
    }
}

/// The full folded table, materialized on the coordinator only.
#[derive(Debug, Clone)]
pub struct FoldedTable {
    shape: DiagonalShape,
    offsets: Vec<usize>,
    cells: Vec<Cell>,
}

impl FoldedTable {
    /// Allocate storage for every line of `shape`.
    pub fn new(shape: DiagonalShape) -> Result<Self, LcsError> {
        let total = shape.cell_count().ok_or(LcsError::TooLarge {
            dominant_len: shape.dominant_len(),
            secondary_len: shape.secondary_len(),
        })?;

        let lines = shape.num_lines();
        let mut lens = vec![0usize; lines];
        let mut len = 1;
        for line in 0..lines.div_ceil(2) {
            lens[line] = len;
            lens[lines - 1 - line] = len;
            if len < shape.max_line_len() {
                len += 1;
            }
        }

        let mut offsets = Vec::with_capacity(lines + 1);
        let mut acc = 0usize;
        offsets.push(acc);
        for (line, &l) in lens.iter().enumerate() {
            debug_assert_eq!(l, shape.line_len(line));
            acc += l;
            offsets.push(acc);
        }
        debug_assert_eq!(acc, total);

        Ok(Self {
            shape,
            offsets,
            cells: vec![0; total],
        })
    }

    #[inline]
    pub fn shape(&self) -> DiagonalShape {
        self.shape
    }

    #[inline]
    pub fn num_lines(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Storage length of `line`.
    #[inline]
    pub fn capacity(&self, line: usize) -> usize {
        self.offsets[line + 1] - self.offsets[line]
    }

    /// Total number of stored cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn line(&self, line: usize) -> &[Cell] {
        &self.cells[self.offsets[line]..self.offsets[line + 1]]
    }

    #[inline]
    pub fn line_mut(&mut self, line: usize) -> &mut [Cell] {
        &mut self.cells[self.offsets[line]..self.offsets[line + 1]]
    }

    #[inline]
    pub fn get(&self, line: usize, pos: usize) -> Cell {
        self.line(line)[pos]
    }

    /// Borrow the predecessors of `line` together with `line` itself.
    ///
    /// Lines are laid out in increasing order, so both predecessors live
    /// strictly before the target in the arena.
    pub fn split_at_line(&mut self, line: usize) -> (Predecessors<'_>, &mut [Cell]) {
        let start = self.offsets[line];
        let end = self.offsets[line + 1];
        let (before, rest) = self.cells.split_at_mut(start);
        let target = &mut rest[..end - start];
        let preds = if line < 2 {
            Predecessors::boundary(line)
        } else {
            let prev1 = &before[self.offsets[line - 1]..start];
            let prev2 = &before[self.offsets[line - 2]..self.offsets[line - 1]];
            Predecessors::new(line, prev1, prev2)
        };
        (preds, target)
    }

    /// The LCS length stored in the bottom-right cell.
    #[inline]
    pub fn final_value(&self) -> Cell {
        self.get(self.num_lines() - 1, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacities_follow_shape_and_mirror() {
        for (d, s) in [(0, 0), (1, 0), (3, 3), (5, 3), (8, 2), (4, 4)] {
            let shape = DiagonalShape::new(d, s);
            let table = FoldedTable::new(shape).unwrap();
            let m = table.num_lines();
            assert_eq!(m, shape.num_lines());
            for line in 0..m {
                assert_eq!(table.capacity(line), shape.line_len(line));
                assert_eq!(table.capacity(line), table.capacity(m - 1 - line));
            }
            assert_eq!(table.len(), (d + 1) * (s + 1));
        }
    }

    #[test]
    fn split_exposes_two_previous_lines() {
        let mut table = FoldedTable::new(DiagonalShape::new(3, 2)).unwrap();
        for line in 0..table.num_lines() {
            let fill = line as Cell;
            table.line_mut(line).iter_mut().for_each(|c| *c = fill);
        }
        let (preds, target) = table.split_at_line(4);
        assert_eq!(preds.line, 4);
        assert_eq!(preds.prev1, &[3, 3, 3]);
        assert_eq!(preds.prev2, &[2, 2, 2]);
        assert_eq!(target.len(), 2);

        let (preds, target) = table.split_at_line(1);
        assert!(preds.prev1.is_empty() && preds.prev2.is_empty());
        assert_eq!(target.len(), 2);
    }

    #[test]
    fn single_cell_table() {
        let table = FoldedTable::new(DiagonalShape::new(0, 0)).unwrap();
        assert_eq!(table.num_lines(), 1);
        assert_eq!(table.final_value(), 0);
    }

    #[test]
    fn overflowing_shape_is_rejected() {
        let shape = DiagonalShape::new(usize::MAX - 1, usize::MAX / 2);
        assert!(matches!(
            FoldedTable::new(shape),
            Err(LcsError::TooLarge { .. })
        ));
    }
}
