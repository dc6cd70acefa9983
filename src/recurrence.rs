//! The LCS recurrence evaluated on the folded table.
//!
//! For a cell `(i, j)` on line `L`:
//! - `0` on the boundary (`i == 0` or `j == 0`),
//! - `diag(i-1, j-1) + match_cost(i+j)` when the characters match,
//! - `max(top(i-1, j), left(i, j-1))` otherwise.
//!
//! The diagonal predecessor lives on line `L-2`, the other two on `L-1`.
//! Their positions are found from their columns, which absorbs the changing
//! line lengths around the pivots of the shape.

use crate::sequence::SequencePair;
use crate::shape::DiagonalShape;
use crate::table::{Cell, Predecessors};

/// Artificial per-match cost.
///
/// Spends `iterations` rounds of `sin² + cos²` on the coordinate sum so the
/// per-cell work can be scaled for speedup measurements. The result is
/// always exactly 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchCost {
    iterations: u32,
}

impl MatchCost {
    pub const DEFAULT_ITERATIONS: u32 = 20;

    pub fn new(iterations: u32) -> Self {
        Self {
            iterations: iterations.max(1),
        }
    }

    #[inline]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    #[inline]
    pub fn eval(&self, x: usize) -> Cell {
        let x = x as f64;
        let mut acc = 0.0f64;
        for _ in 0..self.iterations {
            acc += x.sin().powi(2) + x.cos().powi(2);
        }
        (acc / f64::from(self.iterations) + 0.1) as Cell
    }
}

impl Default for MatchCost {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ITERATIONS)
    }
}

/// Evaluates single cells of a line from its two predecessor lines.
#[derive(Debug, Clone, Copy)]
pub struct CellRecurrence<'a> {
    pair: &'a SequencePair,
    shape: DiagonalShape,
    cost: MatchCost,
}

impl<'a> CellRecurrence<'a> {
    pub fn new(pair: &'a SequencePair, cost: MatchCost) -> Self {
        Self {
            pair,
            shape: pair.shape(),
            cost,
        }
    }

    #[inline]
    pub fn shape(&self) -> DiagonalShape {
        self.shape
    }

    /// Value of the cell at position `pos` of `preds.line`.
    #[inline]
    pub fn evaluate(&self, preds: &Predecessors<'_>, pos: usize) -> Cell {
        let line = preds.line;
        let i = self.shape.row_of(line, pos);
        let j = self.shape.col_of(line, pos);
        if i == 0 || j == 0 {
            return 0;
        }
        if self.pair.dominant().at(i) == self.pair.secondary().at(j) {
            let diag = self.shape.pos_of(line - 2, j - 1);
            preds.prev2[diag] + self.cost.eval(i + j)
        } else {
            let top = preds.prev1[self.shape.pos_of(line - 1, j)];
            let left = preds.prev1[self.shape.pos_of(line - 1, j - 1)];
            top.max(left)
        }
    }

    /// Evaluate positions `first..first + out.len()` of `preds.line` serially.
    pub fn fill(&self, preds: &Predecessors<'_>, first: usize, out: &mut [Cell]) {
        for (k, cell) in out.iter_mut().enumerate() {
            *cell = self.evaluate(preds, first + k);
        }
    }
}
