//! Reconstruction of one LCS from the completed folded table.
//!
//! The walk starts at the bottom-right cell (last line, position 0) and
//! follows the recurrence backwards: a match steps to the diagonal
//! predecessor two lines up and emits the character, a mismatch steps to
//! whichever neighbour on the previous line still carries the remaining
//! length. When both neighbours qualify, the step that consumes the first
//! input sequence is taken, so the result does not depend on which input
//! ended up dominant.

use crate::sequence::SequencePair;
use crate::table::FoldedTable;

/// Length and one witness of a longest common subsequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcs {
    pub length: usize,
    pub subsequence: Vec<u8>,
}

impl Lcs {
    pub fn empty() -> Self {
        Self {
            length: 0,
            subsequence: Vec::new(),
        }
    }

    pub fn as_str_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.subsequence)
    }
}

/// Walk `table` back from its last line and return the LCS.
pub fn backtrack(table: &FoldedTable, pair: &SequencePair) -> Lcs {
    let shape = table.shape();
    debug_assert_eq!(shape, pair.shape());

    let dominant = pair.dominant();
    let secondary = pair.secondary();
    let row_first = pair.orientation().prefers_row_step();

    let mut line = table.num_lines() - 1;
    let mut pos = 0usize;
    let mut remaining = table.final_value();
    let length = remaining as usize;
    let mut out = vec![0u8; length];

    while remaining > 0 {
        let i = shape.row_of(line, pos);
        let j = shape.col_of(line, pos);
        debug_assert!(i > 0 && j > 0, "walk left the table interior at ({i},{j})");

        if dominant.at(i) == secondary.at(j) {
            out[remaining as usize - 1] = dominant.at(i);
            remaining -= 1;
            line -= 2;
            pos = shape.pos_of(line, j - 1);
            continue;
        }

        let up = line - 1;
        let top = shape.pos_of(up, j);
        let left = shape.pos_of(up, j - 1);
        let holds = |p: usize| -> bool { table.get(up, p) == remaining };
        pos = if row_first {
            if holds(top) {
                top
            } else {
                left
            }
        } else if holds(left) {
            left
        } else {
            top
        };
        line = up;
    }

    Lcs {
        length,
        subsequence: out,
    }
}

/// Whether `sub` is a subsequence of `seq`.
pub fn is_subsequence(sub: &[u8], seq: &[u8]) -> bool {
    let mut rest = seq.iter();
    sub.iter().all(|c| rest.any(|x| x == c))
}
