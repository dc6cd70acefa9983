//! Per-process evaluation of a block of one diagonal.
//!
//! Positions within a line only read the two predecessor lines, so a block
//! is an embarrassingly parallel map. With the `parallel` feature the map
//! runs on a private rayon pool sized per process; otherwise it is a plain
//! loop. Both produce identical cells.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::LcsError;
use crate::recurrence::CellRecurrence;
use crate::table::{Cell, Predecessors};

pub struct BlockExecutor {
    #[cfg(feature = "parallel")]
    pool: Option<rayon::ThreadPool>,
    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    min_parallel_len: usize,
}

impl BlockExecutor {
    /// Build an executor with `threads` workers.
    ///
    /// One thread means serial evaluation on the calling thread.
    pub fn new(threads: usize, min_parallel_len: usize) -> Result<Self, LcsError> {
        #[cfg(feature = "parallel")]
        let pool = if threads > 1 {
            Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("lcs-cell-{i}"))
                    .build()?,
            )
        } else {
            None
        };
        #[cfg(not(feature = "parallel"))]
        let _ = threads;

        Ok(Self {
            #[cfg(feature = "parallel")]
            pool,
            min_parallel_len: min_parallel_len.max(1),
        })
    }

    /// Number of worker threads evaluating a block.
    pub fn threads(&self) -> usize {
        #[cfg(feature = "parallel")]
        {
            if let Some(pool) = &self.pool {
                return pool.current_num_threads();
            }
        }
        1
    }

    /// Fill `out` with positions `first..first + out.len()` of `preds.line`.
    pub fn fill(
        &self,
        rec: &CellRecurrence<'_>,
        preds: &Predecessors<'_>,
        first: usize,
        out: &mut [Cell],
    ) {
        #[cfg(feature = "parallel")]
        {
            if let Some(pool) = &self.pool {
                if out.len() >= self.min_parallel_len {
                    let grain = self.min_parallel_len;
                    pool.install(|| {
                        out.par_iter_mut()
                            .with_min_len(grain)
                            .enumerate()
                            .for_each(|(k, cell)| *cell = rec.evaluate(preds, first + k));
                    });
                    return;
                }
            }
        }
        rec.fill(preds, first, out);
    }
}
