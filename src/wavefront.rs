//! Distributed anti-diagonal scheduler.
//!
//! Lines are processed in strictly increasing order; line `L` reads only
//! lines `L-1` and `L-2`. For each line:
//! 1. Lines 0 and 1, any line shorter than the group, and every line of a
//!    single-rank group are computed by the coordinator alone, in place in
//!    its folded table. No communication.
//! 2. Every other line is split with a [`BlockPartition`]. The coordinator
//!    broadcasts lines `L-1` and `L-2`, each rank evaluates its block, and
//!    the blocks are gathered into the coordinator's table.
//!
//! Step 2 is one indivisible [`Store::advance`]: a rank cannot evaluate a
//! distributed line without first taking part in the broadcast, and cannot
//! move on before the gather has completed on every rank.

use crate::backtrack::{backtrack, Lcs};
use crate::builder::WavefrontConfig;
use crate::error::LcsError;
use crate::executor::BlockExecutor;
use crate::group::{Collective, LocalGroup, SoloGroup};
use crate::partition::BlockPartition;
use crate::recurrence::{CellRecurrence, MatchCost};
use crate::sequence::SequencePair;
use crate::shape::DiagonalShape;
use crate::table::{Cell, FoldedTable, Predecessors};
use crate::utils::default_grain;

/// Wavefront LCS engine; one instance can serve many runs.
///
/// ```
/// use wavefront_lcs::WavefrontEngine;
///
/// let engine = WavefrontEngine::new();
/// let lcs = engine.solve(b"ACCGGTCGAGTGCG", b"GTCGTTCGGA").unwrap();
/// assert_eq!(lcs.length, lcs.subsequence.len());
/// ```
#[derive(Debug, Clone, Default)]
pub struct WavefrontEngine {
    config: WavefrontConfig,
}

impl WavefrontEngine {
    /// Engine with [`WavefrontConfig::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// # Panics
    /// Panics if `config.threads_per_process == 0`.
    pub fn with_config(config: WavefrontConfig) -> Self {
        assert!(
            config.threads_per_process > 0,
            "threads_per_process must be positive"
        );
        Self { config }
    }

    pub fn config(&self) -> &WavefrontConfig {
        &self.config
    }

    /// LCS of `first` and `second` on a single process.
    pub fn solve(&self, first: &[u8], second: &[u8]) -> Result<Lcs, LcsError> {
        let pair = SequencePair::new(first, second);
        let lcs = self.run(&SoloGroup, &pair)?;
        Ok(lcs.unwrap_or_else(Lcs::empty))
    }

    /// LCS of `first` and `second` on an in-process group of `processes` ranks.
    ///
    /// # Panics
    /// Panics if `processes == 0`.
    pub fn solve_distributed(
        &self,
        first: &[u8],
        second: &[u8],
        processes: usize,
    ) -> Result<Lcs, LcsError> {
        let results = LocalGroup::new(processes).try_run(|rank| {
            let pair = rank
                .is_coordinator()
                .then(|| SequencePair::new(first, second));
            let pair = SequencePair::share(rank, pair)?;
            self.run(rank, &pair)
        })?;

        Ok(results
            .into_iter()
            .flatten()
            .next()
            .unwrap_or_else(Lcs::empty))
    }

    /// Run the wavefront on this rank and backtrack on the coordinator.
    ///
    /// Every rank of `group` must call this with the same `pair`. Returns
    /// `Some` on the coordinator and `None` everywhere else.
    pub fn run<C: Collective + ?Sized>(
        &self,
        group: &C,
        pair: &SequencePair,
    ) -> Result<Option<Lcs>, LcsError> {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!(
            "wavefront_run",
            rank = group.rank(),
            size = group.size(),
            dominant_len = pair.dominant().len(),
            secondary_len = pair.secondary().len(),
            swapped = pair.orientation().is_swapped()
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let Some(table) = self.compute_table(group, pair)? else {
            return Ok(None);
        };

        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("backtrack", lines = table.num_lines());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let lcs = backtrack(&table, pair);

        #[cfg(feature = "tracing")]
        tracing::debug!(length = lcs.length, "lcs reconstructed");

        Ok(Some(lcs))
    }

    /// Forward pass only: fill the folded table across the group.
    ///
    /// Returns the completed table on the coordinator, `None` elsewhere.
    pub fn compute_table<C: Collective + ?Sized>(
        &self,
        group: &C,
        pair: &SequencePair,
    ) -> Result<Option<FoldedTable>, LcsError> {
        let shape = pair.shape();
        // Checked on every rank so no rank enters a collective alone.
        shape.cell_count().ok_or(LcsError::TooLarge {
            dominant_len: shape.dominant_len(),
            secondary_len: shape.secondary_len(),
        })?;

        let grain = self
            .config
            .min_parallel_len
            .unwrap_or_else(|| default_grain(shape.max_line_len()));
        let exec = BlockExecutor::new(self.config.threads_per_process, grain)?;
        let rec = CellRecurrence::new(pair, MatchCost::new(self.config.cost_iterations));

        #[cfg(feature = "tracing")]
        tracing::debug!(
            rank = group.rank(),
            size = group.size(),
            threads = exec.threads(),
            grain,
            "group ready"
        );

        let mut store = if group.is_coordinator() {
            Store::Coordinator(FoldedTable::new(shape)?)
        } else {
            Store::Worker(DiagonalWindow::default())
        };
        let mut block = Vec::new();
        #[cfg(feature = "tracing")]
        let mut distributed_lines = 0usize;

        for line in 0..shape.num_lines() {
            let len = shape.line_len(line);
            let distributed = group.size() > 1 && line >= 2 && len >= group.size();

            #[cfg(feature = "tracing")]
            let span = tracing::trace_span!("diagonal", line, len, distributed);
            #[cfg(feature = "tracing")]
            let _enter = span.enter();

            if distributed {
                let partition = BlockPartition::new(len, group.size());
                store.advance(group, &exec, &rec, line, &partition, &mut block);
                #[cfg(feature = "tracing")]
                {
                    distributed_lines += 1;
                }
            } else {
                store.compute_local(&exec, &rec, line);
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            lines = shape.num_lines(),
            distributed_lines,
            threads = exec.threads(),
            "wavefront complete"
        );

        Ok(match store {
            Store::Coordinator(table) => Some(table),
            Store::Worker(_) => None,
        })
    }
}

/// What a rank keeps between lines.
enum Store {
    /// The full folded table.
    Coordinator(FoldedTable),
    /// Only the two most recent broadcast lines.
    Worker(DiagonalWindow),
}

impl Store {
    /// Coordinator-only evaluation of a whole line.
    fn compute_local(&mut self, exec: &BlockExecutor, rec: &CellRecurrence<'_>, line: usize) {
        if let Store::Coordinator(table) = self {
            let (preds, target) = table.split_at_line(line);
            exec.fill(rec, &preds, 0, target);
        }
    }

    /// Broadcast the predecessors of `line`, evaluate this rank's block and
    /// gather every block into the coordinator's table.
    fn advance<C: Collective + ?Sized>(
        &mut self,
        group: &C,
        exec: &BlockExecutor,
        rec: &CellRecurrence<'_>,
        line: usize,
        partition: &BlockPartition,
        block: &mut Vec<Cell>,
    ) {
        let range = partition.range(group.rank());
        block.clear();
        block.resize(range.len(), 0);

        match self {
            Store::Coordinator(table) => {
                group.broadcast(table.line_mut(line - 1));
                group.broadcast(table.line_mut(line - 2));
                let (preds, target) = table.split_at_line(line);
                exec.fill(rec, &preds, range.start, block);
                group.gather_blocks(block, partition, Some(target));
            }
            Store::Worker(window) => {
                let preds = window.receive(group, rec.shape(), line);
                exec.fill(rec, &preds, range.start, block);
                group.gather_blocks(block, partition, None);
            }
        }
    }
}

/// Rolling buffers for the two lines a worker needs. Older lines are
/// overwritten on the next receive.
#[derive(Debug, Default)]
struct DiagonalWindow {
    prev1: Vec<Cell>,
    prev2: Vec<Cell>,
}

impl DiagonalWindow {
    fn receive<C: Collective + ?Sized>(
        &mut self,
        group: &C,
        shape: DiagonalShape,
        line: usize,
    ) -> Predecessors<'_> {
        self.prev1.resize(shape.line_len(line - 1), 0);
        self.prev2.resize(shape.line_len(line - 2), 0);
        group.broadcast(&mut self.prev1);
        group.broadcast(&mut self.prev2);
        Predecessors::new(line, &self.prev1, &self.prev2)
    }
}
