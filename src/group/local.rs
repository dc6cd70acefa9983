//! In-process group: every rank is an OS thread sharing a hub.
//!
//! Collectives stage data in the hub behind a mutex and use a
//! `GroupBarrier` on both sides of the exchange, so a rank cannot overwrite
//! a staging buffer another rank is still reading.
//!
//! A rank that leaves [`LocalGroup::run`] (by returning or by panicking)
//! breaks the barrier: ranks still waiting, or arriving later, unwind instead
//! of blocking forever.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

use parking_lot::{Condvar, Mutex};

use super::{Collective, COORDINATOR};
use crate::error::LcsError;
use crate::partition::BlockPartition;
use crate::table::Cell;

/// Unwind payload of a rank released from a broken barrier.
#[derive(Debug, Clone, Copy)]
struct GroupAborted {
    departed: usize,
}

#[derive(Debug, Default)]
struct BarrierState {
    arrived: usize,
    generation: u64,
    departed: Option<usize>,
}

/// Reusable barrier that fails once any rank has left the group.
#[derive(Debug)]
struct GroupBarrier {
    size: usize,
    state: Mutex<BarrierState>,
    released: Condvar,
}

impl GroupBarrier {
    fn new(size: usize) -> Self {
        Self {
            size,
            state: Mutex::new(BarrierState::default()),
            released: Condvar::new(),
        }
    }

    fn wait(&self) {
        let mut state = self.state.lock();
        if let Some(departed) = state.departed {
            drop(state);
            abort_rank(departed);
        }
        let generation = state.generation;
        state.arrived += 1;
        if state.arrived == self.size {
            state.arrived = 0;
            state.generation += 1;
            self.released.notify_all();
            return;
        }
        // A released generation wins over a departure recorded afterwards.
        while state.generation == generation {
            if let Some(departed) = state.departed {
                drop(state);
                abort_rank(departed);
            }
            self.released.wait(&mut state);
        }
    }

    /// Record that `rank` will not reach any further barrier.
    fn depart(&self, rank: usize) {
        let mut state = self.state.lock();
        state.departed.get_or_insert(rank);
        self.released.notify_all();
    }
}

fn abort_rank(departed: usize) -> ! {
    panic::resume_unwind(Box::new(GroupAborted { departed }))
}

struct Hub {
    barrier: GroupBarrier,
    cells: Mutex<Vec<Cell>>,
    bytes: Mutex<Vec<u8>>,
    blocks: Mutex<Vec<Vec<Cell>>>,
}

type RankOutcome<R> = thread::Result<R>;

/// A fixed-size group of ranks run on scoped threads.
#[derive(Debug, Clone, Copy)]
pub struct LocalGroup {
    size: usize,
}

impl LocalGroup {
    /// # Panics
    /// Panics if `size == 0`.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "process group must have at least one rank");
        Self { size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Run `body` once per rank, each on its own thread, and return the
    /// results in rank order.
    ///
    /// # Panics
    /// If a rank panics, the remaining ranks are released from their
    /// collectives and the first rank's panic is re-raised here. Also panics
    /// if a rank returned while its peers still expected it in a collective.
    pub fn run<R, F>(&self, body: F) -> Vec<R>
    where
        R: Send,
        F: Fn(&LocalRank) -> R + Sync,
    {
        let outcomes = self.spawn_ranks(body);
        let departed = aborted_by(&outcomes);
        let mut results = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            match outcome {
                Ok(result) => results.push(result),
                Err(payload) if payload.is::<GroupAborted>() => {}
                Err(payload) => panic::resume_unwind(payload),
            }
        }
        if let Some(rank) = departed {
            panic!("rank {rank} left the group while its peers were in a collective");
        }
        results
    }

    /// Like [`run`](Self::run) for fallible bodies.
    ///
    /// A rank returning `Err` early releases its peers; the first error in
    /// rank order is returned.
    pub fn try_run<T, F>(&self, body: F) -> Result<Vec<T>, LcsError>
    where
        T: Send,
        F: Fn(&LocalRank) -> Result<T, LcsError> + Sync,
    {
        let outcomes = self.spawn_ranks(body);
        let departed = aborted_by(&outcomes);
        let mut results = Vec::with_capacity(outcomes.len());
        let mut first_err = None;
        for outcome in outcomes {
            match outcome {
                Ok(Ok(value)) => results.push(value),
                Ok(Err(err)) => {
                    first_err.get_or_insert(err);
                }
                Err(payload) if payload.is::<GroupAborted>() => {}
                Err(payload) => panic::resume_unwind(payload),
            }
        }
        if let Some(err) = first_err {
            return Err(err);
        }
        if let Some(rank) = departed {
            panic!("rank {rank} left the group while its peers were in a collective");
        }
        Ok(results)
    }

    fn spawn_ranks<R, F>(&self, body: F) -> Vec<RankOutcome<R>>
    where
        R: Send,
        F: Fn(&LocalRank) -> R + Sync,
    {
        let hub = Arc::new(Hub {
            barrier: GroupBarrier::new(self.size),
            cells: Mutex::new(Vec::new()),
            bytes: Mutex::new(Vec::new()),
            blocks: Mutex::new(vec![Vec::new(); self.size]),
        });
        let body = &body;

        thread::scope(|scope| {
            let handles: Vec<_> = (0..self.size)
                .map(|rank| {
                    let handle = LocalRank {
                        rank,
                        size: self.size,
                        hub: Arc::clone(&hub),
                    };
                    thread::Builder::new()
                        .name(format!("lcs-rank-{rank}"))
                        .spawn_scoped(scope, move || {
                            let outcome = panic::catch_unwind(AssertUnwindSafe(|| body(&handle)));
                            handle.hub.barrier.depart(rank);
                            outcome
                        })
                        .unwrap_or_else(|err| panic!("failed to spawn rank {rank}: {err}"))
                })
                .collect();

            handles
                .into_iter()
                .map(|h| h.join().unwrap_or_else(Err))
                .collect()
        })
    }
}

fn aborted_by<R>(outcomes: &[RankOutcome<R>]) -> Option<usize> {
    outcomes.iter().find_map(|outcome| match outcome {
        Err(payload) => payload_departed(payload.as_ref()),
        Ok(_) => None,
    })
}

fn payload_departed(payload: &(dyn Any + Send)) -> Option<usize> {
    payload.downcast_ref::<GroupAborted>().map(|a| a.departed)
}

/// One rank's handle into a [`LocalGroup`].
pub struct LocalRank {
    rank: usize,
    size: usize,
    hub: Arc<Hub>,
}

impl Collective for LocalRank {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }

    fn broadcast(&self, buf: &mut [Cell]) {
        if self.rank == COORDINATOR {
            let mut staged = self.hub.cells.lock();
            staged.clear();
            staged.extend_from_slice(buf);
        }
        self.hub.barrier.wait();
        if self.rank != COORDINATOR {
            buf.copy_from_slice(&self.hub.cells.lock());
        }
        self.hub.barrier.wait();
    }

    fn broadcast_bytes(&self, buf: &mut Vec<u8>) {
        if self.rank == COORDINATOR {
            let mut staged = self.hub.bytes.lock();
            staged.clear();
            staged.extend_from_slice(buf);
        }
        self.hub.barrier.wait();
        if self.rank != COORDINATOR {
            buf.clear();
            buf.extend_from_slice(&self.hub.bytes.lock());
        }
        self.hub.barrier.wait();
    }

    fn gather_blocks(&self, local: &[Cell], partition: &BlockPartition, out: Option<&mut [Cell]>) {
        debug_assert_eq!(local.len(), partition.count(self.rank));
        {
            let mut blocks = self.hub.blocks.lock();
            let slot = &mut blocks[self.rank];
            slot.clear();
            slot.extend_from_slice(local);
        }
        self.hub.barrier.wait();
        if self.rank == COORDINATOR {
            if let Some(out) = out {
                let blocks = self.hub.blocks.lock();
                for (rank, block) in blocks.iter().enumerate() {
                    debug_assert!(block.is_empty() || partition.owner(partition.low(rank)) == rank);
                    out[partition.range(rank)].copy_from_slice(block);
                }
            }
        }
        self.hub.barrier.wait();
    }
}
