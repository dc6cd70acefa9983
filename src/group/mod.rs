//! Collective communication across the cooperating process group.
//!
//! The wavefront only ever needs two collectives: a one-to-all broadcast
//! from the coordinator and an all-to-one variable-size gather onto it.
//! Each call is a synchronization point: no rank returns from a collective
//! until every rank of the group has entered it.
//!
//! Backends:
//! - [`SoloGroup`]   : a single process; collectives are local copies.
//! - [`LocalGroup`]  : N ranks on N threads of this process.
//! - `MpiGroup`      : one rank per MPI process (feature `mpi`).

mod local;
#[cfg(feature = "mpi")]
mod mpi_world;
mod solo;

pub use self::local::{LocalGroup, LocalRank};
#[cfg(feature = "mpi")]
pub use self::mpi_world::MpiGroup;
pub use self::solo::SoloGroup;

use crate::partition::BlockPartition;
use crate::table::Cell;

/// Rank of the process that owns the folded table and prints the result.
pub const COORDINATOR: usize = 0;

pub trait Collective {
    /// Rank of this process within the group.
    fn rank(&self) -> usize;

    /// Number of processes in the group; fixed for the whole run.
    fn size(&self) -> usize;

    fn is_coordinator(&self) -> bool {
        self.rank() == COORDINATOR
    }

    /// Overwrite `buf` on every rank with the coordinator's `buf`.
    ///
    /// All ranks must pass buffers of the same length.
    fn broadcast(&self, buf: &mut [Cell]);

    /// Variable-length broadcast: every rank ends up with the coordinator's
    /// bytes, whatever it passed in.
    fn broadcast_bytes(&self, buf: &mut Vec<u8>);

    /// Gather each rank's block onto the coordinator.
    ///
    /// Rank `r` passes `partition.count(r)` cells in `local`; they are written
    /// to `out[partition.range(r)]` on the coordinator. `out` is ignored on
    /// every other rank.
    fn gather_blocks(&self, local: &[Cell], partition: &BlockPartition, out: Option<&mut [Cell]>);
}
