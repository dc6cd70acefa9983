// MPI-backed process group (feature `mpi`)

use mpi::datatype::PartitionMut;
use mpi::environment::Universe;
use mpi::topology::{Communicator, SimpleCommunicator};
use mpi::traits::*;
use mpi::Count;

use super::{Collective, COORDINATOR};
use crate::partition::BlockPartition;
use crate::table::Cell;

/// One rank of the MPI world. Finalizes MPI when dropped.
pub struct MpiGroup {
    world: SimpleCommunicator,
    rank: usize,
    size: usize,
    // Dropped last: finalizes MPI.
    _universe: Universe,
}

impl MpiGroup {
    /// Initialize MPI. Returns `None` if MPI was already initialized.
    pub fn initialize() -> Option<Self> {
        let universe = mpi::initialize()?;
        let world = universe.world();
        let rank = world.rank() as usize;
        let size = world.size() as usize;
        Some(Self {
            world,
            rank,
            size,
            _universe: universe,
        })
    }

    /// Terminate every process of the world with `code`.
    pub fn abort(&self, code: i32) -> ! {
        self.world.abort(code)
    }
}

impl Collective for MpiGroup {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }

    fn broadcast(&self, buf: &mut [Cell]) {
        self.world
            .process_at_rank(COORDINATOR as i32)
            .broadcast_into(buf);
    }

    fn broadcast_bytes(&self, buf: &mut Vec<u8>) {
        let root = self.world.process_at_rank(COORDINATOR as i32);
        let mut len = buf.len() as u64;
        root.broadcast_into(&mut len);
        buf.resize(len as usize, 0);
        root.broadcast_into(&mut buf[..]);
    }

    fn gather_blocks(&self, local: &[Cell], partition: &BlockPartition, out: Option<&mut [Cell]>) {
        let root = self.world.process_at_rank(COORDINATOR as i32);
        if self.rank != COORDINATOR {
            root.gather_varcount_into(local);
            return;
        }

        let counts: Vec<Count> = partition.counts().map(|c| c as Count).collect();
        let displs: Vec<Count> = partition.displacements().map(|d| d as Count).collect();
        match out {
            Some(out) => {
                let mut recv = PartitionMut::new(out, counts, displs);
                root.gather_varcount_into_root(local, &mut recv);
            }
            None => {
                let mut scratch = vec![0 as Cell; partition.len()];
                let mut recv = PartitionMut::new(&mut scratch[..], counts, displs);
                root.gather_varcount_into_root(local, &mut recv);
            }
        }
    }
}
