use super::Collective;
use crate::partition::BlockPartition;
use crate::table::Cell;

/// Group of one: the coordinator alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoloGroup;

impl Collective for SoloGroup {
    fn rank(&self) -> usize {
        0
    }

    fn size(&self) -> usize {
        1
    }

    fn broadcast(&self, _buf: &mut [Cell]) {}

    fn broadcast_bytes(&self, _buf: &mut Vec<u8>) {}

    fn gather_blocks(&self, local: &[Cell], partition: &BlockPartition, out: Option<&mut [Cell]>) {
        if let Some(out) = out {
            out[partition.range(0)].copy_from_slice(local);
        }
    }
}
