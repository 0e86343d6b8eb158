//! Partition pool backend
//!
//! Splits the grid row-major into a fixed number of contiguous partitions and
//! hands each one to its own worker. Partitions own disjoint output ranges,
//! so the join at the end of the scope is the only synchronization.

use crate::core::config::BackendKind;
use crate::core::error::BackendError;
use crate::domain::{CellBuffers, CellType, MedicineRecord};
use crate::spatial::NeighborTable;
use crate::systems::kernels::Kernel;

use super::{run_item, Completion, ComputeBackend, DeviceMemory};

pub struct PartitionPool {
    partitions: usize,
    partition_len: usize,
    memory: DeviceMemory,
}

impl PartitionPool {
    pub fn new(partitions: usize, cells: usize) -> Result<Self, BackendError> {
        if partitions == 0 || partitions > cells {
            return Err(BackendError::InvalidPartitionCount { partitions, cells });
        }
        Ok(Self {
            partitions,
            partition_len: cells.div_ceil(partitions),
            memory: DeviceMemory::new(cells),
        })
    }

    #[inline]
    pub fn partitions(&self) -> usize {
        self.partitions
    }

    /// Cell index range owned by partition `p`
    pub fn partition_range(&self, p: usize) -> std::ops::Range<usize> {
        let start = (p * self.partition_len).min(self.memory.cells());
        let end = (start + self.partition_len).min(self.memory.cells());
        start..end
    }
}

fn run_partition(
    kernel: Kernel,
    start: usize,
    input: &CellBuffers,
    topology: &NeighborTable,
    cells: &mut [CellType],
    medicine: &mut [MedicineRecord],
    updated: &mut [bool],
) {
    let slots = cells.iter_mut().zip(medicine.iter_mut()).zip(updated.iter_mut());
    for (offset, ((cell, record), flag)) in slots.enumerate() {
        run_item(kernel, start + offset, input, topology, cell, record, flag);
    }
}

impl ComputeBackend for PartitionPool {
    fn kind(&self) -> BackendKind {
        BackendKind::PartitionPool
    }

    fn name(&self) -> &'static str {
        "partition_pool"
    }

    fn write_buffer(&mut self, host: &CellBuffers) -> Result<(), BackendError> {
        self.memory.upload(host)
    }

    fn read_buffer(&self, host: &mut CellBuffers) -> Result<(), BackendError> {
        self.memory.download(host)
    }

    fn dispatch(
        &mut self,
        kernel: Kernel,
        global_work_size: usize,
        topology: &NeighborTable,
    ) -> Result<Completion, BackendError> {
        self.memory.check_dispatch(kernel, global_work_size)?;

        let len = self.partition_len;
        let DeviceMemory { input, output } = &mut self.memory;
        let input = &*input;

        let parts = output
            .types
            .chunks_mut(len)
            .zip(output.medicine.chunks_mut(len))
            .zip(output.updated.chunks_mut(len))
            .enumerate();

        let launches;
        #[cfg(feature = "parallel")]
        {
            // One task per partition; the scope joins them all before returning.
            let parts: Vec<_> = parts.collect();
            launches = parts.len();
            rayon::scope(|scope| {
                for (p, ((cells, medicine), updated)) in parts {
                    scope.spawn(move |_| {
                        run_partition(kernel, p * len, input, topology, cells, medicine, updated)
                    });
                }
            });
        }
        #[cfg(not(feature = "parallel"))]
        {
            let mut count = 0;
            for (p, ((cells, medicine), updated)) in parts {
                run_partition(kernel, p * len, input, topology, cells, medicine, updated);
                count += 1;
            }
            launches = count;
        }

        Ok(Completion {
            kernel,
            work_items: global_work_size,
            launches,
        })
    }
}
