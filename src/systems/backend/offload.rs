//! Offload backend
//!
//! Mirrors a device kernel launch: one work item per cell, every phase its
//! own launch, full buffer copies in and out around each one. More copying
//! per tick than the partition pool, but no partition ever becomes the
//! straggler on large grids.

use rayon::prelude::*;

use crate::core::config::BackendKind;
use crate::core::error::BackendError;
use crate::domain::CellBuffers;
use crate::spatial::NeighborTable;
use crate::systems::kernels::Kernel;

use super::{run_item, Completion, ComputeBackend, DeviceMemory};

pub struct OffloadExecutor {
    memory: DeviceMemory,
}

impl OffloadExecutor {
    pub fn new(cells: usize) -> Result<Self, BackendError> {
        if cells == 0 {
            return Err(BackendError::Unavailable {
                backend: "offload",
                reason: "cannot launch over an empty grid".to_string(),
            });
        }
        Ok(Self {
            memory: DeviceMemory::new(cells),
        })
    }
}

impl ComputeBackend for OffloadExecutor {
    fn kind(&self) -> BackendKind {
        BackendKind::Offload
    }

    fn name(&self) -> &'static str {
        "offload"
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

        let DeviceMemory { input, output } = &mut self.memory;
        let input = &*input;

        output
            .types
            .par_iter_mut()
            .zip(output.medicine.par_iter_mut())
            .zip(output.updated.par_iter_mut())
            .enumerate()
            .for_each(|(idx, ((cell, record), flag))| {
                run_item(kernel, idx, input, topology, cell, record, flag)
            });

        Ok(Completion {
            kernel,
            work_items: global_work_size,
            launches: global_work_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_grid_is_unavailable() {
        assert!(matches!(
            OffloadExecutor::new(0),
            Err(BackendError::Unavailable { backend: "offload", .. })
        ));
    }
}
