//! Compute backends
//!
//! The update engine talks to a backend through three calls: upload the host
//! buffers, dispatch a kernel over the grid, download the result. Each backend
//! owns a device-side input/output pair; a dispatch reads only the input and
//! writes each work item's own output slot, so nothing observes a
//! half-finished phase.

use crate::core::config::{BackendKind, PARTITION_COUNT};
use crate::core::error::BackendError;
use crate::domain::{CellBuffers, CellType, MedicineRecord};
use crate::spatial::NeighborTable;

use super::kernels::Kernel;

mod partition_pool;
#[cfg(feature = "parallel")]
mod offload;

pub use partition_pool::PartitionPool;
#[cfg(feature = "parallel")]
pub use offload::OffloadExecutor;

/// Result of one finished kernel launch
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Completion {
    pub kernel: Kernel,
    pub work_items: usize,
    /// Parallel tasks the work was split into
    pub launches: usize,
}

pub trait ComputeBackend: Send {
    fn kind(&self) -> BackendKind;

    fn name(&self) -> &'static str;

    /// Copy host state into the device input buffers
    fn write_buffer(&mut self, host: &CellBuffers) -> Result<(), BackendError>;

    /// Copy the device output buffers back into host state
    fn read_buffer(&self, host: &mut CellBuffers) -> Result<(), BackendError>;

    /// Run `kernel` once per cell and wait for every work item to finish
    fn dispatch(
        &mut self,
        kernel: Kernel,
        global_work_size: usize,
        topology: &NeighborTable,
    ) -> Result<Completion, BackendError>;
}

/// Create the backend `kind` sized for `cells` cells
pub fn create_backend(kind: BackendKind, cells: usize) -> Result<Box<dyn ComputeBackend>, BackendError> {
    match kind {
        BackendKind::PartitionPool => Ok(Box::new(PartitionPool::new(PARTITION_COUNT, cells)?)),
        #[cfg(feature = "parallel")]
        BackendKind::Offload => Ok(Box::new(OffloadExecutor::new(cells)?)),
        #[cfg(not(feature = "parallel"))]
        BackendKind::Offload => Err(BackendError::Unavailable {
            backend: "offload",
            reason: "engine was built without the `parallel` feature".to_string(),
        }),
    }
}

/// Device-side buffer pair shared by every backend
pub(crate) struct DeviceMemory {
    pub(crate) input: CellBuffers,
    pub(crate) output: CellBuffers,
}

impl DeviceMemory {
    pub(crate) fn new(cells: usize) -> Self {
        Self {
            input: CellBuffers::new(cells, CellType::Healthy),
            output: CellBuffers::new(cells, CellType::Healthy),
        }
    }

    #[inline]
    pub(crate) fn cells(&self) -> usize {
        self.input.len()
    }

    fn check_host(&self, host: &CellBuffers) -> Result<(), BackendError> {
        let expected = self.cells();
        let sizes = [host.types.len(), host.medicine.len(), host.updated.len()];
        match sizes.into_iter().find(|&len| len != expected) {
            Some(actual) => Err(BackendError::BufferSizeMismatch { expected, actual }),
            None => Ok(()),
        }
    }

    pub(crate) fn upload(&mut self, host: &CellBuffers) -> Result<(), BackendError> {
        self.check_host(host)?;
        self.input.copy_from(host);
        Ok(())
    }

    pub(crate) fn download(&self, host: &mut CellBuffers) -> Result<(), BackendError> {
        self.check_host(host)?;
        host.copy_from(&self.output);
        Ok(())
    }

    pub(crate) fn check_dispatch(&self, kernel: Kernel, global_work_size: usize) -> Result<(), BackendError> {
        if global_work_size != self.cells() {
            return Err(BackendError::WorkSizeMismatch {
                kernel: kernel.name(),
                expected: self.cells(),
                actual: global_work_size,
            });
        }
        Ok(())
    }
}

/// Write one work item's result into its output slot
#[inline]
pub(crate) fn run_item(
    kernel: Kernel,
    idx: usize,
    input: &CellBuffers,
    topology: &NeighborTable,
    cell: &mut CellType,
    medicine: &mut MedicineRecord,
    updated: &mut bool,
) {
    let slot = kernel.run(idx, input, topology);
    *cell = slot.cell;
    *medicine = slot.medicine;
    *updated = slot.updated;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::{build_neighbor_table, Direction};

    /// Small grid with cancer clusters and medicine heading in every direction
    fn busy_grid(w: u32, h: u32) -> CellBuffers {
        let size = (w * h) as usize;
        let mut buffers = CellBuffers::new(size, CellType::Healthy);
        for idx in 0..size {
            if (idx * 7 + idx / w as usize) % 3 == 0 {
                buffers.types[idx] = CellType::Cancer;
            }
            if idx % 11 == 0 {
                buffers.types[idx] = CellType::Medicine;
                buffers.medicine[idx] = MedicineRecord::travelling(
                    Some(CellType::Healthy),
                    Direction::ALL[idx % 8],
                );
            }
        }
        buffers
    }

    fn run_phases(backend: &mut dyn ComputeBackend, topology: &NeighborTable, host: &mut CellBuffers) {
        for kernel in [Kernel::Transition, Kernel::Diffusion] {
            backend.write_buffer(host).expect("upload");
            backend.dispatch(kernel, host.len(), topology).expect("dispatch");
            backend.read_buffer(host).expect("download");
        }
    }

    #[test]
    fn partition_pool_matches_serial_kernels() {
        let (w, h) = (13, 9);
        let topology = build_neighbor_table(w, h);
        let start = busy_grid(w, h);

        let mut expected = start.clone();
        for kernel in [Kernel::Transition, Kernel::Diffusion] {
            let input = expected.clone();
            for idx in 0..input.len() {
                let slot = kernel.run(idx, &input, &topology);
                expected.types[idx] = slot.cell;
                expected.medicine[idx] = slot.medicine;
                expected.updated[idx] = slot.updated;
            }
        }

        let mut pool = PartitionPool::new(4, start.len()).expect("pool");
        let mut actual = start;
        run_phases(&mut pool, &topology, &mut actual);
        assert_eq!(actual, expected);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn backends_agree_over_several_ticks() {
        let (w, h) = (16, 12);
        let topology = build_neighbor_table(w, h);
        let mut pooled = busy_grid(w, h);
        let mut offloaded = pooled.clone();

        let mut pool = create_backend(BackendKind::PartitionPool, pooled.len()).expect("pool");
        let mut offload = create_backend(BackendKind::Offload, offloaded.len()).expect("offload");
        for _ in 0..10 {
            run_phases(pool.as_mut(), &topology, &mut pooled);
            run_phases(offload.as_mut(), &topology, &mut offloaded);
            assert_eq!(pooled, offloaded);
        }
    }

    #[test]
    fn dispatch_rejects_wrong_work_size() {
        let topology = build_neighbor_table(4, 4);
        let mut pool = PartitionPool::new(2, 16).expect("pool");
        let err = pool.dispatch(Kernel::Transition, 15, &topology).unwrap_err();
        assert!(matches!(
            err,
            BackendError::WorkSizeMismatch { expected: 16, actual: 15, .. }
        ));
    }

    #[test]
    fn upload_rejects_wrong_buffer_size() {
        let mut pool = PartitionPool::new(2, 16).expect("pool");
        let host = CellBuffers::new(12, CellType::Healthy);
        let err = pool.write_buffer(&host).unwrap_err();
        assert!(matches!(
            err,
            BackendError::BufferSizeMismatch { expected: 16, actual: 12 }
        ));
    }

    #[cfg(not(feature = "parallel"))]
    #[test]
    fn offload_needs_parallel_runtime() {
        let err = create_backend(BackendKind::Offload, 16).err().expect("should fail");
        assert!(matches!(err, BackendError::Unavailable { .. }));
    }
}
