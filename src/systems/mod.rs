//! Systems - the per-cell kernels and the backends that execute them

pub mod backend;
pub mod kernels;

pub use backend::{create_backend, Completion, ComputeBackend};
pub use kernels::{CellSlot, Kernel};
